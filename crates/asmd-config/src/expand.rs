//! Environment variable expansion for configuration strings.

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in `value`.
///
/// Values without a `${` reference are returned as written, so a literal `$`
/// in a path or host never triggers a lookup. `field` names the configuration
/// key and is only used for error reporting.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env(value)
        .map(std::borrow::Cow::into_owned)
        .map_err(|e| ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{}}} not set", e.var_name),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_is_unchanged() {
        assert_eq!(expand_env("pub", "content.pub_dir").unwrap(), "pub");
    }

    #[test]
    fn test_bare_dollar_is_unchanged() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("unsetcost");
        }

        let value = expand_env("/srv/a$unsetcost/pub", "content.pub_dir").unwrap();

        assert_eq!(value, "/srv/a$unsetcost/pub");
    }

    #[test]
    fn test_default_used_when_unset() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("ASMD_EXPAND_UNSET");
        }

        let value = expand_env("${ASMD_EXPAND_UNSET:-0.0.0.0}", "server.host").unwrap();

        assert_eq!(value, "0.0.0.0");
    }

    #[test]
    fn test_missing_var_reports_field() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("ASMD_EXPAND_MISSING");
        }

        let err = expand_env("${ASMD_EXPAND_MISSING}", "server.host").unwrap_err();

        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("server.host"));
        assert!(err.to_string().contains("ASMD_EXPAND_MISSING"));
    }
}
