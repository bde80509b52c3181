//! Configuration management for asmd.
//!
//! Parses `asmd.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Values without `${` are taken literally, so a bare `$` needs no escaping.
//!
//! Expanded fields:
//! - `server.host`
//! - `content.pub_dir`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override server host.
    pub host: Option<String>,
    /// Override server port.
    pub port: Option<u16>,
    /// Override the directory holding one content root per subdomain.
    pub pub_dir: Option<PathBuf>,
    /// Override the subdomain used when the request host matches none.
    pub default_subdomain: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "asmd.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Content configuration (paths are relative strings from TOML).
    content: ContentConfigRaw,

    /// Resolved content configuration (set after loading).
    #[serde(skip)]
    pub content_resolved: ContentConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Server configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 8080,
        }
    }
}

/// Raw content configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ContentConfigRaw {
    pub_dir: Option<String>,
    default_subdomain: Option<String>,
    index_filename: Option<String>,
    assets_dir: Option<String>,
}

/// Resolved content configuration with absolute paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentConfig {
    /// Directory holding one content root per subdomain.
    pub pub_dir: PathBuf,
    /// Subdomain served when the request host has no content root.
    pub default_subdomain: String,
    /// File that makes a directory a viewable page.
    pub index_filename: String,
    /// Per-root directory holding the style sheet and title files.
    pub assets_dir: String,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            pub_dir: PathBuf::from("pub"),
            default_subdomain: "default".to_owned(),
            index_filename: "view.md".to_owned(),
            assets_dir: "assets".to_owned(),
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`server.host`").
        field: String,
        /// Error message (e.g., "${`ASMD_HOST`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a string field to name exactly one plain path component.
fn require_single_component(value: &str, field: &str) -> Result<(), ConfigError> {
    require_non_empty(value, field)?;
    if value == "." || value == ".." || value.contains(['/', '\\']) {
        return Err(ConfigError::Validation(format!(
            "{field} must be a single file or directory name, got {value:?}"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `asmd.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(host) = &settings.host {
            self.server.host.clone_from(host);
        }
        if let Some(port) = settings.port {
            self.server.port = port;
        }
        if let Some(pub_dir) = &settings.pub_dir {
            self.content_resolved.pub_dir.clone_from(pub_dir);
        }
        if let Some(subdomain) = &settings.default_subdomain {
            self.content_resolved.default_subdomain.clone_from(subdomain);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        let content = ContentConfig::default();
        Self {
            server: ServerConfig::default(),
            content: ContentConfigRaw::default(),
            content_resolved: ContentConfig {
                pub_dir: base.join(&content.pub_dir),
                ..content
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file and after CLI overrides.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_server()?;
        self.validate_content()?;
        Ok(())
    }

    fn validate_server(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.server.host, "server.host")?;

        // Port 0 is technically valid (OS assigns a random port), but it's
        // unlikely to be intentional in a config file
        if self.server.port == 0 {
            return Err(ConfigError::Validation(
                "server.port cannot be 0".to_owned(),
            ));
        }

        Ok(())
    }

    fn validate_content(&self) -> Result<(), ConfigError> {
        let content = &self.content_resolved;
        require_single_component(&content.default_subdomain, "content.default_subdomain")?;
        require_single_component(&content.index_filename, "content.index_filename")?;
        require_single_component(&content.assets_dir, "content.assets_dir")?;
        if content.pub_dir.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "content.pub_dir cannot be empty".to_owned(),
            ));
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.server.host = expand::expand_env(&self.server.host, "server.host")?;

        if let Some(ref pub_dir) = self.content.pub_dir {
            self.content.pub_dir = Some(expand::expand_env(pub_dir, "content.pub_dir")?);
        }

        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let defaults = ContentConfig::default();
        let raw = &self.content;

        self.content_resolved = ContentConfig {
            pub_dir: config_dir.join(raw.pub_dir.as_deref().map_or(defaults.pub_dir, PathBuf::from)),
            default_subdomain: raw
                .default_subdomain
                .clone()
                .unwrap_or(defaults.default_subdomain),
            index_filename: raw.index_filename.clone().unwrap_or(defaults.index_filename),
            assets_dir: raw.assets_dir.clone().unwrap_or(defaults.assets_dir),
        };
    }
}
