//! Startup and error reporting on stderr.

use std::fmt::Display;

use console::{Style, Term};

/// Width the setting labels are padded to.
const LABEL_WIDTH: usize = 18;

/// Stderr reporter for the serve command.
pub(crate) struct Output {
    term: Term,
    label: Style,
    address: Style,
    failure: Style,
}

impl Output {
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            label: Style::new().dim(),
            address: Style::new().cyan().bold(),
            failure: Style::new().red(),
        }
    }

    /// Announce the address the server is about to listen on.
    pub(crate) fn listening(&self, host: &str, port: u16) {
        let url = format!("http://{host}:{port}");
        self.line(&format!(
            "asmd {} serving {}",
            env!("CARGO_PKG_VERSION"),
            self.address.apply_to(url)
        ));
    }

    /// Print one effective setting as an aligned `label: value` row.
    pub(crate) fn setting(&self, label: &str, value: impl Display) {
        let padded = format!("{label}:{:width$}", "", width = padding(label));
        self.line(&format!("  {}{value}", self.label.apply_to(padded)));
    }

    /// Print a failure that ends the process.
    pub(crate) fn error(&self, err: &dyn Display) {
        self.line(&self.failure.apply_to(format!("Error: {err}")).to_string());
    }

    fn line(&self, text: &str) {
        let _ = self.term.write_line(text);
    }
}

/// Spaces after `label:` so values line up in one column.
fn padding(label: &str) -> usize {
    LABEL_WIDTH.saturating_sub(label.chars().count() + 1).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_padding_aligns_values() {
        assert_eq!("Pub directory".len() + 1 + padding("Pub directory"), LABEL_WIDTH);
        assert_eq!("Config".len() + 1 + padding("Config"), LABEL_WIDTH);
    }

    #[test]
    fn test_padding_keeps_one_space_for_long_labels() {
        assert_eq!(padding("A label longer than the column"), 1);
    }
}
