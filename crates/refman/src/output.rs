//! Styled terminal output for the CLI.

use console::{Style, Term};

/// Writes user-facing status lines to stderr.
///
/// Warnings and errors carry a colored `warning:`/`error:` prefix so
/// they stand out between the per-page detail lines around them.
pub(crate) struct Output {
    term: Term,
    dim: Style,
    green: Style,
    yellow: Style,
    red: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            dim: Style::new().dim(),
            green: Style::new().green(),
            yellow: Style::new().yellow().bold(),
            red: Style::new().red().bold(),
        }
    }

    /// Secondary detail line, dimmed.
    pub(crate) fn info(&self, msg: &str) {
        let _ = self.term.write_line(&self.dim.apply_to(msg).to_string());
    }

    /// Final status line, green.
    pub(crate) fn success(&self, msg: &str) {
        let _ = self.term.write_line(&self.green.apply_to(msg).to_string());
    }

    /// One warning, `warning:` prefix in yellow.
    pub(crate) fn warning(&self, msg: &str) {
        let prefix = self.yellow.apply_to("warning:");
        let _ = self.term.write_line(&format!("{prefix} {msg}"));
    }

    /// One error, `error:` prefix in red.
    pub(crate) fn error(&self, msg: &str) {
        let prefix = self.red.apply_to("error:");
        let _ = self.term.write_line(&format!("{prefix} {msg}"));
    }
}
