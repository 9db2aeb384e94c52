//! Styled terminal UI.

use console::Term;
use std::io::Write;

use super::{should_use_colors, OutputMode, Theme, UserInterface};

/// Terminal UI implementation.
///
/// Primary output goes to stdout; warnings and errors go to stderr so that
/// `deployrc show --json > config.json` stays machine-readable.
pub struct TerminalUI {
    out: Term,
    err: Term,
    theme: Theme,
    mode: OutputMode,
}

impl TerminalUI {
    /// Create a new terminal UI.
    pub fn new(mode: OutputMode) -> Self {
        let theme = if should_use_colors() {
            Theme::new()
        } else {
            Theme::plain()
        };

        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            theme,
            mode,
        }
    }
}

impl UserInterface for TerminalUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        writeln!(self.out, "{}", msg).ok();
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.out, "{}", self.theme.format_success(msg)).ok();
        }
    }

    fn warning(&mut self, msg: &str) {
        writeln!(self.err, "{}", self.theme.format_warning(msg)).ok();
    }

    fn error(&mut self, msg: &str) {
        writeln!(self.err, "{}", self.theme.format_error(msg)).ok();
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_status() {
            writeln!(self.out, "\n{}\n", self.theme.format_header(title)).ok();
        }
    }
}

/// Create the terminal UI for the given output mode.
pub fn create_ui(mode: OutputMode) -> Box<dyn UserInterface> {
    Box::new(TerminalUI::new(mode))
}
