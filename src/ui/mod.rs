//! Terminal output.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] for styled terminal output
//! - [`MockUI`] for capturing output in tests
//! - [`Table`] for tabular listings
//!
//! # Example
//!
//! ```
//! use deployrc::ui::{create_ui, OutputMode};
//!
//! let mut ui = create_ui(OutputMode::Quiet);
//! ui.success("Configuration resolved");
//! ```

pub mod mock;
pub mod output;
pub mod table;
pub mod terminal;
pub mod theme;

pub use mock::MockUI;
pub use output::OutputMode;
pub use table::Table;
pub use terminal::{create_ui, TerminalUI};
pub use theme::{should_use_colors, Theme};

/// Trait for user interface interactions.
///
/// This trait allows capturing output in tests.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Display a message to the user.
    ///
    /// Used for primary command output, so it is shown in every mode.
    fn message(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message. Always shown.
    fn error(&mut self, msg: &str);

    /// Show a header/banner.
    fn show_header(&mut self, title: &str);
}
