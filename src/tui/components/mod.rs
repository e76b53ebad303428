//! Prompt widgets and the state primitives they are built from.

mod choice;
mod cursor;
mod multiselect;
mod select;
mod selection;
mod text_buffer;
mod text_input;

pub use choice::{ChoiceItem, ChoiceList};
pub use cursor::Cursor;
pub use multiselect::MultiSelect;
pub use select::Select;
pub use selection::SelectionSet;
pub use text_buffer::TextBuffer;
pub use text_input::TextInput;

use std::io;

use derive_more::Display;
use ratatui::layout::{Constraint, Layout, Rect};

/// Result of input validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    /// Input is valid
    Valid,
    /// Input is invalid with an error message
    Invalid(String),
}

impl ValidationResult {
    /// Returns true if the validation passed.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// Errors raised by the prompt runtime and widget construction.
#[derive(Debug, Display)]
pub enum PromptError {
    /// No interactive terminal session could be acquired.
    #[display("no interactive terminal available: {_0}")]
    RuntimeUnavailable(String),
    /// Labels and descriptions handed to a multi-selection differ in length.
    #[display("mismatched input: {labels} labels but {descriptions} descriptions")]
    MismatchedInput { labels: usize, descriptions: usize },
    /// Drawing or reading events failed mid-run.
    #[display("terminal error: {_0}")]
    Terminal(io::Error),
}

impl std::error::Error for PromptError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Terminal(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for PromptError {
    fn from(value: io::Error) -> Self {
        Self::Terminal(value)
    }
}

/// Horizontally centred box of `percent_x` width and fixed `height`.
#[allow(clippy::indexing_slicing, clippy::arithmetic_side_effects)]
fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height),
        Constraint::Fill(1),
    ])
    .split(area);

    let horizontal = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(vertical[1]);

    horizontal[1]
}
