//! Terminal prompt engine built on ratatui.
//!
//! This module provides the prompt widgets and the runtime that drives them:
//! - `Select` - Single choice from a list
//! - `MultiSelect` - Multiple choice with every item pre-selected
//! - `TextInput` - Capped text input with a placeholder default

mod app;
pub mod components;
mod prompts;
pub mod runtime;
mod theme;

pub use app::TerminalApp;
pub use components::{ChoiceItem, ChoiceList, PromptError, ValidationResult};
pub use prompts::{multiselect_prompt, select_prompt, text_prompt};
pub use runtime::{Completion, Exit, PromptResult};
pub use theme::Theme;
