//! High-level prompt functions for common use cases.
//!
//! Each call acquires the terminal, runs one widget to completion and
//! releases the terminal before returning.

use super::{
    components::{ChoiceList, MultiSelect, Select, TextInput},
    runtime::{PromptResult, run},
    theme::Theme,
};

/// Creates a single-selection prompt.
///
/// # Returns
///
/// - `Ok(completion)` - label under the cursor (`None` for an empty list)
/// - `Err(PromptError::RuntimeUnavailable)` - no interactive terminal
/// - `Err(_)` - Terminal error
///
/// # Example
///
/// ```ignore
/// let answer = select_prompt(
///     "Do you agree to update the system packages?",
///     ChoiceList::from_labels(["Yes", "No"]),
///     None,
///     &Theme::default(),
/// )?;
/// ```
pub fn select_prompt(
    title: &str,
    choices: ChoiceList,
    subtitle: Option<&str>,
    theme: &Theme,
) -> PromptResult<Option<String>> {
    let mut prompt = Select::new(title, choices);

    if let Some(s) = subtitle {
        prompt = prompt.with_subtitle(s);
    }

    run(prompt, theme)
}

/// Creates a multi-selection prompt with every choice pre-selected.
///
/// # Returns
///
/// - `Ok(completion)` - selected labels, in list order
/// - `Err(_)` - Terminal error
pub fn multiselect_prompt(
    title: &str,
    choices: ChoiceList,
    help: Option<&str>,
    theme: &Theme,
) -> PromptResult<Vec<String>> {
    let mut prompt = MultiSelect::new(title, choices);

    if let Some(h) = help {
        prompt = prompt.with_help_message(h);
    }

    run(prompt, theme)
}

/// Creates a text input prompt.
///
/// # Arguments
///
/// * `title` - The prompt title
/// * `placeholder` - Shown while empty and returned when nothing was typed
/// * `max_length` - Maximum number of characters accepted
/// * `error` - Notice explaining why a previous answer was rejected
pub fn text_prompt(
    title: &str,
    placeholder: &str,
    max_length: usize,
    error: Option<&str>,
    theme: &Theme,
) -> PromptResult<String> {
    let prompt = TextInput::new(title, placeholder, max_length).with_error_message(error);
    run(prompt, theme)
}
