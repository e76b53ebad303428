use std::env;

use crate::{
    common::PROJECT_VERSION,
    tui::{
        ChoiceList, PromptResult, Theme, multiselect_prompt, select_prompt, text_prompt,
    },
};

const PACKAGES_HELP: &str = "↑/↓: navigate • space: toggle • a: toggle all • enter: confirm";

/// Source of answers for the wizard.
///
/// The terminal implementation runs one widget per call; tests substitute a
/// scripted one.
pub trait Prompter {
    fn select(&mut self, title: &str, choices: ChoiceList) -> PromptResult<Option<String>>;

    fn multi_select(&mut self, title: &str, choices: ChoiceList) -> PromptResult<Vec<String>>;

    /// `notice` explains why the previous answer was rejected.
    fn text(
        &mut self,
        title: &str,
        placeholder: &str,
        max_length: usize,
        notice: Option<&str>,
    ) -> PromptResult<String>;
}

/// Runs each prompt as a full-screen widget.
pub struct TerminalPrompter {
    theme: Theme,
}

impl TerminalPrompter {
    /// Colors are dropped when `NO_COLOR` is set.
    #[must_use]
    pub fn new() -> Self {
        let theme = if env::var_os("NO_COLOR").is_some() {
            Theme::plain()
        } else {
            Theme::default()
        };

        Self { theme }
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for TerminalPrompter {
    fn select(&mut self, title: &str, choices: ChoiceList) -> PromptResult<Option<String>> {
        select_prompt(title, choices, Some(PROJECT_VERSION), &self.theme)
    }

    fn multi_select(&mut self, title: &str, choices: ChoiceList) -> PromptResult<Vec<String>> {
        multiselect_prompt(title, choices, Some(PACKAGES_HELP), &self.theme)
    }

    fn text(
        &mut self,
        title: &str,
        placeholder: &str,
        max_length: usize,
        notice: Option<&str>,
    ) -> PromptResult<String> {
        text_prompt(title, placeholder, max_length, notice, &self.theme)
    }
}
