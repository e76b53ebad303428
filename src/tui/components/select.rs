//! Single selection component.

use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState},
};

use super::{ChoiceList, Cursor, centered_rect};
use crate::tui::{
    runtime::{Exit, Flow, PromptEvent, Widget},
    theme::Theme,
};

/// A single selection prompt.
///
/// Up/`k` and Down/`j` move the cursor with wrap-around, Enter returns the
/// label under the cursor. Every other key is ignored.
pub struct Select<'a> {
    title: &'a str,
    subtitle: Option<&'a str>,
    choices: ChoiceList,
    cursor: Cursor,
}

impl<'a> Select<'a> {
    /// Creates a new select prompt with the given title and choices.
    #[must_use]
    pub fn new(title: &'a str, choices: ChoiceList) -> Self {
        let cursor = Cursor::new(choices.len());
        Self {
            title,
            subtitle: None,
            choices,
            cursor,
        }
    }

    /// Sets the subtitle displayed in the top-right corner.
    #[must_use]
    pub fn with_subtitle(mut self, subtitle: &'a str) -> Self {
        self.subtitle = Some(subtitle);
        self
    }

    /// Index of the item under the cursor.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor.index()
    }
}

impl Widget for Select<'_> {
    /// `None` only for an empty list.
    type Output = Option<String>;

    fn init(&mut self) -> Flow {
        if self.choices.is_empty() {
            Flow::Quit(Exit::Confirmed)
        } else {
            Flow::Continue
        }
    }

    fn update(&mut self, event: &PromptEvent) -> Flow {
        let PromptEvent::Key(key) = event else {
            return Flow::Continue;
        };

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.cursor.up(),
            KeyCode::Down | KeyCode::Char('j') => self.cursor.down(),
            KeyCode::Enter => return Flow::Quit(Exit::Confirmed),
            _ => {}
        }

        Flow::Continue
    }

    #[allow(
        clippy::indexing_slicing,
        clippy::arithmetic_side_effects,
        clippy::cast_possible_truncation
    )]
    fn render(&self, frame: &mut Frame, theme: &Theme) {
        // Cap list height to max 15 items visible (plus border + help) to ensure scrolling works
        let max_visible_items: u16 = 15;
        let visible = u16::try_from(self.choices.len()).unwrap_or(u16::MAX);
        let list_height = visible.min(max_visible_items) + 4;
        let height = list_height.min(frame.area().height.saturating_sub(2));
        let area = centered_rect(60, height, frame.area());

        frame.render_widget(Clear, area);

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border)
            .title(Span::styled(self.title, theme.title));

        if let Some(subtitle) = self.subtitle {
            block = block.title_top(
                Line::from(Span::styled(subtitle, theme.help)).alignment(Alignment::Right),
            );
        }

        let inner_area = block.inner(area);
        frame.render_widget(block, area);

        let chunks =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(inner_area);

        let list_items: Vec<ListItem> = self
            .choices
            .iter()
            .enumerate()
            .map(|(idx, item)| {
                let is_cursor = self.cursor.index() == idx;
                let (marker, style) = if is_cursor {
                    ("→", theme.cursor)
                } else {
                    (" ", theme.normal)
                };

                ListItem::new(Line::from(Span::styled(
                    format!("{marker} {}", item.label),
                    style,
                )))
            })
            .collect();

        let mut state = ListState::default().with_selected(Some(self.cursor.index()));
        let list = List::new(list_items).scroll_padding(1);
        frame.render_stateful_widget(list, chunks[0], &mut state);

        let help_text = "↑↓/jk navigate, Enter select";
        frame.render_widget(Line::from(Span::styled(help_text, theme.help)), chunks[1]);
    }

    fn extract(self) -> Self::Output {
        let index = self.cursor.index();
        self.choices.get(index).map(|item| item.label.clone())
    }
}
