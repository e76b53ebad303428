//! Multi-selection component with toggle support.

use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState},
};

use super::{ChoiceList, Cursor, PromptError, SelectionSet, centered_rect};
use crate::tui::{
    runtime::{Exit, Flow, PromptEvent, Widget},
    theme::Theme,
};

const CURSOR_MARKER: &str = ">";
const CHECKED: &str = "✓";

/// A multi-selection prompt.
///
/// Every item starts selected. Space/`x` toggles the item under the cursor,
/// `a` switches between "all selected" and "none selected", Enter returns the
/// selected labels in list order.
pub struct MultiSelect<'a> {
    title: &'a str,
    choices: ChoiceList,
    help_message: Option<&'a str>,
    cursor: Cursor,
    selection: SelectionSet,
    label_width: usize,
}

/// One rendered line, split so styling and plain text agree.
struct Row<'r> {
    is_cursor: bool,
    is_selected: bool,
    label: String,
    description: &'r str,
}

impl Row<'_> {
    fn cursor_marker(&self) -> &'static str {
        if self.is_cursor { CURSOR_MARKER } else { " " }
    }

    fn checkbox(&self) -> &'static str {
        if self.is_selected { CHECKED } else { " " }
    }

    fn description_suffix(&self) -> String {
        if self.description.is_empty() {
            String::new()
        } else {
            format!(" - {}", self.description)
        }
    }

    fn plain(&self) -> String {
        format!(
            "{} [{}] {}{}",
            self.cursor_marker(),
            self.checkbox(),
            self.label,
            self.description_suffix()
        )
    }

    fn line(&self, theme: &Theme) -> Line<'static> {
        let label_style = if self.is_selected {
            theme.selected
        } else {
            theme.normal
        };
        let marker_style = if self.is_cursor {
            theme.cursor
        } else {
            theme.normal
        };

        Line::from(vec![
            Span::styled(self.cursor_marker(), marker_style),
            Span::styled(" [", theme.normal),
            Span::styled(self.checkbox(), theme.selected),
            Span::styled("] ", theme.normal),
            Span::styled(self.label.clone(), label_style),
            Span::styled(self.description_suffix(), theme.description),
        ])
    }
}

impl<'a> MultiSelect<'a> {
    /// Creates a new multi-select prompt with every choice pre-selected.
    #[must_use]
    pub fn new(title: &'a str, choices: ChoiceList) -> Self {
        let cursor = Cursor::new(choices.len());
        let selection = SelectionSet::all(choices.len());
        let label_width = choices.label_width();
        Self {
            title,
            choices,
            help_message: None,
            cursor,
            selection,
            label_width,
        }
    }

    /// Creates a prompt from parallel label and description columns.
    ///
    /// # Errors
    ///
    /// Returns `PromptError::MismatchedInput` when the columns differ in length.
    pub fn from_columns(
        title: &'a str,
        labels: Vec<String>,
        descriptions: Vec<String>,
    ) -> Result<Self, PromptError> {
        Ok(Self::new(title, ChoiceList::zip(labels, descriptions)?))
    }

    /// Sets the help message displayed below the list.
    #[must_use]
    pub fn with_help_message(mut self, message: &'a str) -> Self {
        self.help_message = Some(message);
        self
    }

    /// Index of the item under the cursor.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor.index()
    }

    #[must_use]
    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    fn row(&self, index: usize) -> Option<Row<'_>> {
        let item = self.choices.get(index)?;
        Some(Row {
            is_cursor: self.cursor.index() == index,
            is_selected: self.selection.contains(index),
            // padding only lines up descriptions
            label: if item.description.is_empty() {
                item.label.clone()
            } else {
                format!("{:<width$}", item.label, width = self.label_width)
            },
            description: &item.description,
        })
    }

    /// Plain text of row `index` as it appears on screen, without styling.
    ///
    /// Labels are padded to the longest label of the whole list so the
    /// descriptions line up in one column wherever the cursor is.
    #[must_use]
    pub fn row_text(&self, index: usize) -> Option<String> {
        self.row(index).map(|row| row.plain())
    }
}

impl Widget for MultiSelect<'_> {
    type Output = Vec<String>;

    fn update(&mut self, event: &PromptEvent) -> Flow {
        let PromptEvent::Key(key) = event else {
            return Flow::Continue;
        };

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.cursor.up(),
            KeyCode::Down | KeyCode::Char('j') => self.cursor.down(),
            KeyCode::Char(' ' | 'x') => {
                if !self.choices.is_empty() {
                    self.selection.toggle(self.cursor.index());
                }
            }
            KeyCode::Char('a') => self.selection.toggle_all(),
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
        let area = centered_rect(80, height, frame.area());

        frame.render_widget(Clear, area);

        let counter = format!(" {}/{} ", self.selection.count(), self.choices.len());
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border)
            .title(Span::styled(self.title, theme.title))
            .title_top(Line::from(Span::styled(counter, theme.help)).alignment(Alignment::Right));

        let inner_area = block.inner(area);
        frame.render_widget(block, area);

        let chunks =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(inner_area);

        let list_items: Vec<ListItem> = (0..self.choices.len())
            .filter_map(|idx| self.row(idx))
            .map(|row| ListItem::new(row.line(theme)))
            .collect();

        let mut state = ListState::default().with_selected(Some(self.cursor.index()));
        let list = List::new(list_items).scroll_padding(1);
        frame.render_stateful_widget(list, chunks[0], &mut state);

        let help_text = self
            .help_message
            .unwrap_or("Space toggle, a select/unselect all, Enter confirm");
        frame.render_widget(Line::from(Span::styled(help_text, theme.help)), chunks[1]);
    }

    fn extract(self) -> Self::Output {
        self.selection
            .indices()
            .filter_map(|idx| self.choices.get(idx).map(|item| item.label.clone()))
            .collect()
    }
}
