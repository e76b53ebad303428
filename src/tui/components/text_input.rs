//! Text input component.

use std::time::Duration;

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::{TextBuffer, centered_rect};
use crate::tui::{
    runtime::{Exit, Flow, PromptEvent, Widget},
    theme::Theme,
};

const BLINK_INTERVAL: Duration = Duration::from_millis(530);
const HELP_MESSAGE: &str = "Enter to submit, Esc to keep the default";

/// A single-line text prompt with a placeholder default.
///
/// The widget does not validate: callers check the returned value and run
/// the prompt again with an error notice when it is rejected.
pub struct TextInput<'a> {
    title: &'a str,
    error_message: Option<&'a str>,
    buffer: TextBuffer,
    cursor_visible: bool,
}

impl<'a> TextInput<'a> {
    /// Creates a new text input prompt.
    #[must_use]
    pub fn new(title: &'a str, placeholder: impl Into<String>, max_length: usize) -> Self {
        Self {
            title,
            error_message: None,
            buffer: TextBuffer::new(placeholder, max_length),
            cursor_visible: true,
        }
    }

    /// Shows an error notice below the input, typically why the previous
    /// answer was rejected.
    #[must_use]
    pub fn with_error_message(mut self, message: Option<&'a str>) -> Self {
        self.error_message = message;
        self
    }

    #[must_use]
    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }
}

impl Widget for TextInput<'_> {
    type Output = String;

    fn tick_rate(&self) -> Option<Duration> {
        Some(BLINK_INTERVAL)
    }

    fn update(&mut self, event: &PromptEvent) -> Flow {
        let key = match event {
            PromptEvent::Key(key) => key,
            PromptEvent::Tick => {
                self.cursor_visible = !self.cursor_visible;
                return Flow::Continue;
            }
            PromptEvent::Resize(..) => return Flow::Continue,
        };

        // keep the cursor solid while typing
        self.cursor_visible = true;

        match key.code {
            KeyCode::Enter => return Flow::Quit(Exit::Confirmed),
            KeyCode::Esc => return Flow::Quit(Exit::Cancelled),
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.buffer.insert(c);
            }
            KeyCode::Backspace => self.buffer.backspace(),
            KeyCode::Delete => self.buffer.delete(),
            KeyCode::Left => self.buffer.left(),
            KeyCode::Right => self.buffer.right(),
            KeyCode::Home => self.buffer.home(),
            KeyCode::End => self.buffer.end(),
            _ => {}
        }

        Flow::Continue
    }

    #[allow(clippy::indexing_slicing)]
    fn render(&self, frame: &mut Frame, theme: &Theme) {
        let area = centered_rect(60, 9, frame.area());

        frame.render_widget(Clear, area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border);

        let inner_area = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner_area);

        let title_line = Line::from(Span::styled(self.title, theme.title));
        frame.render_widget(Paragraph::new(title_line), chunks[0]);

        let input_width = chunks[1].width.saturating_sub(2);
        let scroll = calculate_scroll(self.buffer.visual_cursor(), usize::from(input_width));

        let text = if self.buffer.is_empty() {
            Line::from(Span::styled(self.buffer.placeholder(), theme.placeholder))
        } else {
            Line::from(Span::styled(self.buffer.content(), theme.normal))
        };

        let scroll_x = u16::try_from(scroll).unwrap_or(u16::MAX);
        let input_widget = Paragraph::new(text).scroll((0, scroll_x)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border),
        );
        frame.render_widget(input_widget, chunks[1]);

        // no room for a cursor inside the input box on very narrow frames
        if self.cursor_visible && input_width > 0 {
            let offset = self.buffer.visual_cursor().saturating_sub(scroll);
            let offset = u16::try_from(offset).unwrap_or(u16::MAX).min(input_width);
            let cursor_x = chunks[1].x.saturating_add(1).saturating_add(offset);
            let cursor_y = chunks[1].y.saturating_add(1);
            frame.set_cursor_position((cursor_x, cursor_y));
        }

        let footer = if let Some(err) = self.error_message {
            Line::from(Span::styled(err, theme.error))
        } else {
            Line::from(Span::styled(HELP_MESSAGE, theme.help))
        };
        frame.render_widget(Paragraph::new(footer), chunks[2]);
    }

    fn extract(self) -> Self::Output {
        self.buffer.effective_value()
    }
}

fn calculate_scroll(cursor: usize, width: usize) -> usize {
    if width == 0 {
        0
    } else if cursor >= width {
        cursor.saturating_sub(width).saturating_add(1)
    } else {
        0
    }
}
