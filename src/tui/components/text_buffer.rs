//! Editable single-line buffer with a placeholder and a length cap.

use tui_input::{Input, InputRequest};

/// A capped text buffer.
///
/// `content` never holds more than `max_length` characters: inserts past the
/// cap are dropped silently. The placeholder is what the user sees while the
/// buffer is empty, and what [`TextBuffer::effective_value`] returns then.
#[derive(Debug, Clone)]
pub struct TextBuffer {
    input: Input,
    placeholder: String,
    max_length: usize,
}

impl TextBuffer {
    #[must_use]
    pub fn new(placeholder: impl Into<String>, max_length: usize) -> Self {
        Self {
            input: Input::default(),
            placeholder: placeholder.into(),
            max_length,
        }
    }

    #[must_use]
    pub fn content(&self) -> &str {
        self.input.value()
    }

    #[must_use]
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    #[must_use]
    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Content length in characters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.input.value().chars().count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.input.value().is_empty()
    }

    /// Text cursor position, in characters, within `0..=len`.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.input.cursor()
    }

    /// Column of the cursor on screen (accounts for wide characters).
    #[must_use]
    pub fn visual_cursor(&self) -> usize {
        self.input.visual_cursor()
    }

    /// Inserts `c` at the cursor. Returns false when the buffer is full.
    pub fn insert(&mut self, c: char) -> bool {
        if self.len() >= self.max_length {
            return false;
        }
        self.input.handle(InputRequest::InsertChar(c));
        true
    }

    /// Removes the character before the cursor.
    pub fn backspace(&mut self) {
        self.input.handle(InputRequest::DeletePrevChar);
    }

    /// Removes the character under the cursor.
    pub fn delete(&mut self) {
        self.input.handle(InputRequest::DeleteNextChar);
    }

    pub fn left(&mut self) {
        self.input.handle(InputRequest::GoToPrevChar);
    }

    pub fn right(&mut self) {
        self.input.handle(InputRequest::GoToNextChar);
    }

    pub fn home(&mut self) {
        self.input.handle(InputRequest::GoToStart);
    }

    pub fn end(&mut self) {
        self.input.handle(InputRequest::GoToEnd);
    }

    /// The typed content, or the placeholder when nothing was typed.
    #[must_use]
    pub fn effective_value(&self) -> String {
        if self.is_empty() {
            self.placeholder.clone()
        } else {
            self.input.value().to_string()
        }
    }
}
