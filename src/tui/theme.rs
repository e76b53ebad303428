//! Theme configuration for consistent styling across TUI components.

use ratatui::style::{Color, Modifier, Style};

// 256-colour palette indices, readable on the default Windows Terminal scheme
const PINK: Color = Color::Indexed(205);
const GREEN: Color = Color::Indexed(34);
const WHITE: Color = Color::Indexed(15);
const GREY: Color = Color::Indexed(244);
const BLUE: Color = Color::Indexed(69);
const RED: Color = Color::Indexed(203);

/// Theme configuration for TUI components.
///
/// A theme is plain data handed to every `render` call, so independent
/// prompt runs never share styling state.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Style for titles and headers
    pub title: Style,
    /// Style for the row under the cursor and the cursor marker
    pub cursor: Style,
    /// Style for checked items in a multi-selection
    pub selected: Style,
    /// Style for normal, unselected items
    pub normal: Style,
    /// Style for item descriptions
    pub description: Style,
    /// Style for the placeholder shown in an empty text input
    pub placeholder: Style,
    /// Style for help text at the bottom
    pub help: Style,
    /// Style for error notices
    pub error: Style,
    /// Style for borders
    pub border: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            title: Style::default().fg(BLUE).add_modifier(Modifier::BOLD),
            cursor: Style::default().fg(PINK),
            selected: Style::default().fg(GREEN).add_modifier(Modifier::BOLD),
            normal: Style::default().fg(WHITE),
            description: Style::default().fg(GREY),
            placeholder: Style::default().fg(GREY).add_modifier(Modifier::ITALIC),
            help: Style::default().fg(GREY),
            error: Style::default().fg(RED),
            border: Style::default().fg(BLUE),
        }
    }
}

impl Theme {
    /// A theme without any colour, for terminals that cannot render them.
    #[must_use]
    pub fn plain() -> Self {
        let plain = Style::default();
        Self {
            title: plain.add_modifier(Modifier::BOLD),
            cursor: plain.add_modifier(Modifier::REVERSED),
            selected: plain.add_modifier(Modifier::BOLD),
            normal: plain,
            description: plain,
            placeholder: plain.add_modifier(Modifier::DIM),
            help: plain.add_modifier(Modifier::DIM),
            error: plain.add_modifier(Modifier::BOLD),
            border: plain,
        }
    }
}
