use std::{collections::VecDeque, io, time::Duration};

use archavisto::tui::{
    ChoiceList, Exit, Theme,
    components::{MultiSelect, Select, TextInput},
    runtime::{EventSource, PromptEvent, drive},
};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{Terminal, backend::TestBackend};

/// Replays a fixed list of events.
struct Keys(VecDeque<PromptEvent>);

impl Keys {
    fn new(codes: impl IntoIterator<Item = KeyCode>) -> Self {
        Self(codes.into_iter().map(PromptEvent::key).collect())
    }

    fn typed(text: &str) -> Self {
        Self::new(text.chars().map(KeyCode::Char).chain([KeyCode::Enter]))
    }
}

impl EventSource for Keys {
    fn next_event(&mut self, _tick: Option<Duration>) -> io::Result<PromptEvent> {
        self.0
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "no more keys"))
    }
}

fn terminal() -> Terminal<TestBackend> {
    Terminal::new(TestBackend::new(80, 24)).unwrap()
}

fn screen(terminal: &Terminal<TestBackend>) -> String {
    let buffer = terminal.backend().buffer();
    let width = usize::from(buffer.area.width);
    buffer
        .content()
        .chunks(width)
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

fn packages() -> ChoiceList {
    ChoiceList::from_labels(["duf", "jq", "k9s"])
}

#[test]
fn test_single_choice_down_then_confirm() {
    let mut keys = Keys::new([KeyCode::Down, KeyCode::Enter]);
    let widget = Select::new("Update?", ChoiceList::from_labels(["Yes", "No"]));

    let completion = drive(&mut terminal(), &mut keys, &Theme::default(), widget).unwrap();

    assert_eq!(completion.value.as_deref(), Some("No"));
    assert_eq!(completion.exit, Exit::Confirmed);
}

#[test]
fn test_single_choice_wraps_both_ways() {
    let mut keys = Keys::new([KeyCode::Up, KeyCode::Char('k'), KeyCode::Enter]);
    let widget = Select::new("Shell", ChoiceList::from_labels(["zsh", "bash", "fish"]));

    let completion = drive(&mut terminal(), &mut keys, &Theme::default(), widget).unwrap();

    assert_eq!(completion.value.as_deref(), Some("bash"));

    let mut keys = Keys::new([KeyCode::Char('j'), KeyCode::Down, KeyCode::Down, KeyCode::Enter]);
    let widget = Select::new("Shell", ChoiceList::from_labels(["zsh", "bash", "fish"]));

    let completion = drive(&mut terminal(), &mut keys, &Theme::default(), widget).unwrap();

    assert_eq!(completion.value.as_deref(), Some("zsh"));
}

#[test]
fn test_single_choice_ignores_unknown_keys() {
    let mut keys = Keys::new([KeyCode::Char('z'), KeyCode::Tab, KeyCode::Esc, KeyCode::Enter]);
    let widget = Select::new("Update?", ChoiceList::from_labels(["Yes", "No"]));

    let completion = drive(&mut terminal(), &mut keys, &Theme::default(), widget).unwrap();

    assert_eq!(completion.value.as_deref(), Some("Yes"));
}

#[test]
fn test_single_choice_empty_list_quits_immediately() {
    let mut keys = Keys::new([]);
    let widget = Select::new("Shell", ChoiceList::default());

    let completion = drive(&mut terminal(), &mut keys, &Theme::default(), widget).unwrap();

    assert_eq!(completion.value, None);
}

#[test]
fn test_multi_choice_default_selects_everything() {
    let mut keys = Keys::new([KeyCode::Enter]);
    let widget = MultiSelect::new("Packages", packages());

    let completion = drive(&mut terminal(), &mut keys, &Theme::default(), widget).unwrap();

    assert_eq!(completion.value, vec!["duf", "jq", "k9s"]);
}

#[test]
fn test_multi_choice_toggle_first_then_confirm() {
    let mut keys = Keys::new([KeyCode::Char(' '), KeyCode::Enter]);
    let widget = MultiSelect::new("Packages", packages());

    let completion = drive(&mut terminal(), &mut keys, &Theme::default(), widget).unwrap();

    assert_eq!(completion.value, vec!["jq", "k9s"]);
}

#[test]
fn test_multi_choice_select_all_twice_restores_everything() {
    let mut keys = Keys::new([KeyCode::Char('a'), KeyCode::Char('a'), KeyCode::Enter]);
    let widget = MultiSelect::new("Packages", packages());

    let completion = drive(&mut terminal(), &mut keys, &Theme::default(), widget).unwrap();

    assert_eq!(completion.value, vec!["duf", "jq", "k9s"]);
}

#[test]
fn test_multi_choice_result_follows_list_order() {
    // clear, then pick k9s before duf
    let mut keys = Keys::new([
        KeyCode::Char('a'),
        KeyCode::Up,
        KeyCode::Char('x'),
        KeyCode::Down,
        KeyCode::Char(' '),
        KeyCode::Enter,
    ]);
    let widget = MultiSelect::new("Packages", packages());

    let completion = drive(&mut terminal(), &mut keys, &Theme::default(), widget).unwrap();

    assert_eq!(completion.value, vec!["duf", "k9s"]);
}

#[test]
fn test_multi_choice_empty_list_confirms_nothing() {
    let mut keys = Keys::new([KeyCode::Char(' '), KeyCode::Char('a'), KeyCode::Enter]);
    let widget = MultiSelect::new("Profiles", ChoiceList::default());

    let completion = drive(&mut terminal(), &mut keys, &Theme::default(), widget).unwrap();

    assert!(completion.value.is_empty());
}

#[test]
fn test_multi_choice_interrupt_keeps_current_selection() {
    let mut keys = Keys(VecDeque::from([
        PromptEvent::key(KeyCode::Char(' ')),
        PromptEvent::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
    ]));
    let widget = MultiSelect::new("Packages", packages());

    let completion = drive(&mut terminal(), &mut keys, &Theme::default(), widget).unwrap();

    assert_eq!(completion.exit, Exit::Interrupted);
    assert_eq!(completion.value, vec!["jq", "k9s"]);
}

#[test]
fn test_multi_choice_renders_aligned_rows() {
    let mut terminal = terminal();
    let mut keys = Keys::new([KeyCode::Char(' '), KeyCode::Down, KeyCode::Enter]);
    let choices = ChoiceList::zip(
        vec!["duf".into(), "helmfile".into()],
        vec!["fancy disk usage".into(), "deploy helm charts".into()],
    )
    .unwrap();
    let widget = MultiSelect::new("Packages", choices);

    drive(&mut terminal, &mut keys, &Theme::plain(), widget).unwrap();

    // last frame drawn before Enter: cursor on helmfile, duf unchecked
    let screen = screen(&terminal);
    assert!(screen.contains("  [ ] duf      - fancy disk usage"), "{screen}");
    assert!(screen.contains("> [✓] helmfile - deploy helm charts"), "{screen}");
    assert!(screen.contains(" 1/2 "), "{screen}");
}

#[test]
fn test_text_input_is_capped() {
    let mut keys = Keys::typed("toolong123");
    let widget = TextInput::new("Enter your username", "arch", 8);

    let completion = drive(&mut terminal(), &mut keys, &Theme::default(), widget).unwrap();

    assert_eq!(completion.value, "toolong1");
    assert_eq!(completion.exit, Exit::Confirmed);
}

#[test]
fn test_text_input_empty_returns_placeholder() {
    let mut keys = Keys::new([KeyCode::Enter]);
    let widget = TextInput::new("Enter your username", "arch", 32);

    let completion = drive(&mut terminal(), &mut keys, &Theme::default(), widget).unwrap();

    assert_eq!(completion.value, "arch");
}

#[test]
fn test_text_input_escape_cancels_with_content() {
    let mut keys = Keys::new([KeyCode::Char('b'), KeyCode::Char('o'), KeyCode::Char('b'), KeyCode::Esc]);
    let widget = TextInput::new("Enter your username", "arch", 32);

    let completion = drive(&mut terminal(), &mut keys, &Theme::default(), widget).unwrap();

    assert_eq!(completion.value, "bob");
    assert_eq!(completion.exit, Exit::Cancelled);
}

#[test]
fn test_text_input_editing_keys() {
    let mut keys = Keys::new([
        KeyCode::Char('a'),
        KeyCode::Char('c'),
        KeyCode::Left,
        KeyCode::Char('b'),
        KeyCode::Home,
        KeyCode::Delete,
        KeyCode::End,
        KeyCode::Backspace,
        KeyCode::Char('z'),
        KeyCode::Enter,
    ]);
    let widget = TextInput::new("Enter your username", "arch", 32);

    let completion = drive(&mut terminal(), &mut keys, &Theme::default(), widget).unwrap();

    assert_eq!(completion.value, "bz");
}

#[test]
fn test_text_input_survives_narrow_terminal() {
    let mut terminal = Terminal::new(TestBackend::new(6, 20)).unwrap();
    let mut keys = Keys::typed("a");
    let widget = TextInput::new("Enter your username", "arch", 32);

    let completion = drive(&mut terminal, &mut keys, &Theme::default(), widget).unwrap();

    assert_eq!(completion.value, "a");
}

#[test]
fn test_text_input_shows_error_notice() {
    let mut terminal = terminal();
    let mut keys = Keys::new([KeyCode::Char('x'), KeyCode::Enter]);
    let widget = TextInput::new("Enter your username", "arch", 32)
        .with_error_message(Some("Invalid username!"));

    drive(&mut terminal, &mut keys, &Theme::plain(), widget).unwrap();

    let screen = screen(&terminal);
    assert!(screen.contains("Enter your username"), "{screen}");
    assert!(screen.contains("Invalid username!"), "{screen}");
}
