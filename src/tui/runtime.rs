//! Generic prompt driver.
//!
//! Every widget implements [`Widget`]; [`run`] hands it the terminal,
//! feeds it one event at a time and re-renders after each transition until
//! the widget asks to quit, then extracts its value.

use std::{io, time::Duration};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::debug;
use ratatui::{Frame, Terminal, backend::Backend};

use super::{TerminalApp, components::PromptError, theme::Theme};

/// Input delivered to a widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptEvent {
    Key(KeyEvent),
    Resize(u16, u16),
    /// Cosmetic timer tick, only sent to widgets that asked for one.
    Tick,
}

impl PromptEvent {
    /// Shorthand for a plain key press.
    #[must_use]
    pub fn key(code: KeyCode) -> Self {
        Self::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn is_interrupt(&self) -> bool {
        matches!(
            self,
            Self::Key(KeyEvent {
                code: KeyCode::Char('c'),
                modifiers,
                ..
            }) if modifiers.contains(KeyModifiers::CONTROL)
        )
    }
}

/// How a prompt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    /// The widget's confirm key.
    Confirmed,
    /// The widget's own abort key (Esc in text input).
    Cancelled,
    /// Ctrl+C, handled by the runtime for every widget.
    Interrupted,
}

/// Outcome of a single transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Flow {
    Continue,
    Quit(Exit),
}

/// The value a widget produced and how the run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion<T> {
    pub value: T,
    pub exit: Exit,
}

/// Result type for prompt runs.
pub type PromptResult<T> = Result<Completion<T>, PromptError>;

/// Contract shared by all prompt widgets.
pub trait Widget {
    type Output;

    /// Called once before the first frame. Returning `Flow::Quit` ends the run
    /// without reading any event.
    fn init(&mut self) -> Flow {
        Flow::Continue
    }

    /// Interval of the cosmetic tick, if the widget wants one.
    fn tick_rate(&self) -> Option<Duration> {
        None
    }

    /// Applies one event.
    fn update(&mut self, event: &PromptEvent) -> Flow;

    /// Draws the current state.
    fn render(&self, frame: &mut Frame, theme: &Theme);

    /// Consumes the widget and returns its value.
    fn extract(self) -> Self::Output;
}

/// Source of prompt events.
pub trait EventSource {
    /// Blocks until the next event. With a `tick` interval, returns
    /// `PromptEvent::Tick` when nothing arrived within it.
    fn next_event(&mut self, tick: Option<Duration>) -> io::Result<PromptEvent>;
}

/// Events read from the real terminal through crossterm.
#[derive(Debug, Default)]
pub struct CrosstermEvents;

impl EventSource for CrosstermEvents {
    fn next_event(&mut self, tick: Option<Duration>) -> io::Result<PromptEvent> {
        loop {
            if let Some(interval) = tick
                && !event::poll(interval)?
            {
                return Ok(PromptEvent::Tick);
            }

            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    return Ok(PromptEvent::Key(key));
                }
                Event::Resize(width, height) => return Ok(PromptEvent::Resize(width, height)),
                _ => {}
            }
        }
    }
}

fn draw<B, W>(terminal: &mut Terminal<B>, widget: &W, theme: &Theme) -> Result<(), PromptError>
where
    B: Backend,
    B::Error: Send + Sync + 'static,
    W: Widget,
{
    terminal
        .draw(|frame| widget.render(frame, theme))
        .map_err(io::Error::other)?;
    Ok(())
}

/// Runs `widget` to completion on an already acquired terminal.
///
/// Ctrl+C is intercepted before the widget sees it and ends the run with
/// `Exit::Interrupted`, keeping whatever the widget holds.
pub fn drive<B, E, W>(
    terminal: &mut Terminal<B>,
    events: &mut E,
    theme: &Theme,
    mut widget: W,
) -> PromptResult<W::Output>
where
    B: Backend,
    B::Error: Send + Sync + 'static,
    E: EventSource,
    W: Widget,
{
    if let Flow::Quit(exit) = widget.init() {
        return Ok(Completion {
            value: widget.extract(),
            exit,
        });
    }

    let tick = widget.tick_rate();
    draw(terminal, &widget, theme)?;

    loop {
        let event = events.next_event(tick)?;

        let flow = if event.is_interrupt() {
            debug!("prompt interrupted");
            Flow::Quit(Exit::Interrupted)
        } else {
            widget.update(&event)
        };

        match flow {
            Flow::Continue => draw(terminal, &widget, theme)?,
            Flow::Quit(exit) => {
                return Ok(Completion {
                    value: widget.extract(),
                    exit,
                });
            }
        }
    }
}

/// Acquires the terminal, runs `widget` and releases the terminal again.
///
/// # Errors
///
/// `PromptError::RuntimeUnavailable` when no interactive terminal is present;
/// the widget is never updated in that case.
pub fn run<W: Widget>(widget: W, theme: &Theme) -> PromptResult<W::Output> {
    let mut app = TerminalApp::new()?;
    drive(app.terminal(), &mut CrosstermEvents, theme, widget)
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use ratatui::backend::TestBackend;

    use super::*;

    struct Scripted(VecDeque<PromptEvent>);

    impl EventSource for Scripted {
        fn next_event(&mut self, _tick: Option<Duration>) -> io::Result<PromptEvent> {
            self.0
                .pop_front()
                .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "script exhausted"))
        }
    }

    /// Counts keys until Enter.
    #[derive(Default)]
    struct Counter {
        updates: usize,
        renders: std::cell::Cell<usize>,
    }

    impl Widget for Counter {
        type Output = (usize, usize);

        fn update(&mut self, event: &PromptEvent) -> Flow {
            self.updates += 1;
            match event {
                PromptEvent::Key(KeyEvent {
                    code: KeyCode::Enter,
                    ..
                }) => Flow::Quit(Exit::Confirmed),
                _ => Flow::Continue,
            }
        }

        fn render(&self, _frame: &mut Frame, _theme: &Theme) {
            self.renders.set(self.renders.get() + 1);
        }

        fn extract(self) -> Self::Output {
            (self.updates, self.renders.get())
        }
    }

    struct AlreadyDone;

    impl Widget for AlreadyDone {
        type Output = &'static str;

        fn init(&mut self) -> Flow {
            Flow::Quit(Exit::Confirmed)
        }

        fn update(&mut self, _event: &PromptEvent) -> Flow {
            panic!("update must not be called");
        }

        fn render(&self, _frame: &mut Frame, _theme: &Theme) {
            panic!("render must not be called");
        }

        fn extract(self) -> Self::Output {
            "done"
        }
    }

    fn terminal() -> Terminal<TestBackend> {
        Terminal::new(TestBackend::new(60, 20)).unwrap()
    }

    #[test]
    fn test_rerenders_after_every_non_quitting_event() {
        let mut events = Scripted(VecDeque::from([
            PromptEvent::key(KeyCode::Char('z')),
            PromptEvent::Resize(80, 24),
            PromptEvent::Tick,
            PromptEvent::key(KeyCode::Enter),
            PromptEvent::key(KeyCode::Char('x')),
        ]));

        let completion = drive(&mut terminal(), &mut events, &Theme::default(), Counter::default())
            .unwrap();

        // initial frame + one per non-quitting event
        assert_eq!(completion.value, (4, 4));
        assert_eq!(completion.exit, Exit::Confirmed);
        assert_eq!(events.0.len(), 1, "events after quit must stay unread");
    }

    #[test]
    fn test_ctrl_c_interrupts_without_reaching_widget() {
        let mut events = Scripted(VecDeque::from([
            PromptEvent::key(KeyCode::Down),
            PromptEvent::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
        ]));

        let completion = drive(&mut terminal(), &mut events, &Theme::default(), Counter::default())
            .unwrap();

        assert_eq!(completion.exit, Exit::Interrupted);
        assert_eq!(completion.value.0, 1);
    }

    #[test]
    fn test_widget_finished_at_init_reads_no_events() {
        let mut events = Scripted(VecDeque::new());

        let completion =
            drive(&mut terminal(), &mut events, &Theme::default(), AlreadyDone).unwrap();

        assert_eq!(completion.value, "done");
    }

    #[test]
    fn test_event_source_failure_is_terminal_error() {
        let mut events = Scripted(VecDeque::new());

        let err = drive(&mut terminal(), &mut events, &Theme::default(), Counter::default())
            .unwrap_err();

        assert!(matches!(err, PromptError::Terminal(_)));
    }
}
