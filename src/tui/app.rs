//! Terminal application wrapper with RAII setup/teardown.

use std::{
    io::{self, IsTerminal, Stdout},
    panic,
    sync::{
        Once,
        atomic::{AtomicBool, Ordering},
    },
};

use crossterm::{
    cursor::Show,
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::debug;
use ratatui::{Terminal, backend::CrosstermBackend};

use super::components::PromptError;

type TuiTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Set while raw mode and the alternate screen are on.
static TERMINAL_ACTIVE: AtomicBool = AtomicBool::new(false);

/// Leaves raw mode and the alternate screen if a prompt holds them.
/// Returns false when there was nothing to restore.
fn restore_terminal() -> bool {
    if !TERMINAL_ACTIVE.swap(false, Ordering::SeqCst) {
        return false;
    }

    // Attempt to restore terminal state, ignoring errors during cleanup
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);
    true
}

/// Release builds abort on panic, so `Drop` never runs there. The hook
/// restores the terminal before the previous hook prints the message.
fn install_panic_hook() {
    static HOOK: Once = Once::new();

    HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            restore_terminal();
            previous(info);
        }));
    });
}

/// RAII wrapper for terminal setup and teardown.
///
/// Enables raw mode and the alternate screen on creation and restores the
/// terminal on drop. A panic hook covers the paths where drop does not run.
pub struct TerminalApp {
    terminal: TuiTerminal,
}

impl TerminalApp {
    /// Acquires the terminal for one prompt run.
    ///
    /// # Errors
    ///
    /// Returns `PromptError::RuntimeUnavailable` when stdin/stdout are not
    /// attached to an interactive terminal or raw mode cannot be enabled,
    /// and `PromptError::Terminal` if the screen setup fails afterwards.
    pub fn new() -> Result<Self, PromptError> {
        if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
            return Err(PromptError::RuntimeUnavailable(
                "stdin and stdout must be attached to a terminal".to_string(),
            ));
        }

        install_panic_hook();

        enable_raw_mode().map_err(|e| PromptError::RuntimeUnavailable(e.to_string()))?;
        TERMINAL_ACTIVE.store(true, Ordering::SeqCst);

        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen) {
            restore_terminal();
            return Err(e.into());
        }

        let backend = CrosstermBackend::new(stdout);
        let terminal = match Terminal::new(backend) {
            Ok(terminal) => terminal,
            Err(e) => {
                restore_terminal();
                return Err(e.into());
            }
        };

        debug!("terminal acquired");
        Ok(Self { terminal })
    }

    /// Returns a mutable reference to the underlying terminal.
    pub fn terminal(&mut self) -> &mut TuiTerminal {
        &mut self.terminal
    }
}

impl Drop for TerminalApp {
    fn drop(&mut self) {
        if restore_terminal() {
            debug!("terminal released");
        }
    }
}
