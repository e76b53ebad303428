pub mod catalog;
mod common;
pub mod config;
mod default;
mod logging;
pub mod script;
pub mod tui;
pub mod wizard;

pub use catalog::{Catalog, check_connectivity, fetch_catalog};
pub use common::{PROJECT_NAME, PROJECT_VERSION, print_banner};
pub use config::{Config, init_configuration, show_configuration};
pub use logging::Logging;
pub use script::{ScriptData, render_script, write_script};
pub use wizard::{Answers, Prompter, TerminalPrompter, run_wizard};
