//! Prompt sequencing: update consent, username, profiles, packages, shell.
//!
//! Each answer is a plain value; the chosen profiles decide which packages
//! are offered next.

use log::info;

use crate::{
    catalog::Catalog,
    config::Config,
    script::ScriptData,
    tui::{ChoiceList, PromptError},
};

mod prompter;
mod username;

pub use prompter::{Prompter, TerminalPrompter};
pub use username::{
    USERNAME_MAX_LENGTH, USERNAME_TITLE, is_valid_username, prompt_username, validate_username,
};

pub const UPDATE_TITLE: &str = "Do you agree to update the system packages";
pub const PROFILES_TITLE: &str =
    "Choose your profiles (Profiles are used to select the packages that might interest you)";
pub const PACKAGES_TITLE: &str =
    "Select the packages you want to install with Spacebar and confirm with Enter";
pub const SHELL_TITLE: &str = "Choose your shell";

const YES: &str = "Yes";
const NO: &str = "No";

/// Everything the user chose.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answers {
    pub update_system: bool,
    pub username: String,
    pub profiles: Vec<String>,
    pub packages: Vec<String>,
    pub shell: Option<String>,
}

impl Answers {
    #[must_use]
    pub fn script_data(&self, config: &Config) -> ScriptData {
        ScriptData::builder()
            .update_system(self.update_system)
            .old_username(config.old_username.as_str())
            .new_username(self.username.as_str())
            .login_username(config.login_username.as_str())
            .skip_file(config.skip_file.display().to_string())
            .maybe_shell(self.shell.clone())
            .packages(self.packages.clone())
            .build()
    }
}

/// Runs every prompt in order. Any prompt failure aborts the whole wizard.
pub fn run_wizard<P: Prompter + ?Sized>(
    prompter: &mut P,
    config: &Config,
    catalog: &Catalog,
) -> Result<Answers, PromptError> {
    let update = prompter.select(UPDATE_TITLE, ChoiceList::from_labels([YES, NO]))?;
    let update_system = update.value.as_deref() == Some(YES);
    info!("system update: {update_system}");

    let username = prompt_username(prompter, &config.old_username, config.username_max_length)?;

    let profiles = prompter
        .multi_select(PROFILES_TITLE, catalog.profile_choices())?
        .value;
    info!("profiles: {}", profiles.join(", "));

    let packages = prompter
        .multi_select(PACKAGES_TITLE, catalog.package_choices(&profiles))?
        .value;
    info!("packages: {}", packages.join(", "));

    let shell = prompter
        .select(SHELL_TITLE, ChoiceList::from_labels(config.shells.iter().cloned()))?
        .value;

    Ok(Answers {
        update_system,
        username,
        profiles,
        packages,
        shell,
    })
}
