use std::{
    env, fs,
    io::Write,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use bon::Builder;
use log::info;
use serde::{Deserialize, Serialize};
use tabled::{
    Table, Tabled,
    settings::{Margin, Rotate, Style},
};

use crate::{
    common::{print_header, project_config_dir},
    default::{get_embedded_default, get_embedded_list, get_embedded_usize},
    tui::ValidationResult,
    wizard::{USERNAME_MAX_LENGTH, validate_username},
};

const CONFIG_FILE_NAME: &str = "config.json";

/// Environment variable holding the GitLab token used to read the catalog
pub const ENV_PRIVATE_TOKEN: &str = "GITLAB_TOKEN";

fn default_catalog_url() -> String {
    get_embedded_default("catalog_url")
}

fn default_connectivity_url() -> String {
    get_embedded_default("connectivity_url")
}

fn default_old_username() -> String {
    get_embedded_default("old_username")
}

fn default_login_username() -> String {
    get_embedded_default("login_username")
}

fn default_skip_file() -> PathBuf {
    PathBuf::from(get_embedded_default("skip_file"))
}

fn default_script_file() -> PathBuf {
    PathBuf::from(get_embedded_default("script_file"))
}

fn default_shells() -> Vec<String> {
    get_embedded_list("shells")
}

fn default_username_max_length() -> usize {
    get_embedded_usize("username_max_length")
}

/// Wizard configuration. Every field falls back to the embedded default, so
/// a `config.json` only needs the keys it overrides.
#[derive(Debug, Clone, Serialize, Deserialize, Builder)]
pub struct Config {
    /// GitLab repository-files API URL of `packages.json`
    #[serde(default = "default_catalog_url")]
    #[builder(default = default_catalog_url(), into)]
    pub catalog_url: String,
    #[serde(default = "default_connectivity_url")]
    #[builder(default = default_connectivity_url(), into)]
    pub connectivity_url: String,
    /// Account the image ships with, also the username placeholder
    #[serde(default = "default_old_username")]
    #[builder(default = default_old_username(), into)]
    pub old_username: String,
    /// Default login name written in `/etc/wsl.conf`
    #[serde(default = "default_login_username")]
    #[builder(default = default_login_username(), into)]
    pub login_username: String,
    #[serde(default = "default_skip_file")]
    #[builder(default = default_skip_file(), into)]
    pub skip_file: PathBuf,
    #[serde(default = "default_script_file")]
    #[builder(default = default_script_file(), into)]
    pub script_file: PathBuf,
    /// Login shells offered, in display order
    #[serde(default = "default_shells")]
    #[builder(default = default_shells())]
    pub shells: Vec<String>,
    #[serde(default = "default_username_max_length")]
    #[builder(default = default_username_max_length())]
    pub username_max_length: usize,
    /// Local catalog used instead of the GitLab one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(into)]
    pub catalog_file: Option<PathBuf>,
    /// Debug logging
    #[serde(default)]
    #[builder(default)]
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self::builder().build()
    }
}

#[derive(Tabled)]
struct ConfigDisplay<'a> {
    catalog_url: &'a str,
    connectivity_url: &'a str,
    old_username: &'a str,
    login_username: &'a str,
    skip_file: String,
    script_file: String,
    shells: String,
    username_max_length: usize,
    catalog_file: String,
    debug: bool,
}

impl<'a> From<&'a Config> for ConfigDisplay<'a> {
    fn from(config: &'a Config) -> Self {
        Self {
            catalog_url: &config.catalog_url,
            connectivity_url: &config.connectivity_url,
            old_username: &config.old_username,
            login_username: &config.login_username,
            skip_file: config.skip_file.display().to_string(),
            script_file: config.script_file.display().to_string(),
            shells: config.shells.join(", "),
            username_max_length: config.username_max_length,
            catalog_file: config
                .catalog_file
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
            debug: config.debug,
        }
    }
}

impl Config {
    pub(crate) fn load_existing(config_file: &Path) -> Result<Self> {
        let config_string = fs::read_to_string(config_file)
            .with_context(|| format!("Unable to read {}", config_file.display()))?;

        let config: Config = serde_json::from_str(&config_string)
            .context("Unable to deserialize configuration data")?;

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !(2..=USERNAME_MAX_LENGTH).contains(&self.username_max_length) {
            bail!(
                "username_max_length must be between 2 and {USERNAME_MAX_LENGTH}, got {}",
                self.username_max_length
            );
        }

        for (field, name) in [
            ("old_username", &self.old_username),
            ("login_username", &self.login_username),
        ] {
            if let ValidationResult::Invalid(reason) = validate_username(name, USERNAME_MAX_LENGTH) {
                bail!("{field} '{name}' is not a valid account name: {reason}");
            }
        }

        // shells are looked up under /usr/bin
        let valid_shell = |s: &str| {
            !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-'))
        };
        if let Some(shell) = self.shells.iter().find(|s| !valid_shell(s.as_str())) {
            bail!("shells must be plain program names, got '{shell}'");
        }

        Ok(())
    }

    pub(crate) fn save_to(&self, config_file: &Path) -> Result<()> {
        let config_string =
            serde_json::to_string_pretty(self).context("Unable to serialize configuration data")?;

        let mut fd = fs::OpenOptions::new()
            .write(true)
            .truncate(true)
            .create(true)
            .open(config_file)
            .with_context(|| format!("Unable to write {}", config_file.display()))?;

        fd.write_all(config_string.as_bytes()).with_context(|| {
            format!("Failed to write configuration to {}", config_file.display())
        })?;

        Ok(())
    }

    pub fn save(&self) -> Result<PathBuf> {
        let config_file = project_config_dir()?.join(CONFIG_FILE_NAME);
        self.save_to(&config_file)?;
        Ok(config_file)
    }

    pub fn load() -> Result<Self> {
        let config_file = project_config_dir()?.join(CONFIG_FILE_NAME);

        if config_file.exists() {
            info!("loading {}", config_file.display());
            Config::load_existing(&config_file)
        } else {
            //
            // no overrides, embedded defaults only
            //
            Ok(Config::default())
        }
    }

    /// Token for the catalog API, empty when `GITLAB_TOKEN` is unset.
    #[must_use]
    pub fn private_token() -> String {
        env::var(ENV_PRIVATE_TOKEN).unwrap_or_default()
    }
}

fn display_configuration(config: &Config) {
    let display = ConfigDisplay::from(config);
    let mut table = Table::new([display]);
    table
        .with(Rotate::Left)
        .with(Style::modern())
        .with(Margin::new(4, 0, 0, 0));

    print_header();
    println!("{table}");
}

////////////////////////////////////////////////////////////////////////////////
// PUBLIC
////////////////////////////////////////////////////////////////////////////////

pub fn show_configuration() -> Result<()> {
    let config = Config::load()?;

    display_configuration(&config);

    Ok(())
}

/// Writes the effective configuration so it can be edited.
pub fn init_configuration() -> Result<()> {
    let config = Config::load()?;
    let config_file = config.save()?;

    display_configuration(&config);
    println!();
    println!("Configuration written to {}", config_file.display());

    Ok(())
}
