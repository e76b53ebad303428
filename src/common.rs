use std::{env, fs, path::PathBuf, sync::OnceLock};

use anyhow::{Context, Result, anyhow, bail};
use colored::Colorize;
use log::{debug, info};

pub const PROJECT_NAME: &str = env!("CARGO_PKG_NAME");
pub const PROJECT_VERSION: &str = env!("GIT_VERSION");
pub const PROJECT_VERSION_HASH: &str = env!("GIT_HASH");

/// Environment variable carrying the image version shown in the banner.
pub const ENV_IMAGE_VERSION: &str = "ARCHAVISTO_VERSION";

/// Returns the User-Agent header for HTTP requests: "archavisto/VERSION (OS; ARCH)"
pub fn user_agent() -> &'static str {
    static USER_AGENT: OnceLock<String> = OnceLock::new();
    USER_AGENT.get_or_init(|| {
        format!(
            "{}/{} ({}; {})",
            PROJECT_NAME,
            PROJECT_VERSION,
            std::env::consts::OS,
            std::env::consts::ARCH
        )
    })
}

pub fn print_header() {
    println!("{PROJECT_NAME} {PROJECT_VERSION} ({PROJECT_VERSION_HASH})");
}

/// Prints the welcome banner, including the image version when the
/// environment provides one.
pub fn print_banner() {
    println!("{}", "Welcome to ArchAvisto!".cyan().bold());

    if let Ok(version) = env::var(ENV_IMAGE_VERSION)
        && !version.is_empty()
    {
        println!("{}", format!("Version: {version}").yellow());
    }
}

/// Returns the project data directory, creating it with secure permissions if needed.
///
/// Parameters: None
///
/// Returns: Path to `~/.local/share/archavisto` (or equivalent)
pub fn project_data_dir() -> Result<PathBuf> {
    let data_dir = dirs::data_dir().ok_or_else(|| anyhow!("Unable to determine data directory. Ensure XDG_DATA_HOME or HOME environment variable is set"))?;

    let project_data_dir = data_dir.join(PROJECT_NAME);

    create_secure_directory(&project_data_dir)?;

    Ok(project_data_dir)
}

/// Environment variable to override the config directory.
///
/// Useful on freshly provisioned images where `$HOME` is not populated yet,
/// and in tests.
///
///   export ARCHAVISTO_CONFIG_DIR="/opt/startup/archavisto"
const ENV_CONFIG_DIR_OVERRIDE: &str = "ARCHAVISTO_CONFIG_DIR";

/// Returns the project config directory, creating it with secure permissions if needed.
///
/// If `ARCHAVISTO_CONFIG_DIR` is set, uses that path directly (validated for
/// safety). Otherwise falls back to `dirs::config_dir()/archavisto`.
pub fn project_config_dir() -> Result<PathBuf> {
    let project_config_dir = if let Ok(override_dir) = env::var(ENV_CONFIG_DIR_OVERRIDE) {
        let path = PathBuf::from(&override_dir);

        if !path.is_absolute() {
            bail!("{ENV_CONFIG_DIR_OVERRIDE} must be an absolute path: {override_dir}");
        }
        for component in path.components() {
            if let std::path::Component::ParentDir = component {
                bail!("{ENV_CONFIG_DIR_OVERRIDE} contains parent directory references: {override_dir}");
            }
        }

        info!("Using config directory override from {ENV_CONFIG_DIR_OVERRIDE}: {}", path.display());
        path
    } else {
        let config_dir = dirs::config_dir().ok_or_else(|| anyhow!("Unable to determine config directory. Ensure XDG_CONFIG_HOME or HOME environment variable is set"))?;
        config_dir.join(PROJECT_NAME)
    };

    create_secure_directory(&project_config_dir)?;

    Ok(project_config_dir)
}

/// Creates a directory with secure permissions (0700 on Unix).
///
/// Existing directories get their permissions reset to 0700 as well.
#[cfg(unix)]
fn create_secure_directory(dir: &std::path::Path) -> Result<()> {
    use std::fs::DirBuilder;
    use std::os::unix::fs::DirBuilderExt;
    use std::os::unix::fs::PermissionsExt;

    debug!("Creating secure directory: {}", dir.display());

    let mut builder = DirBuilder::new();
    builder.recursive(true).mode(0o700);

    builder
        .create(dir)
        .with_context(|| format!("Unable to create directory: {}", dir.display()))?;

    let perms = fs::Permissions::from_mode(0o700);
    fs::set_permissions(dir, perms)
        .with_context(|| format!("Unable to set permissions on directory: {}", dir.display()))?;

    Ok(())
}

#[cfg(not(unix))]
fn create_secure_directory(dir: &std::path::Path) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Unable to create directory: {}", dir.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn test_create_secure_directory_sets_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = tempfile::tempdir().unwrap();
        let test_dir = temp_dir.path().join("secure_test");

        create_secure_directory(&test_dir).unwrap();

        let mode = std::fs::metadata(&test_dir).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o700, "Directory should have 0o700 permissions, got: {mode:o}");
    }

    #[test]
    fn test_create_secure_directory_creates_nested_directories() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested_dir = temp_dir.path().join("a").join("b").join("c");

        create_secure_directory(&nested_dir).unwrap();

        assert!(nested_dir.is_dir(), "Nested path should be a directory");
    }

    #[test]
    fn test_create_secure_directory_is_idempotent() {
        let temp_dir = tempfile::tempdir().unwrap();
        let test_dir = temp_dir.path().join("idempotent_test");

        create_secure_directory(&test_dir).unwrap();
        create_secure_directory(&test_dir).unwrap();

        assert!(test_dir.is_dir());
    }

    #[test]
    fn test_user_agent_mentions_project() {
        assert!(user_agent().starts_with(&format!("{PROJECT_NAME}/")));
    }
}
