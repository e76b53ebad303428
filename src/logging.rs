use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use env_logger::Target;
use log::LevelFilter;

use crate::common::project_data_dir;

/// Logger setup.
///
/// The prompts own the terminal while they run, so anything written to
/// stderr would corrupt the frame. By default logs go to a file in the
/// project data directory; only `--verbose` sends them to stderr.
#[derive(Default)]
pub struct Logging {
    file_name: Option<PathBuf>,
    debug_mode: bool,
}

impl Logging {
    #[must_use]
    pub fn new() -> Self {
        Self {
            file_name: None,
            debug_mode: false,
        }
    }

    #[must_use]
    pub fn with_file<P>(mut self, file_name: P) -> Self
    where
        P: Into<PathBuf>,
    {
        self.file_name = Some(file_name.into());
        self
    }

    /// Enable debug mode (raises the level filter to `Debug`).
    #[must_use]
    pub fn with_debug_mode(mut self, enable: bool) -> Self {
        self.debug_mode = enable;
        self
    }

    fn level(&self) -> LevelFilter {
        if self.debug_mode {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }

    pub fn start(&self) -> Result<()> {
        let mut b = env_logger::builder();
        b.filter_level(self.level());

        if let Some(file_name) = &self.file_name {
            let log_file = get_log_file_path(file_name)?;

            let fd = fs::OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(&log_file)
                .with_context(|| format!("Unable to open {} for writing", log_file.display()))?;

            b.target(Target::Pipe(Box::new(fd)));
        }

        b.try_init().context("Logger already initialized")?;

        Ok(())
    }
}

/// Resolves a log file name against the project data directory.
/// Absolute paths are used as-is.
fn get_log_file_path(file_name: &Path) -> Result<PathBuf> {
    if file_name.is_absolute() {
        return Ok(file_name.to_path_buf());
    }

    Ok(project_data_dir()?.join(file_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_default_debug_mode_disabled() {
        let logging = Logging::new();
        assert!(!logging.debug_mode, "Debug mode should be disabled by default");
        assert_eq!(logging.level(), LevelFilter::Info);
    }

    #[test]
    fn test_logging_with_debug_mode_enabled() {
        let logging = Logging::new().with_debug_mode(true);
        assert!(logging.debug_mode);
        assert_eq!(logging.level(), LevelFilter::Debug);
    }

    #[test]
    fn test_logging_with_file() {
        let logging = Logging::new().with_file("test.log");
        assert_eq!(
            logging.file_name.unwrap().to_string_lossy(),
            "test.log"
        );
    }

    #[test]
    fn test_logging_builder_chaining() {
        let logging = Logging::new()
            .with_file("app.log")
            .with_debug_mode(true)
            .with_debug_mode(false);

        assert!(!logging.debug_mode);
        assert!(logging.file_name.is_some());
    }

    #[test]
    fn test_get_log_file_path_keeps_absolute_paths() {
        let temp_dir = tempfile::tempdir().unwrap();
        let absolute = temp_dir.path().join("wizard.log");

        let path = get_log_file_path(&absolute).unwrap();
        assert_eq!(path, absolute);
    }
}
