//! Provisioning script rendering.
//!
//! Every interpolated value goes through [`shell_word`] so catalog and config
//! content can never add commands to a script that runs under `sudo`.

use std::{
    borrow::Cow,
    fmt::Write as _,
    fs,
    io::Write as _,
    path::Path,
};

use anyhow::{Context, Result};
use bon::Builder;
use log::info;
use tempfile::NamedTempFile;

/// Everything the script needs.
#[derive(Debug, Clone, Builder)]
pub struct ScriptData {
    /// Run a full system upgrade first
    #[builder(default)]
    pub update_system: bool,
    /// Account the image ships with
    #[builder(into)]
    pub old_username: String,
    /// Account name chosen in the wizard
    #[builder(into)]
    pub new_username: String,
    /// Name used in `/etc/wsl.conf` for the default login
    #[builder(into)]
    pub login_username: String,
    /// Created at the end so the wizard does not run again
    #[builder(into)]
    pub skip_file: String,
    /// Login shell to set, if any
    #[builder(into)]
    pub shell: Option<String>,
    #[builder(default)]
    pub packages: Vec<String>,
}

/// Characters that never need quoting in a POSIX shell word.
fn is_plain(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '@' | '%' | '+' | '=' | ':' | ',' | '.' | '/' | '_' | '-')
}

/// Single-quotes `value` for POSIX sh, `'` becoming `'\''`.
#[must_use]
pub fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

/// `value` as one shell word: unchanged when it is plain, quoted otherwise.
#[must_use]
pub fn shell_word(value: &str) -> Cow<'_, str> {
    if !value.is_empty() && value.chars().all(is_plain) {
        Cow::Borrowed(value)
    } else {
        Cow::Owned(shell_quote(value))
    }
}

/// Renders the provisioning script.
#[must_use]
pub fn render_script(data: &ScriptData) -> String {
    let mut script = String::from("#!/usr/bin/sh\nset -o errexit\n");
    let old = shell_word(&data.old_username);
    let new = &data.new_username;

    // writing into a String cannot fail
    if data.update_system {
        let _ = writeln!(script, "sudo -u {old} paru -Syu --skipreview");
    }

    if !data.packages.is_empty() {
        let packages: Vec<_> = data.packages.iter().map(|p| shell_word(p)).collect();
        let _ = writeln!(script, "sudo -u {old} paru -S {}", packages.join(" "));
    }

    if let Some(shell) = &data.shell {
        let path = shell_word(&format!("/usr/bin/{shell}")).into_owned();
        let _ = writeln!(script, "sudo chsh -s {path} {old}");
    }

    if *new != data.old_username {
        let login = shell_word(&format!("--login={new}")).into_owned();
        let home = shell_word(&format!("--home=/home/{new}")).into_owned();
        let _ = writeln!(script, "sudo usermod {login} --move-home {home} {old}");
    }

    let rename = shell_quote(&format!("s/{}/{new}/g", data.login_username));
    let _ = writeln!(script, "sudo sed -i {rename} /etc/wsl.conf");
    let _ = writeln!(script, "touch {}", shell_word(&data.skip_file));

    script
}

/// Writes `contents` to `path` atomically, as an executable (0755) file.
pub fn write_script(path: &Path, contents: &str) -> Result<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    fs::create_dir_all(dir)
        .with_context(|| format!("Unable to create directory: {}", dir.display()))?;

    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("Unable to create a temporary file in {}", dir.display()))?;

    tmp.write_all(contents.as_bytes())
        .with_context(|| format!("Unable to write script for {}", path.display()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file()
            .set_permissions(fs::Permissions::from_mode(0o755))
            .with_context(|| format!("Unable to make {} executable", path.display()))?;
    }

    tmp.persist(path)
        .with_context(|| format!("Unable to write {}", path.display()))?;

    info!("script written to {}", path.display());
    Ok(())
}
