//! Unix account name checks and the username re-prompt loop.

use log::{info, warn};

use super::Prompter;
use crate::tui::{Completion, Exit, PromptError, ValidationResult};

pub const USERNAME_TITLE: &str = "Enter your username";

/// Longest account name accepted by `useradd` on the target image
pub const USERNAME_MAX_LENGTH: usize = 32;

const INVALID_USERNAME: &str =
    "Invalid username! your username must be Unix compliant, please try again.";

/// Checks `candidate` against the portable account name rule:
/// 2 to `max_length` characters, starting with `[a-z_]`, continuing with
/// `[a-z0-9_-]` and not ending with `-`.
#[must_use]
pub fn validate_username(candidate: &str, max_length: usize) -> ValidationResult {
    let len = candidate.chars().count();

    if !(2..=max_length).contains(&len) {
        return ValidationResult::Invalid(format!(
            "{INVALID_USERNAME} (2 to {max_length} characters)"
        ));
    }

    let mut chars = candidate.chars();
    let first_ok = chars
        .next()
        .is_some_and(|c| c.is_ascii_lowercase() || c == '_');
    let last_ok = chars
        .next_back()
        .is_some_and(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
    let middle_ok = chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '_' | '-'));

    if first_ok && middle_ok && last_ok {
        ValidationResult::Valid
    } else {
        ValidationResult::Invalid(INVALID_USERNAME.to_string())
    }
}

#[must_use]
pub fn is_valid_username(candidate: &str) -> bool {
    validate_username(candidate, USERNAME_MAX_LENGTH).is_valid()
}

/// Asks for a username until an acceptable one is submitted.
///
/// The placeholder is always accepted. A cancelled or interrupted prompt keeps
/// the typed value if it is valid and falls back to the placeholder otherwise.
pub fn prompt_username<P: Prompter + ?Sized>(
    prompter: &mut P,
    placeholder: &str,
    max_length: usize,
) -> Result<String, PromptError> {
    let mut notice: Option<String> = None;

    loop {
        let Completion { value, exit } =
            prompter.text(USERNAME_TITLE, placeholder, max_length, notice.as_deref())?;

        let verdict = if value == placeholder {
            ValidationResult::Valid
        } else {
            validate_username(&value, max_length)
        };

        match (exit, verdict) {
            (_, ValidationResult::Valid) => {
                info!("username: {value}");
                return Ok(value);
            }
            (Exit::Confirmed, ValidationResult::Invalid(message)) => {
                warn!("rejected username '{value}'");
                notice = Some(message);
            }
            (Exit::Cancelled | Exit::Interrupted, ValidationResult::Invalid(_)) => {
                info!("username prompt left with an invalid value, keeping {placeholder}");
                return Ok(placeholder.to_string());
            }
        }
    }
}
