//! Credential handling for CLI commands
//!
//! The password comes from `POCKET_PASSWORD` when set, otherwise from a
//! hidden prompt. It is held in a zeroizing buffer for its whole lifetime.

use zeroize::Zeroizing;

use crate::error::{LedgerError, LedgerResult};
use crate::services::Session;
use crate::storage::Storage;

/// Environment variable holding the password for non-interactive use
pub const PASSWORD_ENV: &str = "POCKET_PASSWORD";

/// Prompt for a password (hidden input)
fn prompt_password(prompt: &str) -> LedgerResult<Zeroizing<String>> {
    rpassword::prompt_password(prompt)
        .map(Zeroizing::new)
        .map_err(|e| LedgerError::Auth(format!("Failed to read password: {}", e)))
}

/// The password from the environment, or prompted
pub fn read_password(prompt: &str) -> LedgerResult<Zeroizing<String>> {
    match std::env::var(PASSWORD_ENV) {
        Ok(password) => Ok(Zeroizing::new(password)),
        Err(_) => prompt_password(prompt),
    }
}

/// A new password, confirmed when prompted
pub fn read_new_password() -> LedgerResult<Zeroizing<String>> {
    if let Ok(password) = std::env::var(PASSWORD_ENV) {
        return Ok(Zeroizing::new(password));
    }

    let first = prompt_password("New password: ")?;
    let second = prompt_password("Confirm password: ")?;
    if *first != *second {
        return Err(LedgerError::Validation("Passwords do not match".into()));
    }
    Ok(first)
}

/// Log in the user given with `--user` / `POCKET_USER`
pub fn open_session(storage: &Storage, user: Option<&str>) -> LedgerResult<Session> {
    let user = user.ok_or_else(|| {
        LedgerError::Auth("No user given. Pass --user or set POCKET_USER".into())
    })?;
    let password = read_password(&format!("Password for {}: ", user))?;
    Session::login(&storage.users, user, &password)
}
