//! User directory backing the credential check
//!
//! Passwords are stored only as Argon2id PHC strings in users.json.

use std::path::PathBuf;

use argon2::Argon2;
use chrono::{DateTime, Utc};
use password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, LedgerResult};

use super::file_io::JsonFile;

/// Anything that can answer "is this username/password pair valid?"
pub trait CredentialCheck {
    fn verify(&self, username: &str, password: &str) -> LedgerResult<bool>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct UserRecord {
    username: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct UserData {
    #[serde(default)]
    users: Vec<UserRecord>,
}

/// JSON-file user directory
pub struct JsonUserDirectory {
    file: JsonFile<UserData>,
}

impl JsonUserDirectory {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: JsonFile::new(path),
        }
    }

    fn read(&self) -> LedgerResult<UserData> {
        self.file.load()
    }

    /// Register a user, hashing the password
    pub fn add_user(&self, username: &str, password: &str) -> LedgerResult<()> {
        let username = username.trim();
        if username.is_empty() {
            return Err(LedgerError::Validation("Username cannot be empty".into()));
        }
        if password.is_empty() {
            return Err(LedgerError::Validation("Password cannot be empty".into()));
        }

        let mut data = self.read()?;
        if data.users.iter().any(|u| u.username == username) {
            return Err(LedgerError::Duplicate {
                entity_type: "User",
                identifier: username.to_string(),
            });
        }

        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| LedgerError::Auth(format!("Failed to hash password: {}", e)))?
            .to_string();

        data.users.push(UserRecord {
            username: username.to_string(),
            password_hash,
            created_at: Utc::now(),
        });
        self.file.save(&data)?;

        tracing::info!(username, "registered user");
        Ok(())
    }

    /// Usernames in registration order
    pub fn usernames(&self) -> LedgerResult<Vec<String>> {
        Ok(self.read()?.users.into_iter().map(|u| u.username).collect())
    }
}

impl CredentialCheck for JsonUserDirectory {
    fn verify(&self, username: &str, password: &str) -> LedgerResult<bool> {
        let data = self.read()?;
        let Some(user) = data.users.iter().find(|u| u.username == username.trim()) else {
            return Ok(false);
        };

        let parsed = PasswordHash::new(&user.password_hash).map_err(|e| {
            LedgerError::Storage(format!("Corrupt password hash for '{}': {}", user.username, e))
        })?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_directory() -> (TempDir, JsonUserDirectory) {
        let temp_dir = TempDir::new().unwrap();
        let users = JsonUserDirectory::new(temp_dir.path().join("users.json"));
        (temp_dir, users)
    }

    #[test]
    fn test_verify_registered_user() {
        let (_temp_dir, users) = create_test_directory();
        users.add_user("ana", "s3cret").unwrap();

        assert!(users.verify("ana", "s3cret").unwrap());
        assert!(!users.verify("ana", "wrong").unwrap());
    }

    #[test]
    fn test_unknown_user_is_rejected() {
        let (_temp_dir, users) = create_test_directory();
        assert!(!users.verify("nobody", "x").unwrap());
    }

    #[test]
    fn test_duplicate_user() {
        let (_temp_dir, users) = create_test_directory();
        users.add_user("ana", "one").unwrap();
        let err = users.add_user("ana", "two").unwrap_err();
        assert!(matches!(err, LedgerError::Duplicate { .. }));
        assert_eq!(users.usernames().unwrap(), vec!["ana"]);
    }

    #[test]
    fn test_password_not_stored_in_clear() {
        let (temp_dir, users) = create_test_directory();
        users.add_user("ana", "plaintext-pw").unwrap();
        let raw = std::fs::read_to_string(temp_dir.path().join("users.json")).unwrap();
        assert!(!raw.contains("plaintext-pw"));
        assert!(raw.contains("$argon2id$"));
    }

    #[test]
    fn test_empty_credentials_rejected() {
        let (_temp_dir, users) = create_test_directory();
        assert!(users.add_user("  ", "pw").unwrap_err().is_validation());
        assert!(users.add_user("ana", "").unwrap_err().is_validation());
    }
}
