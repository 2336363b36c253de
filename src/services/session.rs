//! Authenticated session

use crate::error::{LedgerError, LedgerResult};
use crate::storage::CredentialCheck;

/// The acting user; owner of every movement recorded or edited through it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    owner: String,
}

impl Session {
    /// Check credentials and open a session
    pub fn login<C: CredentialCheck + ?Sized>(
        check: &C,
        username: &str,
        password: &str,
    ) -> LedgerResult<Self> {
        let username = username.trim();
        if username.is_empty() {
            return Err(LedgerError::Auth("Username is required".into()));
        }

        if !check.verify(username, password)? {
            tracing::warn!(username, "rejected login");
            return Err(LedgerError::Auth("Invalid username or password".into()));
        }

        tracing::info!(username, "logged in");
        Ok(Self::for_owner(username))
    }

    /// A session for an already-verified owner
    pub fn for_owner(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct FixedCredentials(HashMap<&'static str, &'static str>);

    impl CredentialCheck for FixedCredentials {
        fn verify(&self, username: &str, password: &str) -> LedgerResult<bool> {
            Ok(self.0.get(username) == Some(&password))
        }
    }

    fn check() -> FixedCredentials {
        FixedCredentials(HashMap::from([("ana", "pw")]))
    }

    #[test]
    fn test_login_success() {
        let session = Session::login(&check(), " ana ", "pw").unwrap();
        assert_eq!(session.owner(), "ana");
    }

    #[test]
    fn test_login_failure() {
        assert!(matches!(
            Session::login(&check(), "ana", "nope"),
            Err(LedgerError::Auth(_))
        ));
        assert!(matches!(
            Session::login(&check(), "", "pw"),
            Err(LedgerError::Auth(_))
        ));
    }
}
