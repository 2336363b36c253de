//! Movement identifiers
//!
//! Identifiers are assigned by the movement store and are opaque to the rest
//! of the crate. The JSON store hands out UUID v4 strings, but documents
//! written by other tools may carry any non-empty string.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Opaque identifier of a persisted movement
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovementId(String);

impl MovementId {
    /// Generate a fresh random identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Get the identifier as stored
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short form for terminal display (first 8 characters)
    pub fn short(&self) -> &str {
        match self.0.char_indices().nth(8) {
            Some((idx, _)) => &self.0[..idx],
            None => &self.0,
        }
    }
}

impl fmt::Display for MovementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Error returned when parsing an empty identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyIdError;

impl fmt::Display for EmptyIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "movement id cannot be empty")
    }
}

impl std::error::Error for EmptyIdError {}

impl FromStr for MovementId {
    type Err = EmptyIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(EmptyIdError);
        }
        Ok(Self(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_unique() {
        let a = MovementId::generate();
        let b = MovementId::generate();
        assert_ne!(a, b);
        assert!(Uuid::parse_str(a.as_str()).is_ok());
    }

    #[test]
    fn test_short_form() {
        let id: MovementId = "0123456789abcdef".parse().unwrap();
        assert_eq!(id.short(), "01234567");

        let tiny: MovementId = "abc".parse().unwrap();
        assert_eq!(tiny.short(), "abc");
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert_eq!("  ".parse::<MovementId>(), Err(EmptyIdError));
    }

    #[test]
    fn test_serialization_is_transparent() {
        let id: MovementId = "doc-42".parse().unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"doc-42\"");
    }
}
