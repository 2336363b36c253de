//! Payment methods

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::kind::UnknownValueError;

/// How a movement was paid or received
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentMethod {
    Interbank,
    Bcp,
    Yape,
    Plin,
    #[serde(alias = "EFECTIVO")]
    Cash,
    Bbva,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 6] = [
        PaymentMethod::Interbank,
        PaymentMethod::Bcp,
        PaymentMethod::Yape,
        PaymentMethod::Plin,
        PaymentMethod::Cash,
        PaymentMethod::Bbva,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Interbank => "INTERBANK",
            Self::Bcp => "BCP",
            Self::Yape => "YAPE",
            Self::Plin => "PLIN",
            Self::Cash => "CASH",
            Self::Bbva => "BBVA",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = UnknownValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        if upper == "EFECTIVO" {
            return Ok(Self::Cash);
        }
        Self::ALL
            .iter()
            .copied()
            .find(|m| m.as_str() == upper)
            .ok_or_else(|| UnknownValueError::new("payment method", s))
    }
}
