//! Movement kinds and the report-level kind selection
//!
//! A movement is either income or expense, nothing else. Reports additionally
//! understand a `Savings` pseudo-kind that selects expenses filed under the
//! savings category.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error for a value outside one of the closed enumerations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownValueError {
    pub expected: &'static str,
    pub value: String,
}

impl UnknownValueError {
    pub(crate) fn new(expected: &'static str, value: impl Into<String>) -> Self {
        Self {
            expected,
            value: value.into(),
        }
    }
}

impl fmt::Display for UnknownValueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {}: '{}'", self.expected, self.value)
    }
}

impl std::error::Error for UnknownValueError {}

/// Income or expense
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MovementKind {
    #[serde(alias = "Ingreso")]
    Income,
    #[serde(alias = "Egreso")]
    Expense,
}

impl MovementKind {
    /// Both kinds, in report order
    pub const ALL: [MovementKind; 2] = [MovementKind::Income, MovementKind::Expense];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "Income",
            Self::Expense => "Expense",
        }
    }
}

impl fmt::Display for MovementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MovementKind {
    type Err = UnknownValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" | "ingreso" => Ok(Self::Income),
            "expense" | "egreso" => Ok(Self::Expense),
            _ => Err(UnknownValueError::new("movement kind", s)),
        }
    }
}

/// One entry of the kind filter used by reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum KindSelection {
    Income,
    Expense,
    /// Expenses in the savings category, selected independently of `Expense`
    Savings,
}

impl KindSelection {
    /// The selection reports use when nothing is configured
    pub fn default_set() -> Vec<KindSelection> {
        vec![KindSelection::Income, KindSelection::Expense]
    }

    /// The plain movement kind this selection admits, if any
    pub fn as_kind(&self) -> Option<MovementKind> {
        match self {
            Self::Income => Some(MovementKind::Income),
            Self::Expense => Some(MovementKind::Expense),
            Self::Savings => None,
        }
    }
}

impl From<MovementKind> for KindSelection {
    fn from(kind: MovementKind) -> Self {
        match kind {
            MovementKind::Income => Self::Income,
            MovementKind::Expense => Self::Expense,
        }
    }
}

impl fmt::Display for KindSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "Income"),
            Self::Expense => write!(f, "Expense"),
            Self::Savings => write!(f, "Savings"),
        }
    }
}

impl FromStr for KindSelection {
    type Err = UnknownValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "savings" | "ahorros" => Ok(Self::Savings),
            other => other
                .parse::<MovementKind>()
                .map(Self::from)
                .map_err(|_| UnknownValueError::new("kind selection", s)),
        }
    }
}
