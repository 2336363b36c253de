//! Top-level movement categories
//!
//! Categories are a closed set shared by income and expense. The stored
//! label is the Spanish name used by the household ledger; the variant names
//! are the identifiers used in code.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::kind::UnknownValueError;

/// A top-level category of the taxonomy
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Vivienda")]
    Housing,
    #[serde(rename = "Aseo (Limpieza)")]
    Cleaning,
    #[serde(rename = "Alimentos")]
    Food,
    #[serde(rename = "Servicios")]
    Services,
    #[serde(rename = "Entretenimiento")]
    Entertainment,
    #[serde(rename = "Otros")]
    Other,
    #[serde(rename = "Ahorros")]
    Savings,
    #[serde(rename = "Manuntención")]
    Support,
}

impl Category {
    /// All categories in taxonomy order
    pub const ALL: [Category; 8] = [
        Category::Housing,
        Category::Cleaning,
        Category::Food,
        Category::Services,
        Category::Entertainment,
        Category::Other,
        Category::Savings,
        Category::Support,
    ];

    /// The stored label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Housing => "Vivienda",
            Self::Cleaning => "Aseo (Limpieza)",
            Self::Food => "Alimentos",
            Self::Services => "Servicios",
            Self::Entertainment => "Entretenimiento",
            Self::Other => "Otros",
            Self::Savings => "Ahorros",
            Self::Support => "Manuntención",
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Self::Housing => "housing",
            Self::Cleaning => "cleaning",
            Self::Food => "food",
            Self::Services => "services",
            Self::Entertainment => "entertainment",
            Self::Other => "other",
            Self::Savings => "savings",
            Self::Support => "support",
        }
    }

    /// Whether expenses in this category are tracked as savings
    pub fn is_savings(&self) -> bool {
        matches!(self, Self::Savings)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = UnknownValueError;

    /// Accepts either the stored label or the code name, case-insensitively
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.label().to_lowercase() == needle || c.code() == needle)
            .ok_or_else(|| UnknownValueError::new("category", s))
    }
}
