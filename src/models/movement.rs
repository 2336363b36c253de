//! Movement model
//!
//! A movement is a single dated, categorized income or expense. Date fields
//! are optional because stored documents may carry unreadable dates; such a
//! movement stays usable for everything except date-based bucketing.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::Category;
use super::ids::MovementId;
use super::kind::MovementKind;
use super::money::Money;
use super::payment::PaymentMethod;
use super::period::{MonthLabel, YearMonth};

/// Stored placeholder for an absent detail or subdetail
pub const NONE_SENTINEL: &str = "none";

/// Legacy placeholder written by older versions of the ledger
pub const LEGACY_NONE_SENTINEL: &str = "-";

/// Map a stored detail value to its optional form
pub fn detail_from_stored(value: Option<&str>) -> Option<String> {
    match value.map(str::trim) {
        None | Some("") | Some(NONE_SENTINEL) | Some(LEGACY_NONE_SENTINEL) => None,
        Some(v) => Some(v.to_string()),
    }
}

/// Serde helpers writing `None` as the explicit sentinel
pub(crate) mod sentinel {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(value.as_deref().unwrap_or(super::NONE_SENTINEL))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(super::detail_from_stored(raw.as_deref()))
    }
}

/// A recorded income or expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movement {
    /// Store-assigned identifier; absent until persisted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<MovementId>,

    /// The date the user entered
    pub nominal_date: Option<NaiveDate>,

    /// When the entry was created; never changed afterwards
    pub registered_at: Option<NaiveDateTime>,

    /// Accounting date used for period bucketing
    pub effective_date: Option<NaiveDate>,

    /// When the entry was last edited
    pub updated_at: Option<NaiveDateTime>,

    pub kind: MovementKind,

    pub category: Category,

    /// Second taxonomy level (the "type" under the category)
    #[serde(with = "sentinel", default)]
    pub detail: Option<String>,

    /// Third taxonomy level, when the type has one
    #[serde(with = "sentinel", default)]
    pub subdetail: Option<String>,

    pub payment_method: PaymentMethod,

    /// `None` when the stored amount was not numeric
    #[serde(with = "super::money::decimal::option", default)]
    pub amount: Option<Money>,

    #[serde(default)]
    pub comment: String,

    /// User who created or last edited the movement
    pub owner: String,
}

impl Movement {
    /// The month this movement is accounted in
    pub fn period(&self) -> Option<YearMonth> {
        self.effective_date.map(YearMonth::from_date)
    }

    /// The display label of `period()`
    pub fn month_label(&self) -> Option<MonthLabel> {
        self.period().map(|p| p.label())
    }

    /// Expense filed under the savings category
    pub fn is_savings(&self) -> bool {
        self.kind == MovementKind::Expense && self.category.is_savings()
    }

    /// Expense that counts toward ordinary spending
    pub fn is_ordinary_expense(&self) -> bool {
        self.kind == MovementKind::Expense && !self.category.is_savings()
    }

    pub fn is_income(&self) -> bool {
        self.kind == MovementKind::Income
    }

    pub fn detail_or_sentinel(&self) -> &str {
        self.detail.as_deref().unwrap_or(NONE_SENTINEL)
    }

    pub fn subdetail_or_sentinel(&self) -> &str {
        self.subdetail.as_deref().unwrap_or(NONE_SENTINEL)
    }
}

impl fmt::Display for Movement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let date = self
            .effective_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "????-??-??".to_string());
        let amount = self
            .amount
            .map(|a| a.to_string())
            .unwrap_or_else(|| "n/a".to_string());
        write!(
            f,
            "{} {} {} {}",
            date, self.kind, self.category, amount
        )
    }
}

/// Fields sent to the store when a movement is edited
///
/// Carries no `registered_at` or `id`: an edit never changes them.
#[derive(Debug, Clone, PartialEq)]
pub struct MovementPatch {
    pub nominal_date: NaiveDate,
    pub effective_date: NaiveDate,
    pub updated_at: NaiveDateTime,
    pub kind: MovementKind,
    pub category: Category,
    pub detail: Option<String>,
    pub subdetail: Option<String>,
    pub payment_method: PaymentMethod,
    pub amount: Money,
    pub comment: String,
    pub owner: String,
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// A persisted movement dated on its effective date
    pub fn movement(
        kind: MovementKind,
        category: Category,
        date: NaiveDate,
        cents: i64,
    ) -> Movement {
        Movement {
            id: Some(MovementId::generate()),
            nominal_date: Some(date),
            registered_at: date.and_hms_opt(12, 0, 0),
            effective_date: Some(date),
            updated_at: None,
            kind,
            category,
            detail: None,
            subdetail: None,
            payment_method: PaymentMethod::Bcp,
            amount: Some(Money::from_cents(cents)),
            comment: String::new(),
            owner: "ana".to_string(),
        }
    }

    pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::{date, movement};
    use super::*;

    #[test]
    fn test_period_and_label() {
        let m = movement(MovementKind::Income, Category::Housing, date(2024, 12, 3), 100);
        assert_eq!(m.period(), YearMonth::new(2024, 12));
        assert_eq!(m.month_label().unwrap().to_string(), "Dic 2024");
    }

    #[test]
    fn test_undated_movement_has_no_period() {
        let mut m = movement(MovementKind::Expense, Category::Food, date(2025, 1, 3), 100);
        m.effective_date = None;
        assert_eq!(m.period(), None);
        assert_eq!(m.month_label(), None);
    }

    #[test]
    fn test_savings_classification() {
        let saving = movement(MovementKind::Expense, Category::Savings, date(2025, 1, 3), 100);
        assert!(saving.is_savings());
        assert!(!saving.is_ordinary_expense());

        let income_to_savings =
            movement(MovementKind::Income, Category::Savings, date(2025, 1, 3), 100);
        assert!(!income_to_savings.is_savings());
    }

    #[test]
    fn test_detail_sentinel_serialization() {
        let mut m = movement(MovementKind::Expense, Category::Services, date(2025, 1, 3), 100);
        m.detail = Some("Educación".to_string());

        let value = serde_json::to_value(&m).unwrap();
        assert_eq!(value["detail"], "Educación");
        assert_eq!(value["subdetail"], NONE_SENTINEL);

        let back: Movement = serde_json::from_value(value).unwrap();
        assert_eq!(back.subdetail, None);
        assert_eq!(back, m);
    }

    #[test]
    fn test_detail_from_stored_accepts_legacy_placeholder() {
        assert_eq!(detail_from_stored(Some("-")), None);
        assert_eq!(detail_from_stored(Some("none")), None);
        assert_eq!(detail_from_stored(None), None);
        assert_eq!(detail_from_stored(Some("Sueldo")), Some("Sueldo".to_string()));
    }

    #[test]
    fn test_display() {
        let m = movement(MovementKind::Expense, Category::Food, date(2025, 1, 15), 5000);
        assert_eq!(m.to_string(), "2025-01-15 Expense Alimentos 50.00");
    }
}
