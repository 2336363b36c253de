//! Effective-date resolution
//!
//! Income that arrives in the last days of a month funds the next month, so
//! its accounting date moves to the first of that month unless enough of the
//! current month remains. Expenses are never shifted.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{MovementKind, YearMonth};

/// Days that must remain in the month for new income to stay in it
pub const CREATION_SHIFT_THRESHOLD_DAYS: i64 = 7;

/// Days that must remain in the month for edited income to stay in it
// TODO: confirm with the ledger owners whether edits should share the creation threshold
pub const EDIT_SHIFT_THRESHOLD_DAYS: i64 = 5;

/// Thresholds applied when recording and editing movements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectiveDatePolicy {
    #[serde(default = "default_creation_threshold")]
    pub creation_threshold_days: i64,
    #[serde(default = "default_edit_threshold")]
    pub edit_threshold_days: i64,
}

fn default_creation_threshold() -> i64 {
    CREATION_SHIFT_THRESHOLD_DAYS
}

fn default_edit_threshold() -> i64 {
    EDIT_SHIFT_THRESHOLD_DAYS
}

impl Default for EffectiveDatePolicy {
    fn default() -> Self {
        Self {
            creation_threshold_days: CREATION_SHIFT_THRESHOLD_DAYS,
            edit_threshold_days: EDIT_SHIFT_THRESHOLD_DAYS,
        }
    }
}

impl EffectiveDatePolicy {
    pub fn for_creation(&self, nominal: NaiveDate, kind: MovementKind) -> NaiveDate {
        resolve(nominal, kind, self.creation_threshold_days)
    }

    pub fn for_edit(&self, nominal: NaiveDate, kind: MovementKind) -> NaiveDate {
        resolve(nominal, kind, self.edit_threshold_days)
    }
}

/// Resolve the accounting date of a movement
///
/// Income keeps its date when at least `threshold_days` separate it from the
/// first of the following month (inclusive), otherwise it moves to that day.
pub fn resolve(nominal: NaiveDate, kind: MovementKind, threshold_days: i64) -> NaiveDate {
    match kind {
        MovementKind::Expense => nominal,
        MovementKind::Income => {
            let Some(next_month_first) = YearMonth::from_date(nominal).next().first_day() else {
                return nominal;
            };
            if (next_month_first - nominal).num_days() >= threshold_days {
                nominal
            } else {
                next_month_first
            }
        }
    }
}
