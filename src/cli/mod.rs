//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod auth;
pub mod export;
pub mod movement;
pub mod report;
pub mod taxonomy;
pub mod user;

pub use export::{handle_export_command, ExportArgs};
pub use movement::{handle_movement_command, MovementCommands};
pub use report::{handle_report_command, ReportArgs};
pub use taxonomy::{handle_taxonomy_command, TaxonomyArgs};
pub use user::{handle_user_command, UserCommands};

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use chrono::NaiveDate;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{
    Category, KindSelection, MonthLabel, Money, MovementKind, PaymentMethod, YearMonth,
};

pub(crate) fn parse_kind(s: &str) -> LedgerResult<MovementKind> {
    s.parse()
        .map_err(|e| LedgerError::Validation(format!("{}", e)))
}

pub(crate) fn parse_kind_selection(s: &str) -> LedgerResult<KindSelection> {
    s.parse()
        .map_err(|e| LedgerError::Validation(format!("{}", e)))
}

pub(crate) fn parse_category(s: &str) -> LedgerResult<Category> {
    s.parse()
        .map_err(|e| LedgerError::Validation(format!("{}", e)))
}

pub(crate) fn parse_payment(s: &str) -> LedgerResult<PaymentMethod> {
    s.parse()
        .map_err(|e| LedgerError::Validation(format!("{}", e)))
}

pub(crate) fn parse_amount(s: &str) -> LedgerResult<Money> {
    Money::parse(s).map_err(|e| LedgerError::Validation(format!("Invalid amount: {}", e)))
}

pub(crate) fn parse_date(s: &str) -> LedgerResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
        LedgerError::Validation(format!("Invalid date: '{}'. Use YYYY-MM-DD format.", s))
    })
}

/// A period given as `YYYY-MM` or as a month label such as `Ene 2025`
pub(crate) fn parse_period(s: &str) -> LedgerResult<YearMonth> {
    s.parse::<YearMonth>()
        .or_else(|_| s.parse::<MonthLabel>().map(|label| label.period()))
        .map_err(|_| {
            LedgerError::Validation(format!(
                "Invalid period: '{}'. Use YYYY-MM or a month label like 'Ene 2025'.",
                s
            ))
        })
}

/// Stdout, or a buffered file when an output path is given
pub(crate) fn open_output(output: Option<&Path>) -> LedgerResult<Box<dyn Write>> {
    match output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                LedgerError::Export(format!("Failed to create {}: {}", path.display(), e))
            })?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout().lock())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_period_accepts_both_forms() {
        let expected = YearMonth::new(2025, 1).unwrap();
        assert_eq!(parse_period("2025-01").unwrap(), expected);
        assert_eq!(parse_period("Ene 2025").unwrap(), expected);
        assert!(parse_period("January").unwrap_err().is_validation());
    }

    #[test]
    fn test_parse_helpers_map_to_validation() {
        assert_eq!(parse_kind("income").unwrap(), MovementKind::Income);
        assert_eq!(
            parse_kind_selection("savings").unwrap(),
            KindSelection::Savings
        );
        assert_eq!(parse_category("food").unwrap(), Category::Food);
        assert_eq!(parse_payment("yape").unwrap(), PaymentMethod::Yape);
        assert_eq!(parse_amount("12.50").unwrap(), Money::from_cents(1250));

        assert!(parse_kind("transfer").unwrap_err().is_validation());
        assert!(parse_amount("abc").unwrap_err().is_validation());
        assert!(parse_date("2025/01/01").unwrap_err().is_validation());
    }
}
