//! YAML export
//!
//! Human-readable movement exports and reports.

use std::io::Write;

use crate::error::{LedgerError, LedgerResult};
use crate::export::json::MovementExport;
use crate::models::Movement;
use crate::reports::Dashboard;

/// Export all movements to YAML
pub fn export_movements_yaml<W: Write>(movements: &[Movement], writer: &mut W) -> LedgerResult<()> {
    let export = MovementExport::from_movements(movements);
    let io_err = |e: std::io::Error| LedgerError::Export(e.to_string());

    writeln!(writer, "# Pocket Ledger Movement Export").map_err(io_err)?;
    writeln!(writer, "# Generated: {}", export.exported_at).map_err(io_err)?;
    writeln!(writer, "# App Version: {}", export.app_version).map_err(io_err)?;
    writeln!(writer).map_err(io_err)?;

    serde_yaml::to_writer(writer, &export).map_err(|e| LedgerError::Export(e.to_string()))
}

/// Serialize a report to YAML
pub fn export_report_yaml<W: Write>(dashboard: &Dashboard, writer: &mut W) -> LedgerResult<()> {
    serde_yaml::to_writer(writer, dashboard).map_err(|e| LedgerError::Export(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::movement::fixtures::{date, movement};
    use crate::models::{Category, MovementKind};
    use crate::reports::MovementFilter;

    #[test]
    fn test_export_movements_yaml() {
        let movements = vec![movement(
            MovementKind::Expense,
            Category::Savings,
            date(2025, 1, 5),
            10_000,
        )];
        let mut output = Vec::new();
        export_movements_yaml(&movements, &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();

        assert!(text.starts_with("# Pocket Ledger Movement Export"));
        assert!(text.contains("movement_count: 1"));
        assert!(text.contains("category: Ahorros"));
    }

    #[test]
    fn test_export_report_yaml() {
        let movements = vec![
            movement(MovementKind::Income, Category::Other, date(2025, 1, 5), 50_000),
            movement(MovementKind::Expense, Category::Food, date(2025, 1, 6), 20_000),
        ];
        let dashboard = Dashboard::build(&movements, &MovementFilter::new());
        let mut output = Vec::new();
        export_report_yaml(&dashboard, &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();

        assert!(text.contains("variance_pct: 60.0"));
        assert!(text.contains("- Ene 2025"));
    }
}
