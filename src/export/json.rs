//! JSON export
//!
//! Exports every movement with schema versioning, and serializes reports.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{LedgerError, LedgerResult};
use crate::models::Movement;
use crate::reports::Dashboard;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full movement export structure
#[derive(Debug, Clone, Serialize)]
pub struct MovementExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    pub movements: Vec<Movement>,

    pub metadata: ExportMetadata,
}

/// Export metadata for reference
#[derive(Debug, Clone, Serialize)]
pub struct ExportMetadata {
    pub movement_count: usize,

    /// Movements with an unreadable effective date
    pub undated_count: usize,

    /// Earliest effective date
    pub earliest: Option<String>,

    /// Latest effective date
    pub latest: Option<String>,
}

impl MovementExport {
    pub fn from_movements(movements: &[Movement]) -> Self {
        let dates = || movements.iter().filter_map(|m| m.effective_date);

        let metadata = ExportMetadata {
            movement_count: movements.len(),
            undated_count: movements
                .iter()
                .filter(|m| m.effective_date.is_none())
                .count(),
            earliest: dates().min().map(|d| d.to_string()),
            latest: dates().max().map(|d| d.to_string()),
        };

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            movements: movements.to_vec(),
            metadata,
        }
    }
}

fn write_json<W: Write, T: Serialize>(writer: &mut W, value: &T, pretty: bool) -> LedgerResult<()> {
    if pretty {
        serde_json::to_writer_pretty(writer, value)
    } else {
        serde_json::to_writer(writer, value)
    }
    .map_err(|e| LedgerError::Export(e.to_string()))
}

/// Export all movements to JSON
pub fn export_movements_json<W: Write>(
    movements: &[Movement],
    writer: &mut W,
    pretty: bool,
) -> LedgerResult<()> {
    write_json(writer, &MovementExport::from_movements(movements), pretty)
}

/// Serialize a report to JSON
pub fn export_report_json<W: Write>(dashboard: &Dashboard, writer: &mut W) -> LedgerResult<()> {
    write_json(writer, dashboard, true)
}
