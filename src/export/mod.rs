//! Export module
//!
//! Movement exports in multiple formats:
//! - CSV: spreadsheet-compatible listing
//! - JSON: machine-readable export with schema version
//! - YAML: human-readable export
//!
//! Reports serialize through the same JSON and YAML writers.

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::export_movements_csv;
pub use json::{export_movements_json, export_report_json, MovementExport, EXPORT_SCHEMA_VERSION};
pub use yaml::{export_movements_yaml, export_report_yaml};
