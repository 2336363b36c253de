//! CLI command for movement export

use std::io::Write;
use std::path::PathBuf;

use clap::{Args, ValueEnum};

use crate::error::{LedgerError, LedgerResult};
use crate::export::{export_movements_csv, export_movements_json, export_movements_yaml};
use crate::storage::{MovementStore, Storage};

use super::open_output;

/// Export format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    /// CSV format (one row per movement)
    Csv,
    /// JSON format (with schema version and metadata)
    Json,
    /// YAML format (human-readable)
    Yaml,
}

/// Export every stored movement
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Output file path; stdout when omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Export format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: ExportFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

/// Handle the export command
pub fn handle_export_command(storage: &Storage, args: ExportArgs) -> LedgerResult<()> {
    let movements = storage.movements.list_all()?;

    let mut out = open_output(args.output.as_deref())?;
    match args.format {
        ExportFormat::Csv => export_movements_csv(&movements, &mut out)?,
        ExportFormat::Json => export_movements_json(&movements, &mut out, args.pretty)?,
        ExportFormat::Yaml => export_movements_yaml(&movements, &mut out)?,
    }
    out.flush()
        .map_err(|e| LedgerError::Export(format!("Failed to write export: {}", e)))?;

    if let Some(path) = &args.output {
        println!(
            "Exported {} movements to: {}",
            movements.len(),
            path.display()
        );
    }

    Ok(())
}
