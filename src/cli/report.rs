//! CLI command for the movement report
//!
//! Builds the dashboard for one filter selection and prints it, or writes it
//! as CSV, JSON or YAML.

use std::io::Write;
use std::path::PathBuf;

use clap::{Args, ValueEnum};

use crate::config::settings::Settings;
use crate::error::{LedgerError, LedgerResult};
use crate::export::{export_report_json, export_report_yaml};
use crate::reports::{Dashboard, MovementFilter};
use crate::storage::{MovementStore, Storage};

use super::{open_output, parse_category, parse_kind_selection, parse_period};

/// Output format for the report
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum ReportFormat {
    #[default]
    Terminal,
    Csv,
    Json,
    Yaml,
}

/// Report filter and output options
#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Period (YYYY-MM or "Ene 2025"), repeatable; all periods when omitted
    #[arg(short, long)]
    pub period: Vec<String>,

    /// Kind (income, expense, savings), repeatable; defaults from settings
    #[arg(short, long)]
    pub kind: Vec<String>,

    /// Category label or code
    #[arg(short, long)]
    pub category: Option<String>,

    /// Type within the selected category
    #[arg(short, long, requires = "category")]
    pub detail: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Terminal)]
    pub format: ReportFormat,

    /// Write to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl ReportArgs {
    /// The filter these arguments select
    pub fn filter(&self, settings: &Settings) -> LedgerResult<MovementFilter> {
        let mut filter = MovementFilter::new();

        if !self.period.is_empty() {
            let periods = self
                .period
                .iter()
                .map(|p| parse_period(p))
                .collect::<LedgerResult<Vec<_>>>()?;
            filter = filter.periods(periods);
        }

        let kinds = if self.kind.is_empty() {
            settings.default_kinds.clone()
        } else {
            self.kind
                .iter()
                .map(|k| parse_kind_selection(k))
                .collect::<LedgerResult<Vec<_>>>()?
        };
        filter = filter.kinds(kinds);

        if let Some(category) = &self.category {
            filter = filter.category(parse_category(category)?);
        }
        if let Some(detail) = &self.detail {
            filter = filter.detail(detail.clone());
        }

        Ok(filter)
    }
}

/// Handle the report command
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    args: ReportArgs,
) -> LedgerResult<()> {
    let filter = args.filter(settings)?;
    let movements = storage.movements.list_all()?;
    let dashboard = Dashboard::build(&movements, &filter);

    let mut out = open_output(args.output.as_deref())?;
    match args.format {
        ReportFormat::Terminal => {
            out.write_all(dashboard.format_terminal(&settings.currency_symbol).as_bytes())?;
        }
        ReportFormat::Csv => dashboard.export_csv(&mut out)?,
        ReportFormat::Json => export_report_json(&dashboard, &mut out)?,
        ReportFormat::Yaml => export_report_yaml(&dashboard, &mut out)?,
    }
    out.flush()
        .map_err(|e| LedgerError::Export(format!("Failed to write report: {}", e)))?;

    if let Some(path) = &args.output {
        println!("Report exported to: {}", path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, KindSelection, YearMonth};

    fn args() -> ReportArgs {
        ReportArgs {
            period: Vec::new(),
            kind: Vec::new(),
            category: None,
            detail: None,
            format: ReportFormat::Terminal,
            output: None,
        }
    }

    #[test]
    fn test_default_kinds_come_from_settings() {
        let settings = Settings::default();
        let filter = args().filter(&settings).unwrap();

        let kinds: Vec<_> = filter.selected_kinds().unwrap().iter().copied().collect();
        assert_eq!(kinds, KindSelection::default_set());
        assert!(filter.selected_periods().is_none());
    }

    #[test]
    fn test_explicit_selection() {
        let mut a = args();
        a.period = vec!["2025-01".into(), "Feb 2025".into()];
        a.kind = vec!["savings".into()];
        a.category = Some("Alimentos".into());
        a.detail = Some("Carne".into());

        let filter = a.filter(&Settings::default()).unwrap();
        let periods: Vec<_> = filter.selected_periods().unwrap().iter().copied().collect();
        assert_eq!(
            periods,
            vec![
                YearMonth::new(2025, 1).unwrap(),
                YearMonth::new(2025, 2).unwrap()
            ]
        );
        assert_eq!(filter.selected_category(), Some(Category::Food));
        assert_eq!(filter.selected_detail(), Some("Carne"));
    }

    #[test]
    fn test_bad_period_is_rejected() {
        let mut a = args();
        a.period = vec!["someday".into()];
        assert!(a.filter(&Settings::default()).unwrap_err().is_validation());
    }
}
