//! Dashboard report
//!
//! One recompute pass over the collection producing every table the
//! reporting view shows. The trend and the period pivot ignore the period
//! selection so they always span every month; everything else uses the full
//! filter.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::display::report as render;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Category, MonthLabel, Movement};

use super::aggregate::{
    group_by_detail_and_kind, group_by_kind_and_category, group_by_period_and_kind,
    ordered_month_labels, pivot_by_category, pivot_by_period, DetailKindTotal, KindCategoryTotal,
    PeriodKindTotal, PivotRow, Summary,
};
use super::filter::MovementFilter;

/// Every reporting table for one filter selection
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub generated_at: DateTime<Utc>,
    /// Movements in the filtered view
    pub movement_count: usize,
    pub summary: Summary,
    /// Month labels of the trend, in calendar order
    pub months: Vec<MonthLabel>,
    pub trend: Vec<PeriodKindTotal>,
    pub period_pivot: Vec<PivotRow<MonthLabel>>,
    pub distribution: Vec<KindCategoryTotal>,
    pub category_pivot: Vec<PivotRow<Category>>,
    /// Per-detail breakdown, only when a category is selected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<DetailKindTotal>>,
}

impl Dashboard {
    pub fn build(movements: &[Movement], filter: &MovementFilter) -> Self {
        let view = filter.apply(movements);
        let all_months = filter.without_period().apply(movements);

        let details = filter
            .selected_category()
            .map(|_| group_by_detail_and_kind(&view));

        tracing::debug!(
            total = movements.len(),
            filtered = view.len(),
            "built dashboard"
        );

        Self {
            generated_at: Utc::now(),
            movement_count: view.len(),
            summary: Summary::compute(movements, filter),
            months: ordered_month_labels(&all_months),
            trend: group_by_period_and_kind(&all_months),
            period_pivot: pivot_by_period(&all_months),
            distribution: group_by_kind_and_category(&view),
            category_pivot: pivot_by_category(&view),
            details,
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "Movement Report ({} movements)\n",
            self.movement_count
        ));
        output.push_str(&"=".repeat(60));
        output.push('\n');
        output.push_str(&render::summary_table(&self.summary, currency));
        output.push_str("\n\n");

        if self.months.is_empty() {
            output.push_str("No dated movements.\n");
        } else {
            output.push_str("Trend\n");
            output.push_str(&render::trend_table(&self.trend, currency));
            output.push_str("\n\nBy month\n");
            output.push_str(&render::pivot_table("Month", &self.period_pivot, currency));
            output.push('\n');
        }

        if !self.distribution.is_empty() {
            output.push_str("\nBy category\n");
            output.push_str(&render::distribution_table(&self.distribution, currency));
            output.push_str("\n\n");
            output.push_str(&render::pivot_table(
                "Category",
                &self.category_pivot,
                currency,
            ));
            output.push('\n');
        }

        if let Some(details) = &self.details {
            output.push_str("\nBy detail\n");
            output.push_str(&render::detail_table(details, currency));
            output.push('\n');
        }

        output
    }

    /// Export every table as one flat CSV
    pub fn export_csv<W: Write>(&self, writer: W) -> LedgerResult<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        let export_err = |e: csv::Error| LedgerError::Export(e.to_string());

        wtr.write_record([
            "section", "month", "kind", "category", "detail", "income", "expense", "amount",
            "variation", "sign",
        ])
        .map_err(export_err)?;

        let s = &self.summary;
        for (name, value) in [
            ("income", s.income),
            ("expense", s.expense),
            ("savings", s.savings),
            ("variance", s.variance),
        ] {
            wtr.write_record([
                "summary",
                "",
                "",
                "",
                name,
                "",
                "",
                value.to_string().as_str(),
                "",
                "",
            ])
            .map_err(export_err)?;
        }
        wtr.write_record([
            "summary",
            "",
            "",
            "",
            "variance_pct",
            "",
            "",
            format!("{:.2}", s.variance_pct).as_str(),
            "",
            "",
        ])
        .map_err(export_err)?;

        for row in &self.trend {
            wtr.write_record([
                "trend",
                row.month.to_string().as_str(),
                row.kind.as_str(),
                "",
                "",
                "",
                "",
                row.amount.to_string().as_str(),
                "",
                "",
            ])
            .map_err(export_err)?;
        }

        for row in &self.period_pivot {
            wtr.write_record([
                "period_pivot",
                row.key.to_string().as_str(),
                "",
                "",
                "",
                row.income.to_string().as_str(),
                row.expense.to_string().as_str(),
                "",
                row.variation.to_string().as_str(),
                row.sign.label(),
            ])
            .map_err(export_err)?;
        }

        for row in &self.distribution {
            wtr.write_record([
                "distribution",
                "",
                row.kind.as_str(),
                row.category.label(),
                "",
                "",
                "",
                row.amount.to_string().as_str(),
                "",
                "",
            ])
            .map_err(export_err)?;
        }

        for row in &self.category_pivot {
            wtr.write_record([
                "category_pivot",
                "",
                "",
                row.key.label(),
                "",
                row.income.to_string().as_str(),
                row.expense.to_string().as_str(),
                "",
                row.variation.to_string().as_str(),
                row.sign.label(),
            ])
            .map_err(export_err)?;
        }

        for row in self.details.iter().flatten() {
            wtr.write_record([
                "details",
                "",
                row.kind.as_str(),
                "",
                row.detail.as_str(),
                "",
                "",
                row.amount.to_string().as_str(),
                "",
                "",
            ])
            .map_err(export_err)?;
        }

        wtr.flush()
            .map_err(|e| LedgerError::Export(e.to_string()))?;
        Ok(())
    }
}
