//! Report tables for terminal output

use std::fmt::Display;

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::builder::Builder;
use tabled::{Table, Tabled};

use crate::models::Money;
use crate::reports::aggregate::{
    DetailKindTotal, KindCategoryTotal, PeriodKindTotal, PivotRow, Summary, NO_INCOME_VARIANCE_PCT,
};

/// Format a variance percentage; the no-income sentinel is called out
pub fn format_percentage(pct: f64) -> String {
    if pct == NO_INCOME_VARIANCE_PCT {
        format!("{:.1}% (no income)", pct)
    } else {
        format!("{:.1}%", pct)
    }
}

fn render<T: Tabled>(rows: Vec<T>, numeric_from: usize) -> String {
    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .modify(Columns::new(numeric_from..), Alignment::right());
    table.to_string()
}

#[derive(Tabled)]
struct FigureRow {
    #[tabled(rename = "Figure")]
    name: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

pub fn summary_table(summary: &Summary, currency: &str) -> String {
    let money = |m: Money| m.format_with_symbol(currency);
    let rows = vec![
        FigureRow {
            name: "Income",
            value: money(summary.income),
        },
        FigureRow {
            name: "Expense",
            value: money(summary.expense),
        },
        FigureRow {
            name: "Savings",
            value: money(summary.savings),
        },
        FigureRow {
            name: "Variance",
            value: money(summary.variance),
        },
        FigureRow {
            name: "Variance %",
            value: format_percentage(summary.variance_pct),
        },
    ];
    render(rows, 1)
}

#[derive(Tabled)]
struct TrendRow {
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

pub fn trend_table(rows: &[PeriodKindTotal], currency: &str) -> String {
    let rows = rows
        .iter()
        .map(|r| TrendRow {
            month: r.month.to_string(),
            kind: r.kind.to_string(),
            amount: r.amount.format_with_symbol(currency),
        })
        .collect();
    render::<TrendRow>(rows, 2)
}

#[derive(Tabled)]
struct DistributionRow {
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

pub fn distribution_table(rows: &[KindCategoryTotal], currency: &str) -> String {
    let rows = rows
        .iter()
        .map(|r| DistributionRow {
            kind: r.kind.to_string(),
            category: r.category.to_string(),
            amount: r.amount.format_with_symbol(currency),
        })
        .collect();
    render::<DistributionRow>(rows, 2)
}

#[derive(Tabled)]
struct DetailRow {
    #[tabled(rename = "Detail")]
    detail: String,
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

pub fn detail_table(rows: &[DetailKindTotal], currency: &str) -> String {
    let rows = rows
        .iter()
        .map(|r| DetailRow {
            detail: r.detail.clone(),
            kind: r.kind.to_string(),
            amount: r.amount.format_with_symbol(currency),
        })
        .collect();
    render::<DetailRow>(rows, 2)
}

/// Pivot table with `key_header` naming the first column
pub fn pivot_table<K: Display>(key_header: &str, rows: &[PivotRow<K>], currency: &str) -> String {
    let mut builder = Builder::default();
    builder.push_record([
        key_header.to_string(),
        "Income".to_string(),
        "Expense".to_string(),
        "Variation".to_string(),
        "Sign".to_string(),
    ]);
    for r in rows {
        builder.push_record([
            r.key.to_string(),
            r.income.format_with_symbol(currency),
            r.expense.format_with_symbol(currency),
            r.variation.format_with_symbol(currency),
            r.sign.to_string(),
        ]);
    }

    let mut table = builder.build();
    table
        .with(Style::rounded())
        .modify(Columns::new(1..4), Alignment::right());
    table.to_string()
}
