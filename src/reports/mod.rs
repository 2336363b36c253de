//! Reports module
//!
//! Filtering, aggregation and the dashboard built from them.

pub mod aggregate;
pub mod dashboard;
pub mod filter;

pub use aggregate::{
    group_by_detail_and_kind, group_by_kind_and_category, group_by_period_and_kind,
    ordered_month_labels, pivot_by_category, pivot_by_period, savings_total, variance_percentage,
    PivotRow, Summary, Totals, VariationSign, NO_INCOME_VARIANCE_PCT,
};
pub use dashboard::Dashboard;
pub use filter::MovementFilter;
