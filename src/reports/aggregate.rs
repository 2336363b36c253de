//! Aggregations over movement views
//!
//! All sums skip movements whose amount is unreadable. Anything bucketed by
//! month also skips movements without an effective date.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::Serialize;

use crate::models::money::decimal;
use crate::models::{Category, Money, MonthLabel, Movement, MovementKind};

use super::filter::MovementFilter;

/// Variance percentage reported when there is no income to compare against
pub const NO_INCOME_VARIANCE_PCT: f64 = -100.0;

fn amounts<'a, I>(movements: I) -> Money
where
    I: IntoIterator<Item = &'a Movement>,
{
    movements.into_iter().filter_map(|m| m.amount).sum()
}

/// Income and ordinary-expense totals of a view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Totals {
    pub income: Money,
    /// Expenses outside the savings category
    pub expense: Money,
}

impl Totals {
    pub fn of(view: &[Movement]) -> Self {
        Self {
            income: amounts(view.iter().filter(|m| m.is_income())),
            expense: amounts(view.iter().filter(|m| m.is_ordinary_expense())),
        }
    }

    pub fn variance(&self) -> Money {
        self.income - self.expense
    }
}

/// Sum of savings expenses in a view
pub fn savings_total(view: &[Movement]) -> Money {
    amounts(view.iter().filter(|m| m.is_savings()))
}

/// `variance / income * 100`, or [`NO_INCOME_VARIANCE_PCT`] without income
pub fn variance_percentage(variance: Money, income: Money) -> f64 {
    if income.is_zero() {
        NO_INCOME_VARIANCE_PCT
    } else {
        variance.cents() as f64 / income.cents() as f64 * 100.0
    }
}

/// Headline figures for a filtered view
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    #[serde(with = "decimal")]
    pub income: Money,
    #[serde(with = "decimal")]
    pub expense: Money,
    #[serde(with = "decimal")]
    pub savings: Money,
    #[serde(with = "decimal")]
    pub variance: Money,
    pub variance_pct: f64,
}

impl Summary {
    /// Compute the summary of `movements` under `filter`
    ///
    /// Savings are counted over the same view minus the kind predicate, so
    /// the savings figure does not depend on which kinds are selected.
    pub fn compute(movements: &[Movement], filter: &MovementFilter) -> Self {
        let view = filter.apply(movements);
        let totals = Totals::of(&view);
        let savings = savings_total(&filter.without_kinds().apply(movements));
        let variance = totals.variance();

        Self {
            income: totals.income,
            expense: totals.expense,
            savings,
            variance,
            variance_pct: variance_percentage(variance, totals.income),
        }
    }
}

/// One (month, kind) bucket of the trend
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodKindTotal {
    pub month: MonthLabel,
    pub kind: MovementKind,
    #[serde(with = "decimal")]
    pub amount: Money,
}

/// Sums grouped by (month label, kind) in chronological order
pub fn group_by_period_and_kind(view: &[Movement]) -> Vec<PeriodKindTotal> {
    let mut groups: BTreeMap<(MonthLabel, MovementKind), Money> = BTreeMap::new();
    for m in view {
        if let (Some(month), Some(amount)) = (m.month_label(), m.amount) {
            *groups.entry((month, m.kind)).or_default() += amount;
        }
    }
    groups
        .into_iter()
        .map(|((month, kind), amount)| PeriodKindTotal {
            month,
            kind,
            amount,
        })
        .collect()
}

/// One (kind, category) bucket of the distribution
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KindCategoryTotal {
    pub kind: MovementKind,
    pub category: Category,
    #[serde(with = "decimal")]
    pub amount: Money,
}

/// Sums grouped by (kind, category)
pub fn group_by_kind_and_category(view: &[Movement]) -> Vec<KindCategoryTotal> {
    let mut groups: BTreeMap<(MovementKind, Category), Money> = BTreeMap::new();
    for m in view {
        if let Some(amount) = m.amount {
            *groups.entry((m.kind, m.category)).or_default() += amount;
        }
    }
    groups
        .into_iter()
        .map(|((kind, category), amount)| KindCategoryTotal {
            kind,
            category,
            amount,
        })
        .collect()
}

/// One (detail, kind) bucket of a category's breakdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailKindTotal {
    /// The detail, or the `none` placeholder
    pub detail: String,
    pub kind: MovementKind,
    #[serde(with = "decimal")]
    pub amount: Money,
}

/// Sums grouped by (detail, kind)
pub fn group_by_detail_and_kind(view: &[Movement]) -> Vec<DetailKindTotal> {
    let mut groups: BTreeMap<(String, MovementKind), Money> = BTreeMap::new();
    for m in view {
        if let Some(amount) = m.amount {
            *groups
                .entry((m.detail_or_sentinel().to_string(), m.kind))
                .or_default() += amount;
        }
    }
    groups
        .into_iter()
        .map(|((detail, kind), amount)| DetailKindTotal {
            detail,
            kind,
            amount,
        })
        .collect()
}

/// Direction of a pivot row's variation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VariationSign {
    #[serde(rename = "Positive variation")]
    Positive,
    #[serde(rename = "Negative variation")]
    Negative,
}

impl VariationSign {
    /// Zero counts as positive
    pub fn of(variation: Money) -> Self {
        if variation.is_negative() {
            Self::Negative
        } else {
            Self::Positive
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Positive => "Positive variation",
            Self::Negative => "Negative variation",
        }
    }
}

impl fmt::Display for VariationSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Income against expense for one key
///
/// `expense` here is every expense under the key, savings included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PivotRow<K> {
    pub key: K,
    #[serde(with = "decimal")]
    pub income: Money,
    #[serde(with = "decimal")]
    pub expense: Money,
    #[serde(with = "decimal")]
    pub variation: Money,
    pub sign: VariationSign,
}

fn pivot<K, F>(view: &[Movement], key_of: F) -> Vec<PivotRow<K>>
where
    K: Ord + Clone,
    F: Fn(&Movement) -> Option<K>,
{
    let mut cells: BTreeMap<K, (Money, Money)> = BTreeMap::new();
    for m in view {
        let (Some(key), Some(amount)) = (key_of(m), m.amount) else {
            continue;
        };
        let cell = cells.entry(key).or_default();
        match m.kind {
            MovementKind::Income => cell.0 += amount,
            MovementKind::Expense => cell.1 += amount,
        }
    }
    cells
        .into_iter()
        .map(|(key, (income, expense))| {
            let variation = income - expense;
            PivotRow {
                key,
                income,
                expense,
                variation,
                sign: VariationSign::of(variation),
            }
        })
        .collect()
}

/// Income/expense pivot indexed by month, chronological
pub fn pivot_by_period(view: &[Movement]) -> Vec<PivotRow<MonthLabel>> {
    pivot(view, Movement::month_label)
}

/// Income/expense pivot indexed by category
pub fn pivot_by_category(view: &[Movement]) -> Vec<PivotRow<Category>> {
    pivot(view, |m| Some(m.category))
}

/// Distinct month labels of a view in calendar order
pub fn ordered_month_labels(view: &[Movement]) -> Vec<MonthLabel> {
    view.iter()
        .filter_map(Movement::month_label)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
