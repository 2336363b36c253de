//! Movement filter
//!
//! Independent predicates combined by AND. The kind predicate carries one
//! union: selecting `Savings` admits savings expenses even when `Expense`
//! itself is not selected. Filtering always returns a new vector and never
//! touches its input.

use std::collections::BTreeSet;

use crate::models::{Category, KindSelection, Movement, YearMonth};

/// Composable movement filter; an unset dimension admits everything
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovementFilter {
    periods: Option<BTreeSet<YearMonth>>,
    kinds: Option<BTreeSet<KindSelection>>,
    category: Option<Category>,
    detail: Option<String>,
}

impl MovementFilter {
    /// Create a new empty filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to movements whose effective date falls in one of `periods`
    ///
    /// An active period filter excludes undated movements.
    pub fn periods<I: IntoIterator<Item = YearMonth>>(mut self, periods: I) -> Self {
        self.periods = Some(periods.into_iter().collect());
        self
    }

    /// Restrict to the selected kinds
    pub fn kinds<I: IntoIterator<Item = KindSelection>>(mut self, kinds: I) -> Self {
        self.kinds = Some(kinds.into_iter().collect());
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Restrict to one detail; ignored unless a category is also set
    pub fn detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// The same filter with the period predicate removed
    pub fn without_period(&self) -> Self {
        Self {
            periods: None,
            ..self.clone()
        }
    }

    /// The same filter with the kind predicate removed
    pub fn without_kinds(&self) -> Self {
        Self {
            kinds: None,
            ..self.clone()
        }
    }

    pub fn selected_periods(&self) -> Option<&BTreeSet<YearMonth>> {
        self.periods.as_ref()
    }

    pub fn selected_kinds(&self) -> Option<&BTreeSet<KindSelection>> {
        self.kinds.as_ref()
    }

    pub fn selected_category(&self) -> Option<Category> {
        self.category
    }

    /// The detail predicate, only when it is in effect
    pub fn selected_detail(&self) -> Option<&str> {
        self.category.and(self.detail.as_deref())
    }

    fn matches_period(&self, movement: &Movement) -> bool {
        match &self.periods {
            None => true,
            Some(periods) => movement.period().is_some_and(|p| periods.contains(&p)),
        }
    }

    fn matches_kind(&self, movement: &Movement) -> bool {
        match &self.kinds {
            None => true,
            Some(kinds) => {
                kinds.contains(&KindSelection::from(movement.kind))
                    || (kinds.contains(&KindSelection::Savings) && movement.is_savings())
            }
        }
    }

    fn matches_category(&self, movement: &Movement) -> bool {
        self.category.map_or(true, |c| movement.category == c)
    }

    fn matches_detail(&self, movement: &Movement) -> bool {
        self.selected_detail()
            .map_or(true, |d| movement.detail.as_deref() == Some(d))
    }

    /// Whether a single movement passes every active predicate
    pub fn matches(&self, movement: &Movement) -> bool {
        self.matches_period(movement)
            && self.matches_kind(movement)
            && self.matches_category(movement)
            && self.matches_detail(movement)
    }

    /// The filtered view of `movements`
    pub fn apply(&self, movements: &[Movement]) -> Vec<Movement> {
        movements
            .iter()
            .filter(|m| self.matches(m))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::movement::fixtures::{date, movement};
    use crate::models::MovementKind;

    fn ym(year: i32, month: u32) -> YearMonth {
        YearMonth::new(year, month).unwrap()
    }

    fn sample() -> Vec<Movement> {
        let mut luz = movement(MovementKind::Expense, Category::Housing, date(2025, 1, 3), 8_000);
        luz.detail = Some("Luz".into());
        let mut internet = movement(MovementKind::Expense, Category::Housing, date(2025, 2, 3), 9_000);
        internet.detail = Some("Internet".into());
        let mut undated = movement(MovementKind::Expense, Category::Food, date(2025, 1, 1), 100);
        undated.effective_date = None;

        vec![
            movement(MovementKind::Income, Category::Food, date(2025, 1, 2), 50_000),
            movement(MovementKind::Expense, Category::Food, date(2025, 1, 9), 20_000),
            movement(MovementKind::Expense, Category::Savings, date(2025, 1, 20), 10_000),
            movement(MovementKind::Income, Category::Savings, date(2025, 2, 20), 7_000),
            luz,
            internet,
            undated,
        ]
    }

    fn ids(view: &[Movement]) -> Vec<String> {
        let mut ids: Vec<String> = view
            .iter()
            .map(|m| m.id.as_ref().unwrap().to_string())
            .collect();
        ids.sort();
        ids
    }

    #[test]
    fn test_empty_filter_keeps_everything() {
        let movements = sample();
        assert_eq!(MovementFilter::new().apply(&movements), movements);
    }

    #[test]
    fn test_period_excludes_undated() {
        let movements = sample();
        let view = MovementFilter::new().periods([ym(2025, 1)]).apply(&movements);
        assert_eq!(view.len(), 4);
        assert!(view.iter().all(|m| m.effective_date.is_some()));
    }

    #[test]
    fn test_empty_period_selection_matches_nothing() {
        let movements = sample();
        let view = MovementFilter::new()
            .periods(std::iter::empty())
            .apply(&movements);
        assert!(view.is_empty());
    }

    #[test]
    fn test_savings_union() {
        let movements = sample();
        let view = MovementFilter::new()
            .kinds([KindSelection::Income, KindSelection::Savings])
            .apply(&movements);

        // All income plus the savings expense, no ordinary expense
        assert_eq!(view.len(), 3);
        assert!(view
            .iter()
            .all(|m| m.kind == MovementKind::Income || m.is_savings()));
    }

    #[test]
    fn test_savings_alone_excludes_savings_income() {
        let movements = sample();
        let view = MovementFilter::new()
            .kinds([KindSelection::Savings])
            .apply(&movements);
        assert_eq!(view.len(), 1);
        assert!(view[0].is_savings());
    }

    #[test]
    fn test_detail_requires_category() {
        let movements = sample();
        let detail_only = MovementFilter::new().detail("Luz").apply(&movements);
        assert_eq!(detail_only.len(), movements.len());

        let view = MovementFilter::new()
            .category(Category::Housing)
            .detail("Luz")
            .apply(&movements);
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].detail.as_deref(), Some("Luz"));
    }

    #[test]
    fn test_apply_does_not_mutate_source() {
        let movements = sample();
        let before = movements.clone();
        let _ = MovementFilter::new()
            .category(Category::Food)
            .apply(&movements);
        assert_eq!(movements, before);
    }

    #[test]
    fn test_idempotent() {
        let movements = sample();
        let filter = MovementFilter::new()
            .periods([ym(2025, 1)])
            .kinds(KindSelection::default_set());
        let once = filter.apply(&movements);
        let twice = filter.apply(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_predicates_commute() {
        let movements = sample();
        let by_period = MovementFilter::new().periods([ym(2025, 1)]);
        let by_kind = MovementFilter::new().kinds([KindSelection::Expense]);
        let by_category = MovementFilter::new().category(Category::Food);

        let a = by_category.apply(&by_kind.apply(&by_period.apply(&movements)));
        let b = by_period.apply(&by_category.apply(&by_kind.apply(&movements)));
        let combined = MovementFilter::new()
            .kinds([KindSelection::Expense])
            .category(Category::Food)
            .periods([ym(2025, 1)])
            .apply(&movements);

        assert_eq!(ids(&a), ids(&b));
        assert_eq!(ids(&a), ids(&combined));
        assert_eq!(a.len(), 1);
    }

    #[test]
    fn test_without_period() {
        let filter = MovementFilter::new()
            .periods([ym(2025, 1)])
            .category(Category::Food);
        let relaxed = filter.without_period();
        assert_eq!(relaxed.selected_periods(), None);
        assert_eq!(relaxed.selected_category(), Some(Category::Food));
    }
}
