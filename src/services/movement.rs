//! Movement service
//!
//! Entry, edit and delete flows. Every mutation goes to the store first; the
//! in-memory collection is only touched once the store call succeeded.

use chrono::{Local, NaiveDate};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{
    Category, Money, Movement, MovementCollection, MovementKind, MovementPatch, PaymentMethod,
};
use crate::storage::MovementStore;
use crate::taxonomy::Taxonomy;

use super::effective_date::EffectiveDatePolicy;
use super::session::Session;

/// What the user enters for a new or edited movement
#[derive(Debug, Clone)]
pub struct MovementInput {
    pub nominal_date: NaiveDate,
    pub kind: MovementKind,
    pub category: Category,
    /// Type under the category
    pub type_name: String,
    /// Detail under the type, for types that have one
    pub detail: Option<String>,
    pub payment_method: PaymentMethod,
    pub amount: Money,
    pub comment: String,
}

/// Service for recording and maintaining movements
pub struct MovementService<'a, S: MovementStore + ?Sized> {
    store: &'a S,
    taxonomy: &'a Taxonomy,
    policy: EffectiveDatePolicy,
}

impl<'a, S: MovementStore + ?Sized> MovementService<'a, S> {
    pub fn new(store: &'a S, taxonomy: &'a Taxonomy, policy: EffectiveDatePolicy) -> Self {
        Self {
            store,
            taxonomy,
            policy,
        }
    }

    /// Load the whole collection from the store
    pub fn load(&self) -> LedgerResult<MovementCollection> {
        let movements = self.store.list_all()?;
        tracing::debug!(count = movements.len(), "loaded movements");
        Ok(MovementCollection::from_movements(movements))
    }

    /// Record a new movement and append it to the collection
    pub fn record(
        &self,
        collection: &mut MovementCollection,
        session: &Session,
        input: MovementInput,
    ) -> LedgerResult<Movement> {
        let (detail, subdetail) = self.validate(&input)?;

        let mut movement = Movement {
            id: None,
            nominal_date: Some(input.nominal_date),
            registered_at: Some(Local::now().naive_local()),
            effective_date: Some(self.policy.for_creation(input.nominal_date, input.kind)),
            updated_at: None,
            kind: input.kind,
            category: input.category,
            detail,
            subdetail,
            payment_method: input.payment_method,
            amount: Some(input.amount),
            comment: input.comment.trim().to_string(),
            owner: session.owner().to_string(),
        };

        let id = self.store.create(&movement)?;
        tracing::info!(id = %id, owner = session.owner(), "recorded movement");

        movement.id = Some(id);
        collection.append(movement.clone());
        Ok(movement)
    }

    /// Edit a persisted movement and reload the collection
    ///
    /// The registration timestamp is kept; the effective date is resolved
    /// again with the edit threshold.
    pub fn edit(
        &self,
        collection: &mut MovementCollection,
        session: &Session,
        target: &Movement,
        input: MovementInput,
    ) -> LedgerResult<()> {
        let id = target
            .id
            .as_ref()
            .ok_or_else(|| LedgerError::Validation("Cannot edit a movement without an id".into()))?;
        let (detail, subdetail) = self.validate(&input)?;

        let patch = MovementPatch {
            nominal_date: input.nominal_date,
            effective_date: self.policy.for_edit(input.nominal_date, input.kind),
            updated_at: Local::now().naive_local(),
            kind: input.kind,
            category: input.category,
            detail,
            subdetail,
            payment_method: input.payment_method,
            amount: input.amount,
            comment: input.comment.trim().to_string(),
            owner: session.owner().to_string(),
        };

        self.store.update(id, &patch)?;
        collection.replace_all(self.store.list_all()?);

        tracing::info!(id = %id, owner = session.owner(), "edited movement");
        Ok(())
    }

    /// Delete a persisted movement and reload the collection
    pub fn delete(&self, collection: &mut MovementCollection, target: &Movement) -> LedgerResult<()> {
        let id = target.id.as_ref().ok_or_else(|| {
            LedgerError::Validation("Cannot delete a movement without an id".into())
        })?;

        self.store.delete(id)?;
        collection.replace_all(self.store.list_all()?);

        tracing::info!(id = %id, "deleted movement");
        Ok(())
    }

    fn validate(&self, input: &MovementInput) -> LedgerResult<(Option<String>, Option<String>)> {
        if input.amount.is_negative() {
            return Err(LedgerError::Validation(format!(
                "Amount cannot be negative: {}",
                input.amount
            )));
        }

        let classification = self.taxonomy.classify(
            input.kind,
            input.category,
            &input.type_name,
            input.detail.as_deref(),
        )?;
        Ok((classification.detail, classification.subdetail))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MovementId;
    use crate::reports::{MovementFilter, Summary};
    use crate::storage::JsonMovementStore;
    use tempfile::TempDir;

    fn create_test_store() -> (TempDir, JsonMovementStore) {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonMovementStore::new(temp_dir.path().join("movements.json"));
        (temp_dir, store)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn input(kind: MovementKind, category: Category, type_name: &str, cents: i64) -> MovementInput {
        MovementInput {
            nominal_date: date(2025, 1, 10),
            kind,
            category,
            type_name: type_name.to_string(),
            detail: None,
            payment_method: PaymentMethod::Yape,
            amount: Money::from_cents(cents),
            comment: String::new(),
        }
    }

    fn session() -> Session {
        Session::for_owner("ana")
    }

    #[test]
    fn test_record_late_income_shifts_to_next_month() {
        let (_temp_dir, store) = create_test_store();
        let taxonomy = Taxonomy::builtin();
        let service = MovementService::new(&store, &taxonomy, EffectiveDatePolicy::default());
        let mut collection = service.load().unwrap();

        let mut income = input(MovementKind::Income, Category::Food, "Sueldo", 100_000);
        income.nominal_date = date(2025, 4, 29);
        let recorded = service.record(&mut collection, &session(), income).unwrap();

        assert_eq!(recorded.effective_date, Some(date(2025, 5, 1)));
        assert_eq!(recorded.nominal_date, Some(date(2025, 4, 29)));
        assert!(recorded.registered_at.is_some());
        assert_eq!(recorded.updated_at, None);
        assert_eq!(recorded.owner, "ana");
        assert_eq!(collection.len(), 1);
        assert_eq!(store.list_all().unwrap().len(), 1);
    }

    #[test]
    fn test_record_early_income_keeps_date() {
        let (_temp_dir, store) = create_test_store();
        let taxonomy = Taxonomy::builtin();
        let service = MovementService::new(&store, &taxonomy, EffectiveDatePolicy::default());
        let mut collection = MovementCollection::new();

        let mut income = input(MovementKind::Income, Category::Food, "Sueldo", 100_000);
        income.nominal_date = date(2025, 4, 1);
        let recorded = service.record(&mut collection, &session(), income).unwrap();
        assert_eq!(recorded.effective_date, Some(date(2025, 4, 1)));
    }

    #[test]
    fn test_record_rejects_unknown_type_without_writing() {
        let (_temp_dir, store) = create_test_store();
        let taxonomy = Taxonomy::builtin();
        let service = MovementService::new(&store, &taxonomy, EffectiveDatePolicy::default());
        let mut collection = MovementCollection::new();

        let result = service.record(
            &mut collection,
            &session(),
            input(MovementKind::Expense, Category::Food, "Pizza", 100),
        );
        assert!(matches!(result, Err(LedgerError::Taxonomy(_))));
        assert!(collection.is_empty());
        assert!(store.list_all().unwrap().is_empty());
    }

    #[test]
    fn test_record_rejects_negative_amount() {
        let (_temp_dir, store) = create_test_store();
        let taxonomy = Taxonomy::builtin();
        let service = MovementService::new(&store, &taxonomy, EffectiveDatePolicy::default());
        let mut collection = MovementCollection::new();

        let result = service.record(
            &mut collection,
            &session(),
            input(MovementKind::Expense, Category::Food, "Carne", -1),
        );
        assert!(result.unwrap_err().is_validation());
    }

    #[test]
    fn test_record_nested_classification() {
        let (_temp_dir, store) = create_test_store();
        let taxonomy = Taxonomy::builtin();
        let service = MovementService::new(&store, &taxonomy, EffectiveDatePolicy::default());
        let mut collection = MovementCollection::new();

        let mut tuition = input(MovementKind::Expense, Category::Services, "Educación", 30_000);
        tuition.detail = Some("Libros".into());
        let recorded = service.record(&mut collection, &session(), tuition).unwrap();
        assert_eq!(recorded.detail.as_deref(), Some("Educación"));
        assert_eq!(recorded.subdetail.as_deref(), Some("Libros"));
    }

    #[test]
    fn test_edit_uses_edit_threshold_and_reloads() {
        let (_temp_dir, store) = create_test_store();
        let taxonomy = Taxonomy::builtin();
        let service = MovementService::new(&store, &taxonomy, EffectiveDatePolicy::default());
        let mut collection = MovementCollection::new();

        let original = service
            .record(
                &mut collection,
                &session(),
                input(MovementKind::Income, Category::Food, "Sueldo", 50_000),
            )
            .unwrap();

        // Six days before June 1st: stays under the edit threshold of five
        let mut changed = input(MovementKind::Income, Category::Food, "Bono", 60_000);
        changed.nominal_date = date(2025, 5, 26);
        service
            .edit(&mut collection, &Session::for_owner("luis"), &original, changed)
            .unwrap();

        let edited = collection.get(original.id.as_ref().unwrap()).unwrap();
        assert_eq!(edited.effective_date, Some(date(2025, 5, 26)));
        assert_eq!(edited.detail.as_deref(), Some("Bono"));
        assert_eq!(edited.amount, Some(Money::from_cents(60_000)));
        assert_eq!(edited.registered_at, original.registered_at);
        assert!(edited.updated_at.is_some());
        assert_eq!(edited.owner, "luis");
    }

    #[test]
    fn test_edit_requires_id() {
        let (_temp_dir, store) = create_test_store();
        let taxonomy = Taxonomy::builtin();
        let service = MovementService::new(&store, &taxonomy, EffectiveDatePolicy::default());
        let mut collection = MovementCollection::new();

        let mut unsaved = crate::models::movement::fixtures::movement(
            MovementKind::Expense,
            Category::Food,
            date(2025, 1, 1),
            100,
        );
        unsaved.id = None;
        let err = service
            .edit(
                &mut collection,
                &session(),
                &unsaved,
                input(MovementKind::Expense, Category::Food, "Carne", 100),
            )
            .unwrap_err();
        assert!(err.is_validation());
        assert!(service.delete(&mut collection, &unsaved).unwrap_err().is_validation());
    }

    #[test]
    fn test_edit_missing_leaves_collection_untouched() {
        let (_temp_dir, store) = create_test_store();
        let taxonomy = Taxonomy::builtin();
        let service = MovementService::new(&store, &taxonomy, EffectiveDatePolicy::default());
        let mut collection = MovementCollection::new();
        service
            .record(
                &mut collection,
                &session(),
                input(MovementKind::Expense, Category::Food, "Carne", 100),
            )
            .unwrap();

        let mut ghost = collection.as_slice()[0].clone();
        ghost.id = Some(MovementId::generate());
        let err = service
            .edit(
                &mut collection,
                &session(),
                &ghost,
                input(MovementKind::Expense, Category::Food, "Pollo", 999),
            )
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(collection.len(), 1);
        assert_eq!(collection.as_slice()[0].amount, Some(Money::from_cents(100)));
    }

    #[test]
    fn test_delete_removes_from_aggregates() {
        let (_temp_dir, store) = create_test_store();
        let taxonomy = Taxonomy::builtin();
        let service = MovementService::new(&store, &taxonomy, EffectiveDatePolicy::default());
        let mut collection = MovementCollection::new();

        service
            .record(
                &mut collection,
                &session(),
                input(MovementKind::Income, Category::Food, "Sueldo", 50_000),
            )
            .unwrap();
        let doomed = service
            .record(
                &mut collection,
                &session(),
                input(MovementKind::Expense, Category::Food, "Carne", 20_000),
            )
            .unwrap();

        service.delete(&mut collection, &doomed).unwrap();

        let summary = Summary::compute(collection.as_slice(), &MovementFilter::new());
        assert_eq!(summary.expense, Money::zero());
        assert_eq!(summary.income, Money::from_cents(50_000));
        assert!(collection.get(doomed.id.as_ref().unwrap()).is_none());
    }
}
