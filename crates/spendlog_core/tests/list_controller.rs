use spendlog_core::{
    Category, DocumentStore, Expense, ExpenseFields, ExpenseId, ExpenseStore, ListController,
    StoreError, StoreResult,
};
use std::io;

fn fields(amount: &str, category: Category, note: &str) -> ExpenseFields {
    ExpenseFields {
        amount: amount.to_string(),
        category,
        note: note.to_string(),
        date: "2026-03-01T12:00:00.000Z".to_string(),
    }
}

fn seeded_store(entries: &[(&str, Category)]) -> DocumentStore {
    let store = DocumentStore::new();
    for (amount, category) in entries {
        store.create(&fields(amount, *category, "")).unwrap();
    }
    store
}

#[test]
fn refresh_loads_the_full_snapshot() {
    let store = seeded_store(&[("10", Category::Food), ("20", Category::Bills)]);
    let mut controller = ListController::new(store.clone());
    assert!(controller.records().is_empty());

    controller.refresh().unwrap();
    assert_eq!(controller.records().len(), 2);
}

#[test]
fn filtered_with_no_filter_is_every_record() {
    let store = seeded_store(&[("10", Category::Food), ("20", Category::Bills)]);
    let mut controller = ListController::new(store);
    controller.refresh().unwrap();

    assert_eq!(controller.filter(), None);
    assert_eq!(controller.filtered().len(), controller.records().len());
}

#[test]
fn filtered_is_exactly_the_matching_subset() {
    let store = seeded_store(&[
        ("10", Category::Food),
        ("20", Category::Travel),
        ("30", Category::Food),
    ]);
    let mut controller = ListController::new(store);
    controller.refresh().unwrap();

    controller.set_filter(Some(Category::Food));
    let food = controller.filtered();
    assert_eq!(food.len(), 2);
    assert!(food.iter().all(|e| e.category == Category::Food));
}

#[test]
fn filter_scenario_single_food_record() {
    // One Food record; Travel filter shows nothing, Food filter shows it.
    let store = seeded_store(&[("10", Category::Food)]);
    let mut controller = ListController::new(store);
    controller.refresh().unwrap();
    let id = controller.records()[0].id.clone();

    controller.set_filter(Some(Category::Travel));
    assert!(controller.filtered().is_empty());

    controller.set_filter(Some(Category::Food));
    let filtered = controller.filtered();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].id, id);
}

#[test]
fn delete_confirmed_removes_one_record_and_leaves_others_untouched() {
    let store = seeded_store(&[("10", Category::Food), ("20", Category::Bills)]);
    let mut controller = ListController::new(store.clone());
    controller.refresh().unwrap();

    let doomed = controller.records()[1].id.clone();
    let survivor = controller.records()[0].clone();

    controller.delete_confirmed(&doomed).unwrap();
    assert_eq!(controller.records(), &[survivor.clone()]);
    assert_eq!(store.list().unwrap(), vec![survivor]);
}

#[test]
fn failed_delete_leaves_the_cache_unchanged() {
    let mut controller = ListController::new(FailingStore);
    controller.apply_snapshot(vec![Expense::from_fields(
        ExpenseId::new("1"),
        &fields("10", Category::Food, ""),
    )]);

    let err = controller.delete_confirmed(&ExpenseId::new("1")).unwrap_err();
    assert!(matches!(err, StoreError::Write(_)));
    assert_eq!(controller.records().len(), 1);
}

#[test]
fn failed_refresh_leaves_the_cache_unchanged() {
    let mut controller = ListController::new(FailingStore);
    controller.apply_snapshot(vec![Expense::from_fields(
        ExpenseId::new("1"),
        &fields("10", Category::Food, ""),
    )]);

    assert!(controller.refresh().is_err());
    assert_eq!(controller.records().len(), 1);
}

#[test]
fn sync_from_applies_the_newest_pushed_snapshot() {
    let store = DocumentStore::new();
    let subscription = store.subscribe();
    let mut controller = ListController::new(store.clone());

    assert!(!controller.sync_from(&subscription));

    store.create(&fields("10", Category::Food, "")).unwrap();
    store.create(&fields("20", Category::Bills, "")).unwrap();

    assert!(controller.sync_from(&subscription));
    assert_eq!(controller.records().len(), 2);
    assert!(!controller.sync_from(&subscription));
}

/// Store whose reads and writes always fail, for error-path coverage.
struct FailingStore;

impl ExpenseStore for FailingStore {
    fn list(&self) -> StoreResult<Vec<Expense>> {
        Err(StoreError::Read(io::Error::other("backend unavailable")))
    }

    fn create(&self, _fields: &ExpenseFields) -> StoreResult<ExpenseId> {
        Err(StoreError::Write(io::Error::other("backend unavailable")))
    }

    fn update(&self, _id: &ExpenseId, _fields: &ExpenseFields) -> StoreResult<()> {
        Err(StoreError::Write(io::Error::other("backend unavailable")))
    }

    fn delete(&self, _id: &ExpenseId) -> StoreResult<()> {
        Err(StoreError::Write(io::Error::other("backend unavailable")))
    }
}
