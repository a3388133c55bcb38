use phonetidy_core::{
    normalize, reconcile, PhoneRecord, PhoneStore, ReconcileAction, ReconcileSummary, RecordId,
};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("injected storage failure")]
struct InjectedFailure;

// In-memory stand-in for the relational store, with an optional update
// budget so the fail-fast behavior can be exercised.
#[derive(Default)]
struct MemStore {
    rows: Vec<PhoneRecord>,
    next_id: i32,
    lookups: usize,
    updates_before_failure: Option<usize>,
}

impl MemStore {
    fn with_rows(numbers: &[&str]) -> Self {
        let mut store = Self::default();
        for number in numbers {
            store.insert(number).expect("insert");
        }
        store
    }

    fn numbers(&self) -> Vec<(i32, String)> {
        self.rows
            .iter()
            .map(|record| (record.id.0, record.number.clone()))
            .collect()
    }
}

impl PhoneStore for MemStore {
    type Error = InjectedFailure;

    fn ensure_schema(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn list_all(&mut self) -> Result<Vec<PhoneRecord>, Self::Error> {
        Ok(self.rows.clone())
    }

    fn find_by_value(&mut self, number: &str) -> Result<Option<PhoneRecord>, Self::Error> {
        self.lookups += 1;
        Ok(self
            .rows
            .iter()
            .find(|record| record.number == number)
            .cloned())
    }

    fn insert(&mut self, number: &str) -> Result<RecordId, Self::Error> {
        self.next_id += 1;
        let id = RecordId(self.next_id);
        self.rows.push(PhoneRecord {
            id,
            number: number.to_string(),
        });
        Ok(id)
    }

    fn update(&mut self, id: RecordId, number: &str) -> Result<(), Self::Error> {
        if let Some(budget) = self.updates_before_failure.as_mut() {
            if *budget == 0 {
                return Err(InjectedFailure);
            }
            *budget -= 1;
        }
        if let Some(row) = self.rows.iter_mut().find(|record| record.id == id) {
            row.number = number.to_string();
        }
        Ok(())
    }

    fn delete_by_id(&mut self, id: RecordId) -> Result<(), Self::Error> {
        self.rows.retain(|record| record.id != id);
        Ok(())
    }
}

fn owned(pairs: &[(i32, &str)]) -> Vec<(i32, String)> {
    pairs
        .iter()
        .map(|(id, number)| (*id, number.to_string()))
        .collect()
}

const SAMPLE_NUMBERS: [&str; 8] = [
    "123 456 7891",
    "(123) 456 7892",
    "(123) 456-7893",
    "123-456-7894",
    "123-456-7890",
    "1234567892",
    "(123)456-7892",
    "1234567890",
];

#[test]
fn rewrites_raw_record_in_place() {
    let mut store = MemStore::with_rows(&["123 456 7891"]);

    let summary = reconcile(&mut store).expect("reconcile");

    assert_eq!(store.numbers(), owned(&[(1, "1234567891")]));
    assert_eq!(summary.scanned, 1);
    assert_eq!(summary.updated, 1);
    assert_eq!(summary.deleted, 0);
    assert_eq!(
        summary.actions,
        vec![ReconcileAction::Updated {
            id: RecordId(1),
            from: "123 456 7891".to_string(),
            to: "1234567891".to_string(),
        }]
    );
}

#[test]
fn drops_duplicate_in_favor_of_existing_canonical_row() {
    let mut store = MemStore::with_rows(&["1234567891", "123-456-7891"]);

    let summary = reconcile(&mut store).expect("reconcile");

    assert_eq!(store.numbers(), owned(&[(1, "1234567891")]));
    assert_eq!(summary.deleted, 1);
    assert_eq!(summary.unchanged, 1);
    assert_eq!(
        summary.actions,
        vec![ReconcileAction::Deleted {
            id: RecordId(2),
            number: "123-456-7891".to_string(),
            duplicate_of: RecordId(1),
        }]
    );
}

#[test]
fn drops_duplicate_even_when_canonical_row_scans_later() {
    let mut store = MemStore::with_rows(&["123-4567", "1234567"]);

    let summary = reconcile(&mut store).expect("reconcile");

    assert_eq!(store.numbers(), owned(&[(2, "1234567")]));
    assert_eq!(summary.updated, 0);
    assert_eq!(summary.deleted, 1);
    assert_eq!(summary.unchanged, 1);
    assert_eq!(
        summary.actions,
        vec![ReconcileAction::Deleted {
            id: RecordId(1),
            number: "123-4567".to_string(),
            duplicate_of: RecordId(2),
        }]
    );
}

#[test]
fn canonical_store_is_left_untouched() {
    let mut store = MemStore::with_rows(&["1234567890", "1234567891"]);

    let summary = reconcile(&mut store).expect("reconcile");

    assert_eq!(summary.unchanged, 2);
    assert!(summary.actions.is_empty());
    assert_eq!(
        store.numbers(),
        owned(&[(1, "1234567890"), (2, "1234567891")])
    );
}

#[test]
fn empty_store_is_a_noop() {
    let mut store = MemStore::default();

    let summary = reconcile(&mut store).expect("reconcile");

    assert_eq!(summary, ReconcileSummary::default());
}

#[test]
fn later_duplicate_collapses_onto_newly_rewritten_row() {
    let mut store = MemStore::with_rows(&["123-4", "(12)34"]);

    let summary = reconcile(&mut store).expect("reconcile");

    assert_eq!(store.numbers(), owned(&[(1, "1234")]));
    assert_eq!(summary.updated, 1);
    assert_eq!(summary.deleted, 1);
    assert_eq!(
        summary.actions,
        vec![
            ReconcileAction::Updated {
                id: RecordId(1),
                from: "123-4".to_string(),
                to: "1234".to_string(),
            },
            ReconcileAction::Deleted {
                id: RecordId(2),
                number: "(12)34".to_string(),
                duplicate_of: RecordId(1),
            },
        ]
    );
}

#[test]
fn digitless_number_becomes_empty_string() {
    let mut store = MemStore::with_rows(&["call me"]);

    let summary = reconcile(&mut store).expect("reconcile");

    assert_eq!(store.numbers(), owned(&[(1, "")]));
    assert_eq!(summary.updated, 1);
}

#[test]
fn digitless_duplicates_collapse_onto_empty_string() {
    let mut store = MemStore::with_rows(&["no digits", "none here"]);

    let summary = reconcile(&mut store).expect("reconcile");

    assert_eq!(store.numbers(), owned(&[(1, "")]));
    assert_eq!(summary.updated, 1);
    assert_eq!(summary.deleted, 1);
}

#[test]
fn preexisting_exact_duplicates_are_out_of_scope() {
    let mut store = MemStore::with_rows(&["1234567890", "1234567890"]);

    let summary = reconcile(&mut store).expect("reconcile");

    assert_eq!(summary.unchanged, 2);
    assert_eq!(
        store.numbers(),
        owned(&[(1, "1234567890"), (2, "1234567890")])
    );
}

#[test]
fn sample_set_settles_to_unique_canonical_numbers() {
    let mut store = MemStore::with_rows(&SAMPLE_NUMBERS);

    let summary = reconcile(&mut store).expect("reconcile");

    assert_eq!(summary.scanned, 8);
    assert_eq!(summary.updated, 3);
    assert_eq!(summary.deleted, 3);
    assert_eq!(summary.unchanged, 2);
    assert_eq!(
        store.numbers(),
        owned(&[
            (1, "1234567891"),
            (3, "1234567893"),
            (4, "1234567894"),
            (6, "1234567892"),
            (8, "1234567890"),
        ])
    );

    for (_, number) in store.numbers() {
        assert_eq!(normalize(&number), number);
    }
    let survivors = store.numbers();
    for (i, (_, a)) in survivors.iter().enumerate() {
        for (_, b) in &survivors[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn second_pass_changes_nothing() {
    let mut store = MemStore::with_rows(&SAMPLE_NUMBERS);
    reconcile(&mut store).expect("first pass");
    let settled = store.numbers();

    let summary = reconcile(&mut store).expect("second pass");

    assert_eq!(summary.updated, 0);
    assert_eq!(summary.deleted, 0);
    assert_eq!(summary.unchanged, settled.len());
    assert_eq!(store.numbers(), settled);
}

#[test]
fn first_storage_failure_aborts_the_pass() {
    let mut store = MemStore::with_rows(&["123-1", "456-2", "789-3"]);
    store.updates_before_failure = Some(1);

    let err = reconcile(&mut store).expect_err("second update fails");

    assert_eq!(err, InjectedFailure);
    // The first rewrite stays applied; the third record is never visited.
    assert_eq!(
        store.numbers(),
        owned(&[(1, "1231"), (2, "456-2"), (3, "789-3")])
    );
    assert_eq!(store.lookups, 2);
}
