use serde::Serialize;

use crate::normalize::normalize;
use crate::record::RecordId;
use crate::store::PhoneStore;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ReconcileAction {
    Updated {
        id: RecordId,
        from: String,
        to: String,
    },
    Deleted {
        id: RecordId,
        number: String,
        duplicate_of: RecordId,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileSummary {
    pub scanned: usize,
    pub updated: usize,
    pub deleted: usize,
    pub unchanged: usize,
    pub actions: Vec<ReconcileAction>,
}

pub fn reconcile<S: PhoneStore>(store: &mut S) -> Result<ReconcileSummary, S::Error> {
    let records = store.list_all()?;
    let mut summary = ReconcileSummary {
        scanned: records.len(),
        ..ReconcileSummary::default()
    };

    for record in records {
        let canonical = normalize(&record.number);
        if canonical == record.number {
            summary.unchanged += 1;
            continue;
        }

        // The lookup hits the live table, so rows rewritten earlier in the
        // pass already count as existing.
        match store.find_by_value(&canonical)? {
            Some(existing) => {
                store.delete_by_id(record.id)?;
                summary.deleted += 1;
                summary.actions.push(ReconcileAction::Deleted {
                    id: record.id,
                    number: record.number,
                    duplicate_of: existing.id,
                });
            }
            None => {
                store.update(record.id, &canonical)?;
                summary.updated += 1;
                summary.actions.push(ReconcileAction::Updated {
                    id: record.id,
                    from: record.number,
                    to: canonical,
                });
            }
        }
    }

    Ok(summary)
}
