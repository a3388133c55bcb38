use crate::record::{PhoneRecord, RecordId};

pub trait PhoneStore {
    type Error: std::error::Error + Send + Sync + 'static;

    fn ensure_schema(&mut self) -> Result<(), Self::Error>;

    // Records come back ordered by id.
    fn list_all(&mut self) -> Result<Vec<PhoneRecord>, Self::Error>;

    // The oldest row holding exactly `number`, or None.
    fn find_by_value(&mut self, number: &str) -> Result<Option<PhoneRecord>, Self::Error>;

    fn insert(&mut self, number: &str) -> Result<RecordId, Self::Error>;

    fn update(&mut self, id: RecordId, number: &str) -> Result<(), Self::Error>;

    fn delete_by_id(&mut self, id: RecordId) -> Result<(), Self::Error>;
}
