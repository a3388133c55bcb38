pub mod admin;
pub mod db;
pub mod error;

use phonetidy_config::DatabaseConfig;
use phonetidy_core::{PhoneRecord, PhoneStore, RecordId};
use postgres::{Client, Row};

use crate::error::{Result, StoreError};

pub struct PgStore {
    client: Client,
}

impl PgStore {
    pub fn connect(config: &DatabaseConfig) -> Result<Self> {
        let client = db::connect(config)?;
        Ok(Self { client })
    }

    pub fn get(&mut self, id: RecordId) -> Result<Option<PhoneRecord>> {
        let row = self.client.query_opt(
            "SELECT id, value FROM phone_numbers WHERE id = $1;",
            &[&id.0],
        )?;
        row.as_ref().map(record_from_row).transpose()
    }
}

fn record_from_row(row: &Row) -> Result<PhoneRecord> {
    Ok(PhoneRecord {
        id: RecordId(row.try_get(0)?),
        number: row.try_get(1)?,
    })
}

impl PhoneStore for PgStore {
    type Error = StoreError;

    fn ensure_schema(&mut self) -> Result<()> {
        self.client.batch_execute(
            "CREATE TABLE IF NOT EXISTS phone_numbers (
                id SERIAL PRIMARY KEY,
                value VARCHAR(255) NOT NULL
            );",
        )?;
        Ok(())
    }

    fn list_all(&mut self) -> Result<Vec<PhoneRecord>> {
        let rows = self
            .client
            .query("SELECT id, value FROM phone_numbers ORDER BY id;", &[])?;
        rows.iter().map(record_from_row).collect()
    }

    fn find_by_value(&mut self, number: &str) -> Result<Option<PhoneRecord>> {
        let row = self.client.query_opt(
            "SELECT id, value FROM phone_numbers WHERE value = $1 ORDER BY id LIMIT 1;",
            &[&number],
        )?;
        row.as_ref().map(record_from_row).transpose()
    }

    fn insert(&mut self, number: &str) -> Result<RecordId> {
        let row = self.client.query_one(
            "INSERT INTO phone_numbers (value) VALUES ($1) RETURNING id;",
            &[&number],
        )?;
        Ok(RecordId(row.try_get(0)?))
    }

    fn update(&mut self, id: RecordId, number: &str) -> Result<()> {
        self.client.execute(
            "UPDATE phone_numbers SET value = $2 WHERE id = $1;",
            &[&id.0, &number],
        )?;
        Ok(())
    }

    fn delete_by_id(&mut self, id: RecordId) -> Result<()> {
        self.client
            .execute("DELETE FROM phone_numbers WHERE id = $1;", &[&id.0])?;
        Ok(())
    }
}
