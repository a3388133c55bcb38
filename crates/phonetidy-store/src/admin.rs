use phonetidy_config::DatabaseConfig;

use crate::db;
use crate::error::{Result, StoreError};

pub fn create_database(config: &DatabaseConfig) -> Result<()> {
    let ident = quoted_ident(&config.dbname)?;
    run_ddl(config, &format!("CREATE DATABASE {ident};"))
}

pub fn drop_database(config: &DatabaseConfig) -> Result<()> {
    let ident = quoted_ident(&config.dbname)?;
    run_ddl(config, &format!("DROP DATABASE IF EXISTS {ident};"))
}

pub fn reset_database(config: &DatabaseConfig) -> Result<()> {
    let ident = quoted_ident(&config.dbname)?;
    let mut client = db::connect_maintenance(config)?;
    // CREATE DATABASE refuses to run inside a transaction block, so each
    // statement goes out as its own autocommit batch.
    client.batch_execute(&format!("DROP DATABASE IF EXISTS {ident};"))?;
    client.batch_execute(&format!("CREATE DATABASE {ident};"))?;
    Ok(())
}

fn run_ddl(config: &DatabaseConfig, sql: &str) -> Result<()> {
    let mut client = db::connect_maintenance(config)?;
    client.batch_execute(sql)?;
    Ok(())
}

// CREATE/DROP DATABASE cannot take bind parameters, so the name is
// validated and quoted by hand before it lands in DDL.
fn quoted_ident(name: &str) -> Result<String> {
    let mut chars = name.chars();
    let valid_head = chars
        .next()
        .is_some_and(|ch| ch.is_ascii_alphabetic() || ch == '_');
    let valid_tail = chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_');
    if !valid_head || !valid_tail {
        return Err(StoreError::InvalidDatabaseName(name.to_string()));
    }
    Ok(format!("\"{name}\""))
}

#[cfg(test)]
mod tests {
    use super::quoted_ident;
    use crate::error::StoreError;

    #[test]
    fn quotes_plain_identifiers() {
        assert_eq!(quoted_ident("phone").unwrap(), "\"phone\"");
        assert_eq!(quoted_ident("phonetidy_test_1").unwrap(), "\"phonetidy_test_1\"");
        assert_eq!(quoted_ident("_scratch").unwrap(), "\"_scratch\"");
    }

    #[test]
    fn rejects_hostile_identifiers() {
        for name in ["", "1phone", "phone;drop", "phone name", "phone\"", "phone-db"] {
            let err = quoted_ident(name).unwrap_err();
            assert!(matches!(err, StoreError::InvalidDatabaseName(_)), "{name}");
        }
    }
}
