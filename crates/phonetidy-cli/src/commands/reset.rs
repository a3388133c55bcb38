use crate::commands::print_json;
use anyhow::{Context as _, Result};
use phonetidy_config::DatabaseConfig;
use phonetidy_core::PhoneStore as _;
use phonetidy_store::{admin, PgStore};

pub fn reset_database(config: &DatabaseConfig, json: bool) -> Result<()> {
    admin::reset_database(config)
        .with_context(|| format!("reset database {}", config.dbname))?;

    let mut store = PgStore::connect(config)
        .with_context(|| format!("connect to database {}", config.dbname))?;
    store.ensure_schema().with_context(|| "ensure schema")?;

    if json {
        print_json(&serde_json::json!({ "reset": config.dbname }))?;
    } else {
        println!("reset database {}", config.dbname);
    }
    Ok(())
}
