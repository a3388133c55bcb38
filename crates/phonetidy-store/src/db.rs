use phonetidy_config::DatabaseConfig;
use postgres::{Client, Config, NoTls};

use crate::error::Result;

pub fn connect(config: &DatabaseConfig) -> Result<Client> {
    let client = base_config(config).dbname(&config.dbname).connect(NoTls)?;
    Ok(client)
}

// No dbname here: the server picks the user's default database. This
// connection exists solely for CREATE/DROP DATABASE.
pub fn connect_maintenance(config: &DatabaseConfig) -> Result<Client> {
    let client = base_config(config).connect(NoTls)?;
    Ok(client)
}

fn base_config(config: &DatabaseConfig) -> Config {
    let mut pg = Config::new();
    pg.host(&config.host)
        .port(config.port)
        .user(&config.user)
        .password(&config.password);
    pg
}
