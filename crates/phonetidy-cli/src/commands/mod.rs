use anyhow::Result;
use phonetidy_store::PgStore;
use serde::Serialize;
use std::io::{self, Write};

pub mod completions;
pub mod reconcile;
pub mod records;
pub mod reset;
pub mod seed;

pub struct Context<'a> {
    pub store: &'a mut PgStore,
    pub json: bool,
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}
