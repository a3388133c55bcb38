mod commands;
mod error;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

use crate::commands::{completions, reconcile, records, reset, seed, Context};
use crate::error::{exit_code_for, report_error};
use phonetidy_config as config;
use phonetidy_core::PhoneStore as _;
use phonetidy_store::PgStore;

#[derive(Debug, Parser)]
#[command(name = "phonetidy", version, about = "phone_numbers grooming CLI")]
struct Cli {
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long, global = true)]
    dbname: Option<String>,
    #[arg(long, global = true)]
    json: bool,
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
    /// Drop and re-create the configured database
    Reset,
    /// Insert the sample numbers in their raw formats
    Seed,
    /// Insert one number as-is
    Add(records::AddArgs),
    /// Print one record by id
    Show(records::ShowArgs),
    /// Look up the record holding an exact value
    Find(records::FindArgs),
    /// Print every record
    List,
    /// Delete one record by id
    Delete(records::DeleteArgs),
    /// Normalize every number and drop duplicates of canonical rows
    Reconcile,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let verbose = cli.verbose;
    init_logging(verbose);
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err, verbose);
            exit_code_for(&err)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        config: config_path,
        dbname,
        json,
        verbose,
        command,
    } = cli;

    match command {
        Command::Completions(args) => completions::emit(args),
        command => {
            let app_config = config::load(config_path.clone()).with_context(|| "load config")?;
            if verbose {
                match config::resolve_config_path(config_path) {
                    Ok(path) => {
                        if path.exists() {
                            debug!(path = %path.display(), "config resolved");
                        } else {
                            debug!(path = %path.display(), "config missing, using defaults");
                        }
                    }
                    Err(err) => {
                        debug!(error = %err, "config unavailable");
                    }
                }
            }
            let mut database = app_config.database;
            if let Some(dbname) = dbname {
                database.dbname = dbname;
            }

            if let Command::Reset = command {
                return reset::reset_database(&database, json);
            }

            let mut store = PgStore::connect(&database).with_context(|| {
                format!(
                    "connect to database {} at {}:{}",
                    database.dbname, database.host, database.port
                )
            })?;
            store.ensure_schema().with_context(|| "ensure schema")?;

            if verbose {
                debug!(dbname = %database.dbname, "database ready");
            }

            let mut ctx = Context {
                store: &mut store,
                json,
            };

            match command {
                Command::Seed => seed::seed(&mut ctx),
                Command::Add(args) => records::add(&mut ctx, args),
                Command::Show(args) => records::show(&mut ctx, args),
                Command::Find(args) => records::find(&mut ctx, args),
                Command::List => records::list(&mut ctx),
                Command::Delete(args) => records::delete(&mut ctx, args),
                Command::Reconcile => reconcile::reconcile(&mut ctx),
                Command::Completions(_) => {
                    unreachable!("completions command handled before store initialization")
                }
                Command::Reset => {
                    unreachable!("reset command handled before store initialization")
                }
            }
        }
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .try_init();
}
