use crate::commands::{print_json, Context};
use crate::error::not_found;
use anyhow::Result;
use clap::Args;
use phonetidy_core::{PhoneStore as _, RecordId};

#[derive(Debug, Args)]
pub struct AddArgs {
    pub number: String,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    pub id: i32,
}

#[derive(Debug, Args)]
pub struct FindArgs {
    pub number: String,
}

#[derive(Debug, Args)]
pub struct DeleteArgs {
    pub id: i32,
}

pub fn add(ctx: &mut Context<'_>, args: AddArgs) -> Result<()> {
    let id = ctx.store.insert(&args.number)?;

    if ctx.json {
        print_json(&serde_json::json!({ "id": id, "number": args.number }))?;
    } else {
        println!("created {}\t{}", id, args.number);
    }
    Ok(())
}

pub fn show(ctx: &mut Context<'_>, args: ShowArgs) -> Result<()> {
    let id = RecordId(args.id);
    let record = ctx
        .store
        .get(id)?
        .ok_or_else(|| not_found(format!("record {id}")))?;

    if ctx.json {
        print_json(&record)?;
    } else {
        println!("{}\t{}", record.id, record.number);
    }
    Ok(())
}

pub fn find(ctx: &mut Context<'_>, args: FindArgs) -> Result<()> {
    match ctx.store.find_by_value(&args.number)? {
        Some(record) => {
            if ctx.json {
                print_json(&record)?;
            } else {
                println!("{}\t{}", record.id, record.number);
            }
        }
        None => {
            // An absent value is an answer here, not an error.
            if ctx.json {
                print_json(&serde_json::Value::Null)?;
            } else {
                println!("no match");
            }
        }
    }
    Ok(())
}

pub fn list(ctx: &mut Context<'_>) -> Result<()> {
    let records = ctx.store.list_all()?;

    if ctx.json {
        print_json(&records)?;
        return Ok(());
    }

    if records.is_empty() {
        println!("no records");
        return Ok(());
    }

    for record in records {
        println!("{}\t{}", record.id, record.number);
    }
    Ok(())
}

pub fn delete(ctx: &mut Context<'_>, args: DeleteArgs) -> Result<()> {
    let id = RecordId(args.id);
    if ctx.store.get(id)?.is_none() {
        return Err(not_found(format!("record {id}")));
    }
    ctx.store.delete_by_id(id)?;

    if ctx.json {
        print_json(&serde_json::json!({ "deleted": id }))?;
    } else {
        println!("deleted {id}");
    }
    Ok(())
}
