use crate::commands::{print_json, Context};
use anyhow::Result;
use phonetidy_core::ReconcileAction;

pub fn reconcile(ctx: &mut Context<'_>) -> Result<()> {
    let summary = phonetidy_core::reconcile(ctx.store)?;

    if ctx.json {
        print_json(&summary)?;
        return Ok(());
    }

    for action in &summary.actions {
        match action {
            ReconcileAction::Updated { id, from, to } => {
                println!("updated {id}: {from} -> {to}");
            }
            ReconcileAction::Deleted {
                id,
                number,
                duplicate_of,
            } => {
                println!("deleted {id}: {number} duplicates {duplicate_of}");
            }
        }
    }
    println!(
        "scanned {}: {} updated, {} deleted, {} unchanged",
        summary.scanned, summary.updated, summary.deleted, summary.unchanged
    );
    Ok(())
}
