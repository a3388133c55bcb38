use crate::commands::{print_json, Context};
use anyhow::Result;
use phonetidy_core::{PhoneRecord, PhoneStore as _};

// The raw formats this tool was built to clean up.
pub const SAMPLE_NUMBERS: [&str; 8] = [
    "123 456 7891",
    "(123) 456 7892",
    "(123) 456-7893",
    "123-456-7894",
    "123-456-7890",
    "1234567892",
    "(123)456-7892",
    "1234567890",
];

pub fn seed(ctx: &mut Context<'_>) -> Result<()> {
    let mut seeded = Vec::with_capacity(SAMPLE_NUMBERS.len());
    for number in SAMPLE_NUMBERS {
        let id = ctx.store.insert(number)?;
        seeded.push(PhoneRecord {
            id,
            number: number.to_string(),
        });
    }

    if ctx.json {
        print_json(&seeded)?;
    } else {
        println!("seeded {} records", seeded.len());
    }
    Ok(())
}
