use std::io::Write;

use csv::Writer;
use serde::Serialize;

/// One line of the validation summary: the account as parsed plus the
/// validator's per-account verdicts.
#[derive(Debug, Serialize)]
pub struct AllocationRow {
    pub account_name: String,
    pub account_number: String,
    pub bank_name: String,
    pub routing_number: String,
    pub transfer_amount: String,
    pub complete: bool,
    pub exceeding: bool,
}

pub fn print_allocations<W>(
    output: &mut W,
    rows: impl Iterator<Item = AllocationRow>,
) -> anyhow::Result<()>
where
    W: Write,
{
    let mut writer = Writer::from_writer(output);
    for row in rows {
        if let Err(err) = writer.serialize(row) {
            anyhow::bail!("Failed to write to CSV: {err}")
        }
    }
    // Ensure all data is flushed to the output
    if let Err(err) = writer.flush() {
        anyhow::bail!("Failed to flush CSV writer: {err}")
    }
    Ok(())
}
