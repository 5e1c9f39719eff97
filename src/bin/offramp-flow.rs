use std::fs::File;

use anyhow::{Context, Result};
use offramp_flow::bin_utils::BulkValidateService;
use offramp_flow::money;
use tracing_subscriber::EnvFilter;

/// Dry-run allocation validator: `offramp-flow <gross-amount>
/// <accounts.csv> [fee-percentage]`. The per-account verdicts go to
/// stdout as CSV; bad input lines and logs go to stderr.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let gross_amount = std::env::args()
        .nth(1)
        .context("Expected a gross amount as the first argument")?;
    let filename = std::env::args()
        .nth(2)
        .context("Expected an accounts CSV file as the second argument")?;
    let fee_percentage = match std::env::args().nth(3) {
        Some(raw) => raw
            .parse()
            .with_context(|| format!("Failed to parse fee percentage `{raw}`"))?,
        None => money::default_fee_percentage(),
    };
    let file = File::open(&filename).with_context(|| format!("Failed to open `{filename}`"))?;

    let service = BulkValidateService {
        gross_amount,
        fee_percentage,
        input: file,
        output: &mut std::io::stdout(),
        error_printer: Box::new(|line, err| eprintln!("Error at line {line}: {err}")),
    };
    let summary = service.run()?;

    eprintln!(
        "net {} | allocated {} | remaining {} | submittable: {}",
        summary.net_amount, summary.total_allocated, summary.remaining, summary.all_valid
    );
    Ok(())
}
