//! Bulk-import convenience layer: reads a bank-account CSV, pushes it
//! through the same flow and validator the wizard uses, and writes a
//! per-account verdict summary. This module could be a separate crate
//! on its own, but it is kept here so the integration test can drive
//! it directly.

use std::io::{Read, Write};

use anyhow::Result;
use rust_decimal::Decimal;
use tracing::info;

use crate::flow::TransferFlow;
use crate::money::format_money;
use crate::validation;
use csv_parser::CsvAccountParser;
use csv_printer::{AllocationRow, print_allocations};

pub mod csv_parser;
pub mod csv_printer;

/// Aggregate verdict of one bulk validation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationSummary {
    pub net_amount: Decimal,
    pub total_allocated: Decimal,
    pub remaining: Decimal,
    pub all_valid: bool,
}

pub struct BulkValidateService<'w, R, W: 'w> {
    pub gross_amount: String,
    pub fee_percentage: Decimal,
    pub input: R,
    pub output: &'w mut W,
    pub error_printer: Box<dyn FnMut(u64, csv::Error)>,
}

impl<'w, R, W> BulkValidateService<'w, R, W>
where
    R: Read,
    W: Write + 'w,
{
    pub fn run(mut self) -> Result<AllocationSummary> {
        let parser = CsvAccountParser::new(self.input);

        let mut drafts = Vec::new();
        for (line, row) in parser {
            match row {
                Ok(row) => drafts.push(row.into_draft()),
                Err(err) => (self.error_printer)(line, err),
            }
        }

        let mut flow = TransferFlow::new();
        flow.set_gross_amount(self.gross_amount);
        flow.set_fee_percentage(self.fee_percentage);
        flow.replace_accounts(drafts);

        let rows: Vec<AllocationRow> = flow
            .accounts()
            .iter()
            .map(|account| AllocationRow {
                account_name: account.account_name().to_owned(),
                account_number: account.account_number().to_owned(),
                bank_name: account.bank_name().to_owned(),
                routing_number: account.routing_number().to_owned(),
                transfer_amount: format_money(account.amount()),
                complete: validation::is_account_complete(account),
                exceeding: validation::is_account_exceeding(&flow, account.id()),
            })
            .collect();
        print_allocations(self.output, rows.into_iter())?;

        let summary = AllocationSummary {
            net_amount: flow.net_amount(),
            total_allocated: flow.total_allocated(),
            remaining: flow.remaining_amount(),
            all_valid: validation::all_accounts_valid(&flow),
        };
        info!(
            net_amount = %summary.net_amount,
            total_allocated = %summary.total_allocated,
            remaining = %summary.remaining,
            all_valid = summary.all_valid,
            "bulk validation finished"
        );
        Ok(summary)
    }
}
