use std::io::Read;

use csv::{DeserializeRecordsIntoIter, Trim};
use serde::Deserialize;

use crate::flow::BankAccountDraft;

/// One row of a bulk-import file. Header names follow the template
/// handed to users, values stay raw strings for the flow to parse.
#[derive(Debug, Deserialize)]
pub struct BankAccountRow {
    #[serde(rename = "Account Holder Name")]
    pub account_name: String,
    #[serde(rename = "Account Number")]
    pub account_number: String,
    #[serde(rename = "Bank Name")]
    pub bank_name: String,
    #[serde(rename = "Routing Number")]
    pub routing_number: String,
    #[serde(rename = "Transfer Amount")]
    pub transfer_amount: String,
}

impl BankAccountRow {
    pub fn into_draft(self) -> BankAccountDraft {
        BankAccountDraft {
            account_name: self.account_name,
            account_number: self.account_number,
            bank_name: self.bank_name,
            routing_number: self.routing_number,
            transfer_amount: self.transfer_amount,
        }
    }
}

/// Parses a bank-account list in CSV format. Malformed rows are
/// yielded as errors with their line number so one bad line never
/// aborts an import.
pub struct CsvAccountParser<R> {
    iter: DeserializeRecordsIntoIter<R, BankAccountRow>,
}

impl<R> CsvAccountParser<R>
where
    R: Read,
{
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(source);

        Self {
            iter: reader.into_deserialize(),
        }
    }
}

impl<R> Iterator for CsvAccountParser<R>
where
    R: Read,
{
    type Item = (u64, Result<BankAccountRow, csv::Error>);

    fn next(&mut self) -> Option<Self::Item> {
        let curr_line = self.iter.reader().position().line();
        self.iter.next().map(|row| (curr_line, row))
    }
}
