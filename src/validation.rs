//! Pure predicates over the flow state. Nothing here errors or keeps
//! state of its own; outcomes are booleans or message lists the
//! session turns into enabled/disabled controls and inline messages.

use rust_decimal::Decimal;

use crate::flow::{AccountId, BankAccountAllocation, TransferFlow};
use crate::money::{cent_tolerance, fee_breakdown, parse_amount, round_money};
use crate::wire::TransferCreateRequest;

/// Gate for leaving the amount step: the gross amount parses to a
/// value greater than zero.
pub fn is_amount_valid(flow: &TransferFlow) -> bool {
    parse_amount(flow.gross_amount()) > Decimal::ZERO
}

/// Gate for attempting hash verification: both deposit inputs present.
/// Entry into the allocation step additionally requires the session to
/// have seen a successful verification.
pub fn is_deposit_ready(flow: &TransferFlow) -> bool {
    !flow.deposit_wallet_address().is_empty() && !flow.transaction_hash().is_empty()
}

/// All four identity fields non-empty after trimming, and the amount
/// parses to a value greater than zero.
pub fn is_account_complete(account: &BankAccountAllocation) -> bool {
    !account.account_name().trim().is_empty()
        && !account.account_number().trim().is_empty()
        && !account.bank_name().trim().is_empty()
        && !account.routing_number().trim().is_empty()
        && account.amount() > Decimal::ZERO
}

/// The single gate for enabling final submission: every account
/// complete, something allocated, and the total within one cent of the
/// net amount. Under-allocation does not block; the remaining amount
/// is surfaced separately.
pub fn all_accounts_valid(flow: &TransferFlow) -> bool {
    let total = flow.total_allocated();
    flow.accounts().iter().all(is_account_complete)
        && total > Decimal::ZERO
        && total <= flow.net_amount() + cent_tolerance()
}

/// Whether this account alone asks for more than the others left it.
/// Drives per-field highlighting; accounts the user has not typed an
/// amount into yet are never flagged, and unknown ids are never
/// flagged.
pub fn is_account_exceeding(flow: &TransferFlow, id: AccountId) -> bool {
    let Some(account) = flow.account(id) else {
        return false;
    };
    if account.transfer_amount().trim().is_empty() {
        return false;
    }
    account.amount() > flow.max_for_account(id) + cent_tolerance()
}

/// Network-shape hint for the deposit address field. Display-layer
/// only; [`is_deposit_ready`] stays a plain non-emptiness check.
pub fn wallet_address_plausible(address: &str, network: &str) -> bool {
    if address.len() < 10 {
        return false;
    }
    match network {
        "TRC20" => address.starts_with('T') && address.len() == 34,
        "ERC20" | "BEP20" => address.starts_with("0x") && address.len() == 42,
        _ => (26..=62).contains(&address.len()),
    }
}

/// Outcome of the final pre-submit check: empty means submittable.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn push(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }
}

/// Final check of an assembled request before it leaves for the
/// gateway. Always uses the live session fee, and the over-allocation
/// comparison carries the same cent tolerance as every other
/// allocated-vs-available comparison.
pub fn check_transfer_request(
    request: &TransferCreateRequest,
    fee_percentage: Decimal,
) -> ValidationReport {
    let mut report = ValidationReport::default();

    if request.amount <= Decimal::ZERO {
        report.push("Amount must be greater than 0");
    }
    if request.deposit_wallet_address.is_empty() {
        report.push("Deposit wallet address is required");
    }
    if request.crypto_tx_hash.is_empty() {
        report.push("Transaction hash is required");
    }

    if request.bank_accounts.is_empty() {
        report.push("At least one bank account is required");
        return report;
    }

    for (index, account) in request.bank_accounts.iter().enumerate() {
        let n = index + 1;
        if account.account_name.is_empty() {
            report.push(format!("Bank account {n}: Account name is required"));
        }
        if account.account_number.is_empty() {
            report.push(format!("Bank account {n}: Account number is required"));
        }
        if account.bank_name.is_empty() {
            report.push(format!("Bank account {n}: Bank name is required"));
        }
        if account.routing_number.is_empty() {
            report.push(format!("Bank account {n}: Routing number is required"));
        }
        if parse_amount(&account.transfer_amount) <= Decimal::ZERO {
            report.push(format!(
                "Bank account {n}: Transfer amount must be greater than 0"
            ));
        }
    }

    let total_allocated = round_money(
        request
            .bank_accounts
            .iter()
            .map(|account| parse_amount(&account.transfer_amount))
            .sum(),
    );
    let net_amount = fee_breakdown(request.amount, fee_percentage).net_amount;
    if total_allocated > net_amount + cent_tolerance() {
        report.push("Total allocated amount exceeds available amount after fees");
    }

    report
}
