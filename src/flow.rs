use rust_decimal::Decimal;

use crate::money::{default_fee_percentage, format_money, parse_amount, round_money};

pub type AccountId = u32;

/// The three steps of the send-money wizard, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    Amount,
    CryptoDeposit,
    BankAllocation,
}

/// The five settable fields of a [`BankAccountAllocation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountField {
    AccountName,
    AccountNumber,
    BankName,
    RoutingNumber,
    TransferAmount,
}

/// One entry of the ordered allocation list. All fields are kept as the
/// raw strings the user typed; the amount is parsed on read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankAccountAllocation {
    id: AccountId,
    account_name: String,
    account_number: String,
    bank_name: String,
    routing_number: String,
    transfer_amount: String,
}

impl BankAccountAllocation {
    fn blank(id: AccountId) -> Self {
        Self {
            id,
            account_name: String::new(),
            account_number: String::new(),
            bank_name: String::new(),
            routing_number: String::new(),
            transfer_amount: String::new(),
        }
    }

    pub fn id(&self) -> AccountId {
        self.id
    }

    pub fn account_name(&self) -> &str {
        &self.account_name
    }

    pub fn account_number(&self) -> &str {
        &self.account_number
    }

    pub fn bank_name(&self) -> &str {
        &self.bank_name
    }

    pub fn routing_number(&self) -> &str {
        &self.routing_number
    }

    pub fn transfer_amount(&self) -> &str {
        &self.transfer_amount
    }

    /// The allocated amount, zero when empty or unparseable.
    pub fn amount(&self) -> Decimal {
        parse_amount(&self.transfer_amount)
    }
}

/// An allocation without an identity yet, used by bulk replacement.
#[derive(Debug, Clone, Default)]
pub struct BankAccountDraft {
    pub account_name: String,
    pub account_number: String,
    pub bank_name: String,
    pub routing_number: String,
    pub transfer_amount: String,
}

/// The wizard's working state. Mutators never fail and never perform
/// I/O; derived amounts are recomputed on every read rather than
/// stored. The allocation list is never empty.
#[derive(Debug)]
pub struct TransferFlow {
    step: WizardStep,
    gross_amount: String,
    fee_percentage: Decimal,
    deposit_wallet_address: String,
    transaction_hash: String,
    hash_verified: bool,
    accounts: Vec<BankAccountAllocation>,
    next_account_id: AccountId,
}

impl Default for TransferFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl TransferFlow {
    pub fn new() -> Self {
        Self {
            step: WizardStep::Amount,
            gross_amount: String::new(),
            fee_percentage: default_fee_percentage(),
            deposit_wallet_address: String::new(),
            transaction_hash: String::new(),
            hash_verified: false,
            accounts: vec![BankAccountAllocation::blank(1)],
            next_account_id: 2,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn gross_amount(&self) -> &str {
        &self.gross_amount
    }

    pub fn fee_percentage(&self) -> Decimal {
        self.fee_percentage
    }

    pub fn deposit_wallet_address(&self) -> &str {
        &self.deposit_wallet_address
    }

    pub fn transaction_hash(&self) -> &str {
        &self.transaction_hash
    }

    pub fn hash_verified(&self) -> bool {
        self.hash_verified
    }

    pub fn accounts(&self) -> &[BankAccountAllocation] {
        &self.accounts
    }

    pub fn account(&self, id: AccountId) -> Option<&BankAccountAllocation> {
        self.accounts.iter().find(|account| account.id == id)
    }

    /// Direct set, no gating; step gating is the session's job.
    pub fn set_step(&mut self, step: WizardStep) {
        self.step = step;
    }

    pub fn set_gross_amount(&mut self, value: impl Into<String>) {
        self.gross_amount = value.into();
    }

    pub fn set_fee_percentage(&mut self, value: Decimal) {
        self.fee_percentage = value;
    }

    pub fn set_deposit_wallet_address(&mut self, value: impl Into<String>) {
        self.deposit_wallet_address = value.into();
    }

    pub fn set_transaction_hash(&mut self, value: impl Into<String>) {
        self.transaction_hash = value.into();
    }

    pub fn set_hash_verified(&mut self, verified: bool) {
        self.hash_verified = verified;
    }

    /// Appends a blank allocation and returns its fresh id.
    pub fn add_account(&mut self) -> AccountId {
        let id = self.next_account_id;
        self.next_account_id += 1;
        self.accounts.push(BankAccountAllocation::blank(id));
        id
    }

    /// Removes the matching entry. A no-op when it is the last
    /// remaining entry or the id is unknown.
    pub fn remove_account(&mut self, id: AccountId) {
        if self.accounts.len() > 1 {
            self.accounts.retain(|account| account.id != id);
        }
    }

    /// Replaces one field of the matching entry; unknown id is a no-op.
    pub fn update_account(&mut self, id: AccountId, field: AccountField, value: impl Into<String>) {
        let Some(account) = self.accounts.iter_mut().find(|account| account.id == id) else {
            return;
        };
        let value = value.into();
        match field {
            AccountField::AccountName => account.account_name = value,
            AccountField::AccountNumber => account.account_number = value,
            AccountField::BankName => account.bank_name = value,
            AccountField::RoutingNumber => account.routing_number = value,
            AccountField::TransferAmount => account.transfer_amount = value,
        }
    }

    /// Swaps the whole list, assigning fresh ids in order. An empty
    /// input yields a single blank entry.
    pub fn replace_accounts(&mut self, drafts: Vec<BankAccountDraft>) {
        self.accounts = drafts
            .into_iter()
            .map(|draft| {
                let id = self.next_account_id;
                self.next_account_id += 1;
                BankAccountAllocation {
                    id,
                    account_name: draft.account_name,
                    account_number: draft.account_number,
                    bank_name: draft.bank_name,
                    routing_number: draft.routing_number,
                    transfer_amount: draft.transfer_amount,
                }
            })
            .collect();
        if self.accounts.is_empty() {
            let id = self.next_account_id;
            self.next_account_id += 1;
            self.accounts.push(BankAccountAllocation::blank(id));
        }
    }

    /// Sets the entry's amount to the most it may still take, the
    /// corrective action for over-allocation. Unknown id is a no-op.
    pub fn apply_max(&mut self, id: AccountId) {
        let max = self.max_for_account(id);
        if let Some(account) = self.accounts.iter_mut().find(|account| account.id == id) {
            account.transfer_amount = format_money(max);
        }
    }

    /// Back to a pristine wizard: first step, cleared inputs, default
    /// fee, a single blank allocation with id 1.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Gross minus the fee, zero when the gross amount is empty or
    /// unparseable. Always derived, never stored.
    pub fn net_amount(&self) -> Decimal {
        let gross = parse_amount(&self.gross_amount);
        round_money(gross * (Decimal::ONE - self.fee_percentage))
    }

    pub fn total_allocated(&self) -> Decimal {
        let sum: Decimal = self.accounts.iter().map(BankAccountAllocation::amount).sum();
        round_money(sum)
    }

    /// Net amount not yet routed anywhere; clamped at zero when the
    /// allocations overshoot.
    pub fn remaining_amount(&self) -> Decimal {
        round_money(self.net_amount() - self.total_allocated()).max(Decimal::ZERO)
    }

    /// The most the given account may take given what the other
    /// accounts already hold.
    pub fn max_for_account(&self, id: AccountId) -> Decimal {
        let others: Decimal = self
            .accounts
            .iter()
            .filter(|account| account.id != id)
            .map(BankAccountAllocation::amount)
            .sum();
        round_money(self.net_amount() - others).max(Decimal::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(value: &str) -> Decimal {
        value.parse().unwrap()
    }

    #[test]
    fn list_never_empty() {
        let mut flow = TransferFlow::new();
        assert_eq!(flow.accounts().len(), 1);

        let first = flow.accounts()[0].id();
        let second = flow.add_account();
        let third = flow.add_account();
        assert_eq!(flow.accounts().len(), 3);

        flow.remove_account(second);
        flow.remove_account(third);
        assert_eq!(flow.accounts().len(), 1);

        // removing the only account is a no-op
        flow.remove_account(first);
        assert_eq!(flow.accounts().len(), 1);
        assert_eq!(flow.accounts()[0].id(), first);
    }

    #[test]
    fn ids_are_fresh_and_ordered() {
        let mut flow = TransferFlow::new();
        let a = flow.add_account();
        flow.remove_account(a);
        let b = flow.add_account();
        // removed ids are never reused
        assert_ne!(a, b);
        let ids: Vec<AccountId> = flow.accounts().iter().map(|acc| acc.id()).collect();
        assert_eq!(ids, vec![1, b]);
    }

    #[test]
    fn update_unknown_id_is_noop() {
        let mut flow = TransferFlow::new();
        flow.update_account(999, AccountField::AccountName, "nobody");
        assert_eq!(flow.accounts()[0].account_name(), "");

        let id = flow.accounts()[0].id();
        flow.update_account(id, AccountField::BankName, "First National");
        flow.update_account(id, AccountField::TransferAmount, "42.50");
        assert_eq!(flow.accounts()[0].bank_name(), "First National");
        assert_eq!(flow.accounts()[0].amount(), d("42.50"));
    }

    #[test]
    fn reset_is_idempotent() {
        let mut flow = TransferFlow::new();
        flow.set_step(WizardStep::BankAllocation);
        flow.set_gross_amount("1000");
        flow.set_fee_percentage(d("0.05"));
        flow.set_deposit_wallet_address("TXYZa1b2c3");
        flow.set_transaction_hash("0xdeadbeef");
        flow.set_hash_verified(true);
        flow.add_account();

        flow.reset();
        flow.reset();

        assert_eq!(flow.step(), WizardStep::Amount);
        assert_eq!(flow.gross_amount(), "");
        assert_eq!(flow.deposit_wallet_address(), "");
        assert_eq!(flow.transaction_hash(), "");
        assert_eq!(flow.fee_percentage(), d("0.01"));
        assert!(!flow.hash_verified());
        assert_eq!(flow.accounts().len(), 1);
        assert_eq!(flow.accounts()[0].id(), 1);
        assert_eq!(flow.accounts()[0].transfer_amount(), "");
    }

    #[test]
    fn net_amount_degrades_to_zero() {
        let mut flow = TransferFlow::new();
        assert_eq!(flow.net_amount(), Decimal::ZERO);
        flow.set_gross_amount("garbage");
        assert_eq!(flow.net_amount(), Decimal::ZERO);
        flow.set_gross_amount("1000");
        assert_eq!(flow.net_amount(), d("990.00"));
    }

    #[test]
    fn remaining_never_negative() {
        let mut flow = TransferFlow::new();
        assert_eq!(flow.remaining_amount(), Decimal::ZERO);

        flow.set_gross_amount("100");
        let id = flow.accounts()[0].id();
        flow.update_account(id, AccountField::TransferAmount, "500");
        // over-allocated, clamped at zero
        assert_eq!(flow.remaining_amount(), Decimal::ZERO);

        flow.update_account(id, AccountField::TransferAmount, "40");
        assert_eq!(flow.remaining_amount(), d("59.00"));
    }

    #[test]
    fn max_for_account_and_apply_max() {
        let mut flow = TransferFlow::new();
        flow.set_gross_amount("100");
        let first = flow.accounts()[0].id();
        let second = flow.add_account();
        flow.update_account(first, AccountField::TransferAmount, "60");
        flow.update_account(second, AccountField::TransferAmount, "50");

        // net is 99, the second account may take at most what the first left
        assert_eq!(flow.max_for_account(second), d("39.00"));

        flow.apply_max(second);
        assert_eq!(flow.accounts()[1].transfer_amount(), "39.00");
        assert_eq!(flow.total_allocated(), d("99.00"));
        assert_eq!(flow.remaining_amount(), Decimal::ZERO);
    }

    #[test]
    fn replace_accounts_keeps_list_nonempty() {
        let mut flow = TransferFlow::new();
        flow.replace_accounts(vec![
            BankAccountDraft {
                account_name: "Alice".into(),
                transfer_amount: "10".into(),
                ..Default::default()
            },
            BankAccountDraft {
                account_name: "Bob".into(),
                ..Default::default()
            },
        ]);
        assert_eq!(flow.accounts().len(), 2);
        assert_eq!(flow.accounts()[0].account_name(), "Alice");
        assert_eq!(flow.accounts()[1].account_name(), "Bob");
        assert_ne!(flow.accounts()[0].id(), flow.accounts()[1].id());

        flow.replace_accounts(Vec::new());
        assert_eq!(flow.accounts().len(), 1);
        assert_eq!(flow.accounts()[0].account_name(), "");
    }
}
