//! The wizard controller. Owns one [`TransferFlow`], gates step
//! transitions, and drives the external services. Everything runs to
//! completion on the caller's thread; the exclusive borrow serialises
//! verify/submit and an explicit latch additionally refuses re-entrant
//! submission.

use thiserror::Error;
use tracing::{info, warn};

use crate::flow::{TransferFlow, WizardStep};
use crate::money::parse_amount;
use crate::services::{FeeSource, HashVerifier, ServiceError, TransferGateway};
use crate::validation;
use crate::wire::{
    BankAccountInfo, FeeConfig, HashVerification, HashVerificationRequest, TransferCreateRequest,
    TransferKind, TransferReceipt,
};

const DEFAULT_NETWORK: &str = "TRC20";
const DEFAULT_CURRENCY: &str = "USDT";

#[derive(Debug, Error)]
pub enum WizardError {
    #[error("Amount must be greater than 0")]
    AmountNotPositive,
    #[error("Deposit wallet address and transaction hash are required")]
    DepositDetailsIncomplete,
    #[error("Transaction hash has not been verified")]
    HashNotVerified,
    #[error("{0}")]
    VerificationFailed(String),
    #[error("Bank account allocations are incomplete or exceed the available amount")]
    AllocationInvalid,
    #[error("Transfer request is invalid: {}", errors.join("; "))]
    InvalidRequest { errors: Vec<String> },
    #[error("A submission is already in flight")]
    SubmitInFlight,
    #[error(transparent)]
    Service(#[from] ServiceError),
}

pub struct WizardSession {
    flow: TransferFlow,
    fee_config: Option<FeeConfig>,
    receipt: Option<TransferReceipt>,
    submit_in_flight: bool,
}

impl Default for WizardSession {
    fn default() -> Self {
        Self::new()
    }
}

impl WizardSession {
    pub fn new() -> Self {
        Self {
            flow: TransferFlow::new(),
            fee_config: None,
            receipt: None,
            submit_in_flight: false,
        }
    }

    pub fn flow(&self) -> &TransferFlow {
        &self.flow
    }

    /// The UI edits fields through the flow directly.
    pub fn flow_mut(&mut self) -> &mut TransferFlow {
        &mut self.flow
    }

    pub fn current_step(&self) -> WizardStep {
        self.flow.step()
    }

    pub fn fee_config(&self) -> Option<&FeeConfig> {
        self.fee_config.as_ref()
    }

    /// Receipt of the last successful submission, if any.
    pub fn receipt(&self) -> Option<&TransferReceipt> {
        self.receipt.as_ref()
    }

    /// Fetches the fee configuration and applies its percentage to the
    /// flow. On failure the fee currently in effect stays applied (the
    /// built-in default if nothing was ever loaded) and the caller
    /// shows a degraded message.
    pub fn load_fee_config(&mut self, source: &mut impl FeeSource) -> Result<(), WizardError> {
        match source.fetch_fee_config() {
            Ok(config) => {
                info!(
                    network = %config.network,
                    fee_percentage = %config.fee_percentage,
                    "fee configuration loaded"
                );
                self.flow.set_fee_percentage(config.fee_percentage);
                self.fee_config = Some(config);
                Ok(())
            }
            Err(err) => {
                warn!(
                    error = %err,
                    fee_percentage = %self.flow.fee_percentage(),
                    "fee configuration unavailable, keeping current fee"
                );
                Err(err.into())
            }
        }
    }

    /// Moves one step forward. Strictly sequential: leaving the amount
    /// step requires a positive amount, leaving the deposit step
    /// requires a verified hash. A no-op at the last step.
    pub fn advance(&mut self) -> Result<(), WizardError> {
        match self.flow.step() {
            WizardStep::Amount => {
                if !validation::is_amount_valid(&self.flow) {
                    return Err(WizardError::AmountNotPositive);
                }
                self.flow.set_step(WizardStep::CryptoDeposit);
            }
            WizardStep::CryptoDeposit => {
                if !self.flow.hash_verified() {
                    return Err(WizardError::HashNotVerified);
                }
                self.flow.set_step(WizardStep::BankAllocation);
            }
            WizardStep::BankAllocation => {}
        }
        Ok(())
    }

    /// Moves one step back without clearing anything, so users can
    /// navigate back and forth without loss. A no-op at the first step.
    pub fn back(&mut self) {
        match self.flow.step() {
            WizardStep::Amount => {}
            WizardStep::CryptoDeposit => self.flow.set_step(WizardStep::Amount),
            WizardStep::BankAllocation => self.flow.set_step(WizardStep::CryptoDeposit),
        }
    }

    /// Asks the verifier about the entered hash. A valid verdict marks
    /// the hash verified and advances to the allocation step; an
    /// invalid one clears the mark, stays on the deposit step, and
    /// surfaces the service's message verbatim.
    pub fn verify_hash(
        &mut self,
        verifier: &mut impl HashVerifier,
    ) -> Result<HashVerification, WizardError> {
        if !validation::is_deposit_ready(&self.flow) {
            return Err(WizardError::DepositDetailsIncomplete);
        }
        let network = self
            .fee_config
            .as_ref()
            .map(|config| config.network.clone())
            .unwrap_or_else(|| DEFAULT_NETWORK.to_owned());
        let request = HashVerificationRequest {
            transaction_hash: self.flow.transaction_hash().to_owned(),
            wallet_address: self.flow.deposit_wallet_address().to_owned(),
            amount: parse_amount(self.flow.gross_amount()),
            network,
        };
        let verification = verifier.verify_hash(&request)?;
        if verification.is_valid {
            info!(
                confirmations = verification.confirmations,
                "transaction hash verified"
            );
            self.flow.set_hash_verified(true);
            self.flow.set_step(WizardStep::BankAllocation);
            Ok(verification)
        } else {
            warn!(message = %verification.message, "transaction hash rejected");
            self.flow.set_hash_verified(false);
            Err(WizardError::VerificationFailed(verification.message))
        }
    }

    /// Assembles the transfer request, runs the final pre-submit check
    /// with the live fee, and hands it to the gateway. On success the
    /// receipt is kept and the flow is reset for the next session; on
    /// failure every field is left untouched so the user may correct
    /// input and retry.
    pub fn submit(
        &mut self,
        gateway: &mut impl TransferGateway,
    ) -> Result<TransferReceipt, WizardError> {
        if self.submit_in_flight {
            return Err(WizardError::SubmitInFlight);
        }
        if !self.flow.hash_verified() {
            return Err(WizardError::HashNotVerified);
        }
        if !validation::all_accounts_valid(&self.flow) {
            return Err(WizardError::AllocationInvalid);
        }

        let request = self.build_request();
        let report = validation::check_transfer_request(&request, self.flow.fee_percentage());
        if !report.is_valid() {
            return Err(WizardError::InvalidRequest {
                errors: report.errors,
            });
        }

        self.submit_in_flight = true;
        let result = gateway.create_transfer(&request);
        self.submit_in_flight = false;
        match result {
            Ok(receipt) => {
                info!(transfer_id = %receipt.transfer_id, "transfer created");
                self.receipt = Some(receipt.clone());
                self.reset_flow();
                Ok(receipt)
            }
            Err(err) => {
                warn!(error = %err, "transfer submission failed");
                Err(err.into())
            }
        }
    }

    /// Back to a fresh wizard; the loaded fee configuration, if any,
    /// stays applied.
    pub fn reset(&mut self) {
        info!("wizard session reset");
        self.receipt = None;
        self.submit_in_flight = false;
        self.reset_flow();
    }

    fn reset_flow(&mut self) {
        self.flow.reset();
        if let Some(config) = &self.fee_config {
            self.flow.set_fee_percentage(config.fee_percentage);
        }
    }

    fn build_request(&self) -> TransferCreateRequest {
        let currency = self
            .fee_config
            .as_ref()
            .map(|config| config.currency.clone())
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_owned());
        TransferCreateRequest {
            kind: TransferKind::CryptoToFiat,
            amount: parse_amount(self.flow.gross_amount()),
            currency,
            deposit_wallet_address: self.flow.deposit_wallet_address().to_owned(),
            crypto_tx_hash: self.flow.transaction_hash().to_owned(),
            bank_accounts: self
                .flow
                .accounts()
                .iter()
                .map(|account| BankAccountInfo {
                    account_name: account.account_name().to_owned(),
                    account_number: account.account_number().to_owned(),
                    bank_name: account.bank_name().to_owned(),
                    routing_number: account.routing_number().to_owned(),
                    transfer_amount: account.transfer_amount().to_owned(),
                })
                .collect(),
        }
    }
}
