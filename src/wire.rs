//! Data shapes exchanged with the external services. Field names match
//! the wire format; decimals serialise as strings.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransferKind {
    CryptoToFiat,
    FiatToCrypto,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferStatus {
    Pending,
    Processing,
    Completed,
    Failed,
    Cancelled,
}

impl TransferStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Processing => "Processing",
            Self::Completed => "Completed",
            Self::Failed => "Failed",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for TransferStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankAccountInfo {
    pub account_name: String,
    pub account_number: String,
    pub bank_name: String,
    pub routing_number: String,
    pub transfer_amount: String,
}

/// Payload sent to the transfer-creation service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferCreateRequest {
    #[serde(rename = "type")]
    pub kind: TransferKind,
    pub amount: Decimal,
    pub currency: String,
    pub deposit_wallet_address: String,
    pub crypto_tx_hash: String,
    pub bank_accounts: Vec<BankAccountInfo>,
}

/// What the transfer-creation service hands back on success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferReceipt {
    pub id: String,
    pub transfer_id: String,
    #[serde(rename = "type_")]
    pub kind: TransferKind,
    pub status: TransferStatus,
    pub amount: Decimal,
    pub fee: Decimal,
    pub net_amount: Decimal,
    pub currency: String,
}

/// Payload sent to the hash-verification service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashVerificationRequest {
    pub transaction_hash: String,
    pub wallet_address: String,
    pub amount: Decimal,
    pub network: String,
}

/// Verdict from the hash-verification service. `message` is surfaced
/// to the user verbatim when `is_valid` is false.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashVerification {
    pub is_valid: bool,
    pub confirmations: u32,
    pub amount: Decimal,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_height: Option<u64>,
}

/// Fee configuration fetched before the first step is usable. The
/// address is the admin deposit wallet shown in the deposit step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeConfig {
    pub address: String,
    pub currency: String,
    pub network: String,
    pub fee_percentage: Decimal,
}
