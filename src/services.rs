//! The seam to the outside world. The wizard is driven through these
//! traits so tests and offline tools can supply their own
//! implementations; no transport lives in this crate.

use thiserror::Error;

use crate::wire::{
    FeeConfig, HashVerification, HashVerificationRequest, TransferCreateRequest, TransferReceipt,
};

#[derive(Debug, Error)]
pub enum ServiceError {
    /// The service answered with a failure; the message must reach the
    /// user verbatim.
    #[error("{0}")]
    Rejected(String),
    /// The service could not be reached at all.
    #[error("Service unavailable: {0}")]
    Unavailable(String),
}

/// Supplies the fee configuration before the first step is usable.
pub trait FeeSource {
    fn fetch_fee_config(&mut self) -> Result<FeeConfig, ServiceError>;
}

/// Checks a deposit transaction hash on chain.
pub trait HashVerifier {
    fn verify_hash(
        &mut self,
        request: &HashVerificationRequest,
    ) -> Result<HashVerification, ServiceError>;
}

/// Accepts the assembled transfer and returns the durable record's
/// receipt.
pub trait TransferGateway {
    fn create_transfer(
        &mut self,
        request: &TransferCreateRequest,
    ) -> Result<TransferReceipt, ServiceError>;
}
