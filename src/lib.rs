/// Decimal helpers shared by every other module: best-effort parsing,
/// 2dp half-up rounding, the cent tolerance, and fee math.
pub mod money;

/// The wizard's working state: step, entered amounts, deposit details,
/// and the ordered bank-account allocation list, with derived views.
pub mod flow;

/// Pure predicates deciding whether each step may proceed and whether
/// the allocation set is submittable.
pub mod validation;

/// Data shapes exchanged with the external services.
pub mod wire;

/// Traits for the external services (fee configuration, hash
/// verification, transfer creation), so the wizard can be driven
/// without a transport.
pub mod services;

/// The wizard controller: step gating, verification, submission.
pub mod session;

/// Bulk CSV import and summary output. Ideally, this module would
/// exist in its own crate to bootstrap the binary, however I want to
/// use it for the integration test so I put it here.
pub mod bin_utils;
