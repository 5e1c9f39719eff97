use rust_decimal::{Decimal, RoundingStrategy};

/// Best-effort parse of a user-entered amount. Empty or unparseable
/// input degrades to zero, it is never an error.
pub fn parse_amount(input: &str) -> Decimal {
    input.trim().parse().unwrap_or(Decimal::ZERO)
}

/// Rounds to 2 decimal places, half-up. Applied at display points and
/// at tolerance comparisons, never accumulated mid-computation.
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Formats with exactly two fraction digits, e.g. "990" becomes "990.00".
pub fn format_money(value: Decimal) -> String {
    format!("{:.2}", round_money(value))
}

/// The fixed one-cent margin used for every allocated-vs-available
/// comparison.
pub fn cent_tolerance() -> Decimal {
    Decimal::new(1, 2)
}

/// The fee applied until a fee configuration is loaded.
pub fn default_fee_percentage() -> Decimal {
    Decimal::new(1, 2)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeBreakdown {
    pub fee: Decimal,
    pub net_amount: Decimal,
}

/// Splits a gross amount into the fee and the net amount available for
/// allocation. Both parts are rounded independently.
pub fn fee_breakdown(amount: Decimal, fee_percentage: Decimal) -> FeeBreakdown {
    let fee = amount * fee_percentage;
    FeeBreakdown {
        fee: round_money(fee),
        net_amount: round_money(amount - fee),
    }
}
