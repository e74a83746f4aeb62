use anchor_lang::prelude::*;

use crate::constants::{BPS_DENOMINATOR, SECONDS_PER_YEAR};
use crate::errors::LedgerError;

/// Seconds between `opened_at` and `now`, clamped at zero.
pub fn elapsed_seconds(opened_at: i64, now: i64) -> u64 {
    now.saturating_sub(opened_at).max(0) as u64
}

/// Simple (non-compounding) interest, floored to the asset's smallest unit:
/// principal * rate_bps * elapsed / (10_000 * seconds_per_year)
pub fn simple_interest(principal: u64, rate_bps: u16, elapsed: u64) -> Result<u64> {
    // u128 intermediate: principal * rate * elapsed can exceed u64 long before the result does
    let numerator = (principal as u128)
        .checked_mul(rate_bps as u128)
        .ok_or(LedgerError::MathOverflow)?
        .checked_mul(elapsed as u128)
        .ok_or(LedgerError::MathOverflow)?;
    let denominator = (BPS_DENOMINATOR as u128) * (SECONDS_PER_YEAR as u128);

    u64::try_from(numerator / denominator).map_err(|_| LedgerError::MathOverflow.into())
}

/// Principal plus the interest accrued on it between `opened_at` and `now`.
/// Returns `(interest, total)`.
pub fn accrued_total(principal: u64, rate_bps: u16, opened_at: i64, now: i64) -> Result<(u64, u64)> {
    let interest = simple_interest(principal, rate_bps, elapsed_seconds(opened_at, now))?;
    let total = principal
        .checked_add(interest)
        .ok_or(LedgerError::MathOverflow)?;
    Ok((interest, total))
}
