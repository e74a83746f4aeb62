pub const LEDGER_SEED: &[u8] = b"ledger";
pub const POOL_SEED: &[u8] = b"pool";
pub const POOL_VAULT_SEED: &[u8] = b"pool_vault";
pub const DEPOSIT_POSITION_SEED: &[u8] = b"deposit_position";
pub const BORROW_POSITION_SEED: &[u8] = b"borrow_position";

/// Length of the interest year: 365 days, no leap handling
pub const SECONDS_PER_YEAR: u64 = 365 * 86_400;

/// Rates are quoted in basis points: 10_000 bps = 100% per year
pub const BPS_DENOMINATOR: u64 = 10_000;
