use anchor_lang::prelude::*;

#[event]
pub struct LedgerInitialized {
    pub ledger: Pubkey,
    pub admin: Pubkey,
}

#[event]
pub struct PoolCreated {
    pub ledger: Pubkey,
    pub pool: Pubkey,
    pub pool_index: u64,
    pub asset_mint: Pubkey,
    pub deposit_rate_bps: u16,
    pub borrow_rate_bps: u16,
}

#[event]
pub struct LiquidityDeposited {
    pub pool: Pubkey,
    pub pool_index: u64,
    pub depositor: Pubkey,
    pub amount: u64,
    pub liquidity: u64,
    pub timestamp: i64,
}

#[event]
pub struct LiquidityWithdrawn {
    pub pool: Pubkey,
    pub pool_index: u64,
    pub depositor: Pubkey,
    pub principal: u64,
    pub interest: u64,
    pub amount_paid: u64,
    pub liquidity: u64,
    pub timestamp: i64,
}

#[event]
pub struct LoanBorrowed {
    pub pool: Pubkey,
    pub pool_index: u64,
    pub borrower: Pubkey,
    pub amount: u64,
    /// Outstanding principal after this borrow, including earlier draws
    pub principal: u64,
    pub liquidity: u64,
    pub timestamp: i64,
}

#[event]
pub struct LoanRepaid {
    pub pool: Pubkey,
    pub pool_index: u64,
    pub borrower: Pubkey,
    pub principal: u64,
    pub interest: u64,
    pub amount_paid: u64,
    pub liquidity: u64,
    pub timestamp: i64,
}
