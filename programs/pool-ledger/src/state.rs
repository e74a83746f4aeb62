use anchor_lang::prelude::*;

use crate::errors::LedgerError;
use crate::math::accrued_total;

#[account]
#[derive(Debug, Default)]
pub struct Ledger {
    /// Only key allowed to create pools; fixed at initialization
    pub admin: Pubkey,
    /// Pools created so far; also the index the next pool receives
    pub pool_count: u64,
    /// PDA bump seed
    pub bump: u8,
}

impl Ledger {
    pub const SIZE: usize = 8  // discriminator
        + 32   // admin
        + 8    // pool_count
        + 1;   // bump

    pub fn contains_pool(&self, pool_index: u64) -> bool {
        pool_index < self.pool_count
    }

    /// Fails with `InvalidPool` unless `pool_index` names a created pool.
    pub fn check_pool(&self, pool_index: u64) -> Result<()> {
        require!(self.contains_pool(pool_index), LedgerError::InvalidPool);
        Ok(())
    }

    /// Reserves the next pool index for `caller`, who must be the admin.
    pub fn register_pool(&mut self, caller: &Pubkey) -> Result<u64> {
        require_keys_eq!(*caller, self.admin, LedgerError::Unauthorized);

        let index = self.pool_count;
        self.pool_count = index.checked_add(1).ok_or(LedgerError::MathOverflow)?;
        Ok(index)
    }
}

#[account]
#[derive(Debug)]
pub struct Pool {
    /// Ledger this pool was created under
    pub ledger: Pubkey,
    /// Position in the ledger's creation order, starting at 0
    pub index: u64,
    /// The SPL token mint this pool holds
    pub asset_mint: Pubkey,
    /// The pool's token vault (PDA-owned)
    pub vault: Pubkey,
    /// Units available to lend or pay out to depositors
    pub liquidity: u64,
    /// Lifetime borrower interest received; held in the vault but never added to `liquidity`
    pub interest_collected: u64,
    /// Annual rate paid to depositors, in basis points
    pub deposit_rate_bps: u16,
    /// Annual rate charged to borrowers, in basis points
    pub borrow_rate_bps: u16,
    /// PDA bump seed
    pub bump: u8,
    /// Vault bump seed
    pub vault_bump: u8,
    /// Reserved for future upgrades
    pub _reserved: [u8; 64],
}

impl Pool {
    pub const SIZE: usize = 8  // discriminator
        + 32   // ledger
        + 8    // index
        + 32   // asset_mint
        + 32   // vault
        + 8    // liquidity
        + 8    // interest_collected
        + 2    // deposit_rate_bps
        + 2    // borrow_rate_bps
        + 1    // bump
        + 1    // vault_bump
        + 64;  // _reserved

    /// Checks the vault and the user's token mint against this pool.
    pub fn check_token_accounts(&self, vault: &Pubkey, user_mint: &Pubkey) -> Result<()> {
        require_keys_eq!(*vault, self.vault, LedgerError::InvalidVault);
        require_keys_eq!(*user_mint, self.asset_mint, LedgerError::MintMismatch);
        Ok(())
    }

    pub fn info(&self) -> PoolInfo {
        PoolInfo {
            index: self.index,
            asset_mint: self.asset_mint,
            liquidity: self.liquidity,
            deposit_rate_bps: self.deposit_rate_bps,
            borrow_rate_bps: self.borrow_rate_bps,
            interest_collected: self.interest_collected,
        }
    }
}

// Arrays past 32 elements have no derived Default
impl Default for Pool {
    fn default() -> Self {
        Self {
            ledger: Pubkey::default(),
            index: 0,
            asset_mint: Pubkey::default(),
            vault: Pubkey::default(),
            liquidity: 0,
            interest_collected: 0,
            deposit_rate_bps: 0,
            borrow_rate_bps: 0,
            bump: 0,
            vault_bump: 0,
            _reserved: [0u8; 64],
        }
    }
}

#[account]
#[derive(Debug, Default)]
pub struct DepositPosition {
    /// The pool this deposit belongs to
    pub pool: Pubkey,
    /// The depositor's wallet
    pub owner: Pubkey,
    /// Units deposited; zero while the slot is empty
    pub principal: u64,
    /// Unix timestamp the deposit was opened
    pub opened_at: i64,
    /// PDA bump
    pub bump: u8,
}

impl DepositPosition {
    pub const SIZE: usize = 8  // discriminator
        + 32   // pool
        + 32   // owner
        + 8    // principal
        + 8    // opened_at
        + 1;   // bump

    pub fn is_open(&self) -> bool {
        self.principal > 0
    }

    pub fn quote(&self, rate_bps: u16, now: i64) -> Result<PositionQuote> {
        PositionQuote::accrue(self.principal, rate_bps, self.opened_at, now)
    }
}

#[account]
#[derive(Debug, Default)]
pub struct BorrowPosition {
    /// The pool this loan was drawn from
    pub pool: Pubkey,
    /// The borrower's wallet
    pub owner: Pubkey,
    /// Outstanding principal across every draw; zero while the slot is empty
    pub principal: u64,
    /// Unix timestamp of the first draw; later draws do not move it
    pub opened_at: i64,
    /// PDA bump
    pub bump: u8,
}

impl BorrowPosition {
    pub const SIZE: usize = 8  // discriminator
        + 32   // pool
        + 32   // owner
        + 8    // principal
        + 8    // opened_at
        + 1;   // bump

    pub fn is_open(&self) -> bool {
        self.principal > 0
    }

    pub fn quote(&self, rate_bps: u16, now: i64) -> Result<PositionQuote> {
        PositionQuote::accrue(self.principal, rate_bps, self.opened_at, now)
    }
}

/// Read-only view of a pool returned by `get_pool`.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct PoolInfo {
    pub index: u64,
    pub asset_mint: Pubkey,
    pub liquidity: u64,
    pub deposit_rate_bps: u16,
    pub borrow_rate_bps: u16,
    pub interest_collected: u64,
}

/// What closing a position would settle for at a given instant.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PositionQuote {
    pub principal: u64,
    pub interest: u64,
    pub total: u64,
}

impl PositionQuote {
    pub fn accrue(principal: u64, rate_bps: u16, opened_at: i64, now: i64) -> Result<Self> {
        let (interest, total) = accrued_total(principal, rate_bps, opened_at, now)?;
        Ok(Self {
            principal,
            interest,
            total,
        })
    }
}
