use anchor_lang::prelude::*;

pub mod accounting;
pub mod constants;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod math;
pub mod slots;
pub mod state;
pub mod transfer;

use instructions::*;
use state::{PoolInfo, PositionQuote};

declare_id!("BxTTxTRPthefo8Yu7G4wd6zY5qfyJdhXeJ9EL8xE2KuZ");

#[program]
pub mod pool_ledger {
    use super::*;

    pub fn initialize_ledger(ctx: Context<InitializeLedger>, admin: Pubkey) -> Result<()> {
        instructions::initialize_ledger::handle_initialize_ledger(ctx, admin)
    }

    pub fn create_pool(
        ctx: Context<CreatePool>,
        deposit_rate_bps: u16,
        borrow_rate_bps: u16,
    ) -> Result<u64> {
        instructions::create_pool::handle_create_pool(ctx, deposit_rate_bps, borrow_rate_bps)
    }

    pub fn deposit(ctx: Context<Deposit>, pool_index: u64, amount: u64) -> Result<()> {
        instructions::deposit::handle_deposit(ctx, pool_index, amount)
    }

    pub fn withdraw(ctx: Context<Withdraw>, pool_index: u64) -> Result<u64> {
        instructions::withdraw::handle_withdraw(ctx, pool_index)
    }

    pub fn borrow(ctx: Context<Borrow>, pool_index: u64, amount: u64) -> Result<()> {
        instructions::borrow::handle_borrow(ctx, pool_index, amount)
    }

    pub fn repay(ctx: Context<Repay>, pool_index: u64) -> Result<u64> {
        instructions::repay::handle_repay(ctx, pool_index)
    }

    pub fn pool_count(ctx: Context<PoolCount>) -> Result<u64> {
        instructions::queries::handle_pool_count(ctx)
    }

    pub fn get_pool(ctx: Context<GetPool>, pool_index: u64) -> Result<PoolInfo> {
        instructions::queries::handle_get_pool(ctx, pool_index)
    }

    pub fn get_deposit(ctx: Context<DepositSlot>, pool_index: u64, owner: Pubkey) -> Result<u64> {
        instructions::queries::handle_get_deposit(ctx, pool_index, owner)
    }

    pub fn get_borrow(ctx: Context<BorrowSlot>, pool_index: u64, owner: Pubkey) -> Result<u64> {
        instructions::queries::handle_get_borrow(ctx, pool_index, owner)
    }

    pub fn quote_withdraw(
        ctx: Context<DepositSlot>,
        pool_index: u64,
        owner: Pubkey,
    ) -> Result<PositionQuote> {
        instructions::queries::handle_quote_withdraw(ctx, pool_index, owner)
    }

    pub fn quote_repay(
        ctx: Context<BorrowSlot>,
        pool_index: u64,
        owner: Pubkey,
    ) -> Result<PositionQuote> {
        instructions::queries::handle_quote_repay(ctx, pool_index, owner)
    }
}
