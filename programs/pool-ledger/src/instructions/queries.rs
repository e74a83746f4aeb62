//! Read-only instructions. Each returns its value through the transaction's
//! return data and writes nothing.

use anchor_lang::prelude::*;

use crate::constants::*;
use crate::slots::{load_pool, load_slot};
use crate::state::{BorrowPosition, DepositPosition, Ledger, PoolInfo, PositionQuote};

#[derive(Accounts)]
pub struct PoolCount<'info> {
    #[account(
        seeds = [LEDGER_SEED, ledger.admin.as_ref()],
        bump = ledger.bump,
    )]
    pub ledger: Account<'info, Ledger>,
}

#[derive(Accounts)]
#[instruction(pool_index: u64)]
pub struct GetPool<'info> {
    #[account(
        seeds = [LEDGER_SEED, ledger.admin.as_ref()],
        bump = ledger.bump,
    )]
    pub ledger: Account<'info, Ledger>,

    /// CHECK: pool PDA for `pool_index`; decoded in the handler once the index is in range
    #[account(
        seeds = [POOL_SEED, ledger.key().as_ref(), &pool_index.to_le_bytes()],
        bump,
    )]
    pub pool: UncheckedAccount<'info>,
}

#[derive(Accounts)]
#[instruction(pool_index: u64, owner: Pubkey)]
pub struct DepositSlot<'info> {
    #[account(
        seeds = [LEDGER_SEED, ledger.admin.as_ref()],
        bump = ledger.bump,
    )]
    pub ledger: Account<'info, Ledger>,

    /// CHECK: pool PDA for `pool_index`; decoded in the handler once the index is in range
    #[account(
        seeds = [POOL_SEED, ledger.key().as_ref(), &pool_index.to_le_bytes()],
        bump,
    )]
    pub pool: UncheckedAccount<'info>,

    /// CHECK: deposit slot of `owner`; empty when no deposit is open
    #[account(
        seeds = [DEPOSIT_POSITION_SEED, pool.key().as_ref(), owner.as_ref()],
        bump,
    )]
    pub position: UncheckedAccount<'info>,
}

#[derive(Accounts)]
#[instruction(pool_index: u64, owner: Pubkey)]
pub struct BorrowSlot<'info> {
    #[account(
        seeds = [LEDGER_SEED, ledger.admin.as_ref()],
        bump = ledger.bump,
    )]
    pub ledger: Account<'info, Ledger>,

    /// CHECK: pool PDA for `pool_index`; decoded in the handler once the index is in range
    #[account(
        seeds = [POOL_SEED, ledger.key().as_ref(), &pool_index.to_le_bytes()],
        bump,
    )]
    pub pool: UncheckedAccount<'info>,

    /// CHECK: borrow slot of `owner`; empty when no loan is open
    #[account(
        seeds = [BORROW_POSITION_SEED, pool.key().as_ref(), owner.as_ref()],
        bump,
    )]
    pub position: UncheckedAccount<'info>,
}

pub fn handle_pool_count(ctx: Context<PoolCount>) -> Result<u64> {
    Ok(ctx.accounts.ledger.pool_count)
}

pub fn handle_get_pool(ctx: Context<GetPool>, pool_index: u64) -> Result<PoolInfo> {
    let pool = load_pool(&ctx.accounts.ledger, pool_index, &ctx.accounts.pool)?;
    Ok(pool.info())
}

pub fn handle_get_deposit(ctx: Context<DepositSlot>, pool_index: u64, _owner: Pubkey) -> Result<u64> {
    load_pool(&ctx.accounts.ledger, pool_index, &ctx.accounts.pool)?;
    let position = load_slot::<DepositPosition>(&ctx.accounts.position)?;
    Ok(position.map_or(0, |p| p.principal))
}

pub fn handle_get_borrow(ctx: Context<BorrowSlot>, pool_index: u64, _owner: Pubkey) -> Result<u64> {
    load_pool(&ctx.accounts.ledger, pool_index, &ctx.accounts.pool)?;
    let position = load_slot::<BorrowPosition>(&ctx.accounts.position)?;
    Ok(position.map_or(0, |p| p.principal))
}

pub fn handle_quote_withdraw(
    ctx: Context<DepositSlot>,
    pool_index: u64,
    _owner: Pubkey,
) -> Result<PositionQuote> {
    let now = Clock::get()?.unix_timestamp;
    let pool = load_pool(&ctx.accounts.ledger, pool_index, &ctx.accounts.pool)?;
    match load_slot::<DepositPosition>(&ctx.accounts.position)? {
        Some(position) => position.quote(pool.deposit_rate_bps, now),
        None => Ok(PositionQuote::default()),
    }
}

pub fn handle_quote_repay(
    ctx: Context<BorrowSlot>,
    pool_index: u64,
    _owner: Pubkey,
) -> Result<PositionQuote> {
    let now = Clock::get()?.unix_timestamp;
    let pool = load_pool(&ctx.accounts.ledger, pool_index, &ctx.accounts.pool)?;
    match load_slot::<BorrowPosition>(&ctx.accounts.position)? {
        Some(position) => position.quote(pool.borrow_rate_bps, now),
        None => Ok(PositionQuote::default()),
    }
}
