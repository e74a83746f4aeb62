use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::*;
use crate::events::PoolCreated;
use crate::state::{Ledger, Pool};

#[derive(Accounts)]
pub struct CreatePool<'info> {
    #[account(
        mut,
        seeds = [LEDGER_SEED, ledger.admin.as_ref()],
        bump = ledger.bump,
    )]
    pub ledger: Account<'info, Ledger>,

    #[account(
        init,
        seeds = [POOL_SEED, ledger.key().as_ref(), &ledger.pool_count.to_le_bytes()],
        bump,
        payer = admin,
        space = Pool::SIZE,
    )]
    pub pool: Account<'info, Pool>,

    pub asset_mint: Account<'info, Mint>,

    #[account(
        init,
        seeds = [POOL_VAULT_SEED, pool.key().as_ref()],
        bump,
        payer = admin,
        token::mint = asset_mint,
        token::authority = pool,
    )]
    pub vault: Account<'info, TokenAccount>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
}

pub fn handle_create_pool(
    ctx: Context<CreatePool>,
    deposit_rate_bps: u16,
    borrow_rate_bps: u16,
) -> Result<u64> {
    let ledger_key = ctx.accounts.ledger.key();
    let pool_index = ctx
        .accounts
        .ledger
        .register_pool(&ctx.accounts.admin.key())?;

    let pool = &mut ctx.accounts.pool;
    pool.ledger = ledger_key;
    pool.index = pool_index;
    pool.asset_mint = ctx.accounts.asset_mint.key();
    pool.vault = ctx.accounts.vault.key();
    pool.liquidity = 0;
    pool.interest_collected = 0;
    pool.deposit_rate_bps = deposit_rate_bps;
    pool.borrow_rate_bps = borrow_rate_bps;
    pool.bump = ctx.bumps.pool;
    pool.vault_bump = ctx.bumps.vault;
    pool._reserved = [0u8; 64];

    emit!(PoolCreated {
        ledger: ledger_key,
        pool: pool.key(),
        pool_index,
        asset_mint: pool.asset_mint,
        deposit_rate_bps,
        borrow_rate_bps,
    });

    Ok(pool_index)
}
