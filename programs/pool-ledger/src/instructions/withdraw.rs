use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::accounting;
use crate::constants::*;
use crate::events::LiquidityWithdrawn;
use crate::slots::{close_slot, load_pool, load_position, store};
use crate::state::{DepositPosition, Ledger};
use crate::transfer::VaultTransfer;

#[derive(Accounts)]
#[instruction(pool_index: u64)]
pub struct Withdraw<'info> {
    #[account(
        seeds = [LEDGER_SEED, ledger.admin.as_ref()],
        bump = ledger.bump,
    )]
    pub ledger: Account<'info, Ledger>,

    /// CHECK: pool PDA for `pool_index`; decoded in the handler once the index is in range
    #[account(
        mut,
        seeds = [POOL_SEED, ledger.key().as_ref(), &pool_index.to_le_bytes()],
        bump,
    )]
    pub pool: UncheckedAccount<'info>,

    /// CHECK: deposit slot of `depositor`; empty when no deposit is open
    #[account(
        mut,
        seeds = [DEPOSIT_POSITION_SEED, pool.key().as_ref(), depositor.key().as_ref()],
        bump,
    )]
    pub position: UncheckedAccount<'info>,

    #[account(mut)]
    pub vault: Account<'info, TokenAccount>,

    #[account(mut)]
    pub depositor_token_account: Account<'info, TokenAccount>,

    #[account(mut)]
    pub depositor: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

pub fn handle_withdraw(ctx: Context<Withdraw>, pool_index: u64) -> Result<u64> {
    let now = Clock::get()?.unix_timestamp;
    let accounts = &ctx.accounts;

    let mut pool = load_pool(&accounts.ledger, pool_index, &accounts.pool)?;
    let mut position = load_position::<DepositPosition>(&accounts.position)?;
    pool.check_token_accounts(&accounts.vault.key(), &accounts.depositor_token_account.mint)?;

    let mut transfer = VaultTransfer::new(
        accounts.token_program.to_account_info(),
        accounts.pool.to_account_info(),
        &pool,
        accounts.vault.to_account_info(),
        accounts.depositor_token_account.to_account_info(),
        accounts.depositor.to_account_info(),
    );
    let settlement = accounting::withdraw(&mut pool, &mut position, &mut transfer, now)?;

    store(&pool, &accounts.pool)?;
    close_slot(
        accounts.position.to_account_info(),
        accounts.depositor.to_account_info(),
    )?;

    emit!(LiquidityWithdrawn {
        pool: accounts.pool.key(),
        pool_index,
        depositor: accounts.depositor.key(),
        principal: settlement.principal,
        interest: settlement.interest,
        amount_paid: settlement.amount,
        liquidity: pool.liquidity,
        timestamp: now,
    });

    Ok(settlement.amount)
}
