use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::accounting;
use crate::constants::*;
use crate::events::LoanBorrowed;
use crate::slots::{load_pool, store};
use crate::state::{BorrowPosition, Ledger};
use crate::transfer::VaultTransfer;

#[derive(Accounts)]
#[instruction(pool_index: u64)]
pub struct Borrow<'info> {
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

    #[account(
        init_if_needed,
        seeds = [BORROW_POSITION_SEED, pool.key().as_ref(), borrower.key().as_ref()],
        bump,
        payer = borrower,
        space = BorrowPosition::SIZE,
    )]
    pub position: Account<'info, BorrowPosition>,

    #[account(mut)]
    pub vault: Account<'info, TokenAccount>,

    #[account(mut)]
    pub borrower_token_account: Account<'info, TokenAccount>,

    #[account(mut)]
    pub borrower: Signer<'info>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
}

pub fn handle_borrow(ctx: Context<Borrow>, pool_index: u64, amount: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let accounts = &mut *ctx.accounts;

    let mut pool = load_pool(&accounts.ledger, pool_index, &accounts.pool)?;
    pool.check_token_accounts(&accounts.vault.key(), &accounts.borrower_token_account.mint)?;

    let mut transfer = VaultTransfer::new(
        accounts.token_program.to_account_info(),
        accounts.pool.to_account_info(),
        &pool,
        accounts.vault.to_account_info(),
        accounts.borrower_token_account.to_account_info(),
        accounts.borrower.to_account_info(),
    );
    accounting::borrow(
        &mut pool,
        &mut accounts.position,
        &mut transfer,
        amount,
        now,
    )?;
    store(&pool, &accounts.pool)?;

    let position = &mut accounts.position;
    if position.pool == Pubkey::default() {
        // First draw: stamp the slot's identity
        position.pool = accounts.pool.key();
        position.owner = accounts.borrower.key();
        position.bump = ctx.bumps.position;
    }

    emit!(LoanBorrowed {
        pool: accounts.pool.key(),
        pool_index,
        borrower: accounts.borrower.key(),
        amount,
        principal: position.principal,
        liquidity: pool.liquidity,
        timestamp: now,
    });

    Ok(())
}
