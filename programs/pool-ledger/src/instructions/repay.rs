use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::accounting;
use crate::constants::*;
use crate::events::LoanRepaid;
use crate::slots::{close_slot, load_pool, load_position, store};
use crate::state::{BorrowPosition, Ledger};
use crate::transfer::VaultTransfer;

#[derive(Accounts)]
#[instruction(pool_index: u64)]
pub struct Repay<'info> {
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

    /// CHECK: borrow slot of `borrower`; empty when no loan is open
    #[account(
        mut,
        seeds = [BORROW_POSITION_SEED, pool.key().as_ref(), borrower.key().as_ref()],
        bump,
    )]
    pub position: UncheckedAccount<'info>,

    #[account(mut)]
    pub vault: Account<'info, TokenAccount>,

    #[account(mut)]
    pub borrower_token_account: Account<'info, TokenAccount>,

    #[account(mut)]
    pub borrower: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

pub fn handle_repay(ctx: Context<Repay>, pool_index: u64) -> Result<u64> {
    let now = Clock::get()?.unix_timestamp;
    let accounts = &ctx.accounts;

    let mut pool = load_pool(&accounts.ledger, pool_index, &accounts.pool)?;
    let mut position = load_position::<BorrowPosition>(&accounts.position)?;
    pool.check_token_accounts(&accounts.vault.key(), &accounts.borrower_token_account.mint)?;

    let mut transfer = VaultTransfer::new(
        accounts.token_program.to_account_info(),
        accounts.pool.to_account_info(),
        &pool,
        accounts.vault.to_account_info(),
        accounts.borrower_token_account.to_account_info(),
        accounts.borrower.to_account_info(),
    );
    let settlement = accounting::repay(&mut pool, &mut position, &mut transfer, now)?;

    // Interest stays in the vault but is not lendable; see Pool::interest_collected
    store(&pool, &accounts.pool)?;
    close_slot(
        accounts.position.to_account_info(),
        accounts.borrower.to_account_info(),
    )?;

    emit!(LoanRepaid {
        pool: accounts.pool.key(),
        pool_index,
        borrower: accounts.borrower.key(),
        principal: settlement.principal,
        interest: settlement.interest,
        amount_paid: settlement.amount,
        liquidity: pool.liquidity,
        timestamp: now,
    });

    Ok(settlement.amount)
}
