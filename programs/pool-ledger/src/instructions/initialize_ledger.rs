use anchor_lang::prelude::*;

use crate::constants::*;
use crate::events::LedgerInitialized;
use crate::state::Ledger;

#[derive(Accounts)]
#[instruction(admin: Pubkey)]
pub struct InitializeLedger<'info> {
    #[account(
        init,
        seeds = [LEDGER_SEED, admin.as_ref()],
        bump,
        payer = payer,
        space = Ledger::SIZE,
    )]
    pub ledger: Account<'info, Ledger>,

    #[account(mut)]
    pub payer: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handle_initialize_ledger(ctx: Context<InitializeLedger>, admin: Pubkey) -> Result<()> {
    let ledger = &mut ctx.accounts.ledger;
    ledger.admin = admin;
    ledger.pool_count = 0;
    ledger.bump = ctx.bumps.ledger;

    emit!(LedgerInitialized {
        ledger: ledger.key(),
        admin,
    });

    Ok(())
}
