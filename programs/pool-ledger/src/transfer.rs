use anchor_lang::prelude::*;
use anchor_spl::token::{self, Transfer};

use crate::accounting::AssetTransfer;
use crate::constants::POOL_SEED;
use crate::state::Pool;

/// SPL token transfers between one user's token account and a pool vault.
pub struct VaultTransfer<'info> {
    token_program: AccountInfo<'info>,
    vault: AccountInfo<'info>,
    user_token_account: AccountInfo<'info>,
    user: AccountInfo<'info>,
    pool: AccountInfo<'info>,
    ledger: Pubkey,
    pool_index: u64,
    pool_bump: u8,
}

impl<'info> VaultTransfer<'info> {
    /// `pool_account` is the account `pool` was loaded from; it signs outflows.
    pub fn new(
        token_program: AccountInfo<'info>,
        pool_account: AccountInfo<'info>,
        pool: &Pool,
        vault: AccountInfo<'info>,
        user_token_account: AccountInfo<'info>,
        user: AccountInfo<'info>,
    ) -> Self {
        Self {
            token_program,
            vault,
            user_token_account,
            user,
            pool: pool_account,
            ledger: pool.ledger,
            pool_index: pool.index,
            pool_bump: pool.bump,
        }
    }
}

impl<'info> AssetTransfer for VaultTransfer<'info> {
    fn transfer_in(&mut self, amount: u64) -> Result<()> {
        token::transfer(
            CpiContext::new(
                self.token_program.clone(),
                Transfer {
                    from: self.user_token_account.clone(),
                    to: self.vault.clone(),
                    authority: self.user.clone(),
                },
            ),
            amount,
        )
    }

    fn transfer_out(&mut self, amount: u64) -> Result<()> {
        // The vault's token authority is the pool PDA
        let index_bytes = self.pool_index.to_le_bytes();
        let pool_seeds = &[
            POOL_SEED,
            self.ledger.as_ref(),
            &index_bytes,
            &[self.pool_bump],
        ];

        token::transfer(
            CpiContext::new_with_signer(
                self.token_program.clone(),
                Transfer {
                    from: self.vault.clone(),
                    to: self.user_token_account.clone(),
                    authority: self.pool.clone(),
                },
                &[pool_seeds],
            ),
            amount,
        )
    }
}
