use anchor_lang::prelude::*;

#[error_code]
pub enum LedgerError {
    #[msg("Unauthorized: signer is not the ledger administrator")]
    Unauthorized,

    #[msg("Pool index does not reference a pool of this ledger")]
    InvalidPool,

    #[msg("Amount must be greater than zero")]
    InvalidAmount,

    #[msg("Account already has an open deposit in this pool")]
    PositionAlreadyOpen,

    #[msg("Account has no open position in this pool")]
    NoPosition,

    #[msg("Insufficient pool liquidity")]
    InsufficientLiquidity,

    #[msg("Math overflow")]
    MathOverflow,

    #[msg("Token mint does not match pool's asset mint")]
    MintMismatch,

    #[msg("Vault account does not match pool's vault")]
    InvalidVault,
}
