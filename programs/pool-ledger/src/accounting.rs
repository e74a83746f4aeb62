//! Pool accounting: deposit, withdraw, borrow and repay against a single pool.
//!
//! Every operation runs in three steps. It first stages a [`Settlement`] from
//! read-only state, which is where every precondition is checked. It then
//! moves tokens through an [`AssetTransfer`]. Only once the transfer has
//! succeeded does it write the settlement back to the pool and position, so a
//! failed transfer leaves both exactly as they were.

use anchor_lang::prelude::*;

use crate::errors::LedgerError;
use crate::state::{BorrowPosition, DepositPosition, Pool};

/// Moves the pool's asset between one account and the pool vault.
pub trait AssetTransfer {
    /// Pull `amount` from the account into the vault.
    fn transfer_in(&mut self, amount: u64) -> Result<()>;

    /// Pay `amount` out of the vault to the account.
    fn transfer_out(&mut self, amount: u64) -> Result<()>;
}

/// The outcome of an operation, computed before any tokens move.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Settlement {
    /// Principal added to or released from the position
    pub principal: u64,
    /// Interest accrued on the position being closed
    pub interest: u64,
    /// Units moved by the transfer
    pub amount: u64,
    /// Pool liquidity once the settlement is committed
    pub liquidity_after: u64,
    /// Position principal once the settlement is committed
    pub position_principal_after: u64,
    /// Pool interest tally once the settlement is committed
    pub interest_collected_after: u64,
}

pub fn stage_deposit(pool: &Pool, position: &DepositPosition, amount: u64) -> Result<Settlement> {
    require!(amount > 0, LedgerError::InvalidAmount);
    require!(!position.is_open(), LedgerError::PositionAlreadyOpen);

    let liquidity_after = pool
        .liquidity
        .checked_add(amount)
        .ok_or(LedgerError::MathOverflow)?;

    Ok(Settlement {
        principal: amount,
        interest: 0,
        amount,
        liquidity_after,
        position_principal_after: amount,
        interest_collected_after: pool.interest_collected,
    })
}

pub fn stage_withdraw(pool: &Pool, position: &DepositPosition, now: i64) -> Result<Settlement> {
    require!(position.is_open(), LedgerError::NoPosition);

    let quote = position.quote(pool.deposit_rate_bps, now)?;
    // Leave the position intact so the depositor can retry once liquidity returns
    require!(
        pool.liquidity >= quote.total,
        LedgerError::InsufficientLiquidity
    );

    Ok(Settlement {
        principal: quote.principal,
        interest: quote.interest,
        amount: quote.total,
        liquidity_after: pool.liquidity - quote.total,
        position_principal_after: 0,
        interest_collected_after: pool.interest_collected,
    })
}

pub fn stage_borrow(pool: &Pool, position: &BorrowPosition, amount: u64) -> Result<Settlement> {
    require!(amount > 0, LedgerError::InvalidAmount);
    require!(pool.liquidity >= amount, LedgerError::InsufficientLiquidity);
    let position_principal_after = position
        .principal
        .checked_add(amount)
        .ok_or(LedgerError::MathOverflow)?;

    Ok(Settlement {
        principal: amount,
        interest: 0,
        amount,
        liquidity_after: pool.liquidity - amount,
        position_principal_after,
        interest_collected_after: pool.interest_collected,
    })
}

pub fn stage_repay(pool: &Pool, position: &BorrowPosition, now: i64) -> Result<Settlement> {
    require!(position.is_open(), LedgerError::NoPosition);

    let quote = position.quote(pool.borrow_rate_bps, now)?;
    // Only principal returns to liquidity; interest is tallied separately
    let liquidity_after = pool
        .liquidity
        .checked_add(quote.principal)
        .ok_or(LedgerError::MathOverflow)?;
    let interest_collected_after = pool
        .interest_collected
        .checked_add(quote.interest)
        .ok_or(LedgerError::MathOverflow)?;

    Ok(Settlement {
        principal: quote.principal,
        interest: quote.interest,
        amount: quote.total,
        liquidity_after,
        position_principal_after: 0,
        interest_collected_after,
    })
}

/// Opens a deposit of `amount` at `now`.
pub fn deposit<T: AssetTransfer>(
    pool: &mut Pool,
    position: &mut DepositPosition,
    transfer: &mut T,
    amount: u64,
    now: i64,
) -> Result<Settlement> {
    let settlement = stage_deposit(pool, position, amount)?;

    transfer.transfer_in(settlement.amount)?;

    pool.liquidity = settlement.liquidity_after;
    position.principal = settlement.position_principal_after;
    position.opened_at = now;

    Ok(settlement)
}

/// Redeems the whole deposit plus simple interest. Returns the amount paid.
pub fn withdraw<T: AssetTransfer>(
    pool: &mut Pool,
    position: &mut DepositPosition,
    transfer: &mut T,
    now: i64,
) -> Result<Settlement> {
    let settlement = stage_withdraw(pool, position, now)?;

    transfer.transfer_out(settlement.amount)?;

    pool.liquidity = settlement.liquidity_after;
    position.principal = settlement.position_principal_after;
    position.opened_at = 0;

    Ok(settlement)
}

/// Lends `amount` out of the pool.
///
/// A draw against an already open loan is added to its principal as is: the
/// interest accrued so far is not settled and `opened_at` keeps the time of
/// the first draw, so the whole principal accrues from then.
pub fn borrow<T: AssetTransfer>(
    pool: &mut Pool,
    position: &mut BorrowPosition,
    transfer: &mut T,
    amount: u64,
    now: i64,
) -> Result<Settlement> {
    let settlement = stage_borrow(pool, position, amount)?;

    transfer.transfer_out(settlement.amount)?;

    pool.liquidity = settlement.liquidity_after;
    if !position.is_open() {
        position.opened_at = now;
    }
    position.principal = settlement.position_principal_after;

    Ok(settlement)
}

/// Collects principal plus simple interest and closes the loan.
pub fn repay<T: AssetTransfer>(
    pool: &mut Pool,
    position: &mut BorrowPosition,
    transfer: &mut T,
    now: i64,
) -> Result<Settlement> {
    let settlement = stage_repay(pool, position, now)?;

    transfer.transfer_in(settlement.amount)?;

    pool.liquidity = settlement.liquidity_after;
    pool.interest_collected = settlement.interest_collected_after;
    position.principal = settlement.position_principal_after;
    position.opened_at = 0;

    Ok(settlement)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::SECONDS_PER_YEAR;
    use anchor_lang::error::Error;

    const T0: i64 = 1_700_000_000;
    const YEAR: i64 = SECONDS_PER_YEAR as i64;

    #[derive(Default)]
    struct MockTransfer {
        fail: bool,
        pulled: u64,
        paid: u64,
    }

    impl AssetTransfer for MockTransfer {
        fn transfer_in(&mut self, amount: u64) -> Result<()> {
            if self.fail {
                return Err(ProgramError::InsufficientFunds.into());
            }
            self.pulled += amount;
            Ok(())
        }

        fn transfer_out(&mut self, amount: u64) -> Result<()> {
            if self.fail {
                return Err(ProgramError::InsufficientFunds.into());
            }
            self.paid += amount;
            Ok(())
        }
    }

    fn pool_with(liquidity: u64) -> Pool {
        Pool {
            liquidity,
            deposit_rate_bps: 500,
            borrow_rate_bps: 1_000,
            ..Pool::default()
        }
    }

    #[test]
    fn deposit_opens_position_and_adds_liquidity() {
        let mut pool = pool_with(0);
        let mut position = DepositPosition::default();
        let mut transfer = MockTransfer::default();

        deposit(&mut pool, &mut position, &mut transfer, 1_000, T0).unwrap();

        assert_eq!(pool.liquidity, 1_000);
        assert_eq!(position.principal, 1_000);
        assert_eq!(position.opened_at, T0);
        assert_eq!(transfer.pulled, 1_000);
    }

    #[test]
    fn deposit_rejects_zero_amount() {
        let mut pool = pool_with(0);
        let mut position = DepositPosition::default();
        let mut transfer = MockTransfer::default();

        let err = deposit(&mut pool, &mut position, &mut transfer, 0, T0).unwrap_err();

        assert_eq!(err, Error::from(LedgerError::InvalidAmount));
        assert_eq!(transfer.pulled, 0);
    }

    #[test]
    fn second_deposit_is_rejected_while_open() {
        let mut pool = pool_with(0);
        let mut position = DepositPosition::default();
        let mut transfer = MockTransfer::default();

        deposit(&mut pool, &mut position, &mut transfer, 1_000, T0).unwrap();
        let err = deposit(&mut pool, &mut position, &mut transfer, 500, T0 + 10).unwrap_err();

        assert_eq!(err, Error::from(LedgerError::PositionAlreadyOpen));
        assert_eq!(pool.liquidity, 1_000);
        assert_eq!(position.principal, 1_000);
        assert_eq!(position.opened_at, T0);
    }

    #[test]
    fn failed_transfer_in_leaves_state_untouched() {
        let mut pool = pool_with(250);
        let mut position = DepositPosition::default();
        let mut transfer = MockTransfer {
            fail: true,
            ..MockTransfer::default()
        };

        let err = deposit(&mut pool, &mut position, &mut transfer, 1_000, T0).unwrap_err();

        assert_eq!(err, Error::from(ProgramError::InsufficientFunds));
        assert_eq!(pool.liquidity, 250);
        assert!(!position.is_open());
    }

    #[test]
    fn withdraw_pays_principal_plus_interest() {
        let mut pool = pool_with(0);
        let mut position = DepositPosition::default();
        let mut transfer = MockTransfer::default();
        deposit(&mut pool, &mut position, &mut transfer, 1_000_000, T0).unwrap();
        // Someone else's liquidity covers the interest
        pool.liquidity += 100_000;

        let settlement = withdraw(&mut pool, &mut position, &mut transfer, T0 + YEAR).unwrap();

        assert_eq!(settlement.interest, 50_000);
        assert_eq!(settlement.amount, 1_050_000);
        assert_eq!(transfer.paid, 1_050_000);
        assert_eq!(pool.liquidity, 50_000);
        assert!(!position.is_open());
    }

    #[test]
    fn withdraw_without_position_fails() {
        let mut pool = pool_with(1_000);
        let mut position = DepositPosition::default();
        let mut transfer = MockTransfer::default();

        let err = withdraw(&mut pool, &mut position, &mut transfer, T0).unwrap_err();

        assert_eq!(err, Error::from(LedgerError::NoPosition));
    }

    #[test]
    fn withdraw_beyond_liquidity_keeps_position() {
        let mut pool = pool_with(0);
        let mut position = DepositPosition::default();
        let mut transfer = MockTransfer::default();
        deposit(&mut pool, &mut position, &mut transfer, 1_000_000, T0).unwrap();

        // Principal alone is covered, accrued interest is not
        let err = withdraw(&mut pool, &mut position, &mut transfer, T0 + YEAR).unwrap_err();

        assert_eq!(err, Error::from(LedgerError::InsufficientLiquidity));
        assert_eq!(pool.liquidity, 1_000_000);
        assert_eq!(position.principal, 1_000_000);
        assert_eq!(position.opened_at, T0);
        assert_eq!(transfer.paid, 0);
    }

    #[test]
    fn failed_transfer_out_keeps_deposit() {
        let mut pool = pool_with(0);
        let mut position = DepositPosition::default();
        let mut transfer = MockTransfer::default();
        deposit(&mut pool, &mut position, &mut transfer, 1_000, T0).unwrap();

        transfer.fail = true;
        withdraw(&mut pool, &mut position, &mut transfer, T0).unwrap_err();

        assert_eq!(pool.liquidity, 1_000);
        assert_eq!(position.principal, 1_000);
    }

    #[test]
    fn borrow_checks_amount_and_liquidity() {
        let mut pool = pool_with(100);
        let mut position = BorrowPosition::default();
        let mut transfer = MockTransfer::default();

        let err = borrow(&mut pool, &mut position, &mut transfer, 0, T0).unwrap_err();
        assert_eq!(err, Error::from(LedgerError::InvalidAmount));

        let err = borrow(&mut pool, &mut position, &mut transfer, 101, T0).unwrap_err();
        assert_eq!(err, Error::from(LedgerError::InsufficientLiquidity));

        assert_eq!(pool.liquidity, 100);
        assert!(!position.is_open());
        assert_eq!(transfer.paid, 0);
    }

    #[test]
    fn borrow_may_drain_pool_exactly() {
        let mut pool = pool_with(100);
        let mut position = BorrowPosition::default();
        let mut transfer = MockTransfer::default();

        borrow(&mut pool, &mut position, &mut transfer, 100, T0).unwrap();

        assert_eq!(pool.liquidity, 0);
        assert_eq!(position.principal, 100);
        assert_eq!(transfer.paid, 100);
    }

    #[test]
    fn second_borrow_accumulates_without_moving_open_time() {
        let mut pool = pool_with(10_000);
        let mut position = BorrowPosition::default();
        let mut transfer = MockTransfer::default();

        borrow(&mut pool, &mut position, &mut transfer, 1_000, T0).unwrap();
        borrow(&mut pool, &mut position, &mut transfer, 2_000, T0 + 3_600).unwrap();

        assert_eq!(position.principal, 3_000);
        assert_eq!(position.opened_at, T0);
        assert_eq!(pool.liquidity, 7_000);
    }

    #[test]
    fn immediate_repay_costs_no_interest() {
        let mut pool = pool_with(1_000);
        let mut position = BorrowPosition::default();
        let mut transfer = MockTransfer::default();

        borrow(&mut pool, &mut position, &mut transfer, 500, T0).unwrap();
        let settlement = repay(&mut pool, &mut position, &mut transfer, T0).unwrap();

        assert_eq!(settlement.amount, 500);
        assert_eq!(settlement.interest, 0);
        assert_eq!(pool.liquidity, 1_000);
        assert!(!position.is_open());
    }

    #[test]
    fn repay_returns_principal_only_to_liquidity() {
        let mut pool = pool_with(1_000_000);
        let mut position = BorrowPosition::default();
        let mut transfer = MockTransfer::default();

        borrow(&mut pool, &mut position, &mut transfer, 1_000_000, T0).unwrap();
        let settlement = repay(&mut pool, &mut position, &mut transfer, T0 + YEAR).unwrap();

        assert_eq!(settlement.interest, 100_000);
        assert_eq!(settlement.amount, 1_100_000);
        assert_eq!(transfer.pulled, 1_100_000);
        assert_eq!(pool.liquidity, 1_000_000);
        assert_eq!(pool.interest_collected, 100_000);
    }

    #[test]
    fn repay_without_loan_fails() {
        let mut pool = pool_with(1_000);
        let mut position = BorrowPosition::default();
        let mut transfer = MockTransfer::default();

        let err = repay(&mut pool, &mut position, &mut transfer, T0).unwrap_err();

        assert_eq!(err, Error::from(LedgerError::NoPosition));
    }

    #[test]
    fn failed_repay_transfer_keeps_loan() {
        let mut pool = pool_with(1_000);
        let mut position = BorrowPosition::default();
        let mut transfer = MockTransfer::default();
        borrow(&mut pool, &mut position, &mut transfer, 400, T0).unwrap();

        transfer.fail = true;
        repay(&mut pool, &mut position, &mut transfer, T0 + YEAR).unwrap_err();

        assert_eq!(pool.liquidity, 600);
        assert_eq!(pool.interest_collected, 0);
        assert_eq!(position.principal, 400);
        assert_eq!(position.opened_at, T0);
    }

    #[test]
    fn staging_does_not_mutate() {
        let pool = pool_with(1_000);
        let position = DepositPosition {
            principal: 1_000,
            opened_at: T0,
            ..DepositPosition::default()
        };

        let first = stage_withdraw(&pool, &position, T0 + 86_400).unwrap();
        let second = stage_withdraw(&pool, &position, T0 + 86_400).unwrap();

        assert_eq!(first, second);
        assert_eq!(pool.liquidity, 1_000);
        assert_eq!(position.principal, 1_000);
    }

    #[test]
    fn borrow_overflowing_principal_fails_before_paying_out() {
        let mut pool = pool_with(1_000);
        let mut position = BorrowPosition {
            principal: u64::MAX - 10,
            opened_at: T0,
            ..BorrowPosition::default()
        };
        let mut transfer = MockTransfer::default();

        let err = borrow(&mut pool, &mut position, &mut transfer, 11, T0).unwrap_err();

        assert_eq!(err, Error::from(LedgerError::MathOverflow));
        assert_eq!(transfer.paid, 0);
        assert_eq!(pool.liquidity, 1_000);
        assert_eq!(position.principal, u64::MAX - 10);
    }

    #[test]
    fn repay_overflowing_interest_tally_fails_before_collecting() {
        let mut pool = pool_with(1_000_000);
        let mut position = BorrowPosition::default();
        let mut transfer = MockTransfer::default();
        borrow(&mut pool, &mut position, &mut transfer, 1_000_000, T0).unwrap();
        pool.interest_collected = u64::MAX - 1;

        let err = repay(&mut pool, &mut position, &mut transfer, T0 + YEAR).unwrap_err();

        assert_eq!(err, Error::from(LedgerError::MathOverflow));
        assert_eq!(transfer.pulled, 0);
        assert_eq!(pool.liquidity, 0);
        assert_eq!(position.principal, 1_000_000);
    }

    #[test]
    fn staged_settlement_is_what_gets_committed() {
        let mut pool = pool_with(10_000);
        pool.interest_collected = 7;
        let mut position = BorrowPosition::default();
        let mut transfer = MockTransfer::default();
        borrow(&mut pool, &mut position, &mut transfer, 1_000, T0).unwrap();

        let staged = stage_borrow(&pool, &position, 500).unwrap();
        let committed = borrow(&mut pool, &mut position, &mut transfer, 500, T0 + 60).unwrap();
        assert_eq!(staged, committed);
        assert_eq!(position.principal, staged.position_principal_after);
        assert_eq!(position.principal, 1_500);

        let staged = stage_repay(&pool, &position, T0 + YEAR).unwrap();
        let committed = repay(&mut pool, &mut position, &mut transfer, T0 + YEAR).unwrap();
        assert_eq!(staged, committed);
        assert_eq!(pool.interest_collected, staged.interest_collected_after);
        assert_eq!(pool.interest_collected, 7 + 150);
        assert_eq!(pool.liquidity, staged.liquidity_after);
        assert!(!position.is_open());
    }
}
