//! Reading and writing program records held in accounts that the instruction
//! takes unchecked.
//!
//! A pool is addressed by index, so its account is only decoded once the
//! ledger confirms the index. A position slot is an account that may never
//! have been opened, or may have been closed by an earlier withdraw or
//! repay. In both cases the account arrives with no data and no owner, which
//! must surface as a ledger error rather than a failed deserialization.

use anchor_lang::prelude::*;

use crate::errors::LedgerError;
use crate::state::{Ledger, Pool};

/// Decodes a slot's data, or `None` if it was never opened or has been closed.
pub fn decode_slot<T: AccountDeserialize>(owner: &Pubkey, data: &[u8]) -> Result<Option<T>> {
    if data.is_empty() {
        return Ok(None);
    }
    require_keys_eq!(*owner, crate::ID);

    T::try_deserialize(&mut &data[..]).map(Some)
}

/// Decodes an open position, failing with `NoPosition` on an empty slot.
pub fn decode_position<T: AccountDeserialize>(owner: &Pubkey, data: &[u8]) -> Result<T> {
    decode_slot(owner, data)?.ok_or_else(|| error!(LedgerError::NoPosition))
}

/// Decodes pool `pool_index` of `ledger`. The index is checked first, so an
/// out of range pool fails with `InvalidPool` whatever its account holds.
pub fn decode_pool(ledger: &Ledger, pool_index: u64, owner: &Pubkey, data: &[u8]) -> Result<Pool> {
    ledger.check_pool(pool_index)?;
    decode_slot(owner, data)?.ok_or_else(|| error!(LedgerError::InvalidPool))
}

pub fn load_slot<T: AccountDeserialize>(info: &AccountInfo) -> Result<Option<T>> {
    let data = info.try_borrow_data()?;
    decode_slot(info.owner, &data)
}

pub fn load_position<T: AccountDeserialize>(info: &AccountInfo) -> Result<T> {
    let data = info.try_borrow_data()?;
    decode_position(info.owner, &data)
}

pub fn load_pool(ledger: &Ledger, pool_index: u64, info: &AccountInfo) -> Result<Pool> {
    let data = info.try_borrow_data()?;
    decode_pool(ledger, pool_index, info.owner, &data)
}

/// Writes `record` back over the account it was loaded from.
pub fn store<T: AccountSerialize>(record: &T, info: &AccountInfo) -> Result<()> {
    let mut data = info.try_borrow_mut_data()?;
    let mut writer: &mut [u8] = &mut data[..];
    record.try_serialize(&mut writer)
}

/// Returns the slot's rent to `destination` and hands the account back to the
/// system program, leaving it empty for the next open.
pub fn close_slot<'info>(info: AccountInfo<'info>, destination: AccountInfo<'info>) -> Result<()> {
    anchor_lang::common::close(info, destination)
}
