pub mod initialize_ledger;
pub mod create_pool;
pub mod deposit;
pub mod withdraw;
pub mod borrow;
pub mod repay;
pub mod queries;

pub use initialize_ledger::*;
pub use create_pool::*;
pub use deposit::*;
pub use withdraw::*;
pub use borrow::*;
pub use repay::*;
pub use queries::*;
