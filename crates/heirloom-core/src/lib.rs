//! Decimal-precision core for the heirloom personal-finance ledger.
//!
//! Two pure computation areas live here:
//! - [`loans`]: fixed-payment amortization schedules, what-if comparisons
//!   of loan terms, and schedules derived from liability records.
//! - [`assets`]: per-record valuation through an ordered field fallback,
//!   grouping into fixed categories, and portfolio totals.

pub mod error;
pub mod time_value;
pub mod types;

#[cfg(feature = "loans")]
pub mod loans;

#[cfg(feature = "assets")]
pub mod assets;

pub use error::LedgerError;
pub use types::*;

/// Standard result type for all heirloom operations
pub type LedgerResult<T> = Result<T, LedgerError>;
