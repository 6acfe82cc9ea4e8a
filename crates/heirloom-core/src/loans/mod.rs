pub mod amortization;
pub mod comparison;

#[cfg(feature = "assets")]
pub mod liability;

pub use amortization::{compute_amortization, AmortizationEntry, AmortizationResult, LoanParameters};
