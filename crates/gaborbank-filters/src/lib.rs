#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for the filters module.
pub mod error;

/// Butterworth low-pass windowing kernel.
pub mod lowpass;

/// Spatial-domain Gabor kernel.
pub mod gabor;

/// Frequency-domain Log-Gabor kernel.
pub mod log_gabor;

/// Multi-scale, multi-orientation filter banks.
pub mod bank;

/// Scheduling of bank entries on rayon thread pools.
pub mod parallel;

pub use crate::bank::{
    gabor_filter_bank, gabor_filter_bank_with_strategy, log_gabor_filter_bank,
    log_gabor_filter_bank_with_strategy, FilterBank, GaborBankParams, LogGaborBankParams,
};
pub use crate::error::FilterError;
pub use crate::gabor::{gabor_kernel, GaborParams};
pub use crate::log_gabor::{log_gabor_kernel, LogGaborParams};
pub use crate::lowpass::{low_pass_filter, LowPassParams};
pub use crate::parallel::ExecutionStrategy;
