#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! ```
//! use gaborbank::filters::{gabor_filter_bank, GaborBankParams};
//!
//! let params = GaborBankParams { n_scales: 2, n_orientations: 4, ..Default::default() };
//! let bank = gabor_filter_bank::<f32>([15, 15].into(), &params).unwrap();
//! assert_eq!(bank.len(), 8);
//! ```

#[doc(inline)]
pub use gaborbank_grid as grid;

#[doc(inline)]
pub use gaborbank_filters as filters;
