#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Overview
//!
//! `gaborbank-grid` holds the data types shared by every kernel generator:
//!
//! - **Kernel**: an immutable, row-major 2D grid of floating point values
//! - **KernelSize**: the requested `width x height` of a kernel
//! - **KernelDtype**: the element types a kernel can be generated in (`f32`, `f64`)
//! - **meshgrid**: centered, normalized coordinate grids used by the frequency-domain filters
//!
//! # Quick Start
//!
//! ```rust
//! use gaborbank_grid::{Kernel, KernelSize};
//!
//! let size = KernelSize { width: 3, height: 2 };
//! let kernel = Kernel::<f32>::from_shape_fn(size, |[r, c]| (r * 3 + c) as f32);
//!
//! assert_eq!(kernel.shape(), [2, 3]);
//! assert_eq!(kernel.get([1, 2]), Some(&5.0));
//! ```

/// Element types a kernel can be generated in.
pub mod dtype;

/// Error types for the grid module.
pub mod error;

/// The kernel grid type and its size.
pub mod kernel;

/// Coordinate grids centered at the origin.
pub mod meshgrid;

pub use crate::dtype::{DefaultDtype, KernelDtype};
pub use crate::error::GridError;
pub use crate::kernel::{Kernel, KernelSize};
pub use crate::meshgrid::centered_meshgrid;
