use gaborbank_grid::{GridError, KernelSize};

use crate::parallel::ParallelError;

/// An error type for the filters module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum FilterError {
    /// A parameter is outside of its valid domain.
    #[error("Invalid parameter `{name}` = {value}: {reason}")]
    InvalidParameter {
        /// Name of the offending parameter.
        name: &'static str,
        /// The value that was passed.
        value: f64,
        /// The constraint the value violates.
        reason: &'static str,
    },

    /// Error from the underlying kernel grid.
    #[error(transparent)]
    GridError(#[from] GridError),

    /// Error while setting up parallel execution.
    #[error(transparent)]
    ParallelError(#[from] ParallelError),
}

impl FilterError {
    pub(crate) fn invalid(name: &'static str, value: f64, reason: &'static str) -> Self {
        FilterError::InvalidParameter {
            name,
            value,
            reason,
        }
    }

    /// Returns true if the error reports a parameter outside of its domain.
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, FilterError::InvalidParameter { .. })
    }
}

/// Both kernel dimensions must be non-zero.
pub(crate) fn ensure_size(size: KernelSize) -> Result<(), FilterError> {
    if size.width == 0 {
        return Err(FilterError::invalid("width", 0.0, "must be > 0"));
    }
    if size.height == 0 {
        return Err(FilterError::invalid("height", 0.0, "must be > 0"));
    }
    Ok(())
}

pub(crate) fn ensure_positive(name: &'static str, value: f64) -> Result<(), FilterError> {
    // NaN fails the comparison
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(FilterError::invalid(name, value, "must be finite and > 0"))
    }
}

pub(crate) fn ensure_finite(name: &'static str, value: f64) -> Result<(), FilterError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(FilterError::invalid(name, value, "must be finite"))
    }
}

pub(crate) fn ensure_count(name: &'static str, value: usize) -> Result<(), FilterError> {
    if value == 0 {
        return Err(FilterError::invalid(name, 0.0, "must be >= 1"));
    }
    Ok(())
}
