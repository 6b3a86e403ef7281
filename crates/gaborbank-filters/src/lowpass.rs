use gaborbank_grid::{centered_meshgrid, Kernel, KernelDtype, KernelSize};

use crate::error::{ensure_size, FilterError};

/// Parameters of a Butterworth low-pass filter.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LowPassParams {
    /// Cutoff frequency, in `(0, 0.5]`.
    pub cutoff: f64,
    /// Order of the filter, `>= 1`. The higher the order, the sharper the transition.
    pub order: u32,
}

impl LowPassParams {
    /// Check the parameters against their domain.
    pub fn validate(&self) -> Result<(), FilterError> {
        // written to also reject NaN
        if !(self.cutoff > 0.0 && self.cutoff <= 0.5) {
            return Err(FilterError::invalid(
                "cutoff",
                self.cutoff,
                "must be in (0, 0.5]",
            ));
        }
        if self.order < 1 {
            return Err(FilterError::invalid(
                "order",
                self.order as f64,
                "must be an integer >= 1",
            ));
        }
        Ok(())
    }

    fn exponent(&self) -> Result<i32, FilterError> {
        i32::try_from(2 * u64::from(self.order))
            .map_err(|_| FilterError::invalid("order", self.order as f64, "is too large"))
    }
}

/// Create a Butterworth low-pass filter.
///
/// Every cell holds `1 / (1 + (r / cutoff)^(2 * order))`, where `r` is the
/// distance of the cell to the origin after normalizing the horizontal
/// coordinates by the width and the vertical ones by the height. The value is
/// exactly `0.5` at `r = cutoff`.
///
/// # Arguments
///
/// * `size` - The size of the filter.
/// * `params` - The cutoff frequency and order of the filter.
///
/// # Returns
///
/// The filter as a kernel of shape `[height, width]`.
///
/// # Errors
///
/// Returns [`FilterError::InvalidParameter`] if the size has a zero dimension,
/// the cutoff is outside `(0, 0.5]` or the order is zero.
///
/// # Example
///
/// ```
/// use gaborbank_filters::{low_pass_filter, LowPassParams};
///
/// let lp = low_pass_filter::<f64>(
///     [8, 8].into(),
///     &LowPassParams { cutoff: 0.5, order: 1 },
/// ).unwrap();
///
/// // the left border of the center row lies exactly on the cutoff
/// assert_eq!(lp.get([4, 0]), Some(&0.5));
/// ```
pub fn low_pass_filter<T: KernelDtype>(
    size: KernelSize,
    params: &LowPassParams,
) -> Result<Kernel<T>, FilterError> {
    ensure_size(size)?;
    params.validate()?;

    let exponent = params.exponent()?;
    let cutoff = T::from_f64(params.cutoff);
    let one = T::one();

    let (x, y) = centered_meshgrid::<T>(size, size.width, size.height);

    let filter = x.element_wise_op(&y, |x, y| {
        let radius = x.hypot(*y);
        one / (one + (radius / cutoff).powi(exponent))
    })?;

    Ok(filter)
}
