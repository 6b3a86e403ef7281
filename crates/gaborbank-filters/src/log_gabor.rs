use gaborbank_grid::{centered_meshgrid, Kernel, KernelDtype, KernelSize};

use crate::{
    error::{ensure_finite, ensure_positive, ensure_size, FilterError},
    lowpass::{low_pass_filter, LowPassParams},
};

/// The window applied to every Log-Gabor kernel: as large as possible while
/// still falling to zero at the boundaries.
pub const LOG_GABOR_WINDOW: LowPassParams = LowPassParams {
    cutoff: 0.45,
    order: 15,
};

/// Parameters of a frequency-domain Log-Gabor kernel.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LogGaborParams {
    /// Center frequency of the filter.
    pub f0: f64,
    /// Orientation angle of the filter, in radians.
    pub theta0: f64,
    /// Radial bandwidth relative to the center frequency (`sigma_f / f0`).
    ///
    /// Must be positive and different from `1`: at `1` the radial gaussian has
    /// zero width and the kernel degenerates to a nearly all-zero grid, so it is
    /// rejected instead of computed.
    pub sigma_over_f: f64,
    /// Angular bandwidth, in radians.
    pub sigma_theta: f64,
}

impl LogGaborParams {
    /// Check the parameters against their domain.
    pub fn validate(&self) -> Result<(), FilterError> {
        ensure_positive("f0", self.f0)?;
        ensure_finite("theta0", self.theta0)?;
        ensure_positive("sigma_over_f", self.sigma_over_f)?;
        if self.sigma_over_f == 1.0 {
            // ln(1) = 0 would zero the radial denominator
            return Err(FilterError::invalid(
                "sigma_over_f",
                self.sigma_over_f,
                "must be != 1",
            ));
        }
        ensure_positive("sigma_theta", self.sigma_theta)?;
        Ok(())
    }
}

/// Create a Log-Gabor kernel.
///
/// The kernel lives in the frequency domain and is meant to be multiplied with
/// the (centered) spectrum of an image, not convolved with it. It is the product
/// of three terms:
///
/// - a radial gaussian over log-frequency centered at `f0`,
/// - an angular gaussian centered at `theta0`,
/// - the Butterworth window [`LOG_GABOR_WINDOW`].
///
/// Frequencies are normalized by `min(width, height)`, so the radius goes from
/// `0` at the center to about `0.5` at the boundary. The DC cell
/// `[height / 2, width / 2]` is always `0`.
///
/// # Arguments
///
/// * `size` - The size of the kernel.
/// * `params` - The center frequency, orientation and bandwidths.
///
/// # Returns
///
/// The kernel with shape `[height, width]`.
///
/// # Errors
///
/// Returns [`FilterError::InvalidParameter`] if the size has a zero dimension,
/// `f0`, `sigma_over_f` or `sigma_theta` is not positive, or `sigma_over_f` is `1`.
///
/// # Example
///
/// ```
/// use gaborbank_filters::{log_gabor_kernel, LogGaborParams};
///
/// let params = LogGaborParams { f0: 0.25, theta0: 0.0, sigma_over_f: 0.75, sigma_theta: 1.0 };
/// let kernel = log_gabor_kernel::<f32>([16, 16].into(), &params).unwrap();
///
/// assert_eq!(kernel[[8, 8]], 0.0);
/// ```
pub fn log_gabor_kernel<T: KernelDtype>(
    size: KernelSize,
    params: &LogGaborParams,
) -> Result<Kernel<T>, FilterError> {
    ensure_size(size)?;
    params.validate()?;

    let norm = size.width.min(size.height);
    let (x, y) = centered_meshgrid::<T>(size, norm, norm);

    let radial = radial_component(size, &x, &y, params)?;
    let angular = angular_component(&x, &y, params)?;
    let window = low_pass_filter::<T>(size, &LOG_GABOR_WINDOW)?;

    let kernel = radial
        .element_wise_op(&angular, |r, a| *r * *a)?
        .element_wise_op(&window, |ra, w| *ra * *w)?;

    log::trace!("log-gabor kernel {size} with {params:?}");

    Ok(kernel)
}

/// Gaussian over the log of the radius, centered at `ln(f0)`.
///
/// The DC cell has no meaningful log-frequency: it is excluded from the
/// formula and assigned `0` directly.
fn radial_component<T: KernelDtype>(
    size: KernelSize,
    x: &Kernel<T>,
    y: &Kernel<T>,
    params: &LogGaborParams,
) -> Result<Kernel<T>, FilterError> {
    let radius = x.element_wise_op(y, |x, y| x.hypot(*y))?;

    let f0 = T::from_f64(params.f0);
    let log_bandwidth = T::from_f64(params.sigma_over_f).ln();
    let denominator = T::from_f64(2.0) * log_bandwidth * log_bandwidth;

    let dc = size.center();

    Ok(Kernel::from_shape_fn(size, |index| {
        if index == dc {
            return T::zero();
        }
        let log_ratio = (radius[index] / f0).ln();
        (-(log_ratio * log_ratio) / denominator).exp()
    }))
}

/// Gaussian over the angular distance to `theta0`.
fn angular_component<T: KernelDtype>(
    x: &Kernel<T>,
    y: &Kernel<T>,
    params: &LogGaborParams,
) -> Result<Kernel<T>, FilterError> {
    let (sin_angle, cos_angle) = T::from_f64(params.theta0).sin_cos();
    let sigma_theta = T::from_f64(params.sigma_theta);
    let denominator = T::from_f64(2.0) * sigma_theta * sigma_theta;

    let angular = x.element_wise_op(y, |x, y| {
        // polar angle with the vertical axis pointing up
        let theta = (-*y).atan2(*x);
        let (sin_theta, cos_theta) = theta.sin_cos();

        // the sine and cosine differences avoid the wrap-around at +-pi
        let ds = sin_theta * cos_angle - cos_theta * sin_angle;
        let dc = cos_theta * cos_angle + sin_theta * sin_angle;
        let dtheta = ds.atan2(dc).abs();

        (-(dtheta * dtheta) / denominator).exp()
    })?;

    Ok(angular)
}
