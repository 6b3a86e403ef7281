use gaborbank_grid::{Kernel, KernelDtype, KernelSize};

use crate::error::{ensure_finite, ensure_positive, ensure_size, FilterError};

/// Parameters of a spatial-domain Gabor kernel.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaborParams {
    /// Standard deviation of the gaussian envelope.
    pub sigma: f64,
    /// Orientation of the normal to the parallel stripes, in radians.
    pub theta: f64,
    /// Wavelength of the sinusoidal carrier.
    pub lambda: f64,
    /// Spatial aspect ratio of the envelope.
    pub gamma: f64,
    /// Phase offset of the carrier, in radians.
    pub psi: f64,
}

impl GaborParams {
    /// Check the parameters against their domain.
    pub fn validate(&self) -> Result<(), FilterError> {
        ensure_positive("sigma", self.sigma)?;
        ensure_positive("gamma", self.gamma)?;
        ensure_finite("theta", self.theta)?;
        ensure_finite("psi", self.psi)?;
        ensure_finite("lambda", self.lambda)?;
        if self.lambda == 0.0 {
            return Err(FilterError::invalid("lambda", self.lambda, "must be != 0"));
        }
        Ok(())
    }
}

/// Create a Gabor kernel.
///
/// The kernel is a gaussian envelope modulated by a cosine carrier oriented
/// along `theta`:
///
/// ```text
/// exp(-0.5 * xr^2 / sigma^2 - 0.5 * yr^2 / (sigma / gamma)^2) * cos(2 * pi / lambda * xr + psi)
/// ```
///
/// where `(xr, yr)` are the cell offsets rotated by `theta`. Offsets are taken
/// from the cell `[height / 2, width / 2]` with integer division, so even sizes
/// are centered one cell past the geometric center.
///
/// # Arguments
///
/// * `size` - The size of the kernel.
/// * `params` - The envelope and carrier parameters.
///
/// # Returns
///
/// The kernel with shape `[height, width]`.
///
/// # Errors
///
/// Returns [`FilterError::InvalidParameter`] if the size has a zero dimension,
/// `sigma` or `gamma` is not positive, `lambda` is zero, or any value is not finite.
///
/// # Example
///
/// ```
/// use gaborbank_filters::{gabor_kernel, GaborParams};
///
/// let params = GaborParams { sigma: 1.0, theta: 0.0, lambda: 3.0, gamma: 1.0, psi: 0.0 };
/// let kernel = gabor_kernel::<f64>([5, 5].into(), &params).unwrap();
///
/// assert_eq!(kernel.shape(), [5, 5]);
/// assert_eq!(kernel[[2, 2]], 1.0);
/// ```
pub fn gabor_kernel<T: KernelDtype>(
    size: KernelSize,
    params: &GaborParams,
) -> Result<Kernel<T>, FilterError> {
    ensure_size(size)?;
    params.validate()?;

    let half = T::from_f64(0.5);
    let sigma = T::from_f64(params.sigma);
    let sigma_y = sigma / T::from_f64(params.gamma);
    let (sin_theta, cos_theta) = T::from_f64(params.theta).sin_cos();

    let const_x = -half / (sigma * sigma);
    let const_y = -half / (sigma_y * sigma_y);
    let const_scale = T::PI() * T::from_f64(2.0) / T::from_f64(params.lambda);
    let psi = T::from_f64(params.psi);

    let [half_height, half_width] = size.center().map(T::from_usize);

    let kernel = Kernel::from_shape_fn(size, |[i, j]| {
        let y = T::from_usize(i) - half_height;
        let x = T::from_usize(j) - half_width;

        // rotate the offsets
        let xr = x * cos_theta + y * sin_theta;
        let yr = -x * sin_theta + y * cos_theta;

        (const_x * xr * xr + const_y * yr * yr).exp() * (const_scale * xr + psi).cos()
    });

    Ok(kernel)
}
