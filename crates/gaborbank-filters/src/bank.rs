use std::ops;

use gaborbank_grid::{Kernel, KernelDtype, KernelSize};

use crate::{
    error::{ensure_count, ensure_finite, ensure_positive, ensure_size, FilterError},
    gabor::{gabor_kernel, GaborParams},
    log_gabor::{log_gabor_kernel, LogGaborParams},
    parallel::{ExecuteExt, ExecutionStrategy},
};

/// An ordered collection of kernels spanning several scales and orientations.
///
/// Kernels are stored scale-major, orientation-minor: the kernel for
/// `(scale, orientation)` lives at `scale * n_orientations + orientation`.
/// Every kernel is stored with the parameters `P` it was generated from.
#[derive(Clone, Debug, PartialEq)]
pub struct FilterBank<T, P> {
    n_scales: usize,
    n_orientations: usize,
    params: Vec<P>,
    kernels: Vec<Kernel<T>>,
}

impl<T, P> FilterBank<T, P> {
    /// Number of scales in the bank.
    pub fn n_scales(&self) -> usize {
        self.n_scales
    }

    /// Number of orientations per scale.
    pub fn n_orientations(&self) -> usize {
        self.n_orientations
    }

    /// Number of kernels in the bank, `n_scales * n_orientations`.
    pub fn len(&self) -> usize {
        self.kernels.len()
    }

    /// Returns true if the bank holds no kernels.
    pub fn is_empty(&self) -> bool {
        self.kernels.is_empty()
    }

    /// The flat index of `(scale, orientation)`, or `None` if out of range.
    pub fn index_of(&self, scale: usize, orientation: usize) -> Option<usize> {
        (scale < self.n_scales && orientation < self.n_orientations)
            .then_some(scale * self.n_orientations + orientation)
    }

    /// The kernel for `(scale, orientation)`.
    pub fn get(&self, scale: usize, orientation: usize) -> Option<&Kernel<T>> {
        self.index_of(scale, orientation)
            .and_then(|i| self.kernels.get(i))
    }

    /// The parameters the kernel for `(scale, orientation)` was generated from.
    pub fn params(&self, scale: usize, orientation: usize) -> Option<&P> {
        self.index_of(scale, orientation)
            .and_then(|i| self.params.get(i))
    }

    /// All kernels in scale-major order.
    pub fn kernels(&self) -> &[Kernel<T>] {
        &self.kernels
    }

    /// Iterate over `(params, kernel)` pairs in scale-major order.
    pub fn iter(&self) -> impl Iterator<Item = (&P, &Kernel<T>)> {
        self.params.iter().zip(self.kernels.iter())
    }

    /// Consume the bank and return its kernels in scale-major order.
    pub fn into_kernels(self) -> Vec<Kernel<T>> {
        self.kernels
    }
}

impl<T, P> ops::Index<usize> for FilterBank<T, P> {
    type Output = Kernel<T>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.kernels[index]
    }
}

/// All `(scale, orientation)` pairs, scale-major.
fn bank_indices(n_scales: usize, n_orientations: usize) -> Vec<(usize, usize)> {
    (0..n_scales)
        .flat_map(|s| (0..n_orientations).map(move |o| (s, o)))
        .collect()
}

/// `2 * pi * orientation / n_orientations`
fn orientation_angle(orientation: usize, n_orientations: usize) -> f64 {
    2.0 * std::f64::consts::PI * (orientation as f64 / n_orientations as f64)
}

/// Generate every entry of a bank with the given strategy, failing on the first error.
fn build_bank<T, P, F>(
    size: KernelSize,
    n_scales: usize,
    n_orientations: usize,
    strategy: ExecutionStrategy,
    entry_params: impl Fn(usize, usize) -> P,
    generate: F,
) -> Result<FilterBank<T, P>, FilterError>
where
    T: KernelDtype,
    P: Copy + Send + Sync + std::fmt::Debug,
    F: Fn(KernelSize, &P) -> Result<Kernel<T>, FilterError> + Sync + Send,
{
    let params = bank_indices(n_scales, n_orientations)
        .into_iter()
        .map(|(s, o)| entry_params(s, o))
        .collect::<Vec<_>>();

    if log::log_enabled!(log::Level::Trace) {
        for (i, p) in params.iter().enumerate() {
            log::trace!(
                "entry {i} (scale {}, orientation {}): {p:?}",
                i / n_orientations,
                i % n_orientations
            );
        }
    }

    let kernels = params
        .clone()
        .try_map_with(strategy, |p| generate(size, &p))?;

    Ok(FilterBank {
        n_scales,
        n_orientations,
        params,
        kernels,
    })
}

/// Parameters of a Gabor filter bank.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GaborBankParams {
    /// Number of scales, `>= 1`.
    pub n_scales: usize,
    /// Number of orientations per scale, `>= 1`.
    pub n_orientations: usize,
    /// Sigma of the smallest scale filter. Scale `s` uses `min_sigma + s`.
    pub min_sigma: f64,
    /// Ratio between the carrier wavelength and sigma.
    pub scale_factor: f64,
    /// Spatial aspect ratio shared by all filters.
    pub gamma: f64,
    /// Phase offset shared by all filters.
    pub psi: f64,
}

impl Default for GaborBankParams {
    fn default() -> Self {
        Self {
            n_scales: 4,
            n_orientations: 6,
            min_sigma: 1.0,
            scale_factor: 3.0,
            gamma: 1.0,
            psi: std::f64::consts::FRAC_PI_2,
        }
    }
}

impl GaborBankParams {
    /// Check the bank-level parameters against their domain.
    ///
    /// Per-kernel parameters are checked again when each kernel is generated.
    pub fn validate(&self) -> Result<(), FilterError> {
        ensure_count("n_scales", self.n_scales)?;
        ensure_count("n_orientations", self.n_orientations)?;
        ensure_positive("min_sigma", self.min_sigma)?;
        ensure_finite("scale_factor", self.scale_factor)?;
        Ok(())
    }

    /// The kernel parameters for `(scale, orientation)`.
    pub fn kernel_params(&self, scale: usize, orientation: usize) -> GaborParams {
        let sigma = self.min_sigma + scale as f64;
        GaborParams {
            sigma,
            theta: orientation_angle(orientation, self.n_orientations),
            lambda: sigma * self.scale_factor,
            gamma: self.gamma,
            psi: self.psi,
        }
    }
}

/// Parameters of a Log-Gabor filter bank.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LogGaborBankParams {
    /// Number of scales, `>= 1`.
    pub n_scales: usize,
    /// Number of orientations per scale, `>= 1`.
    pub n_orientations: usize,
    /// Wavelength of the smallest scale filter.
    pub min_wavelength: f64,
    /// Ratio between the wavelengths of successive scales.
    pub scale_factor: f64,
    /// Radial bandwidth shared by all filters (`sigma_f / f0`).
    pub sigma_over_f: f64,
    /// Angular bandwidth shared by all filters.
    pub sigma_theta: f64,
}

impl Default for LogGaborBankParams {
    fn default() -> Self {
        Self {
            n_scales: 4,
            n_orientations: 6,
            min_wavelength: 3.0,
            scale_factor: 1.6,
            sigma_over_f: 0.75,
            sigma_theta: 1.0,
        }
    }
}

impl LogGaborBankParams {
    /// Check the bank-level parameters against their domain.
    ///
    /// Per-kernel parameters are checked again when each kernel is generated.
    pub fn validate(&self) -> Result<(), FilterError> {
        ensure_count("n_scales", self.n_scales)?;
        ensure_count("n_orientations", self.n_orientations)?;
        ensure_positive("min_wavelength", self.min_wavelength)?;
        Ok(())
    }

    /// The kernel parameters for `(scale, orientation)`.
    pub fn kernel_params(&self, scale: usize, orientation: usize) -> LogGaborParams {
        let wavelength = self.min_wavelength * self.scale_factor.powi(scale as i32);
        LogGaborParams {
            f0: 1.0 / wavelength,
            theta0: orientation_angle(orientation, self.n_orientations),
            sigma_over_f: self.sigma_over_f,
            sigma_theta: self.sigma_theta,
        }
    }
}

/// Create a Gabor filter bank using the default execution strategy.
///
/// See [`gabor_filter_bank_with_strategy`].
pub fn gabor_filter_bank<T: KernelDtype>(
    size: KernelSize,
    params: &GaborBankParams,
) -> Result<FilterBank<T, GaborParams>, FilterError> {
    gabor_filter_bank_with_strategy(size, params, ExecutionStrategy::default())
}

/// Create a Gabor filter bank.
///
/// For scale `s` and orientation `o` the kernel uses `sigma = min_sigma + s`,
/// `lambda = sigma * scale_factor` and `theta = 2 * pi * o / n_orientations`,
/// with `gamma` and `psi` shared. Kernels are ordered scale-major.
///
/// # Arguments
///
/// * `size` - The size of every kernel.
/// * `params` - The bank parameters.
/// * `strategy` - How the kernels are scheduled. The result does not depend on it.
///
/// # Errors
///
/// Returns [`FilterError::InvalidParameter`] if a bank parameter or the
/// parameters of any kernel are invalid. No partial bank is returned.
///
/// # Example
///
/// ```
/// use gaborbank_filters::{gabor_filter_bank, GaborBankParams};
///
/// let params = GaborBankParams { n_scales: 2, n_orientations: 4, ..Default::default() };
/// let bank = gabor_filter_bank::<f32>([11, 11].into(), &params).unwrap();
///
/// assert_eq!(bank.len(), 8);
/// assert_eq!(bank.params(1, 0).unwrap().sigma, 2.0);
/// ```
pub fn gabor_filter_bank_with_strategy<T: KernelDtype>(
    size: KernelSize,
    params: &GaborBankParams,
    strategy: ExecutionStrategy,
) -> Result<FilterBank<T, GaborParams>, FilterError> {
    ensure_size(size)?;
    params.validate()?;

    log::debug!(
        "building gabor bank {size}: {} scales x {} orientations ({strategy:?})",
        params.n_scales,
        params.n_orientations
    );

    build_bank(
        size,
        params.n_scales,
        params.n_orientations,
        strategy,
        |s, o| params.kernel_params(s, o),
        gabor_kernel::<T>,
    )
}

/// Create a Log-Gabor filter bank using the default execution strategy.
///
/// See [`log_gabor_filter_bank_with_strategy`].
pub fn log_gabor_filter_bank<T: KernelDtype>(
    size: KernelSize,
    params: &LogGaborBankParams,
) -> Result<FilterBank<T, LogGaborParams>, FilterError> {
    log_gabor_filter_bank_with_strategy(size, params, ExecutionStrategy::default())
}

/// Create a Log-Gabor filter bank.
///
/// For scale `s` and orientation `o` the kernel uses
/// `f0 = 1 / (min_wavelength * scale_factor^s)` and
/// `theta0 = 2 * pi * o / n_orientations`, with both bandwidths shared.
/// Kernels are ordered scale-major.
///
/// # Arguments
///
/// * `size` - The size of every kernel.
/// * `params` - The bank parameters.
/// * `strategy` - How the kernels are scheduled. The result does not depend on it.
///
/// # Errors
///
/// Returns [`FilterError::InvalidParameter`] if a bank parameter or the
/// parameters of any kernel are invalid. No partial bank is returned.
///
/// # Example
///
/// ```
/// use gaborbank_filters::{log_gabor_filter_bank, ExecutionStrategy, LogGaborBankParams};
/// use gaborbank_filters::log_gabor_filter_bank_with_strategy;
///
/// let params = LogGaborBankParams { n_scales: 3, n_orientations: 2, ..Default::default() };
/// let bank = log_gabor_filter_bank_with_strategy::<f64>(
///     [32, 32].into(),
///     &params,
///     ExecutionStrategy::Serial,
/// ).unwrap();
///
/// assert_eq!(bank.len(), 6);
/// assert_eq!(bank.get(0, 0).unwrap()[[16, 16]], 0.0);
/// ```
pub fn log_gabor_filter_bank_with_strategy<T: KernelDtype>(
    size: KernelSize,
    params: &LogGaborBankParams,
    strategy: ExecutionStrategy,
) -> Result<FilterBank<T, LogGaborParams>, FilterError> {
    ensure_size(size)?;
    params.validate()?;

    log::debug!(
        "building log-gabor bank {size}: {} scales x {} orientations ({strategy:?})",
        params.n_scales,
        params.n_orientations
    );

    build_bank(
        size,
        params.n_scales,
        params.n_orientations,
        strategy,
        |s, o| params.kernel_params(s, o),
        log_gabor_kernel::<T>,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_bank_indices_order() {
        assert_eq!(
            bank_indices(2, 3),
            vec![(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2)]
        );
    }

    #[test]
    fn test_orientation_angle() {
        assert_eq!(orientation_angle(0, 4), 0.0);
        assert_relative_eq!(orientation_angle(1, 4), PI / 2.0);
        assert_relative_eq!(orientation_angle(3, 4), 3.0 * PI / 2.0);
    }

    #[test]
    fn test_gabor_bank_params_mapping() {
        let params = GaborBankParams {
            n_scales: 3,
            n_orientations: 4,
            min_sigma: 1.5,
            scale_factor: 2.0,
            gamma: 0.5,
            psi: 0.0,
        };
        let p = params.kernel_params(2, 1);
        assert_eq!(p.sigma, 3.5);
        assert_eq!(p.lambda, 7.0);
        assert_relative_eq!(p.theta, PI / 2.0);
        assert_eq!(p.gamma, 0.5);
        assert_eq!(p.psi, 0.0);
    }

    #[test]
    fn test_log_gabor_bank_params_mapping() {
        let params = LogGaborBankParams::default();
        let p = params.kernel_params(2, 3);
        assert_relative_eq!(p.f0, 1.0 / (3.0 * 1.6 * 1.6), epsilon = 1e-12);
        assert_relative_eq!(p.theta0, PI);
        assert_eq!(p.sigma_over_f, 0.75);
        assert_eq!(p.sigma_theta, 1.0);
    }

    #[test]
    fn test_bank_accessors() -> Result<(), FilterError> {
        let params = GaborBankParams {
            n_scales: 2,
            n_orientations: 3,
            ..Default::default()
        };
        let bank = gabor_filter_bank::<f64>([5, 5].into(), &params)?;

        assert_eq!(bank.n_scales(), 2);
        assert_eq!(bank.n_orientations(), 3);
        assert_eq!(bank.len(), 6);
        assert!(!bank.is_empty());
        assert_eq!(bank.index_of(1, 2), Some(5));
        assert_eq!(bank.index_of(2, 0), None);
        assert_eq!(bank.index_of(0, 3), None);
        assert!(bank.get(2, 0).is_none());
        assert_eq!(bank.get(1, 1), Some(&bank[4]));
        assert_eq!(bank.iter().count(), 6);
        assert_eq!(bank.clone().into_kernels().len(), 6);
        Ok(())
    }

    #[test]
    fn test_bank_invalid_counts() {
        let params = GaborBankParams {
            n_scales: 0,
            ..Default::default()
        };
        let res = gabor_filter_bank::<f64>([5, 5].into(), &params);
        assert!(matches!(res, Err(FilterError::InvalidParameter { name: "n_scales", .. })));

        let params = LogGaborBankParams {
            n_orientations: 0,
            ..Default::default()
        };
        let res = log_gabor_filter_bank::<f64>([5, 5].into(), &params);
        assert!(matches!(
            res,
            Err(FilterError::InvalidParameter {
                name: "n_orientations",
                ..
            })
        ));
    }

    #[test]
    fn test_bank_inner_error_aborts() {
        // a zero scale factor gives every kernel a zero wavelength
        let params = GaborBankParams {
            scale_factor: 0.0,
            ..Default::default()
        };
        let res = gabor_filter_bank::<f64>([5, 5].into(), &params);
        assert!(matches!(res, Err(FilterError::InvalidParameter { name: "lambda", .. })));
    }

    #[test]
    fn test_log_gabor_bank_zero_scale_factor() -> Result<(), FilterError> {
        // the first scale only uses scale_factor^0 = 1
        let params = LogGaborBankParams {
            n_scales: 1,
            n_orientations: 2,
            scale_factor: 0.0,
            ..Default::default()
        };
        let bank = log_gabor_filter_bank::<f64>([8, 8].into(), &params)?;
        assert_eq!(bank.len(), 2);
        assert_relative_eq!(bank.params(0, 1).unwrap().f0, 1.0 / 3.0);

        // the second scale has an infinite center frequency
        let params = LogGaborBankParams {
            n_scales: 2,
            ..params
        };
        let res = log_gabor_filter_bank::<f64>([8, 8].into(), &params);
        assert!(matches!(res, Err(FilterError::InvalidParameter { name: "f0", .. })));
        Ok(())
    }
}
