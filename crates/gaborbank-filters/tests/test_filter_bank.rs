use std::f64::consts::PI;

use approx::assert_relative_eq;
use gaborbank_filters::{
    gabor_filter_bank, gabor_filter_bank_with_strategy, gabor_kernel, log_gabor_filter_bank,
    log_gabor_filter_bank_with_strategy, log_gabor_kernel, ExecutionStrategy, FilterError,
    GaborBankParams, LogGaborBankParams,
};
use gaborbank_grid::KernelSize;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn test_gabor_bank_layout() -> Result<(), FilterError> {
    init_logger();

    let size = KernelSize::from([15, 13]);
    let params = GaborBankParams {
        n_scales: 3,
        n_orientations: 4,
        min_sigma: 1.0,
        scale_factor: 3.0,
        gamma: 1.0,
        psi: PI / 2.0,
    };
    let bank = gabor_filter_bank::<f64>(size, &params)?;

    assert_eq!(bank.len(), 12);
    assert_eq!(bank.kernels().len(), 12);

    for scale in 0..3 {
        for orientation in 0..4 {
            let index = scale * 4 + orientation;
            assert_eq!(bank.index_of(scale, orientation), Some(index));

            let p = bank.params(scale, orientation).unwrap();
            assert_eq!(p.sigma, 1.0 + scale as f64);
            assert_eq!(p.lambda, p.sigma * 3.0);
            assert_relative_eq!(p.theta, 2.0 * PI * orientation as f64 / 4.0, epsilon = 1e-12);

            // each entry equals the kernel generated on its own
            let expected = gabor_kernel::<f64>(size, p)?;
            assert_eq!(bank[index], expected);
            assert_eq!(bank[index].shape(), [13, 15]);
        }
    }
    Ok(())
}

#[test]
fn test_log_gabor_bank_layout() -> Result<(), FilterError> {
    init_logger();

    let size = KernelSize::from([24, 24]);
    let params = LogGaborBankParams {
        n_scales: 4,
        n_orientations: 3,
        ..Default::default()
    };
    let bank = log_gabor_filter_bank::<f32>(size, &params)?;

    assert_eq!(bank.len(), 12);
    for (i, (p, kernel)) in bank.iter().enumerate() {
        let (scale, orientation) = (i / 3, i % 3);
        let wavelength = 3.0 * 1.6f64.powi(scale as i32);
        assert_relative_eq!(p.f0, 1.0 / wavelength, epsilon = 1e-12);
        assert_relative_eq!(p.theta0, 2.0 * PI * orientation as f64 / 3.0, epsilon = 1e-12);
        assert_eq!(*kernel, log_gabor_kernel::<f32>(size, p)?);
        assert_eq!(kernel[[12, 12]], 0.0);
    }
    Ok(())
}

#[test]
fn test_bank_strategies_agree() -> Result<(), FilterError> {
    init_logger();

    let size = KernelSize::from([16, 12]);
    let gabor = GaborBankParams {
        n_scales: 3,
        n_orientations: 5,
        ..Default::default()
    };
    let log_gabor = LogGaborBankParams {
        n_scales: 3,
        n_orientations: 5,
        ..Default::default()
    };

    let serial = gabor_filter_bank_with_strategy::<f64>(size, &gabor, ExecutionStrategy::Serial)?;
    let serial_lg =
        log_gabor_filter_bank_with_strategy::<f64>(size, &log_gabor, ExecutionStrategy::Serial)?;

    for strategy in [
        ExecutionStrategy::ParallelElements,
        ExecutionStrategy::Chunked(4),
        ExecutionStrategy::Fixed(3),
    ] {
        assert_eq!(
            gabor_filter_bank_with_strategy::<f64>(size, &gabor, strategy)?,
            serial
        );
        assert_eq!(
            log_gabor_filter_bank_with_strategy::<f64>(size, &log_gabor, strategy)?,
            serial_lg
        );
    }
    Ok(())
}

#[test]
fn test_bank_fails_without_partial_result() {
    init_logger();

    // a zero wavelength would give an infinite center frequency
    let params = LogGaborBankParams {
        min_wavelength: 0.0,
        ..Default::default()
    };
    let res = log_gabor_filter_bank::<f64>([8, 8].into(), &params);
    assert!(res.as_ref().is_err_and(FilterError::is_invalid_parameter));

    let params = GaborBankParams {
        min_sigma: -1.0,
        ..Default::default()
    };
    let res = gabor_filter_bank::<f64>([8, 8].into(), &params);
    assert!(res.as_ref().is_err_and(FilterError::is_invalid_parameter));

    let res = gabor_filter_bank::<f64>([0, 8].into(), &GaborBankParams::default());
    assert!(res.as_ref().is_err_and(FilterError::is_invalid_parameter));
}

#[test]
fn test_bank_invalid_strategy() {
    let res = gabor_filter_bank_with_strategy::<f64>(
        [8, 8].into(),
        &GaborBankParams::default(),
        ExecutionStrategy::Fixed(0),
    );
    assert!(matches!(res, Err(FilterError::ParallelError(_))));
}
