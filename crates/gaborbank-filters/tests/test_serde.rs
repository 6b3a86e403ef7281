use gaborbank_filters::{ExecutionStrategy, GaborBankParams, LogGaborBankParams};

#[test]
fn test_bank_params_missing_fields_use_defaults() -> Result<(), serde_json::Error> {
    let params: GaborBankParams = serde_json::from_str(r#"{ "n_scales": 2, "psi": 0.0 }"#)?;
    assert_eq!(
        params,
        GaborBankParams {
            n_scales: 2,
            psi: 0.0,
            ..Default::default()
        }
    );

    let params: LogGaborBankParams = serde_json::from_str(r#"{ "sigma_theta": 0.5 }"#)?;
    assert_eq!(params.sigma_theta, 0.5);
    assert_eq!(params.min_wavelength, 3.0);
    assert_eq!(params.scale_factor, 1.6);
    Ok(())
}

#[test]
fn test_execution_strategy_from_json() -> Result<(), serde_json::Error> {
    let strategy: ExecutionStrategy = serde_json::from_str(r#"{ "Fixed": 4 }"#)?;
    assert_eq!(strategy, ExecutionStrategy::Fixed(4));

    let strategy: ExecutionStrategy = serde_json::from_str(r#""Serial""#)?;
    assert_eq!(strategy, ExecutionStrategy::Serial);
    Ok(())
}
