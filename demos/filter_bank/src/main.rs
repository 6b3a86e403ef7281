use argh::FromArgs;
use serde::Deserialize;
use std::{path::PathBuf, str::FromStr};

use gaborbank::filters::{
    gabor_filter_bank_with_strategy, log_gabor_filter_bank_with_strategy, ExecutionStrategy,
    FilterBank, GaborBankParams, LogGaborBankParams,
};
use gaborbank::grid::{KernelDtype, KernelSize};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Kind {
    Gabor,
    LogGabor,
}

impl FromStr for Kind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gabor" => Ok(Kind::Gabor),
            "log-gabor" => Ok(Kind::LogGabor),
            _ => Err(format!("unknown filter kind `{s}`, expected gabor or log-gabor")),
        }
    }
}

#[derive(FromArgs)]
/// Build a Gabor or Log-Gabor filter bank and log a summary of every kernel
struct Args {
    /// filter kind: gabor or log-gabor
    #[argh(option, short = 'k', default = "Kind::Gabor")]
    kind: Kind,

    /// path to a JSON file with the bank parameters
    #[argh(option, short = 'c')]
    config: Option<PathBuf>,

    /// kernel width, overrides the config
    #[argh(option)]
    width: Option<usize>,

    /// kernel height, overrides the config
    #[argh(option)]
    height: Option<usize>,

    /// number of scales, overrides the config
    #[argh(option, short = 's')]
    scales: Option<usize>,

    /// number of orientations, overrides the config
    #[argh(option, short = 'o')]
    orientations: Option<usize>,

    /// number of worker threads; uses the global pool when omitted
    #[argh(option, short = 't')]
    threads: Option<usize>,

    /// generate single precision kernels
    #[argh(switch)]
    f32: bool,
}

/// Parameters read from the optional JSON config.
#[derive(Debug, Deserialize)]
#[serde(default)]
struct Config {
    size: KernelSize,
    strategy: ExecutionStrategy,
    gabor: GaborBankParams,
    log_gabor: LogGaborBankParams,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            size: KernelSize {
                width: 31,
                height: 31,
            },
            strategy: ExecutionStrategy::default(),
            gabor: GaborBankParams::default(),
            log_gabor: LogGaborBankParams::default(),
        }
    }
}

fn log_summary<T: KernelDtype, P: std::fmt::Debug>(
    bank: &FilterBank<T, P>,
) -> Result<(), Box<dyn std::error::Error>> {
    for (i, (params, kernel)) in bank.iter().enumerate() {
        let values = kernel.cast::<f64>()?.into_vec();
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let sum: f64 = values.iter().sum();

        log::info!(
            "#{i:<3} scale {} orientation {}: min {min:+.6} max {max:+.6} sum {sum:+.6} {params:?}",
            i / bank.n_orientations(),
            i % bank.n_orientations(),
        );
    }
    Ok(())
}

fn run<T: KernelDtype>(kind: Kind, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    match kind {
        Kind::Gabor => {
            let bank =
                gabor_filter_bank_with_strategy::<T>(config.size, &config.gabor, config.strategy)?;
            log_summary(&bank)
        }
        Kind::LogGabor => {
            let bank = log_gabor_filter_bank_with_strategy::<T>(
                config.size,
                &config.log_gabor,
                config.strategy,
            )?;
            log_summary(&bank)
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Args = argh::from_env();

    let mut config = match &args.config {
        Some(path) => {
            log::debug!("reading config from {}", path.display());
            serde_json::from_str::<Config>(&std::fs::read_to_string(path)?)?
        }
        None => Config::default(),
    };

    if let Some(width) = args.width {
        config.size.width = width;
    }
    if let Some(height) = args.height {
        config.size.height = height;
    }
    if let Some(scales) = args.scales {
        config.gabor.n_scales = scales;
        config.log_gabor.n_scales = scales;
    }
    if let Some(orientations) = args.orientations {
        config.gabor.n_orientations = orientations;
        config.log_gabor.n_orientations = orientations;
    }
    if let Some(threads) = args.threads {
        config.strategy = ExecutionStrategy::Fixed(threads);
    }

    log::info!(
        "{:?} bank of size {} ({})",
        args.kind,
        config.size,
        if args.f32 { "f32" } else { "f64" }
    );

    if args.f32 {
        run::<f32>(args.kind, &config)
    } else {
        run::<f64>(args.kind, &config)
    }
}
