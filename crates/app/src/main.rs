mod runtime;

use std::io::{self, BufWriter};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use wind_core::config::{DEFAULT_MAX_STRENGTH, DEFAULT_MIN_STRENGTH, DEFAULT_PERIOD, WindConfig};
use wind_core::engine::WindEngine;
use wind_core::events::Event;
use wind_core::source::SourceKind;

use crate::runtime::{OutputFormat, RunSettings};

/// Ticks run before recording starts so the first cycle can settle.
const DEFAULT_WARMUP: usize = 100;
const DEFAULT_ITERATIONS: usize = 5000;

#[derive(Parser, Debug)]
#[command(
    name = "windsim",
    version,
    about = "Generate a procedural wind strength series, one tick per line"
)]
struct Args {
    /// Lower bound on wind strength
    #[arg(
        short = 'm',
        long,
        alias = "minWindStrength",
        env = "WIND_MIN_STRENGTH",
        default_value_t = DEFAULT_MIN_STRENGTH
    )]
    min_strength: f32,

    /// Upper bound on wind strength, also the size of each random nudge
    #[arg(
        short = 'M',
        long,
        alias = "maxWindStrength",
        env = "WIND_MAX_STRENGTH",
        default_value_t = DEFAULT_MAX_STRENGTH
    )]
    max_strength: f32,

    /// Seed for the random source (random when omitted)
    #[arg(short, long, env = "WIND_SEED")]
    seed: Option<u64>,

    /// Number of recorded ticks
    #[arg(short, long, env = "WIND_ITERATIONS", default_value_t = DEFAULT_ITERATIONS)]
    iterations: usize,

    /// Unrecorded ticks run before recording
    #[arg(short, long, env = "WIND_WARMUP", default_value_t = DEFAULT_WARMUP)]
    warmup: usize,

    /// Blend ticks per wind transition
    #[arg(short, long, env = "WIND_PERIOD", default_value_t = DEFAULT_PERIOD)]
    period: u32,

    /// Random source: coin-flip or uniform
    #[arg(long, env = "WIND_SOURCE", default_value_t = SourceKind::CoinFlip)]
    source: SourceKind,

    /// Output format
    #[arg(short, long, env = "WIND_FORMAT", value_enum, default_value_t = OutputFormat::Plain)]
    format: OutputFormat,

    /// Log the resolved options to stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn wind_config(&self) -> WindConfig {
        WindConfig::new(self.min_strength, self.max_strength).with_period(self.period)
    }

    fn run_settings(&self) -> RunSettings {
        RunSettings {
            warmup: self.warmup,
            iterations: self.iterations,
            format: self.format,
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = args.wind_config();
    config.validate().context("invalid wind configuration")?;
    let seed = args.seed.unwrap_or_else(rand::random);

    info!("minWindStrength: {}", config.min_strength);
    info!("maxWindStrength: {}", config.max_strength);
    info!("period: {}", config.period);
    info!("source: {} (seed {})", args.source, seed);
    info!("warmup: {}", args.warmup);
    info!("iterations: {}", args.iterations);

    let mut engine = WindEngine::new(config, args.source.build(seed));
    engine.apply(Event::Reset);

    let stdout = io::stdout();
    let out = BufWriter::new(stdout.lock());
    runtime::run(&mut engine, &args.run_settings(), out)?;

    info!("Done after {} ticks", engine.ticks());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["windsim"]).unwrap();
        assert_eq!(args.wind_config(), WindConfig::default());
        assert_eq!(args.iterations, 5000);
        assert_eq!(args.warmup, 100);
        assert_eq!(args.source, SourceKind::CoinFlip);
        assert_eq!(args.format, OutputFormat::Plain);
        assert!(args.seed.is_none());
        assert!(!args.verbose);
    }

    #[test]
    fn test_short_flags() {
        let args = Args::try_parse_from([
            "windsim", "-m", "2.5", "-M", "8", "-s", "42", "-i", "10", "-v",
        ])
        .unwrap();
        let config = args.wind_config();
        assert_eq!(config.min_strength, 2.5);
        assert_eq!(config.max_strength, 8.0);
        assert_eq!(args.seed, Some(42));
        assert_eq!(args.iterations, 10);
        assert!(args.verbose);
    }

    #[test]
    fn test_long_flags() {
        let args = Args::try_parse_from([
            "windsim",
            "--period",
            "30",
            "--warmup",
            "0",
            "--source",
            "uniform",
            "--format",
            "json",
        ])
        .unwrap();
        assert_eq!(args.wind_config().period, 30);
        assert_eq!(args.run_settings().warmup, 0);
        assert_eq!(args.source, SourceKind::Uniform);
        assert_eq!(args.format, OutputFormat::Json);
    }

    #[test]
    fn test_reference_long_flags() {
        let args = Args::try_parse_from([
            "windsim",
            "--minWindStrength",
            "1.5",
            "--maxWindStrength",
            "12",
        ])
        .unwrap();
        let config = args.wind_config();
        assert_eq!(config.min_strength, 1.5);
        assert_eq!(config.max_strength, 12.0);
    }

    #[test]
    fn test_rejects_unknown_source() {
        assert!(Args::try_parse_from(["windsim", "--source", "gaussian"]).is_err());
    }

    #[test]
    fn test_inverted_bounds_fail_validation() {
        let args = Args::try_parse_from(["windsim", "-m", "9", "-M", "3"]).unwrap();
        assert!(args.wind_config().validate().is_err());
    }
}
