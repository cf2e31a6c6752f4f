use std::io::Write;

use anyhow::{Context, Result};
use clap::ValueEnum;
use tracing::info;
use wind_core::engine::WindEngine;
use wind_core::events::Event;
use wind_core::source::WindSource;
use wind_core::wind::WindSnapshot;

/// How recorded ticks are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Header line `x`, then one strength per line with six significant
    /// digits, byte-compatible with the reference `windSim` output.
    #[default]
    Plain,
    /// `tick,strength,dir_x,dir_y,dir_z` rows.
    Csv,
    /// One JSON snapshot per line.
    Json,
}

#[derive(Debug, Clone, Copy)]
pub struct RunSettings {
    pub warmup: usize,
    pub iterations: usize,
    pub format: OutputFormat,
}

/// Runs the sampling loop.
///
/// This:
/// - Warms the engine up without recording.
/// - Records `iterations` ticks to `out` in the chosen format.
/// - Flushes `out` before returning.
pub fn run<S: WindSource, W: Write>(
    engine: &mut WindEngine<S>,
    settings: &RunSettings,
    mut out: W,
) -> Result<()> {
    engine.warm_up(settings.warmup);
    info!(
        "Recording {} ticks after {} warm-up ticks",
        settings.iterations, settings.warmup
    );

    write_header(settings.format, &mut out)?;
    for _ in 0..settings.iterations {
        engine.apply(Event::Tick);
        write_sample(settings.format, &engine.get_snapshot(), &mut out)?;
    }

    out.flush().context("failed to flush wind samples")?;
    Ok(())
}

fn write_header<W: Write>(format: OutputFormat, out: &mut W) -> Result<()> {
    match format {
        OutputFormat::Plain => writeln!(out, "x"),
        OutputFormat::Csv => writeln!(out, "tick,strength,dir_x,dir_y,dir_z"),
        OutputFormat::Json => return Ok(()),
    }
    .context("failed to write output header")
}

fn write_sample<W: Write>(
    format: OutputFormat,
    snapshot: &WindSnapshot,
    out: &mut W,
) -> Result<()> {
    match format {
        OutputFormat::Plain => {
            writeln!(out, "{}", format_significant(snapshot.strength()))
                .context("failed to write wind sample")?;
        }
        OutputFormat::Csv => {
            let dir = snapshot.direction();
            writeln!(
                out,
                "{},{},{},{},{}",
                snapshot.tick(),
                snapshot.strength(),
                dir.x,
                dir.y,
                dir.z
            )
            .context("failed to write wind sample")?;
        }
        OutputFormat::Json => {
            serde_json::to_writer(&mut *out, snapshot).context("failed to encode wind sample")?;
            writeln!(out).context("failed to write wind sample")?;
        }
    }
    Ok(())
}

/// Formats `value` like C's `%g`: six significant digits, trailing zeros
/// dropped, scientific notation for exponents below -4 or above 5.
fn format_significant(value: f32) -> String {
    const PRECISION: i32 = 6;
    let value = f64::from(value);
    if value == 0.0 {
        return "0".to_string();
    }
    if !value.is_finite() {
        return value.to_string();
    }

    let scientific = format!("{:.*e}", (PRECISION - 1) as usize, value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((mantissa, exponent)) => (mantissa, exponent.parse::<i32>().unwrap_or(0)),
        None => (scientific.as_str(), 0),
    };

    if exponent < -4 || exponent >= PRECISION {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_fraction(mantissa), sign, exponent.abs())
    } else {
        let decimals = (PRECISION - 1 - exponent) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn trim_fraction(digits: &str) -> &str {
    if digits.contains('.') {
        digits.trim_end_matches('0').trim_end_matches('.')
    } else {
        digits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wind_core::config::WindConfig;
    use wind_core::source::SourceKind;

    fn render(config: WindConfig, seed: u64, settings: RunSettings) -> String {
        let mut engine = WindEngine::new(config, SourceKind::CoinFlip.build(seed));
        let mut out = Vec::new();
        run(&mut engine, &settings, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_plain_output() {
        let settings = RunSettings {
            warmup: 100,
            iterations: 250,
            format: OutputFormat::Plain,
        };
        let text = render(WindConfig::new(2.0, 9.0), 5, settings);
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("x"));
        let values: Vec<f32> = lines.map(|l| l.parse().unwrap()).collect();
        assert_eq!(values.len(), 250);
        assert!(values.iter().all(|v| (2.0..=9.0).contains(v)));
    }

    #[test]
    fn test_plain_precision_matches_reference() {
        assert_eq!(format_significant(200.0_f32.sqrt()), "14.1421");
        assert_eq!(format_significant(0.0), "0");
        assert_eq!(format_significant(20.0), "20");
        assert_eq!(format_significant(0.178), "0.178");
        assert_eq!(format_significant(9.9999996), "10");
        assert_eq!(format_significant(0.00012345), "0.00012345");
        assert_eq!(format_significant(0.000001234), "1.234e-06");
        assert_eq!(format_significant(1234567.0), "1.23457e+06");
        assert_eq!(format_significant(999999.6), "1e+06");
    }

    #[test]
    fn test_no_warmup_starts_calm() {
        let settings = RunSettings {
            warmup: 0,
            iterations: 2,
            format: OutputFormat::Plain,
        };
        let text = render(WindConfig::default(), 5, settings);
        let lines: Vec<&str> = text.lines().collect();
        // The first tick only picks a target
        assert_eq!(lines[1], "0");
        assert_ne!(lines[2], "0");
    }

    #[test]
    fn test_csv_output() {
        let settings = RunSettings {
            warmup: 10,
            iterations: 20,
            format: OutputFormat::Csv,
        };
        let text = render(WindConfig::default(), 6, settings);
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("tick,strength,dir_x,dir_y,dir_z"));
        for (i, line) in lines.enumerate() {
            let fields: Vec<&str> = line.split(',').collect();
            assert_eq!(fields.len(), 5);
            assert_eq!(fields[0].parse::<usize>().unwrap(), 10 + i + 1);
            let dir: Vec<f32> = fields[2..].iter().map(|f| f.parse().unwrap()).collect();
            let len = (dir[0] * dir[0] + dir[1] * dir[1] + dir[2] * dir[2]).sqrt();
            assert!((len - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_json_output() {
        let settings = RunSettings {
            warmup: 0,
            iterations: 5,
            format: OutputFormat::Json,
        };
        let text = render(WindConfig::default(), 7, settings);
        let rows: Vec<serde_json::Value> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(rows.len(), 5);
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(row["tick"], i as u64 + 1);
        }
    }

    #[test]
    fn test_same_seed_same_output() {
        let settings = RunSettings {
            warmup: 100,
            iterations: 1000,
            format: OutputFormat::Plain,
        };
        let a = render(WindConfig::default(), 31337, settings);
        let b = render(WindConfig::default(), 31337, settings);
        assert_eq!(a, b);
    }
}
