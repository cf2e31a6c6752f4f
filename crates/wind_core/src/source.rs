//! Random sources that drive target selection.

use std::fmt;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Produces the perturbation offsets used when a new wind target is chosen.
///
/// Each call yields one offset in `[-0.5, 0.5]`, which the wind state scales
/// by its maximum strength. A source must have a non-zero probability of
/// producing a non-zero offset: the retarget step retries until the
/// perturbed vector has positive length and never gives up on its own.
pub trait WindSource {
    fn perturbation(&mut self) -> f32;
}

impl<S: WindSource + ?Sized> WindSource for &mut S {
    fn perturbation(&mut self) -> f32 {
        (**self).perturbation()
    }
}

impl<S: WindSource + ?Sized> WindSource for Box<S> {
    fn perturbation(&mut self) -> f32 {
        (**self).perturbation()
    }
}

/// Offsets of exactly `-0.5` or `+0.5`, picked with equal probability.
pub struct CoinFlipSource<R> {
    rng: R,
}

impl<R: Rng> CoinFlipSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> WindSource for CoinFlipSource<R> {
    fn perturbation(&mut self) -> f32 {
        if self.rng.random_bool(0.5) { 0.5 } else { -0.5 }
    }
}

/// Continuous uniform offsets in `[-0.5, 0.5)`.
pub struct UniformSource<R> {
    rng: R,
}

impl<R: Rng> UniformSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> WindSource for UniformSource<R> {
    fn perturbation(&mut self) -> f32 {
        self.rng.random_range(-0.5..0.5)
    }
}

/// Replays a fixed list of offsets, wrapping around at the end.
///
/// An empty list yields `0.0` forever, which never satisfies the retarget
/// step.
#[derive(Debug, Clone)]
pub struct SequenceSource {
    values: Vec<f32>,
    cursor: usize,
}

impl SequenceSource {
    pub fn new(values: Vec<f32>) -> Self {
        Self { values, cursor: 0 }
    }

    /// Number of offsets handed out so far.
    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

impl WindSource for SequenceSource {
    fn perturbation(&mut self) -> f32 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}

/// Selects which seeded source a simulation runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceKind {
    #[default]
    CoinFlip,
    Uniform,
}

impl SourceKind {
    /// Builds a source of this kind backed by a seeded [`StdRng`].
    pub fn build(self, seed: u64) -> Box<dyn WindSource> {
        let rng = StdRng::seed_from_u64(seed);
        match self {
            SourceKind::CoinFlip => Box::new(CoinFlipSource::new(rng)),
            SourceKind::Uniform => Box::new(UniformSource::new(rng)),
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::CoinFlip => f.write_str("coin-flip"),
            SourceKind::Uniform => f.write_str("uniform"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown source kind '{0}', expected 'coin-flip' or 'uniform'")]
pub struct ParseSourceKindError(String);

impl FromStr for SourceKind {
    type Err = ParseSourceKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "coin-flip" | "coin" => Ok(SourceKind::CoinFlip),
            "uniform" => Ok(SourceKind::Uniform),
            other => Err(ParseSourceKindError(other.to_string())),
        }
    }
}
