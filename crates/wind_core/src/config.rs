//! Simulation configuration and its validation.

/// Number of blend ticks per transition.
pub const DEFAULT_PERIOD: u32 = 15;
pub const DEFAULT_MIN_STRENGTH: f32 = 0.0;
pub const DEFAULT_MAX_STRENGTH: f32 = 20.0;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("strength bounds must be finite (min {min}, max {max})")]
    NonFinite { min: f32, max: f32 },
    #[error("minimum strength must not be negative, got {0}")]
    NegativeMin(f32),
    #[error("minimum strength {min} exceeds maximum strength {max}")]
    InvertedBounds { min: f32, max: f32 },
    #[error("period must be at least one tick")]
    ZeroPeriod,
}

/// Strength bounds and transition length read by the wind state.
///
/// The wind state itself never checks these values. Callers that accept
/// user input should run [`WindConfig::validate`] first.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct WindConfig {
    pub min_strength: f32,
    pub max_strength: f32,
    pub period: u32,
}

impl Default for WindConfig {
    fn default() -> Self {
        Self {
            min_strength: DEFAULT_MIN_STRENGTH,
            max_strength: DEFAULT_MAX_STRENGTH,
            period: DEFAULT_PERIOD,
        }
    }
}

impl WindConfig {
    pub fn new(min_strength: f32, max_strength: f32) -> Self {
        Self {
            min_strength,
            max_strength,
            ..Self::default()
        }
    }

    pub fn with_period(mut self, period: u32) -> Self {
        self.period = period;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let (min, max) = (self.min_strength, self.max_strength);
        if !min.is_finite() || !max.is_finite() {
            return Err(ConfigError::NonFinite { min, max });
        }
        if min < 0.0 {
            return Err(ConfigError::NegativeMin(min));
        }
        if min > max {
            return Err(ConfigError::InvertedBounds { min, max });
        }
        if self.period == 0 {
            return Err(ConfigError::ZeroPeriod);
        }
        Ok(())
    }
}
