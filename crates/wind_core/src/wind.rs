//! Core logic for the wind state.
//!
//! A wind state runs in cycles of `period + 1` ticks. The first tick of a
//! cycle picks a new randomized target; the remaining `period` ticks blend
//! from the vector the previous cycle ended on toward that target along a
//! smoothstep curve.

use crate::config::WindConfig;
use crate::source::WindSource;
use crate::vector::{WindVector, mix, saturate, smoothstep_between};

/// The global wind vector and the cycle that moves it.
pub struct WindState<S> {
    config: WindConfig,
    source: S,
    phase: u32,
    previous_target: WindVector,
    next_target: WindVector,
    current_vector: WindVector,
    current_strength: f32,
    current_direction: WindVector,
}

impl<S: WindSource> WindState<S> {
    /// Creates a calm wind state. The configuration is used as given.
    pub fn new(config: WindConfig, source: S) -> Self {
        let mut state = Self {
            config,
            source,
            phase: 0,
            previous_target: WindVector::ZERO,
            next_target: WindVector::ZERO,
            current_vector: WindVector::ZERO,
            current_strength: 0.0,
            current_direction: WindVector::RIGHT,
        };
        state.reset();
        state
    }

    /// Returns to the calm state: phase 0, zero vectors, zero strength and
    /// the direction along [`WindVector::RIGHT`].
    pub fn reset(&mut self) {
        self.phase = 0;
        self.current_strength = 0.0;
        self.current_direction = WindVector::RIGHT;
        self.current_vector = WindVector::ZERO;
        self.next_target = WindVector::ZERO;
        self.previous_target = WindVector::ZERO;
    }

    /// Runs one tick.
    ///
    /// On a retarget tick only the blend endpoints change; strength and
    /// direction keep their previous values until the next tick.
    pub fn advance(&mut self) {
        if self.phase == 0 {
            self.retarget();
        } else {
            self.blend();
        }
        self.phase = if self.phase >= self.config.period {
            0
        } else {
            self.phase + 1
        };
    }

    fn retarget(&mut self) {
        self.previous_target = self.current_vector;
        let candidate = self.sample_nonzero_perturbation(self.previous_target);
        let length = candidate.length();
        let strength = saturate(length, self.config.min_strength, self.config.max_strength);
        let mut target = candidate;
        target /= length;
        target *= strength;
        self.next_target = target;
    }

    /// Nudges the horizontal components of `origin` until the result has
    /// positive length.
    ///
    /// Offsets are scaled by the maximum strength, or by one when that is
    /// not positive, so a calm configuration still finds a non-zero
    /// candidate. Termination depends on the source ever producing a
    /// non-zero offset.
    fn sample_nonzero_perturbation(&mut self, origin: WindVector) -> WindVector {
        let scale = if self.config.max_strength > 0.0 {
            self.config.max_strength
        } else {
            1.0
        };
        let mut candidate = origin;
        loop {
            candidate.x -= self.source.perturbation() * scale;
            candidate.z -= self.source.perturbation() * scale;
            if candidate.length() > 0.0 {
                return candidate;
            }
            tracing::trace!("Rejected zero-length wind candidate");
        }
    }

    fn blend(&mut self) {
        let t = smoothstep_between(0.0, 1.0, self.phase as f32 / self.config.period as f32);
        let blended = mix(self.previous_target, self.next_target, t);

        // Strength comes from the blended vector, not from blending the
        // endpoint strengths.
        let length = blended.length();
        if length > 0.0 {
            self.current_direction = blended.normalize();
        }
        self.current_strength =
            saturate(length, self.config.min_strength, self.config.max_strength);
        self.current_vector = self.current_direction * self.current_strength;
    }

    // Getters
    pub fn config(&self) -> &WindConfig {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn phase(&self) -> u32 {
        self.phase
    }

    /// True when the next [`advance`](Self::advance) picks a new target.
    pub fn is_retarget_tick(&self) -> bool {
        self.phase == 0
    }

    pub fn previous_target(&self) -> WindVector {
        self.previous_target
    }

    pub fn next_target(&self) -> WindVector {
        self.next_target
    }

    pub fn current_vector(&self) -> WindVector {
        self.current_vector
    }

    pub fn current_strength(&self) -> f32 {
        self.current_strength
    }

    /// Unit direction of the wind. Meaningful once a blend tick has run.
    pub fn current_direction(&self) -> WindVector {
        self.current_direction
    }
}

/// Wind state to share outwardly at a point in time.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct WindSnapshot {
    tick: u64,
    phase: u32,
    strength: f32,
    direction: WindVector,
    vector: WindVector,
}

impl WindSnapshot {
    /// Captures the output of `state` after `tick` ticks.
    pub fn from_wind_state<S: WindSource>(tick: u64, state: &WindState<S>) -> Self {
        Self {
            tick,
            phase: state.phase(),
            strength: state.current_strength(),
            direction: state.current_direction(),
            vector: state.current_vector(),
        }
    }

    // Getters
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn phase(&self) -> u32 {
        self.phase
    }

    pub fn strength(&self) -> f32 {
        self.strength
    }

    pub fn direction(&self) -> WindVector {
        self.direction
    }

    pub fn vector(&self) -> WindVector {
        self.vector
    }
}
