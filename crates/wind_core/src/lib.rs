//! Procedural wind: a single global wind vector that periodically picks a
//! random target and eases toward it.

pub mod config;
pub mod engine;
pub mod events;
pub mod source;
pub mod vector;
pub mod wind;

pub use config::{ConfigError, WindConfig};
pub use engine::WindEngine;
pub use events::Event;
pub use source::{SourceKind, WindSource};
pub use vector::WindVector;
pub use wind::{WindSnapshot, WindState};
