//! Defines the events a wind engine reacts to.

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Event {
    /// Advance the simulation by one discrete tick.
    Tick,
    /// Return the wind to its calm starting state.
    Reset,
}
