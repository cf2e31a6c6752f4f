use crate::config::WindConfig;
use crate::events::Event;
use crate::source::WindSource;
use crate::wind::{WindSnapshot, WindState};

/// The engine that updates the wind state over time.
pub struct WindEngine<S> {
    state: WindState<S>,
    ticks: u64,
}

impl<S: WindSource> WindEngine<S> {
    /// Initializes the wind engine with a calm state.
    pub fn new(config: WindConfig, source: S) -> Self {
        Self {
            state: WindState::new(config, source),
            ticks: 0,
        }
    }

    /// Apply event.
    pub fn apply(&mut self, event: Event) {
        match event {
            Event::Tick => self.tick(),
            Event::Reset => {
                self.state.reset();
                self.ticks = 0;
                tracing::info!("Wind reset to calm");
            }
        }
    }

    fn tick(&mut self) {
        let retarget = self.state.is_retarget_tick();
        self.state.advance();
        self.ticks += 1;
        if retarget {
            let target = self.state.next_target();
            tracing::debug!(
                "Tick {}: new wind target ({:.3}, {:.3}), strength {:.3}",
                self.ticks,
                target.x,
                target.z,
                target.length()
            );
        }
    }

    /// Runs `ticks` ticks to let the blend settle before output is observed.
    pub fn warm_up(&mut self, ticks: usize) {
        for _ in 0..ticks {
            self.apply(Event::Tick);
        }
        tracing::debug!("Warm-up finished after {} ticks", ticks);
    }

    /// Number of ticks applied since the last reset.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn state(&self) -> &WindState<S> {
        &self.state
    }

    /// Retrieves the current wind snapshot.
    pub fn get_snapshot(&self) -> WindSnapshot {
        WindSnapshot::from_wind_state(self.ticks, &self.state)
    }
}
