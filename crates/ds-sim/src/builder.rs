//! Fluent builder for constructing a [`Sim`].

use ds_core::SimRng;

use crate::{EngineConfig, Sim, SimResult};

/// Stream offsets for the two RNGs derived from the config seed.
const SPAWN_STREAM: u64 = 1;
const MOTION_STREAM: u64 = 2;

/// Fluent builder for [`Sim`].
///
/// # Optional inputs (have defaults)
///
/// | Method            | Default                                  |
/// |-------------------|------------------------------------------|
/// | `.spawn_rng(r)`   | Child stream of `SimRng::new(seed)`      |
/// | `.motion_rng(r)`  | Another child stream of the same root    |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(EngineConfig { seed: 7, ..Default::default() })
///     .build()?;
/// ```
pub struct SimBuilder {
    config:     EngineConfig,
    spawn_rng:  Option<SimRng>,
    motion_rng: Option<SimRng>,
}

impl SimBuilder {
    pub fn new(config: EngineConfig) -> Self {
        Self { config, spawn_rng: None, motion_rng: None }
    }

    /// Replace the generator used for candidate sampling and spawn headings.
    pub fn spawn_rng(mut self, rng: SimRng) -> Self {
        self.spawn_rng = Some(rng);
        self
    }

    /// Replace the generator used for per-frame kinematics.
    pub fn motion_rng(mut self, rng: SimRng) -> Self {
        self.motion_rng = Some(rng);
        self
    }

    /// Validate the configuration and return a ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim> {
        self.config.validate()?;

        let mut root = SimRng::new(self.config.seed);
        let spawn_rng = self.spawn_rng.unwrap_or_else(|| root.child(SPAWN_STREAM));
        let motion_rng = self.motion_rng.unwrap_or_else(|| root.child(MOTION_STREAM));

        Ok(Sim::new(self.config, spawn_rng, motion_rng))
    }
}
