//! The `AgentSet`: the single published agent collection.

use std::sync::Arc;

use ds_core::{AgentId, GeoPoint, RandomSource};

use crate::{Agent, KinematicsParams, advance, spawn_agents};

/// Owns the active agents and publishes them as immutable snapshots.
///
/// Every mutation builds a complete new collection before swapping it in, so
/// a reader holding a snapshot never sees a half-updated frame.  Agent IDs
/// keep increasing across respawns.
#[derive(Clone, Debug)]
pub struct AgentSet {
    agents:  Arc<[Agent]>,
    next_id: AgentId,
}

impl Default for AgentSet {
    fn default() -> Self {
        Self::new()
    }
}

impl AgentSet {
    pub fn new() -> Self {
        Self { agents: Arc::from(Vec::new()), next_id: AgentId(0) }
    }

    /// The current collection.  Cheap to clone and safe to hold across frames.
    #[inline]
    pub fn snapshot(&self) -> Arc<[Agent]> {
        Arc::clone(&self.agents)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Replace every agent with fresh ones seeded at `positions`.
    pub fn respawn<R: RandomSource + ?Sized>(&mut self, positions: &[GeoPoint], rng: &mut R) {
        let agents = spawn_agents(positions, self.next_id, rng);
        self.next_id = AgentId(self.next_id.0.wrapping_add(agents.len() as u64));
        self.agents = Arc::from(agents);
    }

    /// Drop all agents.  IDs are not reused.
    pub fn clear(&mut self) {
        self.agents = Arc::from(Vec::new());
    }

    /// Advance every agent by one frame, in ID order, then publish.
    pub fn advance_all<R: RandomSource + ?Sized>(
        &mut self,
        delta_ms: f64,
        params:   &KinematicsParams,
        rng:      &mut R,
    ) {
        let next: Vec<Agent> = self
            .agents
            .iter()
            .map(|agent| advance(agent, delta_ms, params, rng))
            .collect();
        self.agents = Arc::from(next);
    }
}
