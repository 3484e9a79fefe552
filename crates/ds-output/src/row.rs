//! Plain data row types written by output backends.

use ds_mobility::Agent;

/// One agent's kinematic state in one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentFrameRow {
    pub frame:    u64,
    pub agent_id: u64,
    pub lat:      f64,
    pub lon:      f64,
    pub bearing:  f64,
    /// Coordinate units per second.
    pub speed:    f64,
}

impl AgentFrameRow {
    pub fn new(frame: u64, agent: &Agent) -> Self {
        Self {
            frame,
            agent_id: agent.id.0,
            lat:      agent.pos.lat,
            lon:      agent.pos.lon,
            bearing:  agent.bearing,
            speed:    agent.speed,
        }
    }
}

/// Per-frame totals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSummaryRow {
    pub frame:       u64,
    pub time_ms:     f64,
    pub agent_count: u64,
    /// Trail progress at this frame.
    pub progress:    f64,
}
