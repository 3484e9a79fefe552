//! Per-agent kinematic state.

use ds_core::{AgentId, GeoPoint, RandomSource, normalize_bearing};

/// One simulated driver.
///
/// `bearing` and `target_bearing` are degrees clockwise from north, always in
/// `[0, 360)`.  `speed` is in coordinate units (degrees) per second and is
/// never negative.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Agent {
    pub id:             AgentId,
    pub pos:            GeoPoint,
    pub bearing:        f64,
    pub target_bearing: f64,
    pub speed:          f64,
}

impl Agent {
    /// A stationary agent at `pos` facing a uniformly random direction, with
    /// its target bearing equal to its heading.
    pub fn spawn<R: RandomSource + ?Sized>(id: AgentId, pos: GeoPoint, rng: &mut R) -> Self {
        let bearing = normalize_bearing(rng.range(0.0, 360.0));
        Self { id, pos, bearing, target_bearing: bearing, speed: 0.0 }
    }

    #[inline]
    pub fn lat(&self) -> f64 {
        self.pos.lat
    }

    #[inline]
    pub fn lon(&self) -> f64 {
        self.pos.lon
    }
}

/// Seed one agent per position, numbering IDs upward from `first_id`.
///
/// Positions may repeat (sampling with duplicates); each copy still becomes a
/// distinct agent with its own heading.
pub fn spawn_agents<R: RandomSource + ?Sized>(
    positions: &[GeoPoint],
    first_id:  AgentId,
    rng:       &mut R,
) -> Vec<Agent> {
    let mut id = first_id;
    positions
        .iter()
        .map(|&pos| {
            let agent = Agent::spawn(id, pos, rng);
            id = id.next();
            agent
        })
        .collect()
}
