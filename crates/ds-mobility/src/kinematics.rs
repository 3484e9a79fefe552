//! Frame-over-frame agent update.
//!
//! [`advance`] is a pure function of `(agent, dt, params, rng)`: it never
//! touches shared state, so the caller decides when the new state becomes
//! visible.
//!
//! # Random draws
//!
//! Every call consumes draws in a fixed order so a scripted source can steer
//! it exactly:
//!
//! 1. cruising-speed jitter,
//! 2. the retarget coin,
//! 3. the retarget offset (only when the coin came up).

use ds_core::{RandomSource, lerp, normalize_bearing, signed_bearing_delta};

use crate::{Agent, MobilityError, MobilityResult};

/// Tunables of the movement model.  Defaults reproduce the reference motion.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct KinematicsParams {
    /// Lower bound of the per-frame cruising speed draw, km/h.
    pub min_speed_kmh:       f64,
    /// Width of the cruising speed draw, km/h.
    pub speed_jitter_kmh:    f64,
    /// Approximate coordinate units (degrees) per kilometre.
    pub coord_per_km:        f64,
    /// Maximum heading change, degrees per second.
    pub max_turn_rate_deg_s: f64,
    /// Per-frame probability of nudging the target bearing.
    pub retarget_chance:     f64,
    /// Half-width of the target bearing nudge, degrees.
    pub retarget_jitter_deg: f64,
    /// Speed smoothing rate, per second.
    pub acceleration:        f64,
}

impl Default for KinematicsParams {
    fn default() -> Self {
        Self {
            min_speed_kmh:       30.0,
            speed_jitter_kmh:    20.0,
            coord_per_km:        0.01,
            max_turn_rate_deg_s: 45.0,
            retarget_chance:     0.02,
            retarget_jitter_deg: 45.0,
            acceleration:        2.0,
        }
    }
}

impl KinematicsParams {
    /// Reject parameters that would break the speed or bearing invariants.
    pub fn validate(&self) -> MobilityResult<()> {
        let fields = [
            ("min_speed_kmh", self.min_speed_kmh),
            ("speed_jitter_kmh", self.speed_jitter_kmh),
            ("coord_per_km", self.coord_per_km),
            ("max_turn_rate_deg_s", self.max_turn_rate_deg_s),
            ("retarget_chance", self.retarget_chance),
            ("retarget_jitter_deg", self.retarget_jitter_deg),
            ("acceleration", self.acceleration),
        ];
        for (name, value) in fields {
            if !(value.is_finite() && value >= 0.0) {
                return Err(MobilityError::InvalidParameter { name, value });
            }
        }
        Ok(())
    }

    /// km/h → coordinate units per second.
    #[inline]
    pub fn coord_speed(&self, kmh: f64) -> f64 {
        kmh / 3600.0 * self.coord_per_km
    }
}

/// Advance `agent` by `delta_ms` milliseconds and return its new state.
///
/// Negative or non-finite `delta_ms` is treated as zero: the agent may still
/// retarget but does not turn, accelerate, or move.
pub fn advance<R: RandomSource + ?Sized>(
    agent:    &Agent,
    delta_ms: f64,
    params:   &KinematicsParams,
    rng:      &mut R,
) -> Agent {
    let dt = if delta_ms.is_finite() { (delta_ms / 1000.0).max(0.0) } else { 0.0 };

    let cruise_kmh = params.min_speed_kmh + rng.range(0.0, params.speed_jitter_kmh);
    let target_speed = params.coord_speed(cruise_kmh);

    let bearing = normalize_bearing(agent.bearing);
    let mut target_bearing = normalize_bearing(agent.target_bearing);

    let max_turn = params.max_turn_rate_deg_s * dt;
    let turn = signed_bearing_delta(bearing, target_bearing).clamp(-max_turn, max_turn);
    let bearing = normalize_bearing(bearing + turn);

    if rng.chance(params.retarget_chance) {
        let jitter = params.retarget_jitter_deg;
        target_bearing = normalize_bearing(target_bearing + rng.range(-jitter, jitter));
    }

    // Exponential approach, landing exactly on the target once a * dt >= 1.
    let blend = (params.acceleration * dt).min(1.0);
    let speed = lerp(agent.speed.max(0.0), target_speed, blend).max(0.0);

    let distance = speed * dt;
    let rad = bearing.to_radians();
    let mut pos = agent.pos;
    pos.lat += rad.cos() * distance;
    pos.lon += rad.sin() * distance;

    Agent { id: agent.id, pos, bearing, target_bearing, speed }
}
