//! Engine configuration.

use ds_mobility::KinematicsParams;

use crate::{PlaybackMode, SimError, SimResult};

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Seed for every random stream in the run.
    pub seed:            u64,
    /// Eligibility radius around the snapped spawn center, km.
    pub spawn_radius_km: f64,
    /// Radius of the circle whose bounding box is sent to the sources, km.
    pub fetch_radius_km: f64,
    /// Trail playback multiplier.
    pub playback_speed:  f64,
    pub playback:        PlaybackMode,
    /// Nominal frame length for `run_frames`, ms.
    pub frame_ms:        f64,
    pub kinematics:      KinematicsParams,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed:            0,
            spawn_radius_km: ds_spatial::SPAWN_VICINITY_KM,
            fetch_radius_km: 0.7,
            playback_speed:  1.0,
            playback:        PlaybackMode::OneShot,
            frame_ms:        16.0,
            kinematics:      KinematicsParams::default(),
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> SimResult<()> {
        let positive = [
            ("spawn_radius_km", self.spawn_radius_km),
            ("fetch_radius_km", self.fetch_radius_km),
            ("playback_speed", self.playback_speed),
            ("frame_ms", self.frame_ms),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(SimError::Config(format!("{name} must be finite and > 0, got {value}")));
            }
        }
        self.kinematics
            .validate()
            .map_err(|e| SimError::Config(e.to_string()))
    }
}
