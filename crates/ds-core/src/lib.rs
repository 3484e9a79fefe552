//! `ds-core`: foundational types for the driver-sim engine.
//!
//! This crate is a dependency of every other `ds-*` crate.  It has no `ds-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`ids`]         | `AgentId`                                                  |
//! | [`geo`]         | `GeoPoint`, haversine distance, bearings, `BoundingBox`    |
//! | [`time`]        | `FrameInstant`, `FrameClock`, system and manual clocks     |
//! | [`rng`]         | `RandomSource` trait, `SimRng`                             |
//! | [`error`]       | `DsError`, `DsResult`                                      |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public data types.   |

pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{DsError, DsResult};
pub use geo::{BoundingBox, GeoPoint, circle_polygon, lerp, normalize_bearing, signed_bearing_delta};
pub use ids::AgentId;
pub use rng::{RandomSource, SimRng};
pub use time::{FrameClock, FrameInstant, ManualFrameClock, SystemFrameClock};
