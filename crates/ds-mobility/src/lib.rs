//! `ds-mobility`: driver state and how it evolves frame over frame.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                      |
//! |----------------|---------------------------------------------------------------|
//! | [`state`]      | `Agent`, `spawn_agents`: seeding agents at selected sites    |
//! | [`kinematics`] | `KinematicsParams`, `advance`: one agent, one frame          |
//! | [`store`]      | `AgentSet`: the published, copy-on-write agent collection    |
//! | [`error`]      | `MobilityError`, `MobilityResult<T>`                          |
//!
//! # Movement model (continuous heading and speed)
//!
//! Every frame each agent:
//!
//! 1. draws a cruising speed in `[min_speed, min_speed + jitter)` km/h,
//! 2. turns toward its target bearing by at most `max_turn_rate × dt`,
//!    always the short way round,
//! 3. occasionally nudges its target bearing (a stand-in for route choice),
//! 4. eases its speed toward the cruising speed and moves along its bearing.
//!
//! Agents do not follow roads; positions are integrated in raw degree space,
//! which is adequate inside the ~1 km spawn vicinity.

pub mod error;
pub mod kinematics;
pub mod state;
pub mod store;

#[cfg(test)]
mod tests;

pub use error::{MobilityError, MobilityResult};
pub use kinematics::{KinematicsParams, advance};
pub use state::{Agent, spawn_agents};
pub use store::AgentSet;
