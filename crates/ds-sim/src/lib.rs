//! `ds-sim`: frame loop orchestrator for the driver-sim engine.
//!
//! # Request flow
//!
//! ```text
//! click ─► begin_spawn ─► (caller fetches candidates) ─► complete_spawn
//!            │                                              │
//!            └ clears route + trail,                        └ snap, filter, weight,
//!              invalidates in-flight routes                   sample, publish agents
//!
//! click ─► begin_route ─► (caller fetches route) ─► complete_route ─► trail starts
//! ```
//!
//! Every `begin_*` call hands out a ticket carrying a generation number.  A
//! result whose ticket is no longer current is discarded and reported as
//! [`Outcome::Stale`]; a failed request leaves the previous agents and route
//! in place.
//!
//! # Frame loop
//!
//! ```text
//! for each frame:
//!   ① advance every agent by the frame delta into a fresh collection
//!   ② publish it as one Arc<[Agent]> snapshot
//!   ③ read trail progress at the frame instant
//!   ④ hand Frame { index, time, agents, progress } to the FrameObserver
//! ```
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use ds_core::{GeoPoint, ManualFrameClock};
//! use ds_sim::{EngineConfig, NoopObserver, SimBuilder};
//! use ds_source::StaticCandidateSource;
//! use ds_spatial::{DistributionConfig, DistributionKind};
//!
//! let mut sim = SimBuilder::new(EngineConfig::default()).build()?;
//! let dist = DistributionConfig::new(DistributionKind::Gaussian, 8);
//! sim.request_spawn(&mut source, GeoPoint::new(51.5, -0.12), dist)?;
//! sim.run_frames(600, &mut ManualFrameClock::default(), &mut NoopObserver);
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod observer;
pub mod route;
pub mod sim;
pub mod trail;


pub use builder::SimBuilder;
pub use config::EngineConfig;
pub use error::{SimError, SimResult};
pub use observer::{Frame, FrameObserver, NoopObserver};
pub use route::Route;
pub use sim::{Outcome, RouteTicket, Sim, SpawnTicket};
pub use trail::{PlaybackMode, TrailClock};
