//! The `Sim` struct: request handling and the frame loop.

use std::sync::Arc;

use tracing::{debug, info, warn};

use ds_core::{BoundingBox, FrameClock, FrameInstant, GeoPoint, SimRng};
use ds_mobility::{Agent, AgentSet};
use ds_source::{CandidateSource, RouteResponse, RouteSource, SourceResult};
use ds_spatial::{
    CandidateIndex, CandidatePoint, DistributionConfig, RawCandidate, compute_weights,
    filter_candidates, sample_indices,
};

use crate::{EngineConfig, Frame, FrameObserver, Route, SimError, SimResult, TrailClock};

/// What happened to a completed request.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    /// The result was installed.
    Applied,
    /// A newer request superseded this one; the result was dropped.
    Stale,
    /// The route source answered with a non-success status; the previous
    /// route is kept.
    Declined(String),
}

/// An in-flight spawn request.
#[derive(Clone, Debug)]
pub struct SpawnTicket {
    pub generation:   u64,
    /// Where the user clicked.
    pub click:        GeoPoint,
    /// Box to fetch candidates from.
    pub bbox:         BoundingBox,
    pub distribution: DistributionConfig,
}

/// An in-flight route request.
#[derive(Clone, Debug)]
pub struct RouteTicket {
    pub generation: u64,
    pub start:      GeoPoint,
    pub end:        GeoPoint,
    pub bbox:       BoundingBox,
}

/// Candidates seen by the last successful spawn, used to snap route ends.
struct Vicinity {
    origin:     GeoPoint,
    candidates: Vec<CandidatePoint>,
    index:      CandidateIndex,
}

impl Vicinity {
    fn snap(&self, pos: GeoPoint) -> GeoPoint {
        self.index
            .nearest(pos)
            .map_or(pos, |i| self.candidates[i].pos)
    }
}

/// The engine.  Create via [`SimBuilder`][crate::SimBuilder].
///
/// Single writer: every method takes `&mut self`, and readers only ever see
/// the `Arc` snapshots handed out in [`Frame`]s or by [`agents`](Self::agents).
pub struct Sim {
    config: EngineConfig,

    /// Draws for candidate sampling and spawn headings.
    pub(crate) spawn_rng:  SimRng,
    /// Draws for per-frame kinematics.
    pub(crate) motion_rng: SimRng,

    pub(crate) agents: AgentSet,
    pub(crate) route:  Route,
    pub(crate) trail:  TrailClock,

    vicinity: Option<Vicinity>,

    spawn_generation: u64,
    route_generation: u64,

    frame_index: u64,
    last_frame:  Option<FrameInstant>,
}

impl Sim {
    pub(crate) fn new(config: EngineConfig, spawn_rng: SimRng, motion_rng: SimRng) -> Self {
        let trail = TrailClock::new(config.playback_speed, config.playback);
        Self {
            config,
            spawn_rng,
            motion_rng,
            agents: AgentSet::new(),
            route: Route::empty(),
            trail,
            vicinity: None,
            spawn_generation: 0,
            route_generation: 0,
            frame_index: 0,
            last_frame: None,
        }
    }

    // ── Read access ───────────────────────────────────────────────────────

    /// The validated configuration, fixed at build time.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn agents(&self) -> Arc<[Agent]> {
        self.agents.snapshot()
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn trail(&self) -> &TrailClock {
        &self.trail
    }

    /// The snapped center of the current agent set, if any spawn succeeded.
    pub fn origin(&self) -> Option<GeoPoint> {
        self.vicinity.as_ref().map(|v| v.origin)
    }

    pub fn frames(&self) -> u64 {
        self.frame_index
    }

    // ── Spawning ──────────────────────────────────────────────────────────

    /// Start a spawn request at `click`.
    ///
    /// Cancels trail playback and any in-flight route, and makes every
    /// earlier spawn ticket stale.  The current agents stay visible until
    /// the new set is installed.
    ///
    /// # Errors
    ///
    /// [`SimError::Core`] if `click` is not a valid coordinate; nothing is
    /// cancelled in that case.
    pub fn begin_spawn(
        &mut self,
        click:        GeoPoint,
        distribution: DistributionConfig,
    ) -> SimResult<SpawnTicket> {
        let click = click.checked()?;
        self.spawn_generation += 1;
        self.clear_route();
        Ok(SpawnTicket {
            generation: self.spawn_generation,
            click,
            bbox: BoundingBox::around(click, self.config.fetch_radius_km),
            distribution,
        })
    }

    /// Finish a spawn request with whatever the candidate source returned.
    ///
    /// The click is snapped to the nearest fetched point; candidates within
    /// the spawn radius of that center are weighted and sampled, and the
    /// result replaces the agent set in one step.
    ///
    /// # Errors
    ///
    /// The source error, or a selection error when nothing could be sampled.
    /// Either way the previous agent set stays authoritative.
    pub fn complete_spawn(
        &mut self,
        ticket:  SpawnTicket,
        fetched: SourceResult<Vec<RawCandidate>>,
    ) -> SimResult<Outcome> {
        if ticket.generation != self.spawn_generation {
            debug!(
                generation = ticket.generation,
                current = self.spawn_generation,
                "discarding stale spawn result"
            );
            return Ok(Outcome::Stale);
        }
        let raw = fetched.inspect_err(|e| warn!(error = %e, "candidate fetch failed"))?;

        let located = filter_candidates(&raw, ticket.click, f64::INFINITY, &[]);
        let index = CandidateIndex::build(&located);
        let center = index.nearest(ticket.click).map_or(ticket.click, |i| located[i].pos);

        let dist = &ticket.distribution;
        let eligible = filter_candidates(
            &raw,
            center,
            self.config.spawn_radius_km,
            &dist.tag_requirements(),
        );
        let weights = compute_weights(&eligible, center, dist);
        debug!(
            raw = raw.len(),
            eligible = eligible.len(),
            total_weight = weights.iter().sum::<f64>(),
            kind = %dist.kind,
            "weighted spawn candidates"
        );

        let selected = sample_indices(&weights, dist.count, dist.allow_duplicates, &mut self.spawn_rng)
            .inspect_err(|e| warn!(error = %e, "spawn selection failed; keeping previous agents"))?;

        let positions: Vec<GeoPoint> = selected.iter().map(|&i| eligible[i].pos).collect();
        self.agents.respawn(&positions, &mut self.spawn_rng);
        self.vicinity = Some(Vicinity { origin: center, candidates: located, index });
        info!(agents = self.agents.len(), %center, "installed agent set");
        Ok(Outcome::Applied)
    }

    /// [`begin_spawn`](Self::begin_spawn), fetch, and
    /// [`complete_spawn`](Self::complete_spawn) in one call.
    pub fn request_spawn<C: CandidateSource + ?Sized>(
        &mut self,
        source:       &mut C,
        click:        GeoPoint,
        distribution: DistributionConfig,
    ) -> SimResult<Outcome> {
        let ticket = self.begin_spawn(click, distribution)?;
        let fetched = source.fetch_candidates(&ticket.bbox);
        self.complete_spawn(ticket, fetched)
    }

    // ── Routing ───────────────────────────────────────────────────────────

    /// Start a route request from the spawn origin to the point nearest
    /// `click`.
    ///
    /// # Errors
    ///
    /// [`SimError::NoOrigin`] if no spawn has succeeded yet,
    /// [`SimError::Core`] if `click` is not a valid coordinate.
    pub fn begin_route(&mut self, click: GeoPoint) -> SimResult<RouteTicket> {
        let click = click.checked()?;
        let vicinity = self.vicinity.as_ref().ok_or(SimError::NoOrigin)?;
        let end = vicinity.snap(click);
        let bbox = BoundingBox::around(vicinity.origin, self.config.fetch_radius_km);
        self.route_generation += 1;
        Ok(RouteTicket { generation: self.route_generation, start: vicinity.origin, end, bbox })
    }

    /// Finish a route request.  A found route replaces the active one and
    /// restarts the trail clock at `now`.
    pub fn complete_route(
        &mut self,
        ticket:  RouteTicket,
        fetched: SourceResult<RouteResponse>,
        now:     FrameInstant,
    ) -> SimResult<Outcome> {
        if ticket.generation != self.route_generation {
            debug!(
                generation = ticket.generation,
                current = self.route_generation,
                "discarding stale route result"
            );
            return Ok(Outcome::Stale);
        }
        match fetched.inspect_err(|e| warn!(error = %e, "route fetch failed"))? {
            RouteResponse::Found(path) => {
                self.route = Route::new(path);
                self.trail.bind(&self.route, now);
                info!(vertices = self.route.len(), km = self.route.length_km(), "installed route");
                Ok(Outcome::Applied)
            }
            RouteResponse::Failed(status) => {
                warn!(%status, "route source declined; keeping previous route");
                Ok(Outcome::Declined(status))
            }
        }
    }

    pub fn request_route<S: RouteSource + ?Sized>(
        &mut self,
        source: &mut S,
        click:  GeoPoint,
        now:    FrameInstant,
    ) -> SimResult<Outcome> {
        let ticket = self.begin_route(click)?;
        let fetched = source.fetch_route(ticket.start, ticket.end, &ticket.bbox);
        self.complete_route(ticket, fetched, now)
    }

    /// Drop the active route, idle the trail clock, and make in-flight route
    /// tickets stale.
    pub fn clear_route(&mut self) {
        self.route_generation += 1;
        self.route = Route::empty();
        self.trail.clear();
    }

    // ── Frame loop ────────────────────────────────────────────────────────

    /// Advance every agent by `delta_ms`, publish, and report the frame.
    pub fn tick<O: FrameObserver + ?Sized>(
        &mut self,
        delta_ms: f64,
        now:      FrameInstant,
        observer: &mut O,
    ) -> Frame {
        self.agents
            .advance_all(delta_ms, &self.config.kinematics, &mut self.motion_rng);

        let frame = Frame {
            index:    self.frame_index,
            time:     now,
            agents:   self.agents.snapshot(),
            progress: self.trail.progress(now),
        };
        self.frame_index += 1;
        self.last_frame = Some(now);

        observer.on_frame(&frame);
        frame
    }

    /// Drive `n` frames from `clock`, each advancing agents by the time
    /// since the previous frame.
    pub fn run_frames<K, O>(&mut self, n: u64, clock: &mut K, observer: &mut O)
    where
        K: FrameClock + ?Sized,
        O: FrameObserver + ?Sized,
    {
        let mut prev = self.last_frame.unwrap_or_else(|| clock.now());
        for _ in 0..n {
            let now = clock.next_frame(self.config.frame_ms);
            self.tick(now.since(prev), now, observer);
            prev = now;
        }
        observer.on_run_end(self.frame_index);
    }
}
