//! In-memory sources for tests, demos, and replay.

use ds_core::{BoundingBox, GeoPoint};
use ds_spatial::RawCandidate;

use crate::{CandidateSource, RouteResponse, RouteSource, SourceResult, decode_candidates};

/// Serves a fixed point set, clipped to the requested box.
///
/// Points without a usable position are always returned, the way a real
/// upstream would pass malformed elements through.
#[derive(Clone, Debug, Default)]
pub struct StaticCandidateSource {
    pub candidates: Vec<RawCandidate>,
}

impl StaticCandidateSource {
    pub fn new(candidates: Vec<RawCandidate>) -> Self {
        Self { candidates }
    }

    /// Load from a recorded candidate response body.
    pub fn from_json(body: &str) -> SourceResult<Self> {
        decode_candidates(body).map(Self::new)
    }
}

impl CandidateSource for StaticCandidateSource {
    fn fetch_candidates(&mut self, bbox: &BoundingBox) -> SourceResult<Vec<RawCandidate>> {
        Ok(self
            .candidates
            .iter()
            .filter(|c| c.position().is_none_or(|p| bbox.contains(p)))
            .cloned()
            .collect())
    }
}

/// Answers every route request with the same response.
#[derive(Clone, Debug)]
pub struct StaticRouteSource {
    pub response: RouteResponse,
}

impl StaticRouteSource {
    pub fn new(response: RouteResponse) -> Self {
        Self { response }
    }
}

impl RouteSource for StaticRouteSource {
    fn fetch_route(&mut self, _: GeoPoint, _: GeoPoint, _: &BoundingBox) -> SourceResult<RouteResponse> {
        Ok(self.response.clone())
    }
}

/// Great-circle path from start to end in equal steps.
///
/// Stands in for a shortest-path service when none is available.
#[derive(Copy, Clone, Debug)]
pub struct StraightLineRouteSource {
    pub segments: usize,
}

impl Default for StraightLineRouteSource {
    fn default() -> Self {
        Self { segments: 20 }
    }
}

impl RouteSource for StraightLineRouteSource {
    fn fetch_route(&mut self, start: GeoPoint, end: GeoPoint, _: &BoundingBox) -> SourceResult<RouteResponse> {
        let segments = self.segments.max(1);
        let total = start.distance_km(end);
        let bearing = start.initial_bearing(end);
        let interior = (1..segments)
            .map(|i| start.destination(total * i as f64 / segments as f64, bearing));
        let path = std::iter::once(start).chain(interior).chain(std::iter::once(end)).collect();
        Ok(RouteResponse::Found(path))
    }
}
