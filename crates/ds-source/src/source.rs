//! Source traits.

use ds_core::{BoundingBox, GeoPoint};
use ds_spatial::RawCandidate;

use crate::SourceResult;

/// Supplies raw points of interest.
pub trait CandidateSource {
    /// Every raw point the source knows inside `bbox`.  Points may lack
    /// coordinates; eligibility is decided downstream.
    fn fetch_candidates(&mut self, bbox: &BoundingBox) -> SourceResult<Vec<RawCandidate>>;
}

/// Supplies a precomputed path between two points.
pub trait RouteSource {
    fn fetch_route(
        &mut self,
        start: GeoPoint,
        end:   GeoPoint,
        bbox:  &BoundingBox,
    ) -> SourceResult<RouteResponse>;
}

/// A well-formed route answer.
#[derive(Clone, Debug, PartialEq)]
pub enum RouteResponse {
    /// `status == "success"`; the path may be empty.
    Found(Vec<GeoPoint>),
    /// Any other status, verbatim.
    Failed(String),
}

impl RouteResponse {
    pub fn is_found(&self) -> bool {
        matches!(self, RouteResponse::Found(_))
    }
}
