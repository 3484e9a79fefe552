//! Eligibility filter for raw candidate points.

use ds_core::GeoPoint;

use crate::{CandidatePoint, RawCandidate, TagRequirement};

/// Fixed spawn-eligibility radius in kilometres.
///
/// Independent of the (smaller) circle used to fetch candidates: the fetch
/// circle decides what the upstream source returns, this bound re-filters
/// against the exact center.
pub const SPAWN_VICINITY_KM: f64 = 1.0;

/// Keep the raw candidates that are eligible spawn sites around `center`.
///
/// A candidate survives iff its coordinates are present and finite, it lies
/// within `radius_km` (great-circle, inclusive), and every requirement in
/// `required` matches its tags.  Relative order is preserved; an empty result
/// is valid.
pub fn filter_candidates(
    raw:       &[RawCandidate],
    center:    GeoPoint,
    radius_km: f64,
    required:  &[TagRequirement],
) -> Vec<CandidatePoint> {
    raw.iter()
        .filter_map(|c| {
            let pos = c.position()?;
            if pos.distance_km(center) > radius_km {
                return None;
            }
            if !required.iter().all(|r| r.matches(&c.tags)) {
                return None;
            }
            Some(CandidatePoint {
                source_id: c.source_id,
                pos,
                tags: c.tags.clone(),
            })
        })
        .collect()
}
