//! JSON response decoding.
//!
//! Candidate bodies follow the Overpass `out skel` shape:
//!
//! ```text
//! { "elements": [ { "type": "node", "id": 1, "lat": 51.5, "lon": -0.12, "tags": {...} }, ... ] }
//! ```
//!
//! Route bodies are `{ "status": "success", "path": [ { "lat": .., "lon": .. }, ... ] }`.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use ds_core::GeoPoint;
use ds_spatial::RawCandidate;

use crate::{RouteResponse, SourceError, SourceResult};

const SUCCESS: &str = "success";

#[derive(Deserialize)]
struct CandidateBody {
    elements: Option<Vec<Value>>,
}

/// Coordinates and tags are read loosely: an element whose `lat` is a string
/// is kept, with no position, rather than failing the whole body.  Entries
/// that are not objects of this shape (`null`, numbers, a string `id`) are
/// skipped.
#[derive(Deserialize)]
struct Element {
    #[serde(default)]
    id:   Option<i64>,
    #[serde(default)]
    lat:  Option<Value>,
    #[serde(default)]
    lon:  Option<Value>,
    #[serde(default)]
    tags: Option<BTreeMap<String, Value>>,
}

impl From<Element> for RawCandidate {
    fn from(e: Element) -> Self {
        let tags = e
            .tags
            .unwrap_or_default()
            .into_iter()
            .map(|(k, v)| match v {
                Value::String(s) => (k, s),
                other => (k, other.to_string()),
            })
            .collect();
        RawCandidate {
            source_id: e.id,
            lat: e.lat.as_ref().and_then(Value::as_f64),
            lon: e.lon.as_ref().and_then(Value::as_f64),
            tags,
        }
    }
}

/// Decode a candidate response body.
///
/// # Errors
///
/// [`SourceError::InvalidUpstreamResponse`] if the body is not JSON, if
/// `elements` is not an array, or if it is missing or `null`.
pub fn decode_candidates(body: &str) -> SourceResult<Vec<RawCandidate>> {
    let parsed: CandidateBody = serde_json::from_str(body)?;
    let elements = parsed
        .elements
        .ok_or_else(|| SourceError::invalid("candidate response has no `elements`"))?;
    let total = elements.len();
    let raw: Vec<RawCandidate> = elements
        .into_iter()
        .filter_map(|v| serde_json::from_value::<Element>(v).ok())
        .map(RawCandidate::from)
        .collect();
    debug!(count = raw.len(), skipped = total - raw.len(), "decoded candidate elements");
    Ok(raw)
}

#[derive(Deserialize)]
struct RouteBody {
    status: Option<String>,
    #[serde(default)]
    path:   Option<Vec<GeoPoint>>,
}

/// Decode a route response body.
///
/// A `success` status with no `path` is an empty route.
///
/// # Errors
///
/// [`SourceError::InvalidUpstreamResponse`] if the body or any path vertex
/// is malformed, or `status` is missing.
pub fn decode_route(body: &str) -> SourceResult<RouteResponse> {
    let parsed: RouteBody = serde_json::from_str(body)?;
    let status = parsed
        .status
        .ok_or_else(|| SourceError::invalid("route response has no `status`"))?;
    if status != SUCCESS {
        debug!(%status, "route source declined");
        return Ok(RouteResponse::Failed(status));
    }
    let path = parsed.path.unwrap_or_default();
    debug!(vertices = path.len(), "decoded route");
    Ok(RouteResponse::Found(path))
}
