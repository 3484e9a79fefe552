//! Candidate point types and tag predicates.

use std::collections::BTreeMap;

use ds_core::GeoPoint;

/// A point of interest exactly as the upstream source delivered it.
///
/// Coordinates are optional because upstream elements are not guaranteed to
/// carry them (ways and relations, malformed entries).  Only
/// [`filter_candidates`](crate::filter_candidates) decides eligibility.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawCandidate {
    /// Upstream element identifier, if any.
    pub source_id: Option<i64>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub tags: BTreeMap<String, String>,
}

impl RawCandidate {
    /// Convenience constructor for a bare point with no tags.
    pub fn at(lat: f64, lon: f64) -> Self {
        Self { source_id: None, lat: Some(lat), lon: Some(lon), tags: BTreeMap::new() }
    }

    /// Builder-style tag insertion.
    pub fn with_tag(mut self, key: &str, value: &str) -> Self {
        self.tags.insert(key.to_owned(), value.to_owned());
        self
    }

    /// The point, if both coordinates are present and finite.
    pub fn position(&self) -> Option<GeoPoint> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Some(GeoPoint::new(lat, lon)).filter(|p| p.is_finite()),
            _ => None,
        }
    }
}

/// An eligible spawn site.  Read-only to the engine.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CandidatePoint {
    pub source_id: Option<i64>,
    pub pos: GeoPoint,
    pub tags: BTreeMap<String, String>,
}

impl CandidatePoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { source_id: None, pos: GeoPoint::new(lat, lon), tags: BTreeMap::new() }
    }
}

// ── TagRequirement ────────────────────────────────────────────────────────────

/// One entry of a `requiredTags` list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TagRequirement {
    /// `key` must be present with a non-empty value.
    Present(String),
    /// `key` must map to exactly this value.
    Equals(String, String),
}

impl TagRequirement {
    /// Parse `"key=value"` or `"key"`.
    ///
    /// Only the first `=` separates key from value, so `"a=b=c"` requires
    /// `a` to equal `"b=c"`.  An empty value (`"key="`) degrades to a
    /// presence check.
    pub fn parse(s: &str) -> Self {
        match s.split_once('=') {
            Some((key, value)) if !value.is_empty() => {
                TagRequirement::Equals(key.to_owned(), value.to_owned())
            }
            Some((key, _)) => TagRequirement::Present(key.to_owned()),
            None => TagRequirement::Present(s.to_owned()),
        }
    }

    /// Parse a whole `requiredTags` list.
    pub fn parse_all<S: AsRef<str>>(entries: &[S]) -> Vec<Self> {
        entries.iter().map(|s| Self::parse(s.as_ref())).collect()
    }

    /// Does a tag map satisfy this requirement?
    pub fn matches(&self, tags: &BTreeMap<String, String>) -> bool {
        match self {
            TagRequirement::Present(key) => tags.get(key).is_some_and(|v| !v.is_empty()),
            TagRequirement::Equals(key, value) => tags.get(key).is_some_and(|v| v == value),
        }
    }
}
