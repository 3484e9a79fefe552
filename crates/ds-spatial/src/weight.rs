//! Per-candidate selection weights under a chosen distribution.
//!
//! | Kind               | Weight                                    | Parameter (default)       |
//! |--------------------|-------------------------------------------|---------------------------|
//! | `Uniform`          | `1`                                       | (none)                    |
//! | `Gaussian`         | `exp(-d² / 2σ²)`                          | `sigma` (0.05 km)         |
//! | `DistanceWeighted` | `max(0, 1 - d / maxDistance)`             | `maxDistance` (0.15 km)   |
//! | `DensityBased`     | `neighbours within r / n` (self included) | `densityRadius` (0.01 km) |
//!
//! `d` is the great-circle distance from the candidate to the center.
//!
//! The density weight is an exact O(n²) pairwise scan.  Candidate sets come
//! from a bounded map query (tens to low hundreds of points); an approximate
//! neighbour index would change the sampled distribution.

use std::collections::BTreeMap;

use ds_core::GeoPoint;

use crate::{CandidatePoint, TagRequirement};

pub const SIGMA: &str = "sigma";
pub const MAX_DISTANCE: &str = "maxDistance";
pub const DENSITY_RADIUS: &str = "densityRadius";
/// Older spelling of [`DENSITY_RADIUS`], still accepted.
pub const DENSITY_RADIUS_ALIAS: &str = "radius";

pub const DEFAULT_SIGMA_KM: f64 = 0.05;
pub const DEFAULT_MAX_DISTANCE_KM: f64 = 0.15;
pub const DEFAULT_DENSITY_RADIUS_KM: f64 = 0.01;

// ── DistributionKind ──────────────────────────────────────────────────────────

/// How candidates are weighted before sampling.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DistributionKind {
    #[default]
    Uniform,
    Gaussian,
    DistanceWeighted,
    DensityBased,
}

impl DistributionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DistributionKind::Uniform          => "uniform",
            DistributionKind::Gaussian         => "gaussian",
            DistributionKind::DistanceWeighted => "distance_weighted",
            DistributionKind::DensityBased     => "density_based",
        }
    }
}

impl std::fmt::Display for DistributionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── DistributionConfig ────────────────────────────────────────────────────────

/// An immutable spawn request: which distribution, how many agents, and which
/// candidates qualify.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct DistributionConfig {
    pub kind:             DistributionKind,
    /// Distribution-specific parameters, in kilometres.
    pub params:           BTreeMap<String, f64>,
    pub count:            usize,
    pub allow_duplicates: bool,
    /// `"key"` or `"key=value"` entries; see [`TagRequirement::parse`].
    pub required_tags:    Vec<String>,
}

impl DistributionConfig {
    pub fn new(kind: DistributionKind, count: usize) -> Self {
        Self { kind, count, ..Default::default() }
    }

    pub fn param(mut self, name: &str, value: f64) -> Self {
        self.params.insert(name.to_owned(), value);
        self
    }

    pub fn allow_duplicates(mut self, allow: bool) -> Self {
        self.allow_duplicates = allow;
        self
    }

    pub fn require_tag(mut self, entry: &str) -> Self {
        self.required_tags.push(entry.to_owned());
        self
    }

    pub fn tag_requirements(&self) -> Vec<TagRequirement> {
        TagRequirement::parse_all(&self.required_tags)
    }

    /// A positive, finite parameter value, or `default` when the parameter
    /// is missing or unusable (zero, negative, NaN).
    pub fn positive_param(&self, name: &str, default: f64) -> f64 {
        self.params
            .get(name)
            .copied()
            .filter(|v| v.is_finite() && *v > 0.0)
            .unwrap_or(default)
    }

    fn density_radius(&self) -> f64 {
        let alias = self.positive_param(DENSITY_RADIUS_ALIAS, DEFAULT_DENSITY_RADIUS_KM);
        self.positive_param(DENSITY_RADIUS, alias)
    }
}

// ── Weight functions ──────────────────────────────────────────────────────────

#[inline]
pub fn gaussian_weight(distance_km: f64, sigma_km: f64) -> f64 {
    (-(distance_km * distance_km) / (2.0 * sigma_km * sigma_km)).exp()
}

#[inline]
pub fn linear_falloff_weight(distance_km: f64, max_distance_km: f64) -> f64 {
    (1.0 - distance_km / max_distance_km).max(0.0)
}

/// Fraction of `candidates` (including `candidates[i]` itself) within
/// `radius_km` of `candidates[i]`.
pub fn density_weight(i: usize, candidates: &[CandidatePoint], radius_km: f64) -> f64 {
    let here = candidates[i].pos;
    let neighbours = candidates
        .iter()
        .filter(|other| here.distance_km(other.pos) <= radius_km)
        .count();
    neighbours as f64 / candidates.len() as f64
}

/// One weight per candidate, aligned index-for-index with `candidates`.
///
/// Every returned weight is finite and `>= 0`; anything else a parameter
/// combination might produce is clamped to `0`.
pub fn compute_weights(
    candidates: &[CandidatePoint],
    center:     GeoPoint,
    config:     &DistributionConfig,
) -> Vec<f64> {
    let raw: Vec<f64> = match config.kind {
        DistributionKind::Uniform => vec![1.0; candidates.len()],
        DistributionKind::Gaussian => {
            let sigma = config.positive_param(SIGMA, DEFAULT_SIGMA_KM);
            candidates
                .iter()
                .map(|c| gaussian_weight(c.pos.distance_km(center), sigma))
                .collect()
        }
        DistributionKind::DistanceWeighted => {
            let max_d = config.positive_param(MAX_DISTANCE, DEFAULT_MAX_DISTANCE_KM);
            candidates
                .iter()
                .map(|c| linear_falloff_weight(c.pos.distance_km(center), max_d))
                .collect()
        }
        DistributionKind::DensityBased => {
            let radius = config.density_radius();
            (0..candidates.len())
                .map(|i| density_weight(i, candidates, radius))
                .collect()
        }
    };

    raw.into_iter()
        .map(|w| if w.is_finite() && w > 0.0 { w } else { 0.0 })
        .collect()
}
