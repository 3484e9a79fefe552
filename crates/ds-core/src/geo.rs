//! Geographic coordinate type and small-radius spatial utilities.
//!
//! `GeoPoint` uses `f64` latitude/longitude in degrees.  Agents move by a few
//! millionths of a degree per frame, so single precision would swallow whole
//! frames of movement.
//!
//! Distances are great-circle (haversine) kilometres.  Everything else here is
//! a flat-earth approximation that is only meaningful within a few kilometres
//! of the point of interest.

use std::f64::consts::PI;
use std::str::FromStr;

use crate::{DsError, DsResult};

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6_371.0;

/// Kilometres per degree of latitude (used by the circle approximation).
const KM_PER_DEG_LAT: f64 = 110.574;

/// Kilometres per degree of longitude at the equator.
const KM_PER_DEG_LON_EQUATOR: f64 = 111.320;

/// A WGS-84 geographic coordinate in degrees.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Haversine great-circle distance in kilometres.
    pub fn distance_km(self, other: GeoPoint) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let a = (d_lat * 0.5).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_KM * c
    }

    /// Forward azimuth from `self` towards `other`, in degrees `[0, 360)`.
    pub fn initial_bearing(self, other: GeoPoint) -> f64 {
        let d_lon = (other.lon - self.lon).to_radians();
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let y = d_lon.sin() * lat2.cos();
        let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lon.cos();
        normalize_bearing(y.atan2(x).to_degrees())
    }

    /// The point reached by travelling `distance_km` along the great circle
    /// that leaves `self` at `bearing_deg`.
    pub fn destination(self, distance_km: f64, bearing_deg: f64) -> GeoPoint {
        let d = distance_km / EARTH_RADIUS_KM;
        let bearing = bearing_deg.to_radians();
        let lat1 = self.lat.to_radians();
        let lon1 = self.lon.to_radians();

        let lat2 = (lat1.sin() * d.cos() + lat1.cos() * d.sin() * bearing.cos()).asin();
        let lon2 = lon1
            + (bearing.sin() * d.sin() * lat1.cos()).atan2(d.cos() - lat1.sin() * lat2.sin());

        GeoPoint::new(lat2.to_degrees(), lon2.to_degrees())
    }

    /// `true` if both coordinates are finite numbers.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }
}

impl GeoPoint {
    /// `self` if both coordinates are finite and inside WGS-84 ranges
    /// (`lat` in `[-90, 90]`, `lon` in `[-180, 180]`).
    pub fn checked(self) -> DsResult<Self> {
        let in_range = (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lon);
        if self.is_finite() && in_range {
            Ok(self)
        } else {
            Err(DsError::Config(format!("coordinates out of range: {self}")))
        }
    }
}

/// Parses `"lat,lon"`, surrounding whitespace allowed.
impl FromStr for GeoPoint {
    type Err = DsError;

    fn from_str(s: &str) -> DsResult<Self> {
        let (lat, lon) = s
            .split_once(',')
            .ok_or_else(|| DsError::Parse(format!("expected `lat,lon`, got {s:?}")))?;
        let coord = |part: &str| {
            part.trim()
                .parse::<f64>()
                .map_err(|e| DsError::Parse(format!("{part:?}: {e}")))
        };
        GeoPoint::new(coord(lat)?, coord(lon)?).checked()
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}

// ── Scalar helpers ────────────────────────────────────────────────────────────

/// Reduce any angle in degrees into `[0, 360)`.
///
/// Negative inputs wrap from the top (`-90 → 270`).  Non-finite input maps to
/// `0.0` so a corrupted heading can never escape the range.
#[inline]
pub fn normalize_bearing(deg: f64) -> f64 {
    if !deg.is_finite() {
        return 0.0;
    }
    let r = deg.rem_euclid(360.0);
    // rem_euclid of a tiny negative value rounds up to exactly 360.0.
    if r >= 360.0 { 0.0 } else { r }
}

/// Signed shortest rotation from `from` to `to`, in `(-180, 180]` degrees.
///
/// Positive means clockwise (increasing bearing).
#[inline]
pub fn signed_bearing_delta(from: f64, to: f64) -> f64 {
    let d = normalize_bearing(to - from);
    if d > 180.0 { d - 360.0 } else { d }
}

/// Linear interpolation `a + (b - a) * t`.  `t` is **not** clamped.
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

// ── Circles and bounding boxes ────────────────────────────────────────────────

/// Approximate a circle of `radius_km` around `center` as a closed ring of
/// `points + 1` vertices (the first vertex is repeated at the end).
///
/// Uses a local equirectangular scale, so the result is only a circle on the
/// ground for radii of a few kilometres away from the poles.
pub fn circle_polygon(center: GeoPoint, radius_km: f64, points: usize) -> Vec<GeoPoint> {
    let points = points.max(3);
    let dx = radius_km / (KM_PER_DEG_LON_EQUATOR * center.lat.to_radians().cos());
    let dy = radius_km / KM_PER_DEG_LAT;

    let mut ring: Vec<GeoPoint> = (0..points)
        .map(|i| {
            let theta = (i as f64 / points as f64) * 2.0 * PI;
            GeoPoint::new(center.lat + dy * theta.sin(), center.lon + dx * theta.cos())
        })
        .collect();
    ring.push(ring[0]);
    ring
}

/// An axis-aligned latitude/longitude rectangle.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundingBox {
    pub min: GeoPoint,
    pub max: GeoPoint,
}

impl BoundingBox {
    /// Number of vertices used when bounding a circle.
    pub const CIRCLE_RESOLUTION: usize = 64;

    /// Smallest box containing every point, or `None` for an empty input.
    pub fn from_points<I: IntoIterator<Item = GeoPoint>>(points: I) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let init = BoundingBox { min: first, max: first };
        Some(iter.fold(init, |bb, p| BoundingBox {
            min: GeoPoint::new(bb.min.lat.min(p.lat), bb.min.lon.min(p.lon)),
            max: GeoPoint::new(bb.max.lat.max(p.lat), bb.max.lon.max(p.lon)),
        }))
    }

    /// The box around a [`circle_polygon`] of `radius_km` centred on `center`.
    pub fn around(center: GeoPoint, radius_km: f64) -> Self {
        Self::from_points(circle_polygon(center, radius_km, Self::CIRCLE_RESOLUTION))
            .unwrap_or(BoundingBox { min: center, max: center })
    }

    #[inline]
    pub fn contains(&self, p: GeoPoint) -> bool {
        p.lat >= self.min.lat && p.lat <= self.max.lat && p.lon >= self.min.lon && p.lon <= self.max.lon
    }

    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(
            (self.min.lat + self.max.lat) * 0.5,
            (self.min.lon + self.max.lon) * 0.5,
        )
    }
}
