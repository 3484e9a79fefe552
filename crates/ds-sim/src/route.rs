//! The active route.

use std::sync::Arc;

use ds_core::{BoundingBox, GeoPoint};

/// Seconds of trail time between consecutive vertices.
pub const TIMESTAMP_STEP: f64 = 0.1;

/// An ordered path, immutable once built.  Cloning shares the vertices.
#[derive(Clone, Debug, PartialEq)]
pub struct Route {
    points: Arc<[GeoPoint]>,
}

impl Default for Route {
    fn default() -> Self {
        Self::empty()
    }
}

impl Route {
    pub fn new(points: Vec<GeoPoint>) -> Self {
        Self { points: Arc::from(points) }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    #[inline]
    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Trail timestamp of every vertex (`0.1 × index`), the timeline the
    /// renderer compares trail progress against.
    pub fn timestamps(&self) -> Vec<f64> {
        (0..self.points.len()).map(|i| i as f64 * TIMESTAMP_STEP).collect()
    }

    /// Great-circle length in kilometres.
    pub fn length_km(&self) -> f64 {
        self.points.windows(2).map(|w| w[0].distance_km(w[1])).sum()
    }

    pub fn bounds(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(self.points.iter().copied())
    }
}
