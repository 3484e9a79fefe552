//! Overpass QL for the drivable road network inside a box.

use std::fmt::Write;

use ds_core::BoundingBox;

/// `highway` values that are never driven on.
pub const EXCLUDED_HIGHWAYS: [&str; 6] =
    ["footway", "street_lamp", "steps", "pedestrian", "track", "path"];

/// Query for every node of every drivable way intersecting `bbox`.
///
/// Coordinates are written `south,west,north,east` as Overpass expects.
pub fn overpass_query(bbox: &BoundingBox) -> String {
    let mut q = String::from("[out:json];(way[highway]");
    for kind in EXCLUDED_HIGHWAYS {
        let _ = write!(q, "[highway!=\"{kind}\"]");
    }
    let _ = write!(
        q,
        "[footway!=\"*\"]({},{},{},{});node(w););out skel;",
        bbox.min.lat, bbox.min.lon, bbox.max.lat, bbox.max.lon,
    );
    q
}
