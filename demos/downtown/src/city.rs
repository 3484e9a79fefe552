//! Synthetic street grid around downtown Mobile, Alabama.
//!
//! Rendered as an Overpass-style response body so the demo goes through the
//! same decoder a live source would.

use serde_json::{Value, json};

/// Grid origin (south-west corner).
const SW_LAT: f64 = 30.6890;
const SW_LON: f64 = -88.0470;
/// ~50 m between intersections.
const STEP_DEG: f64 = 0.00045;
const SIDE: usize = 24;

/// Highway classes cycled across the grid rows.
const CLASSES: [&str; 4] = ["residential", "residential", "secondary", "primary"];

pub fn overpass_body() -> String {
    let mut elements: Vec<Value> = Vec::with_capacity(SIDE * SIDE + 2);
    for row in 0..SIDE {
        for col in 0..SIDE {
            let id = (row * SIDE + col) as i64 + 1;
            elements.push(json!({
                "type": "node",
                "id":   id,
                "lat":  SW_LAT + row as f64 * STEP_DEG,
                "lon":  SW_LON + col as f64 * STEP_DEG,
                "tags": { "highway": CLASSES[row % CLASSES.len()] },
            }));
        }
    }
    // What a real response also carries: a way, and a node with a bad coordinate.
    elements.push(json!({ "type": "way", "id": 900_001, "nodes": [1, 2, 3] }));
    elements.push(json!({ "type": "node", "id": 900_002, "lat": "n/a", "lon": SW_LON }));

    json!({ "version": 0.6, "generator": "downtown-demo", "elements": elements }).to_string()
}
