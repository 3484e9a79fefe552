//! downtown: smallest end-to-end run of the driver-sim engine.
//!
//! Spawns drivers around a click in a synthetic downtown street grid, asks
//! for a route to a second click, and records a few seconds of frames to
//! CSV.
//!
//! ```text
//! downtown [config.json] [--at LAT,LON] [--to LAT,LON]
//! ```
//!
//! The JSON config overrides the defaults; `--at` and `--to` override the
//! two clicks.  Set `RUST_LOG=debug` to see the spawn pipeline.

mod city;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;
use tracing_subscriber::EnvFilter;

use ds_core::{BoundingBox, FrameClock, GeoPoint, ManualFrameClock, SystemFrameClock};
use ds_output::{CsvWriter, FrameOutputObserver};
use ds_sim::{EngineConfig, Outcome, SimBuilder};
use ds_source::{StaticCandidateSource, StraightLineRouteSource, overpass_query};
use ds_spatial::{DistributionConfig, DistributionKind};

// ── Demo configuration ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
struct DemoConfig {
    engine:       EngineConfig,
    distribution: DistributionConfig,
    spawn_at:     GeoPoint,
    route_to:     GeoPoint,
    frames:       u64,
    /// Sleep between frames instead of stepping a manual clock.
    realtime:     bool,
    output_dir:   PathBuf,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            engine:       EngineConfig { seed: 42, ..Default::default() },
            distribution: DistributionConfig::new(DistributionKind::Gaussian, 8)
                .param(ds_spatial::weight::SIGMA, 0.08),
            spawn_at:     GeoPoint::new(30.6942, -88.0418),
            route_to:     GeoPoint::new(30.6965, -88.0385),
            frames:       300,
            realtime:     false,
            output_dir:   PathBuf::from("output/downtown"),
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<DemoConfig> {
    let Some(path) = path else {
        return Ok(DemoConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut config_path = None;
    let mut spawn_at = None;
    let mut route_to = None;
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--at" => spawn_at = Some(args.next().context("--at needs LAT,LON")?.parse::<GeoPoint>()?),
            "--to" => route_to = Some(args.next().context("--to needs LAT,LON")?.parse::<GeoPoint>()?),
            _ => config_path = Some(PathBuf::from(&arg)),
        }
    }
    let mut config = load_config(config_path.as_deref())?;
    config.spawn_at = spawn_at.unwrap_or(config.spawn_at);
    config.route_to = route_to.unwrap_or(config.route_to);
    info!(
        seed = config.engine.seed,
        kind = %config.distribution.kind,
        count = config.distribution.count,
        frames = config.frames,
        "starting downtown demo"
    );

    // 1. Candidate source.
    let mut candidates = StaticCandidateSource::from_json(&city::overpass_body())?;
    info!(elements = candidates.candidates.len(), "loaded synthetic street grid");
    let fetch_box = BoundingBox::around(config.spawn_at, config.engine.fetch_radius_km);
    tracing::debug!(query = %overpass_query(&fetch_box), "equivalent Overpass query");

    // 2. Engine.
    let mut sim = SimBuilder::new(config.engine.clone()).build()?;

    // 3. Spawn.
    match sim.request_spawn(&mut candidates, config.spawn_at, config.distribution.clone()) {
        Ok(_) => {}
        Err(e) if e.is_no_agents() => {
            println!("No agents spawned: {e}");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    }
    let origin = sim.origin().unwrap_or(config.spawn_at);
    println!("Spawned {} drivers around {origin}", sim.agents().len());

    // 4. Route.
    let mut clock: Box<dyn FrameClock> = if config.realtime {
        Box::new(SystemFrameClock::new())
    } else {
        Box::new(ManualFrameClock::default())
    };
    let mut routes = StraightLineRouteSource::default();
    match sim.request_route(&mut routes, config.route_to, clock.now())? {
        Outcome::Applied => println!(
            "Route: {} vertices, {:.3} km",
            sim.route().len(),
            sim.route().length_km()
        ),
        other => println!("Route not installed: {other:?}"),
    }

    // 5. Frames.
    let writer = CsvWriter::new(&config.output_dir)?;
    let mut obs = FrameOutputObserver::new(writer);
    let t0 = Instant::now();
    sim.run_frames(config.frames, clock.as_mut(), &mut obs);
    if let Some(e) = obs.take_error() {
        eprintln!("output error: {e}");
    }
    println!(
        "{} frames in {:.3} s, trail progress {:.2}, output in {}",
        sim.frames(),
        t0.elapsed().as_secs_f64(),
        sim.trail().progress(clock.now()),
        config.output_dir.display(),
    );
    println!();

    // 6. Final positions.
    println!("{:<14} {:>11} {:>12} {:>8} {:>9}", "Agent", "Lat", "Lon", "Bearing", "km/h");
    println!("{}", "-".repeat(58));
    let kmh_per_unit = 3600.0 / config.engine.kinematics.coord_per_km;
    for a in sim.agents().iter() {
        println!(
            "{:<14} {:>11.6} {:>12.6} {:>8.1} {:>9.1}",
            a.id.to_string(),
            a.lat(),
            a.lon(),
            a.bearing,
            a.speed * kmh_per_unit,
        );
    }

    Ok(())
}
