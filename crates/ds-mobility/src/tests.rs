//! Unit tests for ds-mobility.

use ds_core::{AgentId, GeoPoint, RandomSource, SimRng};

use crate::{Agent, AgentSet, KinematicsParams, MobilityError, advance, spawn_agents};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Replays a fixed list of draws, cycling when exhausted.
struct Scripted {
    values: Vec<f64>,
    next:   usize,
}

impl Scripted {
    fn new(values: &[f64]) -> Self {
        Self { values: values.to_vec(), next: 0 }
    }
}

impl RandomSource for Scripted {
    fn unit(&mut self) -> f64 {
        let v = self.values[self.next % self.values.len()];
        self.next += 1;
        v
    }
}

/// Speed draw 0, retarget coin never fires.
fn calm() -> Scripted {
    Scripted::new(&[0.0, 0.99])
}

fn agent(bearing: f64, target: f64, speed: f64) -> Agent {
    Agent {
        id: AgentId(0),
        pos: GeoPoint::new(0.0, 0.0),
        bearing,
        target_bearing: target,
        speed,
    }
}

// ── Spawning ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod spawning {
    use super::*;

    #[test]
    fn spawned_agent_is_stationary_and_aligned() {
        let a = Agent::spawn(AgentId(3), GeoPoint::new(1.0, 2.0), &mut Scripted::new(&[0.25]));
        assert_eq!(a.id, AgentId(3));
        assert_eq!(a.bearing, 90.0);
        assert_eq!(a.target_bearing, a.bearing);
        assert_eq!(a.speed, 0.0);
        assert_eq!((a.lat(), a.lon()), (1.0, 2.0));
    }

    #[test]
    fn ids_are_sequential_and_duplicates_allowed() {
        let p = GeoPoint::new(0.0, 0.0);
        let mut rng = SimRng::new(1);
        let agents = spawn_agents(&[p, p, p], AgentId(10), &mut rng);
        let ids: Vec<_> = agents.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![AgentId(10), AgentId(11), AgentId(12)]);
        assert!(agents.iter().all(|a| (0.0..360.0).contains(&a.bearing)));
    }
}

// ── Kinematics ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod kinematics {
    use super::*;

    #[test]
    fn turn_is_limited_clockwise() {
        // 45 °/s × 0.1 s = 4.5°.
        let next = advance(&agent(0.0, 90.0, 0.0), 100.0, &KinematicsParams::default(), &mut calm());
        assert!((next.bearing - 4.5).abs() < 1e-12, "got {}", next.bearing);
        assert_eq!(next.target_bearing, 90.0);
    }

    #[test]
    fn turn_takes_short_way_through_north() {
        let next = advance(&agent(10.0, 350.0, 0.0), 100.0, &KinematicsParams::default(), &mut calm());
        assert!((next.bearing - 5.5).abs() < 1e-12, "got {}", next.bearing);

        let wrap = advance(&agent(2.0, 300.0, 0.0), 100.0, &KinematicsParams::default(), &mut calm());
        assert!((wrap.bearing - 357.5).abs() < 1e-9, "got {}", wrap.bearing);
    }

    #[test]
    fn small_remaining_turn_lands_on_target() {
        let next = advance(&agent(88.0, 90.0, 0.0), 100.0, &KinematicsParams::default(), &mut calm());
        assert_eq!(next.bearing, 90.0);
    }

    #[test]
    fn speed_approaches_cruise_and_clamps() {
        let params = KinematicsParams::default();
        let cruise = params.coord_speed(30.0);

        // 2/s × 0.1 s = 20 % of the gap per frame.
        let half = advance(&agent(0.0, 0.0, 0.0), 100.0, &params, &mut calm());
        assert!((half.speed - 0.2 * cruise).abs() < 1e-15);

        // A full second overshoots the blend, so the target is reached exactly.
        let full = advance(&agent(0.0, 0.0, 0.0), 1000.0, &params, &mut calm());
        assert_eq!(full.speed, cruise);
    }

    #[test]
    fn moves_along_bearing() {
        let params = KinematicsParams::default();
        let north = advance(&agent(0.0, 0.0, 0.0), 1000.0, &params, &mut calm());
        assert!(north.pos.lat > 0.0);
        assert!(north.pos.lon.abs() < 1e-15);

        let east = advance(&agent(90.0, 90.0, 0.0), 1000.0, &params, &mut calm());
        assert!(east.pos.lon > 0.0);
        assert!(east.pos.lat.abs() < 1e-12);
    }

    #[test]
    fn retarget_nudges_and_renormalises() {
        // Speed draw, coin fires (0.0 < 0.02), offset draw 0.0 → -45°.
        let mut rng = Scripted::new(&[0.0, 0.0, 0.0]);
        let next = advance(&agent(10.0, 10.0, 0.0), 16.0, &KinematicsParams::default(), &mut rng);
        assert!((next.target_bearing - 325.0).abs() < 1e-9, "got {}", next.target_bearing);
    }

    #[test]
    fn zero_or_negative_dt_does_not_move() {
        let params = KinematicsParams::default();
        let start = agent(0.0, 90.0, 0.001);
        for dt in [0.0, -50.0, f64::NAN] {
            let next = advance(&start, dt, &params, &mut calm());
            assert_eq!(next.pos, start.pos);
            assert_eq!(next.bearing, 0.0);
            assert_eq!(next.speed, 0.001);
        }
    }

    #[test]
    fn invariants_hold_for_arbitrary_input() {
        let params = KinematicsParams::default();
        let mut rng = SimRng::new(42);
        let mut a = agent(-725.0, 1e6, -3.0);
        for i in 0..5_000 {
            let dt = (i % 97) as f64 * 3.7;
            a = advance(&a, dt, &params, &mut rng);
            assert!((0.0..360.0).contains(&a.bearing), "bearing {}", a.bearing);
            assert!((0.0..360.0).contains(&a.target_bearing), "target {}", a.target_bearing);
            assert!(a.speed >= 0.0 && a.speed.is_finite());
        }
    }

    #[test]
    fn validate_rejects_negative_and_nan() {
        assert!(KinematicsParams::default().validate().is_ok());
        let bad = KinematicsParams { acceleration: -1.0, ..Default::default() };
        assert_eq!(
            bad.validate(),
            Err(MobilityError::InvalidParameter { name: "acceleration", value: -1.0 }),
        );
        let nan = KinematicsParams { coord_per_km: f64::NAN, ..Default::default() };
        assert!(nan.validate().is_err());
    }
}

// ── AgentSet ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod agent_set {
    use super::*;

    #[test]
    fn ids_continue_across_respawns() {
        let p = GeoPoint::new(0.0, 0.0);
        let mut set = AgentSet::new();
        let mut rng = SimRng::new(1);
        set.respawn(&[p, p], &mut rng);
        set.respawn(&[p], &mut rng);
        assert_eq!(set.len(), 1);
        assert_eq!(set.snapshot()[0].id, AgentId(2));
    }

    #[test]
    fn snapshot_is_unaffected_by_later_frames() {
        let mut set = AgentSet::new();
        let mut rng = SimRng::new(9);
        set.respawn(&[GeoPoint::new(0.0, 0.0)], &mut rng);
        let before = set.snapshot();
        set.advance_all(500.0, &KinematicsParams::default(), &mut rng);
        let after = set.snapshot();
        assert_eq!(before[0].speed, 0.0);
        assert!(after[0].speed > 0.0);
        assert_ne!(before[0].pos, after[0].pos);
    }

    #[test]
    fn clear_empties() {
        let mut set = AgentSet::new();
        set.respawn(&[GeoPoint::new(0.0, 0.0)], &mut SimRng::new(1));
        set.clear();
        assert!(set.is_empty());
        set.advance_all(16.0, &KinematicsParams::default(), &mut SimRng::new(1));
        assert!(set.is_empty());
    }
}
