//! Unit tests for ds-spatial.
//!
//! All tests use hand-built candidate sets so they run without any upstream
//! data source.

#[cfg(test)]
mod helpers {
    use ds_core::RandomSource;

    use crate::CandidatePoint;

    /// Replays a fixed list of draws, cycling when exhausted.
    pub struct Scripted {
        values: Vec<f64>,
        next:   usize,
    }

    impl Scripted {
        pub fn new(values: &[f64]) -> Self {
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

    /// Largest `f64` strictly below 1.
    pub const MAX_UNIT: f64 = 1.0 - f64::EPSILON / 2.0;

    /// Candidates due north of (0, 0) at the given distances in km.
    pub fn north_line(distances_km: &[f64]) -> Vec<CandidatePoint> {
        distances_km
            .iter()
            .map(|d| CandidatePoint::new(d / 111.195, 0.0))
            .collect()
    }
}

// ── Tag requirements & filter ─────────────────────────────────────────────────

#[cfg(test)]
mod filter {
    use ds_core::GeoPoint;

    use crate::{RawCandidate, SPAWN_VICINITY_KM, TagRequirement, filter_candidates};

    #[test]
    fn parse_forms() {
        assert_eq!(TagRequirement::parse("highway"), TagRequirement::Present("highway".into()));
        assert_eq!(
            TagRequirement::parse("highway=residential"),
            TagRequirement::Equals("highway".into(), "residential".into()),
        );
        assert_eq!(TagRequirement::parse("name="), TagRequirement::Present("name".into()));
        assert_eq!(
            TagRequirement::parse("a=b=c"),
            TagRequirement::Equals("a".into(), "b=c".into()),
        );
    }

    #[test]
    fn drops_missing_and_non_finite_coordinates() {
        let raw = vec![
            RawCandidate::at(0.0, 0.0),
            RawCandidate { lat: None, ..RawCandidate::at(0.0, 0.0) },
            RawCandidate { lon: Some(f64::NAN), ..RawCandidate::at(0.0, 0.0) },
            RawCandidate { lat: Some(f64::INFINITY), ..RawCandidate::at(0.0, 0.0) },
        ];
        assert_eq!(raw[3].position(), None);
        let out = filter_candidates(&raw, GeoPoint::new(0.0, 0.0), SPAWN_VICINITY_KM, &[]);
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn radius_is_inclusive_and_order_preserved() {
        let center = GeoPoint::new(0.0, 0.0);
        let raw = vec![
            RawCandidate::at(0.005, 0.0), // ~0.56 km
            RawCandidate::at(0.02, 0.0),  // ~2.2 km
            RawCandidate::at(0.0, 0.001), // ~0.11 km
        ];
        let out = filter_candidates(&raw, center, 1.0, &[]);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].pos.lat, 0.005);
        assert_eq!(out[1].pos.lon, 0.001);

        let exact = raw[2].position().unwrap().distance_km(center);
        assert_eq!(filter_candidates(&raw[2..], center, exact, &[]).len(), 1);
    }

    #[test]
    fn tag_predicates() {
        let center = GeoPoint::new(0.0, 0.0);
        let raw = vec![
            RawCandidate::at(0.0, 0.0).with_tag("highway", "residential"),
            RawCandidate::at(0.0, 0.0).with_tag("highway", "primary"),
            RawCandidate::at(0.0, 0.0).with_tag("highway", ""),
            RawCandidate::at(0.0, 0.0),
        ];

        let present = [TagRequirement::parse("highway")];
        assert_eq!(filter_candidates(&raw, center, 1.0, &present).len(), 2);

        let exact = [TagRequirement::parse("highway=primary")];
        let out = filter_candidates(&raw, center, 1.0, &exact);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].tags["highway"], "primary");

        let both = [TagRequirement::parse("highway"), TagRequirement::parse("oneway=yes")];
        assert!(filter_candidates(&raw, center, 1.0, &both).is_empty());
    }

    #[test]
    fn empty_input_is_valid() {
        assert!(filter_candidates(&[], GeoPoint::new(0.0, 0.0), 1.0, &[]).is_empty());
    }
}

// ── Weights ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod weights {
    use ds_core::GeoPoint;

    use super::helpers::north_line;
    use crate::weight::{DENSITY_RADIUS, MAX_DISTANCE, SIGMA};
    use crate::{CandidatePoint, DistributionConfig, DistributionKind, compute_weights};

    const ORIGIN: GeoPoint = GeoPoint { lat: 0.0, lon: 0.0 };

    fn assert_non_increasing(w: &[f64]) {
        for pair in w.windows(2) {
            assert!(pair[1] <= pair[0], "weights increased with distance: {w:?}");
        }
    }

    #[test]
    fn uniform_is_all_ones() {
        let c = north_line(&[0.0, 0.5, 0.9]);
        let w = compute_weights(&c, ORIGIN, &DistributionConfig::new(DistributionKind::Uniform, 1));
        assert_eq!(w, vec![1.0, 1.0, 1.0]);
    }

    #[test]
    fn gaussian_peaks_at_center_and_decays() {
        let c = north_line(&[0.0, 0.01, 0.05, 0.1, 0.5]);
        let w = compute_weights(&c, ORIGIN, &DistributionConfig::new(DistributionKind::Gaussian, 1));
        assert!((w[0] - 1.0).abs() < 1e-12);
        // d = σ → exp(-1/2)
        assert!((w[2] - (-0.5f64).exp()).abs() < 1e-3, "got {}", w[2]);
        assert_non_increasing(&w);
        assert!(w.iter().all(|x| x.is_finite() && *x >= 0.0));
    }

    #[test]
    fn gaussian_sigma_param_widens() {
        let c = north_line(&[0.1]);
        let narrow = compute_weights(&c, ORIGIN, &DistributionConfig::new(DistributionKind::Gaussian, 1));
        let wide = compute_weights(
            &c,
            ORIGIN,
            &DistributionConfig::new(DistributionKind::Gaussian, 1).param(SIGMA, 0.5),
        );
        assert!(wide[0] > narrow[0]);
    }

    #[test]
    fn distance_weighted_linear_and_clipped() {
        let c = north_line(&[0.0, 0.075, 0.15, 0.3]);
        let w = compute_weights(
            &c,
            ORIGIN,
            &DistributionConfig::new(DistributionKind::DistanceWeighted, 1),
        );
        assert!((w[0] - 1.0).abs() < 1e-12);
        assert!((w[1] - 0.5).abs() < 1e-3, "got {}", w[1]);
        assert!(w[2].abs() < 1e-3);
        assert_eq!(w[3], 0.0);
        assert_non_increasing(&w);
    }

    #[test]
    fn unusable_params_fall_back_to_defaults() {
        let c = north_line(&[0.075]);
        let default = compute_weights(
            &c,
            ORIGIN,
            &DistributionConfig::new(DistributionKind::DistanceWeighted, 1),
        );
        for bad in [0.0, -1.0, f64::NAN] {
            let w = compute_weights(
                &c,
                ORIGIN,
                &DistributionConfig::new(DistributionKind::DistanceWeighted, 1).param(MAX_DISTANCE, bad),
            );
            assert_eq!(w, default);
        }
    }

    #[test]
    fn density_counts_self_and_neighbours() {
        // Two points 1 m apart, one 1 km away.
        let c = vec![
            CandidatePoint::new(0.0, 0.0),
            CandidatePoint::new(0.000009, 0.0),
            CandidatePoint::new(0.009, 0.0),
        ];
        let w = compute_weights(
            &c,
            ORIGIN,
            &DistributionConfig::new(DistributionKind::DensityBased, 1),
        );
        assert!((w[0] - 2.0 / 3.0).abs() < 1e-12);
        assert!((w[1] - 2.0 / 3.0).abs() < 1e-12);
        assert!((w[2] - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn density_radius_param_and_alias() {
        let c = vec![CandidatePoint::new(0.0, 0.0), CandidatePoint::new(0.0009, 0.0)]; // ~100 m
        let cfg = |name: &str| {
            DistributionConfig::new(DistributionKind::DensityBased, 1).param(name, 0.2)
        };
        assert_eq!(compute_weights(&c, ORIGIN, &cfg(DENSITY_RADIUS)), vec![1.0, 1.0]);
        assert_eq!(compute_weights(&c, ORIGIN, &cfg("radius")), vec![1.0, 1.0]);
        let default = DistributionConfig::new(DistributionKind::DensityBased, 1);
        assert_eq!(compute_weights(&c, ORIGIN, &default), vec![0.5, 0.5]);
    }

    #[test]
    fn weights_align_with_input() {
        let c = north_line(&[0.2, 0.0, 0.1]);
        for kind in [
            DistributionKind::Uniform,
            DistributionKind::Gaussian,
            DistributionKind::DistanceWeighted,
            DistributionKind::DensityBased,
        ] {
            let w = compute_weights(&c, ORIGIN, &DistributionConfig::new(kind, 1));
            assert_eq!(w.len(), c.len(), "{kind}");
        }
    }
}

// ── Sampler ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod sampler {
    use std::collections::HashSet;

    use ds_core::SimRng;

    use super::helpers::{MAX_UNIT, Scripted};
    use crate::{SelectionError, normalize_weights, sample_indices};

    #[test]
    fn empty_fails_fast() {
        let mut rng = SimRng::new(1);
        assert_eq!(sample_indices(&[], 3, false, &mut rng), Err(SelectionError::EmptyCandidateSet));
        assert_eq!(sample_indices(&[], 0, true, &mut rng), Err(SelectionError::EmptyCandidateSet));
    }

    #[test]
    fn zero_total_is_degenerate() {
        let mut rng = SimRng::new(1);
        let result = sample_indices(&[0.0, 0.0], 1, false, &mut rng);
        assert!(matches!(result, Err(SelectionError::NumericDegenerate { .. })));
        let invalid = sample_indices(&[f64::NAN, -2.0], 1, false, &mut rng);
        assert!(matches!(invalid, Err(SelectionError::NumericDegenerate { .. })));
    }

    #[test]
    fn normalized_sums_to_one() {
        let n = normalize_weights(&[1.0, 3.0, f64::INFINITY, 4.0]).unwrap();
        assert_eq!(n[2], 0.0);
        assert!((n.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        assert!((n[1] - 0.375).abs() < 1e-12);
    }

    #[test]
    fn count_without_duplicates_is_min() {
        let mut rng = SimRng::new(7);
        for count in [0, 1, 3, 5, 12] {
            let out = sample_indices(&[1.0; 5], count, false, &mut rng).unwrap();
            assert_eq!(out.len(), count.min(5));
            let distinct: HashSet<_> = out.iter().collect();
            assert_eq!(distinct.len(), out.len(), "duplicate in {out:?}");
        }
    }

    #[test]
    fn count_with_duplicates_is_exact() {
        let mut rng = SimRng::new(7);
        for count in [0, 1, 5, 50] {
            let out = sample_indices(&[1.0, 2.0], count, true, &mut rng).unwrap();
            assert_eq!(out.len(), count);
        }
    }

    #[test]
    fn zero_weight_candidates_drawn_last() {
        let mut rng = SimRng::new(3);
        for _ in 0..200 {
            let out = sample_indices(&[0.0, 1.0, 0.0], 3, false, &mut rng).unwrap();
            assert_eq!(out[0], 1);
            assert_eq!(out.len(), 3);
        }
    }

    #[test]
    fn scripted_draw_walks_cumulative_sum() {
        // normalised [0.25, 0.25, 0.5]: u = 0.3 lands in the second slot.
        let mut rng = Scripted::new(&[0.3]);
        assert_eq!(sample_indices(&[1.0, 1.0, 2.0], 1, false, &mut rng).unwrap(), vec![1]);
        let mut rng = Scripted::new(&[0.0]);
        assert_eq!(sample_indices(&[0.0, 1.0, 2.0], 1, false, &mut rng).unwrap(), vec![1]);
    }

    #[test]
    fn rounding_shortfall_falls_back_to_first_available() {
        // Seven normalised weights of 1/7 sum to 0.9999999999999998 < MAX_UNIT.
        let weights = [1.0; 7];
        let normalized = normalize_weights(&weights).unwrap();
        let total: f64 = normalized.iter().sum();
        assert!(total < MAX_UNIT, "setup: sum {total} must fall short of the draw");

        let mut rng = Scripted::new(&[MAX_UNIT]);
        assert_eq!(sample_indices(&weights, 1, false, &mut rng).unwrap(), vec![0]);

        // Index 0 is gone for the second draw; the first *available* is 1.
        let mut rng = Scripted::new(&[MAX_UNIT, MAX_UNIT]);
        assert_eq!(sample_indices(&weights, 2, false, &mut rng).unwrap(), vec![0, 1]);

        // With duplicates the first available stays index 0.
        let mut rng = Scripted::new(&[MAX_UNIT]);
        assert_eq!(sample_indices(&weights, 3, true, &mut rng).unwrap(), vec![0, 0, 0]);
    }

    #[test]
    fn uniform_frequencies_pass_chi_squared() {
        const DRAWS: usize = 100_000;
        const N: usize = 5;
        let mut rng = SimRng::new(2024);
        let out = sample_indices(&[1.0; N], DRAWS, true, &mut rng).unwrap();

        let mut counts = [0usize; N];
        for i in out {
            counts[i] += 1;
        }
        let expected = DRAWS as f64 / N as f64;
        let chi2: f64 = counts
            .iter()
            .map(|&c| (c as f64 - expected).powi(2) / expected)
            .sum();
        // 4 degrees of freedom; 30.0 is far beyond the 0.999 quantile (18.47).
        assert!(chi2 < 30.0, "chi² = {chi2}, counts = {counts:?}");
    }

    #[test]
    fn selection_independent_of_position() {
        const DRAWS: usize = 100_000;
        let share_of_light = |weights: [f64; 2], light: usize| {
            let mut rng = SimRng::new(99);
            let out = sample_indices(&weights, DRAWS, true, &mut rng).unwrap();
            out.iter().filter(|&&i| i == light).count() as f64 / DRAWS as f64
        };
        let first = share_of_light([1.0, 3.0], 0);
        let last = share_of_light([3.0, 1.0], 1);
        assert!((first - 0.25).abs() < 0.01, "got {first}");
        assert!((last - 0.25).abs() < 0.01, "got {last}");
    }

    #[test]
    fn without_replacement_has_no_first_index_bias() {
        // Each of four equal candidates should appear in a pair half the time.
        const TRIALS: usize = 40_000;
        let mut rng = SimRng::new(5);
        let mut hits = [0usize; 4];
        for _ in 0..TRIALS {
            for i in sample_indices(&[1.0; 4], 2, false, &mut rng).unwrap() {
                hits[i] += 1;
            }
        }
        for (i, &h) in hits.iter().enumerate() {
            let share = h as f64 / TRIALS as f64;
            assert!((share - 0.5).abs() < 0.02, "index {i}: {share}");
        }
    }
}

// ── Nearest-candidate index ───────────────────────────────────────────────────

#[cfg(test)]
mod index {
    use ds_core::GeoPoint;

    use crate::{CandidateIndex, CandidatePoint};

    #[test]
    fn empty_index_has_no_nearest() {
        let idx = CandidateIndex::build(&[]);
        assert!(idx.is_empty());
        assert_eq!(idx.nearest(GeoPoint::new(0.0, 0.0)), None);
    }

    #[test]
    fn finds_closest_point() {
        let c = vec![
            CandidatePoint::new(51.500, -0.120),
            CandidatePoint::new(51.507, -0.127),
            CandidatePoint::new(51.520, -0.100),
        ];
        let idx = CandidateIndex::build(&c);
        assert_eq!(idx.len(), 3);
        assert_eq!(idx.nearest(GeoPoint::new(51.5071, -0.1268)), Some(1));
        assert_eq!(idx.nearest(GeoPoint::new(51.6, -0.09)), Some(2));
    }

    #[test]
    fn reranks_by_ground_distance() {
        // At 60°N a degree of longitude is half a degree of latitude on the
        // ground: 0.003° east (~167 m) beats 0.002° north (~222 m).
        let c = vec![CandidatePoint::new(60.002, 10.0), CandidatePoint::new(60.0, 10.003)];
        let idx = CandidateIndex::build(&c);
        assert_eq!(idx.nearest(GeoPoint::new(60.0, 10.0)), Some(1));
    }
}
