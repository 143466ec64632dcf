//! Integration tests for the rope simulator.
//!
//! These drive `RopeSimulator` through randomized step sequences and check
//! the properties that must hold for any sequence.

use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ropesim::{PolylineSink, Ribbon, RopeConfig, RopeError, RopeSimulator};

fn random_steps(rng: &mut StdRng, count: usize) -> Vec<f32> {
    (0..count).map(|_| rng.gen_range(0.001..0.05)).collect()
}

// ============================================================================
// Invariants
// ============================================================================

#[test]
fn test_anchors_fixed_under_random_steps() {
    let mut rng = StdRng::seed_from_u64(7);

    for count in [2, 3, 5, 10, 40] {
        let config = RopeConfig::default()
            .with_node_count(count)
            .with_tension(rng.gen_range(0.1..3.0));
        let mut rope = RopeSimulator::new(config).unwrap();
        let first = rope.nodes()[0];
        let last = rope.nodes()[count - 1];

        for dt in random_steps(&mut rng, 300) {
            rope.step(dt);
        }

        assert_eq!(rope.nodes()[0].position, first.position);
        assert_eq!(rope.nodes()[0].velocity, Vec3::ZERO);
        assert_eq!(rope.nodes()[count - 1].position, last.position);
        assert_eq!(rope.nodes()[count - 1].velocity, Vec3::ZERO);
    }
}

#[test]
fn test_damping_monotone_and_bounded() {
    let mut rng = StdRng::seed_from_u64(11);
    let config = RopeConfig::default()
        .with_node_count(12)
        .with_damping(0.05, 0.8, 0.4);
    let max = config.max_damping;
    let mut rope = RopeSimulator::new(config).unwrap();

    let mut previous: Vec<f32> = rope.nodes().iter().map(|n| n.damping).collect();
    for dt in random_steps(&mut rng, 500) {
        rope.step(dt);

        let interior = &rope.nodes()[1..rope.len() - 1];
        for (node, before) in interior.iter().zip(&previous[1..]) {
            assert!(node.damping >= *before);
            assert!(node.damping <= max);
        }
        previous = rope.nodes().iter().map(|n| n.damping).collect();
    }
}

#[test]
fn test_damping_saturates_exactly() {
    let config = RopeConfig::default()
        .with_node_count(8)
        .with_damping(0.0, 0.6, 0.5);
    let mut rope = RopeSimulator::new(config).unwrap();

    // 0.6 / 0.5 = 1.2s of ramp is enough; run for 3s.
    for _ in 0..300 {
        rope.step(0.01);
    }

    for node in &rope.nodes()[1..7] {
        assert_eq!(node.damping, 0.6);
    }
}

#[test]
fn test_node_count_is_stable() {
    let mut rope = RopeSimulator::new(RopeConfig::default().with_node_count(17)).unwrap();
    for _ in 0..50 {
        rope.step(0.02);
        assert_eq!(rope.positions().len(), 17);
    }
    rope.reset();
    assert_eq!(rope.len(), 17);
}

#[test]
fn test_zero_dt_changes_nothing_mid_simulation() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut rope = RopeSimulator::new(RopeConfig::default()).unwrap();
    for dt in random_steps(&mut rng, 40) {
        rope.step(dt);
    }

    let before = rope.nodes().to_vec();
    for _ in 0..25 {
        rope.step(0.0);
    }
    assert_eq!(rope.nodes(), before.as_slice());
}

// ============================================================================
// Physics behaviour
// ============================================================================

#[test]
fn test_straight_rope_at_rest_length_feels_no_tension() {
    let rope = RopeSimulator::new(RopeConfig::default().with_gravity(0.0)).unwrap();
    let nodes = rope.nodes();

    let mut a = nodes[0];
    let mut b = nodes[1];
    a.position = Vec3::new(0.0, 1.0, 0.0);
    b.position = Vec3::new(1.0, 1.0, 0.0);
    assert!(rope.tension_force(&a, &b).abs_diff_eq(Vec3::ZERO, 1e-6));
    assert!(rope.tension_force(&b, &a).abs_diff_eq(Vec3::ZERO, 1e-6));
}

#[test]
fn test_interior_sags_under_gravity() {
    let mut rope = RopeSimulator::new(RopeConfig::default()).unwrap();
    let initial = rope.positions();

    for _ in 0..60 {
        rope.step(1.0 / 60.0);
    }

    let after = rope.positions();
    for i in 1..after.len() - 1 {
        assert!(after[i].y < initial[i].y, "node {i} did not fall");
        assert!(after[i].z.abs() < 1e-6, "node {i} left the plane");
    }
}

#[test]
fn test_ramped_rope_settles() {
    let config = RopeConfig::default()
        .with_node_count(20)
        .with_damping(0.2, 2.0, 0.5);
    let mut rope = RopeSimulator::new(config).unwrap();

    for _ in 0..2_000 {
        rope.step(1.0 / 60.0);
    }

    for p in rope.positions() {
        assert!(p.is_finite());
        assert!(p.y > -50.0 && p.y < 10.0, "runaway node at {p:?}");
    }
    for node in rope.nodes() {
        assert!(node.velocity.length() < 0.01, "still moving: {node:?}");
    }
}

#[test]
fn test_independent_instances_step_in_parallel() {
    let handles: Vec<_> = (0..4)
        .map(|i| {
            std::thread::spawn(move || {
                let config = RopeConfig::default().with_node_count(5 + i);
                let mut rope = RopeSimulator::new(config).unwrap();
                for _ in 0..100 {
                    rope.step(0.01);
                }
                rope.positions()
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let positions = handle.join().unwrap();
        let mut serial = RopeSimulator::new(RopeConfig::default().with_node_count(5 + i)).unwrap();
        for _ in 0..100 {
            serial.step(0.01);
        }
        assert_eq!(positions, serial.positions());
    }
}

// ============================================================================
// Configuration and rendering seam
// ============================================================================

#[test]
fn test_invalid_counts_rejected() {
    for count in [0, 1] {
        match RopeSimulator::new(RopeConfig::default().with_node_count(count)) {
            Err(RopeError::InvalidConfiguration { reason }) => {
                assert!(reason.contains("node_count"));
            }
            other => panic!("expected InvalidConfiguration, got {other:?}"),
        }
    }
}

#[test]
fn test_config_from_json_builds_rope() {
    let config = RopeConfig::from_json_str(
        r#"{ "node_count": 6, "segment_length": 0.5, "tension": 1.0, "line_width": 0.05 }"#,
    )
    .unwrap();
    let rope = RopeSimulator::new(config).unwrap();

    let p = rope.positions();
    assert_eq!(p.len(), 6);
    assert!((p[0].x - -1.0).abs() < 1e-6);
    assert!((p[5].x - 1.5).abs() < 1e-6);
}

#[test]
fn test_ribbon_from_rope_has_two_vertices_per_node() {
    let mut rope = RopeSimulator::new(RopeConfig::default()).unwrap();
    rope.step(0.016);

    let mut ribbon = Ribbon::default();
    rope.render_to(&mut ribbon);
    assert_eq!(ribbon.len(), 20);

    let points = rope.positions();
    for (pair, point) in ribbon.vertices().chunks(2).zip(&points) {
        let a = Vec3::from_array(pair[0].position);
        let b = Vec3::from_array(pair[1].position);
        assert!(((a - b).length() - 0.1).abs() < 1e-5);
        assert!(((a + b) * 0.5).abs_diff_eq(*point, 1e-5));
    }
}

#[test]
fn test_custom_sink_receives_every_frame() {
    #[derive(Default)]
    struct Frames(Vec<Vec<Vec3>>);

    impl PolylineSink for Frames {
        fn draw_polyline(&mut self, points: &[Vec3], _width: f32) {
            self.0.push(points.to_vec());
        }
    }

    let mut rope = RopeSimulator::new(RopeConfig::default().with_node_count(4)).unwrap();
    let mut frames = Frames::default();
    for _ in 0..5 {
        rope.step(0.02);
        rope.render_to(&mut frames);
    }

    assert_eq!(frames.0.len(), 5);
    assert!(frames.0.iter().all(|f| f.len() == 4));
    assert_ne!(frames.0[0], frames.0[4]);
}
