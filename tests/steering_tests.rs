#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use aquarium::simulation::fish::{Fish, SteeringMode};
use aquarium::simulation::geometric_utils::Bounds;
use aquarium::simulation::locatable::Locatable;
use aquarium::simulation::params::Params;
use aquarium::simulation::steering::{steer, steer_all};
use ndarray::Array1;

fn fish_at(x: f32, y: f32, vx: f32, vy: f32) -> Fish {
    Fish::new(
        0,
        Array1::from_vec(vec![x, y]),
        Array1::from_vec(vec![vx, vy]),
        30.0,
        0,
        1.0,
    )
}

#[test]
fn test_free_roam_moves_by_velocity() {
    let params = Params::default();
    let bounds = Bounds::new(800.0, 600.0);
    let mut fish = fish_at(100.0, 200.0, 2.5, -1.5);

    steer(&mut fish, &bounds, &params);

    assert_eq!(fish.pos[0], 102.5);
    assert_eq!(fish.pos[1], 198.5);
    assert_eq!(fish.vel[0], 2.5);
    assert_eq!(fish.vel[1], -1.5);
}

#[test]
fn test_free_roam_bounces_off_left_wall() {
    let params = Params::default();
    let bounds = Bounds::new(800.0, 600.0);
    let mut fish = fish_at(1.0, 200.0, -3.0, 1.0);

    steer(&mut fish, &bounds, &params);

    assert_eq!(fish.pos[0], 0.0);
    assert_eq!(fish.vel[0], 3.0);
    assert_eq!(fish.pos[1], 201.0);
    assert_eq!(fish.vel[1], 1.0);
}

#[test]
fn test_free_roam_bounces_off_bottom_right_corner() {
    let params = Params::default();
    let bounds = Bounds::new(800.0, 600.0);
    // limits are 770 x 570 for a fish of size 30
    let mut fish = fish_at(769.0, 569.0, 2.0, 2.0);

    steer(&mut fish, &bounds, &params);

    assert_eq!(fish.pos[0], 770.0);
    assert_eq!(fish.pos[1], 570.0);
    assert_eq!(fish.vel[0], -2.0);
    assert_eq!(fish.vel[1], -2.0);
}

#[test]
fn test_chasing_moves_at_boosted_speed() {
    let params = Params::default();
    let bounds = Bounds::new(800.0, 600.0);
    let mut fish = fish_at(100.0, 100.0, 2.0, 0.0);
    fish.chase(Array1::from_vec(vec![415.0, 115.0]));

    steer(&mut fish, &bounds, &params);

    // base speed 2 * lure factor 3 along +x
    assert!((fish.pos[0] - 106.0).abs() < 1e-4);
    assert!((fish.pos[1] - 100.0).abs() < 1e-4);
    // roaming velocity is untouched while chasing
    assert_eq!(fish.vel[0], 2.0);
}

#[test]
fn test_chasing_against_wall_is_clamped_without_bounce() {
    let params = Params::default();
    let bounds = Bounds::new(800.0, 600.0);
    let mut fish = fish_at(1.0, 100.0, -2.0, 0.0);
    fish.chase(Array1::from_vec(vec![-500.0, 115.0]));

    for _ in 0..5 {
        steer(&mut fish, &bounds, &params);
    }

    assert_eq!(fish.pos[0], 0.0);
    assert_eq!(fish.vel[0], -2.0);
}

#[test]
fn test_direction_survives_mode_switch() {
    let params = Params::default();
    let bounds = Bounds::new(800.0, 600.0);
    let mut fish = fish_at(300.0, 300.0, 1.0, 2.0);

    fish.chase(Array1::from_vec(vec![10.0, 10.0]));
    steer(&mut fish, &bounds, &params);
    fish.release();
    assert_eq!(fish.mode, SteeringMode::FreeRoam);

    let before = fish.pos.clone();
    steer(&mut fish, &bounds, &params);
    assert!((fish.pos[0] - (before[0] + 1.0)).abs() < 1e-4);
    assert!((fish.pos[1] - (before[1] + 2.0)).abs() < 1e-4);
}

#[test]
fn test_steer_all_matches_sequential_steering() {
    let params = Params::default();
    let bounds = Bounds::new(800.0, 600.0);
    let mut parallel: Vec<Fish> = (0..20)
        .map(|i| fish_at(i as f32 * 35.0, 10.0 + i as f32 * 25.0, 3.0, -2.0))
        .collect();
    let mut sequential = parallel.clone();

    steer_all(&mut parallel, &bounds, &params);
    for fish in &mut sequential {
        steer(fish, &bounds, &params);
    }

    for (a, b) in parallel.iter().zip(sequential.iter()) {
        assert_eq!(a.pos(), b.pos());
        assert_eq!(a.vel, b.vel);
    }
}
