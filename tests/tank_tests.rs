#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use aquarium::simulation::event_log::EventKind;
use aquarium::simulation::fish::{Fish, SteeringMode};
use aquarium::simulation::food::FoodItem;
use aquarium::simulation::level::GameState;
use aquarium::simulation::locatable::Locatable;
use aquarium::simulation::params::{FeedingMode, Params};
use aquarium::simulation::tank::{DropOutcome, Notification, Tank};
use ndarray::Array1;

/// Default parameters with the food timer pushed out of reach.
fn quiet_params() -> Params {
    Params {
        food_interval_min: 1.0e9,
        food_interval_max: 1.0e9,
        ..Params::default()
    }
}

/// Lines the fish up along y = 100, motionless and far apart.
fn spread(tank: &mut Tank) {
    for (i, fish) in tank.fish.iter_mut().enumerate() {
        fish.pos = Array1::from_vec(vec![50.0 + i as f32 * 100.0, 100.0]);
        fish.vel = Array1::zeros(2);
    }
}

fn point(x: f32, y: f32) -> Array1<f32> {
    Array1::from_vec(vec![x, y])
}

fn tick(tank: &mut Tank, dt: f32) {
    let bounds = tank.params().bounds();
    tank.tick(dt, bounds);
}

#[test]
fn test_tank_creation() {
    let tank = Tank::with_seed(quiet_params(), 1);

    assert_eq!(tank.fish.len(), 5);
    assert!(tank.food.is_empty());
    assert_eq!(tank.level.level(), 1);
    assert_eq!(tank.level.deaths(), 0);
    assert_eq!(tank.panel.charges(), 0);
    assert_eq!(tank.state(), GameState::Running(1));

    let mut ids: Vec<usize> = tank.fish.iter().map(|f| f.id).collect();
    ids.dedup();
    assert_eq!(ids.len(), 5);
    for fish in &tank.fish {
        assert_eq!(fish.size, 30.0);
        assert_eq!(fish.speed_multiplier(), 1.0);
        assert_eq!(fish.eat_count, 0);
        assert_eq!(fish.mode, SteeringMode::FreeRoam);
    }
}

#[test]
fn test_three_meals_add_one_fish() {
    let mut tank = Tank::with_seed(quiet_params(), 1);
    let id = tank.fish[0].id;

    for _ in 0..3 {
        assert!(tank.feed_fish(id));
    }

    assert_eq!(tank.fish.len(), 6);
    let parent = tank.fish.iter().find(|f| f.id == id).unwrap().clone();
    assert_eq!(parent.eat_count, 0);

    let child = tank.fish.last().unwrap();
    assert_ne!(child.id, id);
    assert_eq!(child.eat_count, 0);
    assert_eq!(child.size, parent.size);
    assert_eq!(child.pos, parent.pos);
    assert_eq!(tank.stats.total_births, 1);
    assert_eq!(tank.event_log.count_of(EventKind::Reproduction), 1);
    assert_eq!(
        tank.event_log.latest().map(|e| e.kind),
        Some(EventKind::Reproduction)
    );
}

#[test]
fn test_feeding_unknown_fish_is_a_no_op() {
    let mut tank = Tank::with_seed(quiet_params(), 1);
    assert!(!tank.feed_fish(12_345));
    assert_eq!(tank.fish.len(), 5);
}

#[test]
fn test_drop_feeds_fish_in_reach() {
    let mut tank = Tank::with_seed(quiet_params(), 4);
    spread(&mut tank);
    let id = tank.fish[0].id;
    let center = tank.fish[0].center();

    assert_eq!(tank.on_drag_release(center.clone()), DropOutcome::NoCharge);
    assert_eq!(tank.fish[0].size, 30.0);

    tank.add_food_charge();
    tank.add_food_charge();

    let drop = point(center[0] + 20.0, center[1]);
    assert_eq!(tank.on_drag_release(drop), DropOutcome::Fed(id));
    assert_eq!(tank.panel.charges(), 1);
    assert!((tank.fish[0].size - 33.0).abs() < 1e-4);
    assert_eq!(tank.fish[0].eat_count, 1);
}

#[test]
fn test_drop_out_of_reach_keeps_the_charge() {
    let mut tank = Tank::with_seed(quiet_params(), 4);
    spread(&mut tank);
    tank.add_food_charge();

    assert_eq!(tank.on_drag_release(point(400.0, 550.0)), DropOutcome::Missed);
    assert_eq!(tank.on_drag_release(point(-5.0, 10.0)), DropOutcome::Outside);
    assert_eq!(tank.panel.charges(), 1);
    assert!(tank.fish.iter().all(|f| f.size == 30.0));
}

#[test]
fn test_drag_lures_every_fish() {
    let mut tank = Tank::with_seed(quiet_params(), 5);
    let lure = point(400.0, 300.0);

    tank.on_drag_move(lure.clone());

    assert!(
        tank.fish
            .iter()
            .all(|f| f.mode == SteeringMode::Chasing(lure.clone()))
    );
    assert_eq!(tank.snapshot().lure, Some([400.0, 300.0]));

    let before: Vec<f32> = tank
        .fish
        .iter()
        .map(|f| aquarium::simulation::geometric_utils::distance(&f.center(), &lure))
        .collect();
    tick(&mut tank, 16.0);
    for (fish, old) in tank.fish.iter().zip(before) {
        let now = aquarium::simulation::geometric_utils::distance(&fish.center(), &lure);
        assert!(now <= old + 1e-3);
    }

    tank.on_drag_release(point(-1.0, -1.0));
    assert!(tank.fish.iter().all(|f| f.mode == SteeringMode::FreeRoam));
    assert!(tank.lure().is_none());
}

#[test]
fn test_charges_are_capped() {
    let mut tank = Tank::with_seed(quiet_params(), 6);

    for _ in 0..20 {
        tank.add_food_charge();
    }

    assert_eq!(tank.panel.charges(), 15);
    assert!(tank.food.is_empty());
}

#[test]
fn test_food_timer_adds_charges() {
    let params = Params {
        food_interval_min: 100.0,
        food_interval_max: 100.0,
        ..Params::default()
    };
    let mut tank = Tank::with_seed(params, 7);
    spread(&mut tank);

    tick(&mut tank, 100.0);
    assert_eq!(tank.panel.charges(), 1);

    tick(&mut tank, 250.0);
    assert_eq!(tank.panel.charges(), 3);
    assert!((tank.time - 350.0).abs() < 1e-3);
}

#[test]
fn test_level_completion_reseeds() {
    let mut tank = Tank::with_seed(quiet_params(), 2);
    spread(&mut tank);
    for i in 0..5 {
        let mut extra = tank.fish[i].clone();
        extra.id = 100 + i;
        extra.pos = point(50.0 + i as f32 * 100.0, 400.0);
        tank.fish.push(extra);
    }
    for _ in 0..3 {
        tank.add_food_charge();
    }

    tick(&mut tank, 16.0);

    assert_eq!(
        tank.drain_notifications(),
        vec![Notification::LevelComplete { level: 1 }]
    );
    assert_eq!(tank.state(), GameState::Running(2));
    assert_eq!(tank.level.level(), 2);
    assert_eq!(tank.fish.len(), 5);
    assert_eq!(tank.level.deaths(), 0);
    assert_eq!(tank.panel.charges(), 0);
    assert_eq!(tank.snapshot().target_population, 12);
    for fish in &tank.fish {
        assert!((fish.speed_multiplier() - 1.2).abs() < 1e-6);
        assert!(fish.color < 5);
        assert_eq!(fish.size, 30.0);
    }
}

#[test]
fn test_fifth_death_defeats_the_run() {
    let mut tank = Tank::with_seed(quiet_params(), 3);
    spread(&mut tank);
    tank.fish[0].size = 100.0;
    tank.fish[0].pos = point(300.0, 200.0);
    for fish in tank.fish.iter_mut().skip(1) {
        fish.pos = point(335.0, 235.0);
    }

    tick(&mut tank, 16.0);

    assert_eq!(tank.level.deaths(), 4);
    assert_eq!(tank.fish.len(), 1);
    assert_eq!(tank.state(), GameState::Running(1));
    assert!(tank.drain_notifications().is_empty());

    tank.fish.push(Fish::new(
        999,
        point(335.0, 235.0),
        Array1::zeros(2),
        30.0,
        0,
        1.0,
    ));
    tick(&mut tank, 16.0);

    assert_eq!(tank.level.deaths(), 5);
    assert_eq!(tank.state(), GameState::Defeated);
    assert_eq!(
        tank.drain_notifications(),
        vec![Notification::Defeated { level: 1 }]
    );

    // nothing moves once the run is lost
    let time = tank.time;
    tank.add_food_charge();
    tick(&mut tank, 16.0);
    assert_eq!(tank.time, time);
    assert_eq!(tank.panel.charges(), 0);
    assert_eq!(tank.on_drag_release(point(10.0, 10.0)), DropOutcome::Ignored);

    tank.restart();
    assert_eq!(tank.state(), GameState::Running(1));
    assert_eq!(tank.fish.len(), 5);
    assert_eq!(tank.level.deaths(), 0);
}

#[test]
fn test_defeat_is_checked_before_completion() {
    let params = Params {
        base_target: 2,
        casualty_limit: 1,
        ..quiet_params()
    };
    let mut tank = Tank::with_seed(params, 8);
    spread(&mut tank);
    tank.fish[0].size = 100.0;
    tank.fish[0].pos = point(300.0, 200.0);
    tank.fish[1].pos = point(335.0, 235.0);

    tick(&mut tank, 16.0);

    assert_eq!(tank.fish.len(), 4);
    assert_eq!(tank.state(), GameState::Defeated);
    assert_eq!(
        tank.drain_notifications(),
        vec![Notification::Defeated { level: 1 }]
    );
}

#[test]
fn test_falling_food_overflow_and_drop() {
    let params = Params {
        feeding_mode: FeedingMode::FallingFood,
        ..quiet_params()
    };
    let mut tank = Tank::with_seed(params, 9);

    for _ in 0..16 {
        tank.add_food_charge();
    }
    assert_eq!(tank.panel.charges(), 15);
    assert_eq!(tank.food.len(), 1);
    assert_eq!(tank.food[0].pos[1], 0.0);

    assert_eq!(
        tank.on_drag_release(point(400.0, 300.0)),
        DropOutcome::Released
    );
    assert_eq!(tank.panel.charges(), 14);
    assert_eq!(tank.food.len(), 2);
}

#[test]
fn test_falling_food_is_chased_and_eaten() {
    let params = Params {
        feeding_mode: FeedingMode::FallingFood,
        ..quiet_params()
    };
    let mut tank = Tank::with_seed(params, 10);
    spread(&mut tank);
    tank.fish.truncate(1);
    tank.add_food_charge();

    // fish center is (65, 115)
    assert_eq!(
        tank.on_drag_release(point(65.0, 90.0)),
        DropOutcome::Released
    );

    tick(&mut tank, 16.0);

    assert!(tank.food.is_empty());
    assert!((tank.fish[0].size - 33.0).abs() < 1e-4);
    assert_eq!(tank.fish[0].eat_count, 1);
}

#[test]
fn test_falling_food_leaves_through_the_bottom() {
    let params = Params {
        feeding_mode: FeedingMode::FallingFood,
        ..quiet_params()
    };
    let mut tank = Tank::with_seed(params, 11);
    tank.fish.clear();
    tank.food.push(FoodItem {
        pos: point(400.0, 599.0),
        size: 20.0,
        fall_speed: 2.0,
        consumed: false,
    });

    tick(&mut tank, 16.0);

    assert!(tank.food.is_empty());
}

#[test]
fn test_empty_tank_survives_ticks_and_drops() {
    let mut tank = Tank::with_seed(quiet_params(), 12);
    tank.fish.clear();
    tank.add_food_charge();

    for _ in 0..10 {
        tick(&mut tank, 16.0);
    }
    assert_eq!(tank.on_drag_release(point(100.0, 100.0)), DropOutcome::Missed);
    assert_eq!(tank.state(), GameState::Running(1));
}

#[test]
fn test_same_seed_same_run() {
    let mut a = Tank::with_seed(quiet_params(), 42);
    let mut b = Tank::with_seed(quiet_params(), 42);

    for _ in 0..100 {
        tick(&mut a, 16.0);
        tick(&mut b, 16.0);
    }

    assert_eq!(a.fish.len(), b.fish.len());
    for (fa, fb) in a.fish.iter().zip(b.fish.iter()) {
        assert_eq!(fa.pos, fb.pos);
        assert_eq!(fa.vel, fb.vel);
    }
}

#[test]
fn test_snapshot_matches_tank() {
    let tank = Tank::with_seed(quiet_params(), 13);
    let snapshot = tank.snapshot();

    assert_eq!(snapshot.level, 1);
    assert_eq!(snapshot.target_population, 10);
    assert_eq!(snapshot.casualty_limit, 5);
    assert_eq!(snapshot.state, GameState::Running(1));
    assert_eq!(snapshot.fish.len(), tank.fish.len());
    for (view, fish) in snapshot.fish.iter().zip(tank.fish.iter()) {
        assert_eq!(view.id, fish.id);
        assert_eq!(view.rgb, tank.params().palette[fish.color]);
        assert_eq!(view.pos, [fish.pos[0], fish.pos[1]]);
    }

    let json = serde_json::to_string(&snapshot).expect("snapshot serializes");
    assert!(json.contains("\"target_population\":10"));
}

#[test]
fn test_huge_step_fills_the_panel_and_returns() {
    let mut tank = Tank::with_seed(Params::default(), 14);
    spread(&mut tank);

    tick(&mut tank, 1.0e12);

    assert_eq!(tank.panel.charges(), 15);
    assert_eq!(tank.state(), GameState::Running(1));
    assert!(tank.next_charge_in() > 0.0);
}

#[test]
fn test_invalid_params_fall_back_to_defaults() {
    let params = Params {
        min_initial_speed: 5.0,
        max_initial_speed: 1.0,
        ..Params::default()
    };
    assert!(params.validate().is_err());

    let tank = Tank::with_seed(params, 15);

    assert_eq!(tank.params().min_initial_speed, 1.0);
    assert_eq!(tank.params().max_initial_speed, 3.0);
    assert_eq!(tank.fish.len(), 5);
}
