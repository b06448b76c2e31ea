//! Per-tick fish movement.
//!
//! Roaming fish move along their velocity and reflect off the walls.
//! Chasing fish head for their target at boosted speed and are clamped to
//! the tank without bouncing, so a fish pressed against a wall stays there.

use rayon::prelude::*;

use super::fish::{Fish, SteeringMode};
use super::geometric_utils::{Bounds, Edge, clamp_to_bounds, direction};
use super::locatable::Locatable;
use super::params::Params;

/// Advances one fish by a single tick.
pub fn steer(fish: &mut Fish, bounds: &Bounds, params: &Params) {
    match fish.mode {
        SteeringMode::FreeRoam => roam(fish, bounds),
        SteeringMode::Chasing(_) => follow(fish, bounds, params),
    }
}

/// Advances every fish by a single tick.
///
/// Fish do not read each other's state while steering, so the pass runs in parallel.
pub fn steer_all(fishes: &mut [Fish], bounds: &Bounds, params: &Params) {
    fishes
        .par_iter_mut()
        .for_each(|fish| steer(fish, bounds, params));
}

fn roam(fish: &mut Fish, bounds: &Bounds) {
    fish.pos += &fish.vel;

    // reflect by sign so the fish always heads back into the tank
    let touched = clamp_to_bounds(&mut fish.pos, fish.size, bounds);
    for (axis, edge) in touched.into_iter().enumerate() {
        match edge {
            Some(Edge::Low) => fish.vel[axis] = fish.vel[axis].abs(),
            Some(Edge::High) => fish.vel[axis] = -fish.vel[axis].abs(),
            None => {}
        }
    }
}

fn follow(fish: &mut Fish, bounds: &Bounds, params: &Params) {
    let offset = match &fish.mode {
        SteeringMode::Chasing(target) => direction(&fish.center(), target)
            .filter(|(_, dist)| *dist > params.lure_deadband)
            .map(|(dir, dist)| {
                // never step past the target
                let step = (fish.base_speed * params.lure_speed_factor).min(dist);
                dir * step
            }),
        SteeringMode::FreeRoam => None,
    };

    if let Some(offset) = offset {
        fish.pos += &offset;
    }
    clamp_to_bounds(&mut fish.pos, fish.size, bounds);
}
