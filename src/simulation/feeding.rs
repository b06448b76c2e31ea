//! Feeding, growth and food matching.
//!
//! A meal grows a fish, speeds it up and counts towards its next offspring.
//! Two matching policies decide which fish gets a meal:
//! - a drop feeds the nearest fish whose body reaches the drop point
//! - a falling item is eaten by the nearest fish touching it

use ndarray::Array1;

use super::events::SimulationEvent;
use super::fish::Fish;
use super::food::FoodItem;
use super::geometric_utils::distance;
use super::locatable::Locatable;
use super::params::Params;
use super::spatial::SpatialIndex;

/// What a meal did to a fish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedOutcome {
    /// The fish grew and sped up.
    Grew,
    /// The fish grew, sped up and reached its meal threshold; its counter was reset
    /// and an offspring is due.
    Reproduce,
}

/// Feeds one meal to `fish`.
///
/// # Arguments
///
/// * `fish` - The fish being fed
/// * `growth_multiplier` - Level growth multiplier scaling the size gain
/// * `params` - Simulation parameters (growth rate, speed increment, meal threshold)
pub fn feed(fish: &mut Fish, growth_multiplier: f32, params: &Params) -> FeedOutcome {
    fish.size *= 1.0 + params.growth_rate * growth_multiplier;

    let old_speed = fish.base_speed;
    let new_speed = old_speed + params.speed_increment;
    if old_speed > 0.0 {
        fish.vel *= new_speed / old_speed;
    }
    fish.base_speed = new_speed;

    fish.eat_count += 1;
    if fish.is_ready_to_spawn(params.reproduction_threshold) {
        fish.eat_count = 0;
        FeedOutcome::Reproduce
    } else {
        FeedOutcome::Grew
    }
}

/// Picks the fish a food drop at `point` feeds.
///
/// Only fish whose center lies within their own radius plus the food radius
/// of the drop point qualify; among those the closest wins, ties going to the
/// earlier fish.
///
/// # Returns
///
/// Index into `fishes` of the fish to feed, or `None` when no fish is in reach.
pub fn fish_for_drop(
    fishes: &[Fish],
    index: &SpatialIndex,
    point: &Array1<f32>,
    food_radius: f32,
) -> Option<usize> {
    let reach = index.max_fish_radius() + food_radius;

    index
        .query_fish(point, reach)
        .into_iter()
        .filter_map(|(_, idx)| {
            let fish = fishes.get(idx)?;
            let dist = distance(&fish.center(), point);
            (dist <= fish.radius() + food_radius).then_some((dist, idx))
        })
        .min_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)))
        .map(|(_, idx)| idx)
}

/// Matches falling food to the fish that eat it this tick.
///
/// Items are visited in order; each is eaten by the nearest fish touching
/// it, ties going to the earlier fish. A fish may eat several items in one tick.
pub fn match_falling_food(
    fishes: &[Fish],
    food: &[FoodItem],
    index: &SpatialIndex,
) -> Vec<SimulationEvent> {
    let mut events = Vec::new();

    for (food_idx, item) in food.iter().enumerate() {
        if item.consumed {
            continue;
        }
        let food_center = item.center();
        if let Some(fish_idx) = fish_for_drop(fishes, index, &food_center, item.radius()) {
            events.push(SimulationEvent::FoodConsumed {
                fish_id: fishes[fish_idx].id,
                food_idx,
            });
        }
    }

    events
}

/// Points every fish at the nearest food item, or lets it roam when there is none.
pub fn chase_nearest_food(fishes: &mut [Fish], food: &[FoodItem], index: &SpatialIndex) {
    for fish in fishes.iter_mut() {
        match index
            .nearest_food(&fish.center())
            .and_then(|idx| food.get(idx))
        {
            Some(item) => fish.chase(item.center()),
            None => fish.release(),
        }
    }
}
