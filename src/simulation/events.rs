//! Event system for deferred tank updates.
//!
//! Matching and predation only read the fish and food lists and describe
//! what should happen as events. The events are applied afterwards in one
//! pass, so removals and births never disturb a scan in progress.

use std::collections::HashSet;

use super::event_log::EventKind;
use super::tank::Tank;

/// Events that modify tank state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimulationEvent {
    /// A fish ate a falling food item.
    FoodConsumed {
        /// ID of the fish that ate.
        fish_id: usize,
        /// Index of the food item in the food vector.
        food_idx: usize,
    },
    /// A fish was fed directly by a drop.
    FishFed {
        /// ID of the fed fish.
        fish_id: usize,
    },
    /// A fish was eaten by a larger one.
    FishEaten {
        /// ID of the fish that ate.
        predator_id: usize,
        /// ID of the fish that was eaten.
        prey_id: usize,
    },
}

/// Applies all events to the tank state.
///
/// Each food item is eaten at most once and each prey dies at most once.
/// Offspring are parked in the tank's nursery and join the population when
/// the caller flushes it.
pub fn apply_events(tank: &mut Tank, events: impl IntoIterator<Item = SimulationEvent>) {
    let mut eaten: HashSet<usize> = HashSet::new();

    for event in events {
        match event {
            SimulationEvent::FoodConsumed { fish_id, food_idx } => {
                let Some(item) = tank.food.get_mut(food_idx) else {
                    continue;
                };
                if item.consumed {
                    continue;
                }
                item.consume();
                tank.feed_by_id(fish_id);
            }
            SimulationEvent::FishFed { fish_id } => {
                tank.feed_by_id(fish_id);
            }
            SimulationEvent::FishEaten {
                predator_id,
                prey_id,
            } => {
                if eaten.insert(prey_id) {
                    tracing::debug!(predator_id, prey_id, "fish eaten");
                    tank.event_log.log(
                        tank.time,
                        format!("Fish #{} ate fish #{}", predator_id, prey_id),
                        EventKind::Predation,
                    );
                }
            }
        }
    }

    if !eaten.is_empty() {
        tank.fish.retain(|fish| !eaten.contains(&fish.id));
        tank.level.record_deaths(eaten.len() as u32);
    }
    tank.food.retain(|item| !item.consumed);
}
