//! Predation between overlapping fish.
//!
//! Every unordered pair of live fish is examined once per tick. When two fish
//! overlap and one is strictly larger than `predation_ratio` times the other,
//! the smaller one is eaten. Prey is only marked during the scan; a marked
//! fish takes no further part in it, so nothing is eaten twice and prey never
//! eats. Removal happens after the scan when the events are applied.

use super::events::SimulationEvent;
use super::fish::Fish;
use super::geometric_utils::distance;
use super::locatable::Locatable;

/// Two fish overlap when their centers are closer than the sum of their radii.
pub fn collides(a: &Fish, b: &Fish) -> bool {
    distance(&a.center(), &b.center()) < a.radius() + b.radius()
}

/// The predator is large enough to swallow the prey.
pub fn can_eat(predator: &Fish, prey: &Fish, predation_ratio: f32) -> bool {
    predator.size > predation_ratio * prey.size
}

/// Scans all pairs and returns one [`SimulationEvent::FishEaten`] per victim.
pub fn resolve(fishes: &[Fish], predation_ratio: f32) -> Vec<SimulationEvent> {
    let mut marked = vec![false; fishes.len()];
    let mut events = Vec::new();

    for i in 0..fishes.len() {
        for j in (i + 1)..fishes.len() {
            if marked[i] {
                break;
            }
            if marked[j] {
                continue;
            }

            let (a, b) = (&fishes[i], &fishes[j]);
            if !collides(a, b) {
                continue;
            }

            let victim = if can_eat(a, b, predation_ratio) {
                Some((i, j))
            } else if can_eat(b, a, predation_ratio) {
                Some((j, i))
            } else {
                None
            };

            if let Some((predator, prey)) = victim {
                marked[prey] = true;
                events.push(SimulationEvent::FishEaten {
                    predator_id: fishes[predator].id,
                    prey_id: fishes[prey].id,
                });
            }
        }
    }

    events
}
