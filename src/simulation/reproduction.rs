use rand::Rng;
use serde::{Deserialize, Serialize};

use super::fish::{Fish, random_heading};

/// Creates the offspring of `parent`.
///
/// The offspring starts at the parent's position with the parent's size,
/// color and speed multiplier, swims at the parent's current speed along a
/// fresh random heading, and has no meals counted.
pub fn clone_fish<R: Rng + ?Sized>(parent: &Fish, id: usize, rng: &mut R) -> Fish {
    let mut child = Fish::new(
        id,
        parent.pos.clone(),
        random_heading(parent.base_speed, rng),
        parent.size,
        parent.color,
        parent.speed_multiplier(),
    );
    child.base_speed = parent.base_speed;
    child
}

/// Birth and growth statistics shown alongside the tank.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReproductionStats {
    /// Offspring spawned since the run started.
    pub total_births: u32,
    /// Offspring spawned during the current level.
    pub level_births: u32,
    /// Largest fish size seen during the run.
    pub largest_size: f32,
}

impl ReproductionStats {
    /// Record a newly spawned fish.
    pub fn record_birth(&mut self, child: &Fish) {
        self.total_births += 1;
        self.level_births += 1;
        self.record_size(child.size);
    }

    /// Record a fish size after growth.
    pub fn record_size(&mut self, size: f32) {
        if size > self.largest_size {
            self.largest_size = size;
        }
    }

    /// Clear the per-level counters.
    pub fn start_level(&mut self) {
        self.level_births = 0;
    }
}
