//! Fish state and lifecycle.
//!
//! Fish roam the tank, follow lures or food, grow when fed and split off
//! an offspring after enough meals.

use ndarray::Array1;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geometric_utils::Bounds;
use super::locatable::Locatable;
use super::params::{Params, VelocityInit};

/// Whether a fish bounces around freely or heads for a point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SteeringMode {
    /// Move along the current velocity, reflecting off the tank walls.
    FreeRoam,
    /// Head for the given point at boosted speed.
    Chasing(Array1<f32>),
}

/// A fish living in the tank.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fish {
    /// Unique identifier for this fish.
    pub id: usize,
    /// Top-left corner of the fish.
    pub pos: Array1<f32>,
    /// Displacement per tick while roaming. Its heading survives mode switches.
    pub vel: Array1<f32>,
    /// Diameter; only grows while the level lasts.
    pub size: f32,
    /// Palette index used by the renderer.
    pub color: usize,
    /// Speed magnitude assigned at creation and on every meal.
    pub base_speed: f32,
    /// Meals since the last offspring.
    pub eat_count: u32,
    /// Current steering mode.
    pub mode: SteeringMode,
    speed_multiplier: f32,
}

impl Fish {
    /// Creates a fish with an explicit state. `base_speed` is taken from `vel`.
    pub fn new(
        id: usize,
        pos: Array1<f32>,
        vel: Array1<f32>,
        size: f32,
        color: usize,
        speed_multiplier: f32,
    ) -> Self {
        let base_speed = speed_of(&vel);
        Self {
            id,
            pos,
            vel,
            size,
            color,
            base_speed,
            eat_count: 0,
            mode: SteeringMode::FreeRoam,
            speed_multiplier,
        }
    }

    /// Creates a founder at a random position inside `bounds`.
    ///
    /// # Arguments
    ///
    /// * `id` - Unique identifier
    /// * `bounds` - Tank the fish must fit in
    /// * `color` - Palette index
    /// * `speed_multiplier` - Level speed multiplier, fixed for the fish's lifetime
    /// * `params` - Simulation parameters (size, speed range, velocity variant)
    /// * `rng` - Random source
    pub fn new_random<R: Rng + ?Sized>(
        id: usize,
        bounds: &Bounds,
        color: usize,
        speed_multiplier: f32,
        params: &Params,
        rng: &mut R,
    ) -> Self {
        let size = params.initial_fish_size;
        let [max_x, max_y] = bounds.limits(size);
        let pos = Array1::from_vec(vec![
            rng.random_range(0.0..=max_x),
            rng.random_range(0.0..=max_y),
        ]);
        let vel = initial_velocity(params, speed_multiplier, rng);

        Self::new(id, pos, vel, size, color, speed_multiplier)
    }

    /// Level speed multiplier this fish was created with.
    pub fn speed_multiplier(&self) -> f32 {
        self.speed_multiplier
    }

    /// Stored meals have reached the reproduction threshold.
    pub fn is_ready_to_spawn(&self, threshold: u32) -> bool {
        self.eat_count >= threshold
    }

    /// Points the fish at `target`.
    pub fn chase(&mut self, target: Array1<f32>) {
        self.mode = SteeringMode::Chasing(target);
    }

    /// Drops any target; roaming resumes with the last velocity.
    pub fn release(&mut self) {
        self.mode = SteeringMode::FreeRoam;
    }
}

impl Locatable for Fish {
    fn pos(&self) -> &Array1<f32> {
        &self.pos
    }

    fn pos_mut(&mut self) -> &mut Array1<f32> {
        &mut self.pos
    }

    fn size(&self) -> f32 {
        self.size
    }
}

/// Magnitude of a 2D velocity.
pub fn speed_of(vel: &Array1<f32>) -> f32 {
    vel.dot(vel).sqrt()
}

/// A velocity of the given magnitude along a uniformly random heading.
pub fn random_heading<R: Rng + ?Sized>(speed: f32, rng: &mut R) -> Array1<f32> {
    let angle = rng.random_range(0.0..std::f32::consts::TAU);
    Array1::from_vec(vec![angle.cos() * speed, angle.sin() * speed])
}

fn initial_velocity<R: Rng + ?Sized>(
    params: &Params,
    speed_multiplier: f32,
    rng: &mut R,
) -> Array1<f32> {
    match params.velocity_init {
        VelocityInit::Polar => {
            let speed = rng.random_range(params.min_initial_speed..=params.max_initial_speed);
            random_heading(speed * speed_multiplier, rng)
        }
        VelocityInit::AxisFloor => {
            let max = params.max_initial_speed;
            let floor = params.min_axis_speed.min(max);
            let component = |rng: &mut R| {
                let v: f32 = rng.random_range(-max..=max);
                if v.abs() < floor {
                    floor.copysign(v)
                } else {
                    v
                }
            };
            let vx = component(&mut *rng);
            let vy = component(&mut *rng);
            Array1::from_vec(vec![vx * speed_multiplier, vy * speed_multiplier])
        }
    }
}
