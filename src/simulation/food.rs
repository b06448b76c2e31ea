//! Food items that fall through the tank and the panel of stored food charges.

use ndarray::Array1;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geometric_utils::Bounds;
use super::locatable::Locatable;
use super::params::{ChargeRefill, Params};

/// A food item sinking through the tank.
///
/// Falls a fixed distance per tick and disappears once eaten or once it
/// leaves the bottom of the tank.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodItem {
    /// Top-left corner.
    pub pos: Array1<f32>,
    /// Diameter.
    pub size: f32,
    /// Vertical distance covered per tick.
    pub fall_speed: f32,
    /// Set once a fish has eaten this item.
    pub consumed: bool,
}

impl FoodItem {
    /// Creates a food item centered on `center`.
    pub fn centered_at(center: &Array1<f32>, size: f32, fall_speed: f32) -> Self {
        Self {
            pos: center - size / 2.0,
            size,
            fall_speed,
            consumed: false,
        }
    }

    /// Creates a food item at a random horizontal position along the top edge.
    pub fn new_random<R: Rng + ?Sized>(
        bounds: &Bounds,
        size: f32,
        fall_speed: f32,
        rng: &mut R,
    ) -> Self {
        let [max_x, _] = bounds.limits(size);
        Self {
            pos: Array1::from_vec(vec![rng.random_range(0.0..=max_x), 0.0]),
            size,
            fall_speed,
            consumed: false,
        }
    }

    /// Sinks the item by one tick.
    pub fn fall(&mut self) {
        self.pos[1] += self.fall_speed;
    }

    /// The item has dropped past the bottom of the tank.
    pub fn is_out_of_tank(&self, bounds: &Bounds) -> bool {
        self.pos[1] > bounds.height
    }

    /// Marks this food as eaten.
    pub fn consume(&mut self) {
        self.consumed = true;
    }
}

impl Locatable for FoodItem {
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

/// Result of adding a charge to the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChargeOutcome {
    /// The charge was stored.
    Stored,
    /// The panel was full; the charge was not stored.
    Overflow,
}

/// Counter of food charges the player can drop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodPanel {
    charges: u32,
    capacity: u32,
    refill: ChargeRefill,
}

impl FoodPanel {
    /// Creates an empty panel.
    pub fn new(capacity: u32, refill: ChargeRefill) -> Self {
        Self {
            charges: 0,
            capacity,
            refill,
        }
    }

    /// Stored charges.
    pub fn charges(&self) -> u32 {
        self.charges
    }

    /// Maximum stored charges under [`ChargeRefill::Capped`].
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Adds one charge, respecting the refill variant.
    pub fn add(&mut self) -> ChargeOutcome {
        match self.refill {
            ChargeRefill::Unbounded => {
                self.charges = self.charges.saturating_add(1);
                ChargeOutcome::Stored
            }
            ChargeRefill::Capped if self.charges < self.capacity => {
                self.charges += 1;
                ChargeOutcome::Stored
            }
            ChargeRefill::Capped => ChargeOutcome::Overflow,
        }
    }

    /// Takes one charge if any is available.
    pub fn take(&mut self) -> bool {
        if self.charges == 0 {
            return false;
        }
        self.charges -= 1;
        true
    }

    /// Empties the panel.
    pub fn reset(&mut self) {
        self.charges = 0;
    }
}

/// Clock that releases food charges at random intervals.
///
/// Each interval is drawn uniformly from the configured range and redrawn
/// after it elapses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodTimer {
    elapsed: f32,
    interval: f32,
}

impl FoodTimer {
    /// Starts a timer with a freshly drawn interval.
    pub fn new<R: Rng + ?Sized>(params: &Params, rng: &mut R) -> Self {
        Self {
            elapsed: 0.0,
            interval: draw_interval(params, rng),
        }
    }

    /// Time until the next charge.
    pub fn remaining(&self) -> f32 {
        (self.interval - self.elapsed).max(0.0)
    }

    /// Advances the clock by `dt`.
    ///
    /// At most one panel's worth of charges falls due per call. Time beyond
    /// that is dropped, since the panel could not hold more charges anyway.
    ///
    /// # Returns
    ///
    /// Number of charges that fell due.
    pub fn advance<R: Rng + ?Sized>(&mut self, dt: f32, params: &Params, rng: &mut R) -> u32 {
        if !(dt.is_finite() && dt > 0.0) {
            return 0;
        }

        let max_due = params.panel_capacity.max(1);
        self.elapsed += dt;
        let mut due = 0;
        while self.elapsed >= self.interval && due < max_due {
            self.elapsed -= self.interval;
            self.interval = draw_interval(params, rng);
            due += 1;
        }
        if self.elapsed >= self.interval {
            self.elapsed = 0.0;
        }
        due
    }
}

fn draw_interval<R: Rng + ?Sized>(params: &Params, rng: &mut R) -> f32 {
    let min = params.food_interval_min.max(1.0);
    let max = params.food_interval_max.max(min);
    rng.random_range(min..=max)
}
