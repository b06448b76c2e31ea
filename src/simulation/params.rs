use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::geometric_utils::Bounds;

/// Errors raised while loading or validating [`Params`].
#[derive(Debug, Error)]
pub enum ParamsError {
    /// The configuration file could not be read or written.
    #[error("config file error: {0}")]
    Io(#[from] std::io::Error),
    /// The configuration file is not valid JSON for [`Params`].
    #[error("config parse error: {0}")]
    Json(#[from] serde_json::Error),
    /// A value is outside the range the simulation can work with.
    #[error("invalid parameter: {0}")]
    Invalid(String),
}

/// How food reaches the fish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeedingMode {
    /// Dropping food on the tank feeds the nearest fish in reach instantly.
    PointerDrop,
    /// Dropped and overflow food falls through the tank; fish chase the nearest item.
    FallingFood,
}

/// How a new fish picks its initial velocity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VelocityInit {
    /// Random heading, magnitude uniform in the speed range, scaled by the level multiplier.
    Polar,
    /// Independent random components with a minimum magnitude per axis.
    AxisFloor,
}

/// What happens when a food charge arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChargeRefill {
    /// Charges stop at the panel capacity; overflow becomes falling food when enabled.
    Capped,
    /// Charges always increment.
    Unbounded,
}

/// Simulation parameters that control tank behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    /// Tank width.
    pub tank_width: f32,
    /// Tank height.
    pub tank_height: f32,
    /// Diameter of every freshly seeded fish.
    pub initial_fish_size: f32,
    /// Fish seeded at the start of each level.
    pub founder_count: usize,
    /// Diameter of a food item; its radius is the reach used for matching.
    pub food_size: f32,
    /// Vertical distance a falling food item covers per tick.
    pub food_fall_speed: f32,
    /// Maximum number of stored food charges.
    pub panel_capacity: u32,
    /// Relative size gain per meal before the level multiplier.
    pub growth_rate: f32,
    /// Speed added to a fish per meal.
    pub speed_increment: f32,
    /// Meals needed before a fish spawns an offspring.
    pub reproduction_threshold: u32,
    /// A fish eats another only when it is strictly larger than this factor times the other's size.
    pub predation_ratio: f32,
    /// Deaths per level that end the run.
    pub casualty_limit: u32,
    /// Population needed to clear level 1.
    pub base_target: usize,
    /// Extra population needed per level.
    pub target_step: usize,
    /// Speed and growth multiplier added per level.
    pub level_speed_step: f32,
    /// Speed factor applied while following a target.
    pub lure_speed_factor: f32,
    /// Distance under which a following fish stops moving.
    pub lure_deadband: f32,
    /// Lower end of the initial speed range.
    pub min_initial_speed: f32,
    /// Upper end of the initial speed range.
    pub max_initial_speed: f32,
    /// Smallest per-axis speed for [`VelocityInit::AxisFloor`].
    pub min_axis_speed: f32,
    /// Fish colors available at level 1; one fewer is used per level.
    pub palette: Vec<[u8; 3]>,
    /// Time between simulation ticks.
    pub tick_interval: f32,
    /// Shortest time between food charges.
    pub food_interval_min: f32,
    /// Longest time between food charges.
    pub food_interval_max: f32,
    /// Feeding variant.
    pub feeding_mode: FeedingMode,
    /// Initial velocity variant.
    pub velocity_init: VelocityInit,
    /// Food charge refill variant.
    pub charge_refill: ChargeRefill,
    /// Also lose when the population drops to one fish or fewer.
    pub defeat_on_near_extinction: bool,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            tank_width: 800.0,
            tank_height: 600.0,
            initial_fish_size: 30.0,
            founder_count: 5,
            food_size: 20.0,
            food_fall_speed: 2.0,
            panel_capacity: 15,
            growth_rate: 0.1,
            speed_increment: 0.5,
            reproduction_threshold: 3,
            predation_ratio: 1.3,
            casualty_limit: 5,
            base_target: 10,
            target_step: 2,
            level_speed_step: 0.2,
            lure_speed_factor: 3.0,
            lure_deadband: 1.0,
            min_initial_speed: 1.0,
            max_initial_speed: 3.0,
            min_axis_speed: 0.5,
            palette: vec![
                [255, 140, 0],
                [255, 215, 0],
                [220, 20, 60],
                [30, 144, 255],
                [50, 205, 50],
                [186, 85, 211],
            ],
            tick_interval: 16.0,
            food_interval_min: 2000.0,
            food_interval_max: 5000.0,
            feeding_mode: FeedingMode::PointerDrop,
            velocity_init: VelocityInit::Polar,
            charge_refill: ChargeRefill::Capped,
            defeat_on_near_extinction: false,
        }
    }
}

impl Params {
    /// Tank bounds described by these parameters.
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.tank_width, self.tank_height)
    }

    /// Reach of a food item.
    pub fn food_radius(&self) -> f32 {
        self.food_size / 2.0
    }

    /// Checks that every value is usable by the simulation.
    pub fn validate(&self) -> Result<(), ParamsError> {
        let positive = [
            ("tank_width", self.tank_width),
            ("tank_height", self.tank_height),
            ("initial_fish_size", self.initial_fish_size),
            ("food_size", self.food_size),
            ("tick_interval", self.tick_interval),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ParamsError::Invalid(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }

        if self.predation_ratio < 1.0 {
            return Err(ParamsError::Invalid(format!(
                "predation_ratio must be at least 1.0, got {}",
                self.predation_ratio
            )));
        }
        if !(self.min_initial_speed.is_finite() && self.min_initial_speed >= 0.0) {
            return Err(ParamsError::Invalid(format!(
                "min_initial_speed must be non-negative, got {}",
                self.min_initial_speed
            )));
        }
        if self.min_initial_speed > self.max_initial_speed || !self.max_initial_speed.is_finite() {
            return Err(ParamsError::Invalid(
                "min_initial_speed exceeds max_initial_speed".to_string(),
            ));
        }
        if self.food_interval_min > self.food_interval_max || self.food_interval_min <= 0.0 {
            return Err(ParamsError::Invalid(
                "food interval range must be positive and ordered".to_string(),
            ));
        }
        if self.reproduction_threshold == 0 {
            return Err(ParamsError::Invalid(
                "reproduction_threshold must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// Loads and validates parameters from a JSON file.
    ///
    /// Missing fields take their default value.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ParamsError> {
        let json = std::fs::read_to_string(path)?;
        let params: Self = serde_json::from_str(&json)?;
        params.validate()?;
        Ok(params)
    }

    /// Saves the parameters to a JSON file.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ParamsError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
