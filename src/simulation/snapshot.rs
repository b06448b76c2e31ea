//! Read-only view of the tank handed to the renderer once per frame.

use serde::Serialize;

use super::fish::{Fish, SteeringMode};
use super::food::FoodItem;
use super::level::GameState;

/// What the renderer needs to draw one fish.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FishView {
    /// Fish identifier.
    pub id: usize,
    /// Top-left corner.
    pub pos: [f32; 2],
    /// Diameter.
    pub size: f32,
    /// Palette index.
    pub color: usize,
    /// Palette color, black when the index is outside the palette.
    pub rgb: [u8; 3],
    /// The fish is heading for a target.
    pub chasing: bool,
}

impl FishView {
    /// Builds the view of `fish` against `palette`.
    pub fn new(fish: &Fish, palette: &[[u8; 3]]) -> Self {
        Self {
            id: fish.id,
            pos: [fish.pos[0], fish.pos[1]],
            size: fish.size,
            color: fish.color,
            rgb: palette.get(fish.color).copied().unwrap_or([0, 0, 0]),
            chasing: matches!(fish.mode, SteeringMode::Chasing(_)),
        }
    }
}

/// What the renderer needs to draw one food item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FoodView {
    /// Top-left corner.
    pub pos: [f32; 2],
    /// Diameter.
    pub size: f32,
}

impl From<&FoodItem> for FoodView {
    fn from(item: &FoodItem) -> Self {
        Self {
            pos: [item.pos[0], item.pos[1]],
            size: item.size,
        }
    }
}

/// Complete per-frame state of the tank.
#[derive(Debug, Clone, Serialize)]
pub struct TankSnapshot {
    /// Simulation clock.
    pub time: f32,
    /// Current level.
    pub level: u32,
    /// Deaths during the current level.
    pub deaths: u32,
    /// Deaths that end the run.
    pub casualty_limit: u32,
    /// Population that clears the current level.
    pub target_population: usize,
    /// Stored food charges.
    pub food_charges: u32,
    /// Panel capacity.
    pub panel_capacity: u32,
    /// Game state.
    pub state: GameState,
    /// Current lure position, if the player is dragging.
    pub lure: Option<[f32; 2]>,
    /// Live fish.
    pub fish: Vec<FishView>,
    /// Falling food.
    pub food: Vec<FoodView>,
}
