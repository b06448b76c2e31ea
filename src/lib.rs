//! # Aquarium - Fish Tank Simulation
//!
//! A small real-time ecosystem. Fish roam a bounded tank, grow by eating the
//! food the player drops, spawn offspring after repeated meals and get eaten
//! by fish that are clearly larger. Each level asks for a larger population
//! and tolerates only a handful of deaths.
//!
//! ## Features
//!
//! - Free-roam movement with wall reflection, lure following with a deadband
//! - Pointer-drop feeding or falling food chased by the fish
//! - Level-scaled growth, speed-up and reproduction
//! - Predation with a protected-size band
//! - Level progression with population targets and casualty limits
//! - Read-only per-frame snapshots for the renderer
//!
//! ## Core Modules
//!
//! - [`simulation::tank`] - Tick orchestration and pointer input
//! - [`simulation::steering`] - Per-tick movement
//! - [`simulation::feeding`] - Growth and food matching
//! - [`simulation::predation`] - Pair scan and removal
//! - [`simulation::level`] - Level state machine

/// Core simulation logic and data structures.
pub mod simulation {
    /// Recent events kept for display.
    pub mod event_log;
    /// Deferred state updates collected during scans.
    pub mod events;
    /// Feeding, growth and food matching.
    pub mod feeding;
    /// Fish state and lifecycle.
    pub mod fish;
    /// Falling food, food charges and the charge timer.
    pub mod food;
    /// Distance, direction and tank bounds.
    pub mod geometric_utils;
    /// Level formulas and the level state machine.
    pub mod level;
    /// Trait for entities with a position and a size.
    ///
    /// The [`locatable::Locatable`] trait is implemented by [`fish::Fish`] and
    /// [`food::FoodItem`] and provides their center and radius.
    pub mod locatable;
    /// Simulation parameters.
    pub mod params;
    /// Predation between overlapping fish.
    pub mod predation;
    /// Offspring creation and birth statistics.
    pub mod reproduction;
    /// Per-frame view of the tank.
    pub mod snapshot;
    /// KD-tree index over fish and food.
    pub mod spatial;
    /// Per-tick fish movement.
    pub mod steering;
    /// The tank and its tick.
    pub mod tank;
}
