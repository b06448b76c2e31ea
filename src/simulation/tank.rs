//! The tank: the fish, the food and the level they are playing.
//!
//! The tank owns every entity for the lifetime of a level and advances them
//! one fixed step per [`Tank::tick`]. A tick runs, in order:
//! - food charges that fell due on the simulation clock
//! - target assignment (lure, or nearest falling food)
//! - steering
//! - falling food and its consumption (feeding, growth, offspring)
//! - predation
//! - defeat check, then level completion check
//!
//! Offspring join the population at the end of the tick in which they were
//! born, so they take part in predation from the next tick on.
//! Pointer input arrives between ticks through [`Tank::on_drag_move`] and
//! [`Tank::on_drag_release`].

use ndarray::Array1;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use super::event_log::{EventKind, EventLog};
use super::events::{self, SimulationEvent};
use super::feeding::{self, FeedOutcome};
use super::fish::Fish;
use super::food::{ChargeOutcome, FoodItem, FoodPanel, FoodTimer};
use super::geometric_utils::Bounds;
use super::level::{self, GameState, LevelController, Transition};
use super::params::{FeedingMode, Params};
use super::predation;
use super::reproduction::{self, ReproductionStats};
use super::snapshot::{FishView, FoodView, TankSnapshot};
use super::spatial::SpatialIndex;
use super::steering;

/// Notices for the presentation layer, drained once per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Notification {
    /// The level was cleared and the next one has started.
    LevelComplete {
        /// Level that was cleared.
        level: u32,
    },
    /// The run was lost.
    Defeated {
        /// Level the run ended on.
        level: u32,
    },
}

/// What a food drop did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// The fish with this id was fed.
    Fed(usize),
    /// A falling food item was released at the drop point.
    Released,
    /// No fish was in reach; the charge was kept.
    Missed,
    /// There was no food charge to drop.
    NoCharge,
    /// The drop point was outside the tank.
    Outside,
    /// The run is over.
    Ignored,
}

/// The simulated tank.
#[derive(Debug)]
pub struct Tank {
    /// Live fish.
    pub fish: Vec<Fish>,
    /// Falling food.
    pub food: Vec<FoodItem>,
    /// Stored food charges.
    pub panel: FoodPanel,
    /// Level and game state.
    pub level: LevelController,
    /// Simulation clock.
    pub time: f32,
    /// Tank bounds used by the last tick.
    pub bounds: Bounds,
    /// Recent events for display.
    pub event_log: EventLog,
    /// Birth and growth statistics.
    pub stats: ReproductionStats,
    params: Params,
    lure: Option<Array1<f32>>,
    food_timer: FoodTimer,
    nursery: Vec<Fish>,
    notifications: Vec<Notification>,
    next_id: usize,
    rng: StdRng,
}

impl Tank {
    /// Creates a tank at level 1 with an entropy-seeded random source.
    ///
    /// Parameters that fail [`Params::validate`] are replaced by the defaults.
    pub fn new(params: Params) -> Self {
        Self::from_rng(params, StdRng::from_os_rng())
    }

    /// Creates a tank at level 1 whose randomness is fully determined by `seed`.
    ///
    /// Parameters that fail [`Params::validate`] are replaced by the defaults.
    pub fn with_seed(params: Params, seed: u64) -> Self {
        Self::from_rng(params, StdRng::seed_from_u64(seed))
    }

    fn from_rng(params: Params, mut rng: StdRng) -> Self {
        let params = match params.validate() {
            Ok(()) => params,
            Err(e) => {
                tracing::warn!(error = %e, "invalid parameters, using defaults");
                Params::default()
            }
        };
        let food_timer = FoodTimer::new(&params, &mut rng);
        let mut tank = Self {
            fish: Vec::new(),
            food: Vec::new(),
            panel: FoodPanel::new(params.panel_capacity, params.charge_refill),
            level: LevelController::new(),
            time: 0.0,
            bounds: params.bounds(),
            event_log: EventLog::default(),
            stats: ReproductionStats::default(),
            params,
            lure: None,
            food_timer,
            nursery: Vec::new(),
            notifications: Vec::new(),
            next_id: 0,
            rng,
        };
        tank.seed_level();
        tank
    }

    /// Simulation parameters.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Current game state.
    pub fn state(&self) -> GameState {
        self.level.state()
    }

    /// Current lure position while the player drags.
    pub fn lure(&self) -> Option<&Array1<f32>> {
        self.lure.as_ref()
    }

    /// Time until the food timer releases the next charge.
    pub fn next_charge_in(&self) -> f32 {
        self.food_timer.remaining()
    }

    /// Advances the simulation by one step.
    ///
    /// Does nothing once the run is lost.
    pub fn tick(&mut self, dt: f32, bounds: Bounds) {
        if !self.level.is_running() {
            return;
        }
        if dt.is_finite() {
            self.time += dt;
        }
        self.bounds = bounds;

        let due = self.food_timer.advance(dt, &self.params, &mut self.rng);
        for _ in 0..due {
            self.add_food_charge();
        }

        self.assign_targets();
        steering::steer_all(&mut self.fish, &self.bounds, &self.params);

        if self.params.feeding_mode == FeedingMode::FallingFood {
            self.sink_food();
        }

        let eaten = predation::resolve(&self.fish, self.params.predation_ratio);
        events::apply_events(self, eaten);

        self.flush_nursery();
        self.check_progress();
    }

    /// Moves the lure; every fish starts chasing it.
    pub fn on_drag_move(&mut self, point: Array1<f32>) {
        if !self.level.is_running() {
            return;
        }
        for fish in &mut self.fish {
            fish.chase(point.clone());
        }
        self.lure = Some(point);
    }

    /// Ends a drag, releasing every fish, and drops food at `point`.
    ///
    /// With [`FeedingMode::PointerDrop`] the nearest fish in reach is fed and
    /// one charge is spent. With [`FeedingMode::FallingFood`] a food item is
    /// released at the point for one charge.
    pub fn on_drag_release(&mut self, point: Array1<f32>) -> DropOutcome {
        self.lure = None;
        for fish in &mut self.fish {
            fish.release();
        }

        if !self.level.is_running() {
            return DropOutcome::Ignored;
        }
        if !self.bounds.contains(&point) {
            return DropOutcome::Outside;
        }
        if self.panel.charges() == 0 {
            return DropOutcome::NoCharge;
        }

        match self.params.feeding_mode {
            FeedingMode::PointerDrop => {
                let index = SpatialIndex::build(&self.fish, &[]);
                let Some(idx) =
                    feeding::fish_for_drop(&self.fish, &index, &point, self.params.food_radius())
                else {
                    return DropOutcome::Missed;
                };
                let fish_id = self.fish[idx].id;
                self.panel.take();
                events::apply_events(self, [SimulationEvent::FishFed { fish_id }]);
                self.flush_nursery();
                DropOutcome::Fed(fish_id)
            }
            FeedingMode::FallingFood => {
                self.panel.take();
                self.food.push(FoodItem::centered_at(
                    &point,
                    self.params.food_size,
                    self.params.food_fall_speed,
                ));
                DropOutcome::Released
            }
        }
    }

    /// Adds one food charge.
    ///
    /// When the panel is full and food falls, the charge is released as a
    /// food item at the top of the tank instead.
    pub fn add_food_charge(&mut self) {
        if !self.level.is_running() {
            return;
        }
        let outcome = self.panel.add();
        if outcome == ChargeOutcome::Overflow
            && self.params.feeding_mode == FeedingMode::FallingFood
        {
            let item = FoodItem::new_random(
                &self.bounds,
                self.params.food_size,
                self.params.food_fall_speed,
                &mut self.rng,
            );
            self.food.push(item);
        }
    }

    /// Feeds the fish with the given id one meal, without spending a charge.
    ///
    /// # Returns
    ///
    /// `false` when no such fish lives or the run is over.
    pub fn feed_fish(&mut self, fish_id: usize) -> bool {
        if !self.level.is_running() || !self.fish.iter().any(|f| f.id == fish_id) {
            return false;
        }
        events::apply_events(self, [SimulationEvent::FishFed { fish_id }]);
        self.flush_nursery();
        true
    }

    /// Takes the notifications raised since the last call.
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    /// Starts a new run at level 1.
    pub fn restart(&mut self) {
        self.level.restart();
        self.stats = ReproductionStats::default();
        self.event_log.clear();
        self.notifications.clear();
        self.seed_level();
    }

    /// Read-only view for the renderer.
    pub fn snapshot(&self) -> TankSnapshot {
        let level = self.level.level();
        TankSnapshot {
            time: self.time,
            level,
            deaths: self.level.deaths(),
            casualty_limit: self.params.casualty_limit,
            target_population: level::target_population(level, &self.params),
            food_charges: self.panel.charges(),
            panel_capacity: self.panel.capacity(),
            state: self.level.state(),
            lure: self.lure.as_ref().map(|p| [p[0], p[1]]),
            fish: self
                .fish
                .iter()
                .map(|fish| FishView::new(fish, &self.params.palette))
                .collect(),
            food: self.food.iter().map(FoodView::from).collect(),
        }
    }

    /// Applies one meal to the fish with `fish_id`, parking any offspring in the nursery.
    pub(crate) fn feed_by_id(&mut self, fish_id: usize) -> bool {
        let Some(idx) = self.fish.iter().position(|f| f.id == fish_id) else {
            return false;
        };

        let growth = level::growth_multiplier(self.level.level(), &self.params);
        let outcome = feeding::feed(&mut self.fish[idx], growth, &self.params);
        let size = self.fish[idx].size;
        self.stats.record_size(size);
        tracing::debug!(fish_id, size, "fish fed");
        self.event_log.log(
            self.time,
            format!("Fish #{} grew to {:.1}", fish_id, size),
            EventKind::Feeding,
        );

        if outcome == FeedOutcome::Reproduce {
            let id = self.allocate_id();
            let child = reproduction::clone_fish(&self.fish[idx], id, &mut self.rng);
            self.stats.record_birth(&child);
            tracing::debug!(parent_id = fish_id, child_id = id, "fish spawned");
            self.event_log.log(
                self.time,
                format!("Fish #{} spawned fish #{}", fish_id, id),
                EventKind::Reproduction,
            );
            self.nursery.push(child);
        }

        true
    }

    fn allocate_id(&mut self) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn flush_nursery(&mut self) {
        self.fish.append(&mut self.nursery);
    }

    fn assign_targets(&mut self) {
        if let Some(lure) = &self.lure {
            for fish in &mut self.fish {
                fish.chase(lure.clone());
            }
        } else if self.params.feeding_mode == FeedingMode::FallingFood {
            let index = SpatialIndex::build(&[], &self.food);
            feeding::chase_nearest_food(&mut self.fish, &self.food, &index);
        }
    }

    fn sink_food(&mut self) {
        for item in &mut self.food {
            item.fall();
        }

        let index = SpatialIndex::build(&self.fish, &self.food);
        let meals = feeding::match_falling_food(&self.fish, &self.food, &index);
        events::apply_events(self, meals);

        let bounds = self.bounds;
        self.food.retain(|item| !item.is_out_of_tank(&bounds));
    }

    fn seed_level(&mut self) {
        self.fish.clear();
        self.food.clear();
        self.nursery.clear();
        self.panel.reset();
        self.stats.start_level();
        self.lure = None;

        let level = self.level.level();
        let multiplier = level::speed_multiplier(level, &self.params);
        let colors = level::palette_size(level, self.params.palette.len());

        for _ in 0..self.params.founder_count {
            let id = self.allocate_id();
            let color = self.rng.random_range(0..colors);
            let fish = Fish::new_random(
                id,
                &self.bounds,
                color,
                multiplier,
                &self.params,
                &mut self.rng,
            );
            self.fish.push(fish);
        }

        tracing::info!(level, target = level::target_population(level, &self.params), "level started");
        self.event_log
            .log(self.time, format!("Level {} started", level), EventKind::Level);
    }

    fn check_progress(&mut self) {
        let level = self.level.level();

        match self.level.evaluate(self.fish.len(), &self.params) {
            Transition::Stay => {}
            Transition::Defeat => {
                self.level.defeat();
                self.lure = None;
                tracing::info!(level, deaths = self.level.deaths(), "run lost");
                self.event_log.log(
                    self.time,
                    format!("Defeated on level {}", level),
                    EventKind::Defeat,
                );
                self.notifications.push(Notification::Defeated { level });
            }
            Transition::Complete => {
                self.level.complete();
                tracing::info!(level, population = self.fish.len(), "level complete");
                self.event_log.log(
                    self.time,
                    format!("Level {} complete", level),
                    EventKind::Level,
                );
                self.notifications.push(Notification::LevelComplete { level });
                self.level.advance();
                self.seed_level();
            }
        }
    }
}
