//! Level progression.
//!
//! A run is a sequence of levels. Each level asks for a larger population and
//! tolerates a fixed number of deaths:
//!
//! ```text
//! Running(n) --population >= target--> LevelComplete(n) --reseed--> Running(n + 1)
//! Running(n) --deaths >= limit-------> Defeated
//! ```
//!
//! Defeat is checked before completion, so a tick that crosses both
//! thresholds ends the run.

use serde::{Deserialize, Serialize};

use super::params::Params;

/// Where the run currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    /// The given level is being played.
    Running(u32),
    /// The given level was just cleared; the next one starts right away.
    LevelComplete(u32),
    /// The run is over. Terminal until an explicit restart.
    Defeated,
}

/// What the end-of-tick check decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Keep playing.
    Stay,
    /// The casualty limit (or near extinction, when enabled) was reached.
    Defeat,
    /// The population target was reached.
    Complete,
}

/// Population needed to clear `level`.
pub fn target_population(level: u32, params: &Params) -> usize {
    params.base_target + params.target_step * level.saturating_sub(1) as usize
}

/// Speed multiplier for fish created during `level`. Growth uses the same scaling.
pub fn speed_multiplier(level: u32, params: &Params) -> f32 {
    1.0 + params.level_speed_step * level.saturating_sub(1) as f32
}

/// Level growth multiplier applied to meals.
pub fn growth_multiplier(level: u32, params: &Params) -> f32 {
    speed_multiplier(level, params)
}

/// Number of palette colors in use at `level`, never less than one.
pub fn palette_size(level: u32, palette_len: usize) -> usize {
    palette_len
        .saturating_sub(level.saturating_sub(1) as usize)
        .max(1)
}

/// Tracks the current level, its deaths and the game state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelController {
    level: u32,
    deaths: u32,
    state: GameState,
}

impl Default for LevelController {
    fn default() -> Self {
        Self::new()
    }
}

impl LevelController {
    /// Starts at level 1.
    pub fn new() -> Self {
        Self {
            level: 1,
            deaths: 0,
            state: GameState::Running(1),
        }
    }

    /// Current level number, starting at 1.
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Deaths during the current level.
    pub fn deaths(&self) -> u32 {
        self.deaths
    }

    /// Current game state.
    pub fn state(&self) -> GameState {
        self.state
    }

    /// Whether ticks should still be processed.
    pub fn is_running(&self) -> bool {
        matches!(self.state, GameState::Running(_))
    }

    /// Adds to the death count of the current level.
    pub fn record_deaths(&mut self, count: u32) {
        self.deaths = self.deaths.saturating_add(count);
    }

    /// Decides the transition for a tick that ended with `live` fish.
    pub fn evaluate(&self, live: usize, params: &Params) -> Transition {
        if !self.is_running() {
            return Transition::Stay;
        }

        let extinct = params.defeat_on_near_extinction && live <= 1;
        if self.deaths >= params.casualty_limit || extinct {
            Transition::Defeat
        } else if live >= target_population(self.level, params) {
            Transition::Complete
        } else {
            Transition::Stay
        }
    }

    /// Ends the run.
    pub fn defeat(&mut self) {
        self.state = GameState::Defeated;
    }

    /// Marks the current level as cleared.
    pub fn complete(&mut self) {
        if self.is_running() {
            self.state = GameState::LevelComplete(self.level);
        }
    }

    /// Enters the next level with a clean death count.
    pub fn advance(&mut self) {
        self.level += 1;
        self.deaths = 0;
        self.state = GameState::Running(self.level);
    }

    /// Returns to level 1.
    pub fn restart(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_never_shrinks_below_one() {
        assert_eq!(palette_size(1, 6), 6);
        assert_eq!(palette_size(3, 6), 4);
        assert_eq!(palette_size(10, 6), 1);
        assert_eq!(palette_size(1, 0), 1);
    }

    #[test]
    fn multipliers_scale_with_level() {
        let params = Params::default();
        assert!((speed_multiplier(1, &params) - 1.0).abs() < 1e-6);
        assert!((speed_multiplier(3, &params) - 1.4).abs() < 1e-6);
        assert_eq!(target_population(1, &params), 10);
        assert_eq!(target_population(4, &params), 16);
    }
}
