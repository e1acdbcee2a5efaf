//! Configuration for a game session.

use crate::tables::Difficulty;

/// Default chance that an escape attempt fails.
pub const DEFAULT_FLEE_FAILURE_CHANCE: f64 = 0.5;

/// Configuration for a game session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// RNG seed for reproducible playthroughs.
    pub seed: u64,
    /// Difficulty used for a fresh or restarted game.
    pub difficulty: Difficulty,
    /// Probability that fleeing fails and the monster gets a free attack.
    pub flee_failure_chance: f64,
    /// Keep the action lock after each combat round until
    /// [`GameSession::settle`](crate::GameSession::settle) is called.
    pub manual_settle: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            difficulty: Difficulty::Normal,
            flee_failure_chance: DEFAULT_FLEE_FAILURE_CHANCE,
            manual_settle: false,
        }
    }
}

impl SessionConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the starting difficulty.
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Set the flee failure chance (clamped to 0.0-1.0).
    pub fn with_flee_failure_chance(mut self, chance: f64) -> Self {
        self.flee_failure_chance = if chance.is_nan() {
            DEFAULT_FLEE_FAILURE_CHANCE
        } else {
            chance.clamp(0.0, 1.0)
        };
        self
    }

    /// Hold the action lock after combat rounds until settled explicitly.
    pub fn with_manual_settle(mut self, manual: bool) -> Self {
        self.manual_settle = manual;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = SessionConfig::default();
        assert_eq!(cfg.seed, 42);
        assert_eq!(cfg.difficulty, Difficulty::Normal);
        assert!((cfg.flee_failure_chance - 0.5).abs() < f64::EPSILON);
        assert!(!cfg.manual_settle);
    }

    #[test]
    fn builder_methods() {
        let cfg = SessionConfig::default()
            .with_seed(7)
            .with_difficulty(Difficulty::Hard)
            .with_flee_failure_chance(0.3)
            .with_manual_settle(true);
        assert_eq!(cfg.seed, 7);
        assert_eq!(cfg.difficulty, Difficulty::Hard);
        assert!((cfg.flee_failure_chance - 0.3).abs() < f64::EPSILON);
        assert!(cfg.manual_settle);
    }

    #[test]
    fn flee_chance_clamped() {
        let cfg = SessionConfig::default().with_flee_failure_chance(2.0);
        assert!((cfg.flee_failure_chance - 1.0).abs() < f64::EPSILON);
        let cfg = SessionConfig::default().with_flee_failure_chance(-1.0);
        assert!(cfg.flee_failure_chance.abs() < f64::EPSILON);
        let cfg = SessionConfig::default().with_flee_failure_chance(f64::NAN);
        assert!((cfg.flee_failure_chance - 0.5).abs() < f64::EPSILON);
    }
}
