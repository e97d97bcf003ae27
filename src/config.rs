use crate::{Grid, LifeError, Result};
use std::{path::PathBuf, time::Duration};

pub struct Config;

impl Config {
    pub const ALIVE_CHAR: char = '#';
    pub const DEAD_CHAR: char = '.';

    pub const DEFAULT_WIDTH: usize = 5;
    pub const DEFAULT_HEIGHT: usize = 5;
    pub const DEFAULT_ALIVE: usize = 5;
    pub const DEFAULT_STEPS: usize = 10;
}

/// Everything needed to start a simulation.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationConfig {
    pub width: usize,
    pub height: usize,
    /// Number of randomly placed alive cells; ignored when `init` is set.
    pub alive: usize,
    /// Seconds between frames.
    pub delay: Option<f64>,
    pub steps: usize,
    /// Pattern file; overrides `width`, `height` and `alive`.
    pub init: Option<PathBuf>,
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            width: Config::DEFAULT_WIDTH,
            height: Config::DEFAULT_HEIGHT,
            alive: Config::DEFAULT_ALIVE,
            delay: None,
            steps: Config::DEFAULT_STEPS,
            init: None,
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Checks what can be checked without touching the filesystem.
    pub fn validate(&self) -> Result<()> {
        self.delay()?;
        if self.init.is_none() {
            let available = Grid::checked_capacity(self.width, self.height)?;
            if self.alive > available {
                return Err(LifeError::Configuration {
                    requested: self.alive,
                    available,
                });
            }
        }
        Ok(())
    }

    /// The pause between frames, or `None` if there is none.
    pub fn delay(&self) -> Result<Option<Duration>> {
        self.delay
            .map(|secs| {
                Duration::try_from_secs_f64(secs).map_err(|_| LifeError::InvalidDelay(secs))
            })
            .transpose()
    }

    /// Validates the config and builds the initial generation.
    pub fn build_grid(&self) -> Result<Grid> {
        self.validate()?;
        match &self.init {
            Some(path) => Grid::from_pattern_file(path),
            None => {
                let mut grid = Grid::blank(self.width, self.height)?;
                grid.random_seed(self.alive, self.seed)?;
                Ok(grid)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_builds() {
        let config = SimulationConfig {
            seed: Some(7),
            ..Default::default()
        };
        let grid = config.build_grid().unwrap();
        assert_eq!((grid.width(), grid.height()), (5, 5));
        assert_eq!(grid.population(), 5);
        assert_eq!(config.delay().unwrap(), None);
    }

    #[test]
    fn test_rejects_bad_values() {
        let too_many = SimulationConfig {
            width: 2,
            height: 2,
            alive: 5,
            ..Default::default()
        };
        assert!(matches!(
            too_many.build_grid(),
            Err(LifeError::Configuration {
                requested: 5,
                available: 4
            })
        ));

        let empty = SimulationConfig {
            height: 0,
            ..Default::default()
        };
        assert!(matches!(
            empty.validate(),
            Err(LifeError::Precondition { .. })
        ));

        for delay in [-1., f64::NAN, f64::INFINITY, 1e30] {
            let config = SimulationConfig {
                delay: Some(delay),
                ..Default::default()
            };
            assert!(matches!(config.validate(), Err(LifeError::InvalidDelay(_))));
            assert!(matches!(config.build_grid(), Err(LifeError::InvalidDelay(_))));
            assert!(matches!(config.delay(), Err(LifeError::InvalidDelay(_))));
        }

        let huge = SimulationConfig {
            width: 1 << 40,
            height: 1 << 40,
            ..Default::default()
        };
        assert!(matches!(
            huge.build_grid(),
            Err(LifeError::Precondition {
                width: 1099511627776,
                height: 1099511627776
            })
        ));
    }

    #[test]
    fn test_full_grid_is_allowed() {
        let config = SimulationConfig {
            width: 3,
            height: 3,
            alive: 9,
            seed: Some(1),
            ..Default::default()
        };
        assert_eq!(config.build_grid().unwrap().population(), 9);
    }

    #[test]
    fn test_missing_pattern_file() {
        let config = SimulationConfig {
            init: Some(PathBuf::from("/nonexistent/pattern.txt")),
            ..Default::default()
        };
        assert!(matches!(config.build_grid(), Err(LifeError::Io { .. })));
    }

    #[test]
    fn test_delay_conversion() {
        let config = SimulationConfig {
            delay: Some(0.25),
            ..Default::default()
        };
        assert_eq!(config.delay().unwrap(), Some(Duration::from_millis(250)));
    }
}
