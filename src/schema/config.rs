//! Configuration types for Game of Life and SmoothLife simulations.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Smallest board on which the 8-cell Moore neighborhood does not alias.
pub const MIN_BOARD_SIZE: usize = 3;

/// Top-level simulation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Side length of the square toroidal board in cells.
    pub board_size: usize,
    /// Radius of the inner disk (SmoothLife "m" neighborhood).
    pub inner_radius: u32,
    /// Radius of the outer disk; the outer ring excludes the inner disk.
    pub outer_radius: u32,
    /// Cell update rule.
    pub rule: Rule,
    /// How a generation is evaluated across cells.
    #[serde(default)]
    pub strategy: ExecutionStrategy,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            board_size: 1000,
            inner_radius: 2,
            outer_radius: 6,
            rule: Rule::default(),
            strategy: ExecutionStrategy::default(),
        }
    }
}

/// Cell update rule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Rule {
    /// Discrete B3/S23 on the 8-cell Moore neighborhood.
    GameOfLife,
    /// Continuous rule driven by inner-disk and outer-ring averages.
    SmoothLife {
        #[serde(default)]
        params: TransitionParams,
    },
}

impl Default for Rule {
    fn default() -> Self {
        Rule::SmoothLife {
            params: TransitionParams::default(),
        }
    }
}

impl Rule {
    /// Map a seed value into the rule's cell domain.
    ///
    /// Game of Life cells are 0 or 1 (live at 0.5 and above); SmoothLife cells
    /// are clamped to `[0, 1]`. NaN maps to 0 for both.
    #[inline]
    pub fn normalize_cell(&self, value: f32) -> f32 {
        if value.is_nan() {
            return 0.0;
        }
        match self {
            Rule::GameOfLife => {
                if value >= 0.5 { 1.0 } else { 0.0 }
            }
            Rule::SmoothLife { .. } => value.clamp(0.0, 1.0),
        }
    }
}

/// Parameters of the SmoothLife transition function.
///
/// The outer-ring average must fall inside an interval for the cell to be
/// alive next generation. The interval blends from `[birth_min, birth_max]`
/// (empty inner disk) to `[survive_min, survive_max]` (full inner disk).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransitionParams {
    pub birth_min: f32,
    pub birth_max: f32,
    pub survive_min: f32,
    pub survive_max: f32,
    /// Sigmoid width applied to the outer-ring average.
    pub alpha_outer: f32,
    /// Sigmoid width applied to the inner-disk average.
    pub alpha_inner: f32,
}

impl Default for TransitionParams {
    fn default() -> Self {
        Self {
            birth_min: 0.278,
            birth_max: 0.365,
            survive_min: 0.267,
            survive_max: 0.445,
            alpha_outer: 0.028,
            alpha_inner: 0.147,
        }
    }
}

/// Execution strategy for one generation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecutionStrategy {
    /// Every cell is an independent rayon task.
    #[default]
    Parallel,
    /// Flat cell index from 0 to N²-1 on the calling thread.
    Sequential,
}

impl SimulationConfig {
    /// Total number of cells (board_size²).
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.board_size * self.board_size
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board_size < MIN_BOARD_SIZE {
            return Err(ConfigError::InvalidBoardSize {
                board_size: self.board_size,
            });
        }
        check_radii(self.inner_radius, self.outer_radius, self.board_size)?;
        if let Rule::SmoothLife { params } = &self.rule {
            if params.alpha_outer <= 0.0 || params.alpha_inner <= 0.0 {
                return Err(ConfigError::InvalidSteepness);
            }
        }
        Ok(())
    }

    /// Parse a configuration from JSON text and validate it.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: SimulationConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}

/// Check an inner/outer radius pair against a board size.
///
/// Rejects `outer < inner` and any outer radius whose disk would wrap onto
/// itself on the torus (`2 * outer + 1 > board_size`).
pub fn check_radii(inner_radius: u32, outer_radius: u32, board_size: usize) -> Result<(), ConfigError> {
    let diameter = 2 * outer_radius as usize + 1;
    if outer_radius < inner_radius || diameter > board_size {
        return Err(ConfigError::InvalidRadius {
            inner: inner_radius,
            outer: outer_radius,
            board_size,
        });
    }
    Ok(())
}

/// Configuration validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Board size {board_size} is below the minimum of 3")]
    InvalidBoardSize { board_size: usize },
    #[error("Invalid radii (inner {inner}, outer {outer}) for board size {board_size}")]
    InvalidRadius {
        inner: u32,
        outer: u32,
        board_size: usize,
    },
    #[error("Transition sigmoid widths must be positive")]
    InvalidSteepness,
    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}
