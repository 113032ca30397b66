//! Seed types for initializing simulations.

use rand::prelude::*;
use serde::{Deserialize, Serialize};

use super::Rule;

/// Complete seed specification for simulation initialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Seed {
    /// Pattern to use for seeding.
    pub pattern: Pattern,
}

impl Default for Seed {
    fn default() -> Self {
        Self {
            pattern: Pattern::Noise {
                region: 0.5,
                amplitude: 1.0,
                seed: 0,
            },
        }
    }
}

/// Predefined patterns for initialization.
///
/// Cell coordinates are `(row, col)`; `region` is the fraction of the board,
/// measured from the top-left corner along both axes, that gets filled.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Pattern {
    /// Alternating live/dead cells; live where row and col parity match.
    Checkerboard,
    /// Binary random fill.
    RandomFill {
        region: f32,
        /// Probability that a cell in the region is live.
        density: f64,
        seed: u64,
    },
    /// Uniform random values in `[0, amplitude]`.
    Noise { region: f32, amplitude: f32, seed: u64 },
    /// Five-cell glider with its bounding box at `(row, col)`, heading down-right.
    Glider { row: usize, col: usize },
    /// 2x2 still-life block with its top-left cell at `(row, col)`.
    Block { row: usize, col: usize },
    /// Custom sparse values as `(row, col, value)` entries.
    Custom { values: Vec<(usize, usize, f32)> },
}

/// Glider cells relative to the top-left of its 3x3 bounding box.
pub const GLIDER: [(usize, usize); 5] = [(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)];

impl Seed {
    /// Default seed for a rule: checkerboard for Game of Life, noise otherwise.
    pub fn default_for(rule: &Rule) -> Self {
        match rule {
            Rule::GameOfLife => Self {
                pattern: Pattern::Checkerboard,
            },
            Rule::SmoothLife { .. } => Self::default(),
        }
    }

    /// Generate a row-major board of `board_size * board_size` values.
    ///
    /// Pattern cells past the board edge wrap around the torus. Values are
    /// clamped to `[0, 1]`; NaN becomes 0.
    pub fn generate(&self, board_size: usize) -> Vec<f32> {
        let n = board_size;
        let mut grid = vec![0.0f32; n * n];
        if n == 0 {
            return grid;
        }

        match &self.pattern {
            Pattern::Checkerboard => {
                for row in 0..n {
                    for col in 0..n {
                        if row % 2 == col % 2 {
                            grid[row * n + col] = 1.0;
                        }
                    }
                }
            }
            Pattern::RandomFill {
                region,
                density,
                seed,
            } => {
                let mut rng = StdRng::seed_from_u64(*seed);
                let density = if density.is_nan() { 0.0 } else { density.clamp(0.0, 1.0) };
                let extent = region_extent(*region, n);
                for row in 0..extent {
                    for col in 0..extent {
                        if rng.gen_bool(density) {
                            grid[row * n + col] = 1.0;
                        }
                    }
                }
            }
            Pattern::Noise {
                region,
                amplitude,
                seed,
            } => {
                let mut rng = StdRng::seed_from_u64(*seed);
                let extent = region_extent(*region, n);
                for row in 0..extent {
                    for col in 0..extent {
                        grid[row * n + col] = unit(amplitude * rng.r#gen::<f32>());
                    }
                }
            }
            Pattern::Glider { row, col } => {
                for &(dr, dc) in &GLIDER {
                    grid[wrapped(*row, dr, n) * n + wrapped(*col, dc, n)] = 1.0;
                }
            }
            Pattern::Block { row, col } => {
                for dr in 0..2 {
                    for dc in 0..2 {
                        grid[wrapped(*row, dr, n) * n + wrapped(*col, dc, n)] = 1.0;
                    }
                }
            }
            Pattern::Custom { values } => {
                for &(row, col, v) in values {
                    if row < n && col < n {
                        grid[row * n + col] = unit(v);
                    }
                }
            }
        }

        grid
    }
}

#[inline]
fn unit(v: f32) -> f32 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

#[inline]
fn wrapped(coord: usize, delta: usize, n: usize) -> usize {
    (coord % n + delta) % n
}

fn region_extent(region: f32, board_size: usize) -> usize {
    let extent = (region.clamp(0.0, 1.0) * board_size as f32).round() as usize;
    extent.min(board_size)
}
