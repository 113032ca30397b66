//! Per-cell update kernels.
//!
//! A kernel reads only the current generation and returns one value. It never
//! fails and never observes writes made during the same generation.

use crate::schema::{Rule, TransitionParams};

use super::{GridView, NeighborOffsetTable, Offset, smooth_transition};

/// The 8 immediate neighbors.
pub const MOORE: [Offset; 8] = [
    Offset::new(-1, -1),
    Offset::new(0, -1),
    Offset::new(1, -1),
    Offset::new(-1, 0),
    Offset::new(1, 0),
    Offset::new(-1, 1),
    Offset::new(0, 1),
    Offset::new(1, 1),
];

/// B3/S23: live next generation with exactly 3 live neighbors, or 2 if live now.
#[inline]
pub fn game_of_life_cell(index: usize, input: GridView<'_>) -> f32 {
    let neighbors: f32 = MOORE.iter().map(|&o| input.get_offset(index, o)).sum();
    let alive = input.get_index(index) == 1.0;
    if neighbors == 3.0 || (alive && neighbors == 2.0) {
        1.0
    } else {
        0.0
    }
}

/// Mean of the field over `offsets` around `index`, or `fallback` if there are none.
#[inline]
pub fn neighborhood_average(index: usize, input: GridView<'_>, offsets: &[Offset], fallback: f32) -> f32 {
    if offsets.is_empty() {
        return fallback;
    }
    let sum: f32 = offsets.iter().map(|&o| input.get_offset(index, o)).sum();
    sum / offsets.len() as f32
}

/// SmoothLife: transition over the inner-disk and outer-ring averages.
#[inline]
pub fn smooth_life_cell(
    index: usize,
    input: GridView<'_>,
    offsets: &NeighborOffsetTable,
    params: &TransitionParams,
) -> f32 {
    let current = input.get_index(index);
    let inner_avg = neighborhood_average(index, input, offsets.inner(), current);
    let outer_avg = neighborhood_average(index, input, offsets.outer(), current);
    smooth_transition(inner_avg, outer_avg, params)
}

/// A rule bound to its neighborhood table for one generation.
#[derive(Debug, Clone, Copy)]
pub struct UpdateKernel<'a> {
    rule: &'a Rule,
    offsets: &'a NeighborOffsetTable,
}

impl<'a> UpdateKernel<'a> {
    pub fn new(rule: &'a Rule, offsets: &'a NeighborOffsetTable) -> Self {
        Self { rule, offsets }
    }

    /// Next value for the cell at flat `index`.
    #[inline]
    pub fn evaluate(&self, index: usize, input: GridView<'_>) -> f32 {
        match self.rule {
            Rule::GameOfLife => game_of_life_cell(index, input),
            Rule::SmoothLife { params } => smooth_life_cell(index, input, self.offsets, params),
        }
    }
}
