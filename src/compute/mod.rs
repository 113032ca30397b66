//! Compute module - Neighborhoods, grid storage and generation updates.

mod controller;
mod grid;
mod kernel;
mod offsets;
mod transition;

pub use controller::*;
pub use grid::*;
pub use kernel::*;
pub use offsets::*;
pub use transition::*;
