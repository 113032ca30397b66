//! SmoothLife - Game of Life and SmoothLife on a toroidal grid.
//!
//! This crate provides the simulation engine behind an interactive viewer:
//! neighborhood precomputation, a double-buffered grid and the per-cell
//! update rules, driven one generation per accepted frame.
//!
//! # Architecture
//!
//! The crate is split into two main modules:
//!
//! - `schema`: Configuration types and seeding for simulations
//! - `compute`: Offset tables, grid buffers, update kernels and the controller
//!
//! # Example
//!
//! ```rust,no_run
//! use smooth_life::{
//!     compute::{ModeEvent, Simulation},
//!     schema::{Seed, SimulationConfig},
//! };
//!
//! let config = SimulationConfig::default();
//! let mut simulation = Simulation::from_seed(config, &Seed::default())?;
//!
//! // Space bar in the viewer
//! simulation.set_mode(ModeEvent::RunToggle);
//!
//! for _ in 0..100 {
//!     let frame = simulation.on_frame();
//!     // upload frame.as_bytes() to the display buffer
//!     let _ = frame.as_bytes();
//! }
//!
//! println!("Live cells after 100 frames: {}", simulation.stats().live_cells);
//! # Ok::<(), smooth_life::compute::SimulationError>(())
//! ```

pub mod compute;
pub mod schema;

// Re-export commonly used types
pub use compute::{GridView, ModeEvent, Simulation, SimulationError, SimulationMode, SimulationStats};
pub use schema::{ExecutionStrategy, Pattern, Rule, Seed, SimulationConfig};
