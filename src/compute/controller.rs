//! Simulation controller - mode state machine and generation driver.
//!
//! The external frame driver calls [`Simulation::on_frame`] once per accepted
//! frame. Input handling translates key presses into [`ModeEvent`]s.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::schema::{ConfigError, ExecutionStrategy, Seed, SimulationConfig};

use super::{GridBuffer, GridError, GridView, NeighborOffsetTable, UpdateKernel};

/// Whether a generation is due on the next frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SimulationMode {
    /// No advance pending.
    #[default]
    Idle,
    /// Advance once, then return to idle.
    StepOnce,
    /// Advance on every frame.
    Running,
}

/// Input event that changes the mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeEvent {
    RunToggle,
    StepOnce,
}

impl ModeEvent {
    /// Default key bindings: space toggles running, `n` steps once.
    pub fn from_key(key: char) -> Option<Self> {
        match key {
            ' ' => Some(ModeEvent::RunToggle),
            'n' | 'N' => Some(ModeEvent::StepOnce),
            _ => None,
        }
    }
}

impl SimulationMode {
    /// Mode after an input event.
    pub fn on_event(self, event: ModeEvent) -> Self {
        match (event, self) {
            (ModeEvent::RunToggle, SimulationMode::Running) => SimulationMode::Idle,
            (ModeEvent::RunToggle, _) => SimulationMode::Running,
            (ModeEvent::StepOnce, _) => SimulationMode::StepOnce,
        }
    }
}

/// Errors raised while setting up a simulation.
#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Grid(#[from] GridError),
}

/// A running Game of Life or SmoothLife instance.
pub struct Simulation {
    config: SimulationConfig,
    offsets: NeighborOffsetTable,
    grid: GridBuffer,
    mode: SimulationMode,
    generation: u64,
}

impl Simulation {
    /// Validate `config`, build the neighborhood table and seed the grid.
    ///
    /// Seed values are mapped into the rule's cell domain with
    /// [`Rule::normalize_cell`](crate::schema::Rule::normalize_cell).
    pub fn initialize<F>(config: SimulationConfig, mut seed_fn: F) -> Result<Self, SimulationError>
    where
        F: FnMut(usize, usize) -> f32,
    {
        config.validate()?;
        let offsets =
            NeighborOffsetTable::build(config.inner_radius, config.outer_radius, config.board_size)?;
        let rule = config.rule;
        let grid = GridBuffer::seeded(config.board_size, |row, col| {
            rule.normalize_cell(seed_fn(row, col))
        });
        Ok(Self::assemble(config, offsets, grid))
    }

    /// Create a simulation seeded from a [`Seed`] pattern.
    pub fn from_seed(config: SimulationConfig, seed: &Seed) -> Result<Self, SimulationError> {
        config.validate()?;
        let offsets =
            NeighborOffsetTable::build(config.inner_radius, config.outer_radius, config.board_size)?;
        let values = normalized(&config, seed.generate(config.board_size));
        let grid = GridBuffer::from_values(config.board_size, values)?;
        Ok(Self::assemble(config, offsets, grid))
    }

    /// Create a simulation from an explicit row-major initial state.
    pub fn from_values(config: SimulationConfig, values: Vec<f32>) -> Result<Self, SimulationError> {
        config.validate()?;
        let offsets =
            NeighborOffsetTable::build(config.inner_radius, config.outer_radius, config.board_size)?;
        let grid = GridBuffer::from_values(config.board_size, normalized(&config, values))?;
        Ok(Self::assemble(config, offsets, grid))
    }

    fn assemble(config: SimulationConfig, offsets: NeighborOffsetTable, grid: GridBuffer) -> Self {
        log::info!(
            "Initialized {}x{} board: {:?}, inner {} cells, outer {} cells, {:?} strategy",
            config.board_size,
            config.board_size,
            config.rule,
            offsets.inner().len(),
            offsets.outer().len(),
            config.strategy
        );
        Self {
            config,
            offsets,
            grid,
            mode: SimulationMode::Idle,
            generation: 0,
        }
    }

    /// Apply an input event to the mode.
    pub fn set_mode(&mut self, event: ModeEvent) {
        let next = self.mode.on_event(event);
        log::debug!("Mode {:?} -> {:?} on {:?}", self.mode, next, event);
        self.mode = next;
    }

    /// Advance if the mode calls for it and return the current generation.
    pub fn on_frame(&mut self) -> GridView<'_> {
        match self.mode {
            SimulationMode::Idle => {}
            SimulationMode::StepOnce => {
                self.advance();
                self.mode = SimulationMode::Idle;
            }
            SimulationMode::Running => self.advance(),
        }
        self.grid.current()
    }

    /// Compute one generation regardless of mode.
    pub fn advance(&mut self) {
        let kernel = UpdateKernel::new(&self.config.rule, &self.offsets);
        let strategy = self.config.strategy;

        self.grid.advance_into(|input, next| match strategy {
            ExecutionStrategy::Parallel => {
                next.par_iter_mut()
                    .enumerate()
                    .for_each(|(i, out)| *out = kernel.evaluate(i, input));
            }
            ExecutionStrategy::Sequential => {
                for (i, out) in next.iter_mut().enumerate() {
                    *out = kernel.evaluate(i, input);
                }
            }
        });

        // All writes are complete once advance_into returns
        self.grid.swap();
        self.generation += 1;
        log::trace!("Generation {}", self.generation);
    }

    /// Advance `generations` times, ignoring the mode.
    pub fn run(&mut self, generations: u64) {
        for _ in 0..generations {
            self.advance();
        }
    }

    #[inline]
    pub fn mode(&self) -> SimulationMode {
        self.mode
    }

    /// Generations computed since initialization.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[inline]
    pub fn current(&self) -> GridView<'_> {
        self.grid.current()
    }

    #[inline]
    pub fn previous(&self) -> GridView<'_> {
        self.grid.previous()
    }

    pub fn offsets(&self) -> &NeighborOffsetTable {
        &self.offsets
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn stats(&self) -> SimulationStats {
        SimulationStats::from_view(self.grid.current())
    }
}

fn normalized(config: &SimulationConfig, mut values: Vec<f32>) -> Vec<f32> {
    for v in &mut values {
        *v = config.rule.normalize_cell(*v);
    }
    values
}

/// Field statistics for monitoring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationStats {
    pub total: f32,
    pub mean: f32,
    pub min: f32,
    pub max: f32,
    /// Cells above 0.5.
    pub live_cells: usize,
}

impl SimulationStats {
    pub fn from_view(view: GridView<'_>) -> Self {
        let mut total = 0.0f32;
        let mut min = f32::INFINITY;
        let mut max = f32::NEG_INFINITY;
        let mut live_cells = 0usize;

        for &v in view.as_slice() {
            total += v;
            min = min.min(v);
            max = max.max(v);
            if v > 0.5 {
                live_cells += 1;
            }
        }

        Self {
            total,
            mean: total / view.len().max(1) as f32,
            min,
            max,
            live_cells,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Pattern, Rule};

    fn life_config(board_size: usize, strategy: ExecutionStrategy) -> SimulationConfig {
        SimulationConfig {
            board_size,
            inner_radius: 0,
            outer_radius: 1,
            rule: Rule::GameOfLife,
            strategy,
        }
    }

    fn smooth_config(board_size: usize, strategy: ExecutionStrategy) -> SimulationConfig {
        SimulationConfig {
            board_size,
            inner_radius: 2,
            outer_radius: 6,
            rule: Rule::default(),
            strategy,
        }
    }

    fn live_set(view: GridView<'_>) -> Vec<(usize, usize)> {
        let n = view.board_size();
        (0..n * n)
            .filter(|&i| view.get_index(i) == 1.0)
            .map(|i| (i / n, i % n))
            .collect()
    }

    #[test]
    fn test_mode_transitions() {
        use SimulationMode::*;
        assert_eq!(Idle.on_event(ModeEvent::RunToggle), Running);
        assert_eq!(StepOnce.on_event(ModeEvent::RunToggle), Running);
        assert_eq!(Running.on_event(ModeEvent::RunToggle), Idle);
        assert_eq!(Idle.on_event(ModeEvent::StepOnce), StepOnce);
        assert_eq!(Running.on_event(ModeEvent::StepOnce), StepOnce);
    }

    #[test]
    fn test_key_bindings() {
        assert_eq!(ModeEvent::from_key(' '), Some(ModeEvent::RunToggle));
        assert_eq!(ModeEvent::from_key('n'), Some(ModeEvent::StepOnce));
        assert_eq!(ModeEvent::from_key('q'), None);
    }

    #[test]
    fn test_idle_frame_does_not_advance() {
        let mut sim = Simulation::initialize(life_config(8, ExecutionStrategy::Sequential), |r, c| {
            if r == 3 && c == 3 { 1.0 } else { 0.0 }
        })
        .unwrap();
        let view = sim.on_frame();
        assert_eq!(view.get(3, 3), 1.0);
        assert_eq!(sim.generation(), 0);
    }

    #[test]
    fn test_step_once_reverts_to_idle() {
        let mut sim =
            Simulation::initialize(life_config(8, ExecutionStrategy::Sequential), |_, _| 0.0).unwrap();
        sim.set_mode(ModeEvent::StepOnce);
        sim.on_frame();
        assert_eq!(sim.generation(), 1);
        assert_eq!(sim.mode(), SimulationMode::Idle);
        sim.on_frame();
        assert_eq!(sim.generation(), 1);
    }

    #[test]
    fn test_running_advances_every_frame() {
        let mut sim =
            Simulation::initialize(life_config(8, ExecutionStrategy::Parallel), |_, _| 0.0).unwrap();
        sim.set_mode(ModeEvent::RunToggle);
        for _ in 0..5 {
            sim.on_frame();
        }
        assert_eq!(sim.generation(), 5);
        assert_eq!(sim.mode(), SimulationMode::Running);

        sim.set_mode(ModeEvent::RunToggle);
        sim.on_frame();
        assert_eq!(sim.generation(), 5);
    }

    #[test]
    fn test_initialize_rejects_invalid_radius() {
        let mut config = smooth_config(32, ExecutionStrategy::Sequential);
        config.inner_radius = 7;
        let result = Simulation::initialize(config, |_, _| 0.0);
        assert!(matches!(
            result,
            Err(SimulationError::Config(ConfigError::InvalidRadius { .. }))
        ));
    }

    #[test]
    fn test_from_values_size_mismatch() {
        let result = Simulation::from_values(life_config(8, ExecutionStrategy::Sequential), vec![0.0; 10]);
        assert!(matches!(
            result,
            Err(SimulationError::Grid(GridError::BufferSizeMismatch { expected: 64, actual: 10 }))
        ));
    }

    fn binary(view: GridView<'_>) -> bool {
        view.as_slice().iter().all(|&v| v == 0.0 || v == 1.0)
    }

    #[test]
    fn test_game_of_life_seeds_are_binary() {
        let config = life_config(20, ExecutionStrategy::Sequential);

        let sim = Simulation::from_seed(config.clone(), &Seed::default_for(&Rule::GameOfLife)).unwrap();
        assert!(binary(sim.current()));

        // Continuous noise is snapped rather than fed to the integer rule
        let mut sim = Simulation::from_seed(config.clone(), &Seed::default()).unwrap();
        assert!(binary(sim.current()));
        assert!(binary(sim.previous()));
        sim.advance();
        assert!(binary(sim.current()));

        let sim = Simulation::initialize(config.clone(), |r, c| (r * 20 + c) as f32 / 400.0).unwrap();
        assert!(binary(sim.current()));
        assert_eq!(sim.current().get(0, 0), 0.0);
        assert_eq!(sim.current().get(19, 19), 1.0);

        let sim = Simulation::from_values(config, vec![0.6; 400]).unwrap();
        assert_eq!(sim.stats().live_cells, 400);
    }

    #[test]
    fn test_smooth_life_seeds_clamped() {
        let config = smooth_config(20, ExecutionStrategy::Sequential);
        let sim = Simulation::from_values(config, vec![2.0; 400]).unwrap();
        assert!(sim.current().as_slice().iter().all(|&v| v == 1.0));
    }

    #[test]
    fn test_single_cell_dies() {
        let mut sim = Simulation::initialize(life_config(10, ExecutionStrategy::Sequential), |r, c| {
            if r == 5 && c == 5 { 1.0 } else { 0.0 }
        })
        .unwrap();
        sim.advance();
        assert!(sim.current().as_slice().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_block_is_still_life() {
        let config = life_config(10, ExecutionStrategy::Parallel);
        let seed = Seed {
            pattern: Pattern::Block { row: 4, col: 4 },
        };
        let mut sim = Simulation::from_seed(config, &seed).unwrap();
        let before = sim.current().as_slice().to_vec();
        sim.advance();
        assert_eq!(sim.current().as_slice(), before.as_slice());
    }

    #[test]
    fn test_glider_translates_after_four_generations() {
        let config = life_config(16, ExecutionStrategy::Sequential);
        let seed = Seed {
            pattern: Pattern::Glider { row: 5, col: 5 },
        };
        let mut sim = Simulation::from_seed(config, &seed).unwrap();
        let start = live_set(sim.current());
        assert_eq!(start.len(), 5);

        sim.run(4);
        let expected: Vec<(usize, usize)> = start.iter().map(|&(r, c)| (r + 1, c + 1)).collect();
        assert_eq!(live_set(sim.current()), expected);
    }

    #[test]
    fn test_glider_crosses_torus_edge() {
        let config = life_config(10, ExecutionStrategy::Parallel);
        let seed = Seed {
            pattern: Pattern::Glider { row: 0, col: 0 },
        };
        let mut sim = Simulation::from_seed(config, &seed).unwrap();
        let start = live_set(sim.current());

        // 40 generations move the glider 10 cells diagonally: a full lap
        sim.run(40);
        assert_eq!(live_set(sim.current()), start);
    }

    #[test]
    fn test_previous_generation_untouched() {
        let seed = Seed {
            pattern: Pattern::RandomFill {
                region: 1.0,
                density: 0.4,
                seed: 3,
            },
        };
        let mut sim = Simulation::from_seed(life_config(12, ExecutionStrategy::Parallel), &seed).unwrap();
        let before = sim.current().as_slice().to_vec();
        sim.advance();
        assert_eq!(sim.previous().as_slice(), before.as_slice());
    }

    #[test]
    fn test_parallel_matches_sequential_game_of_life() {
        let seed = Seed {
            pattern: Pattern::RandomFill {
                region: 1.0,
                density: 0.35,
                seed: 2024,
            },
        };
        let mut parallel = Simulation::from_seed(life_config(50, ExecutionStrategy::Parallel), &seed).unwrap();
        let mut sequential =
            Simulation::from_seed(life_config(50, ExecutionStrategy::Sequential), &seed).unwrap();

        for generation in 0..20 {
            parallel.advance();
            sequential.advance();
            assert_eq!(
                parallel.current().as_slice(),
                sequential.current().as_slice(),
                "diverged at generation {}",
                generation + 1
            );
        }
    }

    #[test]
    fn test_parallel_matches_sequential_smooth_life() {
        let seed = Seed::default();
        let mut parallel = Simulation::from_seed(smooth_config(40, ExecutionStrategy::Parallel), &seed).unwrap();
        let mut sequential =
            Simulation::from_seed(smooth_config(40, ExecutionStrategy::Sequential), &seed).unwrap();

        for _ in 0..5 {
            parallel.advance();
            sequential.advance();
        }
        for (a, b) in parallel.current().as_slice().iter().zip(sequential.current().as_slice()) {
            assert!((a - b).abs() < 1e-5);
        }
    }

    #[test]
    fn test_uniform_smooth_life_stays_uniform() {
        for v in [0.0, 0.2, 0.35, 0.5, 1.0] {
            let mut sim =
                Simulation::initialize(smooth_config(20, ExecutionStrategy::Parallel), |_, _| v).unwrap();
            sim.advance();
            let first = sim.current().get_index(0);
            assert!((0.0..=1.0).contains(&first));
            assert!(
                sim.current().as_slice().iter().all(|&x| x == first),
                "non-uniform result for v = {}",
                v
            );
        }
    }

    #[test]
    fn test_smooth_life_output_bounded() {
        let mut sim = Simulation::from_seed(smooth_config(32, ExecutionStrategy::Parallel), &Seed::default())
            .unwrap();
        sim.run(10);
        let stats = sim.stats();
        assert!(stats.min >= 0.0 && stats.max <= 1.0);
    }

    #[test]
    fn test_stats() {
        let sim = Simulation::initialize(life_config(4, ExecutionStrategy::Sequential), |r, _| {
            if r == 0 { 1.0 } else { 0.0 }
        })
        .unwrap();
        let stats = sim.stats();
        assert_eq!(stats.total, 4.0);
        assert_eq!(stats.live_cells, 4);
        assert_eq!(stats.mean, 0.25);
        assert_eq!(stats.min, 0.0);
        assert_eq!(stats.max, 1.0);
    }
}
