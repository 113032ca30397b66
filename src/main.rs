//! SmoothLife CLI - Run headless simulations from JSON configuration.

#[cfg(feature = "dhat-heap")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use smooth_life::{
    compute::{ModeEvent, Simulation, SimulationStats},
    schema::{Rule, Seed, SimulationConfig},
};

fn main() {
    #[cfg(feature = "dhat-heap")]
    let _profiler = dhat::Profiler::new_heap();

    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <config.json> [frames]", args[0]);
        eprintln!();
        eprintln!("Run a Game of Life or SmoothLife simulation from JSON configuration.");
        eprintln!();
        eprintln!("Arguments:");
        eprintln!("  config.json  Path to simulation configuration file");
        eprintln!("  frames       Number of frames to drive (default: 100)");
        eprintln!();
        eprintln!("Example configuration is generated with --example flag.");
        std::process::exit(1);
    }

    if args[1] == "--example" {
        print_example_config();
        return;
    }

    let config_path = PathBuf::from(&args[1]);
    let frames: u64 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(100);

    let config = SimulationConfig::load(&config_path).unwrap_or_else(|e| {
        eprintln!("Error loading config: {}", e);
        std::process::exit(1);
    });

    // Load or create seed
    let seed_path = config_path.with_extension("seed.json");
    let seed: Seed = if seed_path.exists() {
        let seed_str = fs::read_to_string(&seed_path).unwrap_or_else(|e| {
            eprintln!("Error reading seed file: {}", e);
            std::process::exit(1);
        });
        serde_json::from_str(&seed_str).unwrap_or_else(|e| {
            eprintln!("Error parsing seed: {}", e);
            std::process::exit(1);
        })
    } else {
        Seed::default_for(&config.rule)
    };

    let rule_name = match config.rule {
        Rule::GameOfLife => "Game of Life",
        Rule::SmoothLife { .. } => "SmoothLife",
    };

    println!("{} Simulation", rule_name);
    println!("=====================");
    println!("Board: {}x{}", config.board_size, config.board_size);
    println!("Radii: inner {}, outer {}", config.inner_radius, config.outer_radius);
    println!("Strategy: {:?}", config.strategy);
    println!("Frames: {}", frames);
    println!();

    let mut simulation = Simulation::from_seed(config, &seed).unwrap_or_else(|e| {
        eprintln!("Error initializing simulation: {}", e);
        std::process::exit(1);
    });

    println!(
        "Neighborhood: {} inner cells, {} outer cells",
        simulation.offsets().inner().len(),
        simulation.offsets().outer().len()
    );
    print_stats("Initial state", &simulation.stats());

    simulation.set_mode(ModeEvent::RunToggle);

    println!("Running simulation...");
    let start = Instant::now();

    for i in 0..frames {
        simulation.on_frame();

        // Print progress every 10%
        if (i + 1) % (frames / 10).max(1) == 0 {
            let stats = simulation.stats();
            let elapsed = start.elapsed().as_secs_f32();
            println!(
                "  Frame {}/{}: mean={:.6}, live={}, {:.1} generations/s",
                i + 1,
                frames,
                stats.mean,
                stats.live_cells,
                simulation.generation() as f32 / elapsed
            );
        }
    }

    let elapsed = start.elapsed();
    println!();
    print_stats("Final state", &simulation.stats());
    println!(
        "Time: {:.2}s ({:.1} generations/s)",
        elapsed.as_secs_f32(),
        simulation.generation() as f32 / elapsed.as_secs_f32()
    );
}

fn print_stats(label: &str, stats: &SimulationStats) {
    println!("{}:", label);
    println!("  Mean value: {:.6}", stats.mean);
    println!("  Live cells: {}", stats.live_cells);
    println!("  Value range: [{:.6}, {:.6}]", stats.min, stats.max);
    println!();
}

fn print_example_config() {
    let config = SimulationConfig::default();
    let seed = Seed::default();

    match (
        serde_json::to_string_pretty(&config),
        serde_json::to_string_pretty(&seed),
    ) {
        (Ok(config_json), Ok(seed_json)) => {
            println!("Example configuration (config.json):");
            println!("{}", config_json);
            println!();
            println!("Example seed (config.seed.json):");
            println!("{}", seed_json);
        }
        (Err(e), _) | (_, Err(e)) => {
            eprintln!("Error serializing example: {}", e);
            std::process::exit(1);
        }
    }
}
