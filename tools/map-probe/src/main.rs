//! map-probe: headless map inspection and simulation tool.
//!
//! Usage:
//!   map-probe inspect maps/level1.png [--config delve.toml]
//!   map-probe simulate maps/level1.png --ticks 600 [--frame-ms 16] [--move rd] [--config delve.toml]

use std::path::{Path, PathBuf};
use std::process;

use delve_core::commands::{MoveIntent, PlayerCommand};
use delve_core::config::DelveConfig;
use delve_core::enums::TileKind;
use delve_sim::SimulationEngine;
use delve_world::load_map;
use delve_world::pathfind::distance_field;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 3 && !matches!(args.get(1).map(String::as_str), Some("help" | "--help" | "-h")) {
        print_usage();
        process::exit(1);
    }

    match args[1].as_str() {
        "inspect" => cmd_inspect(Path::new(&args[2]), &args[3..]),
        "simulate" => cmd_simulate(Path::new(&args[2]), &args[3..]),
        "help" | "--help" | "-h" => print_usage(),
        other => {
            eprintln!("Unknown command: {other}");
            print_usage();
            process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!(
        "map-probe: Delve map inspection tool\n\
         \n\
         Commands:\n\
         \n\
         inspect  <map>   Print grid size, chunking, spawns and key reachability\n\
         \n\
           --config <path>    TOML config overriding the defaults\n\
         \n\
         simulate <map>   Run the engine headless and print the final snapshot as JSON\n\
         \n\
           --ticks <N>        Number of ticks to run (required)\n\
           --frame-ms <M>     Elapsed time per tick (default: 16)\n\
           --move <keys>      Held keys for the whole run, any of u/d/l/r (default: none)\n\
           --config <path>    TOML config overriding the defaults\n\
         \n\
         Maps are PNG images (white wall, black floor, green player, red enemy,\n\
         blue key) or .txt files (# wall, . floor, P player, E enemy, K key).\n"
    );
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

fn parse_number(args: &[String], flag: &str) -> Option<u64> {
    let raw = flag_value(args, flag)?;
    match raw.parse::<u64>() {
        Ok(n) => Some(n),
        Err(_) => {
            eprintln!("Error: {flag} expects a non-negative integer, got {raw}");
            process::exit(1);
        }
    }
}

fn parse_intent(args: &[String]) -> MoveIntent {
    let keys = flag_value(args, "--move").unwrap_or("");
    MoveIntent {
        up: keys.contains('u'),
        down: keys.contains('d'),
        left: keys.contains('l'),
        right: keys.contains('r'),
    }
}

fn load_config(args: &[String]) -> DelveConfig {
    let Some(path) = flag_value(args, "--config").map(PathBuf::from) else {
        return DelveConfig::default();
    };
    match DelveConfig::load(&path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: failed to load config {}: {e}", path.display());
            process::exit(1);
        }
    }
}

// --- Inspect command ---

fn cmd_inspect(map_path: &Path, args: &[String]) {
    let config = load_config(args);
    let map = match load_map(map_path, &config) {
        Ok(map) => map,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    let grid = &map.grid;
    let (chunk_w, chunk_h) = grid.chunk_size();
    println!("Map:          {}", map_path.display());
    println!("Size:         {}x{} tiles", grid.width(), grid.height());
    println!("Walls:        {}", grid.count(TileKind::Wall));
    println!("Floor:        {}", grid.count(TileKind::Floor));
    println!(
        "Chunks:       {} ({}x{} tiles each)",
        grid.chunks().len(),
        chunk_w,
        chunk_h
    );
    println!(
        "Player start: ({}, {})",
        map.player_start.x, map.player_start.y
    );
    println!("Enemies:      {}", map.enemy_spawns.len());
    for tile in &map.enemy_spawns {
        println!("  ({}, {})", tile.x, tile.y);
    }
    println!("Keys:         {}", map.key_spawns.len());

    let field = match distance_field(grid, map.player_start) {
        Ok(field) => field,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };
    for tile in &map.key_spawns {
        match field.get(grid, *tile) {
            Some(steps) => println!("  ({}, {}) {} steps from start", tile.x, tile.y, steps),
            None => {
                println!("  ({}, {}) unreachable", tile.x, tile.y);
                log::warn!("Key at ({}, {}) cannot be collected", tile.x, tile.y);
            }
        }
    }
    let reachable = grid
        .tiles()
        .filter(|t| field.get(grid, t.coord).is_some())
        .count();
    println!(
        "Reachable:    {} of {} floor tiles",
        reachable,
        grid.count(TileKind::Floor)
    );
}

// --- Simulate command ---

fn cmd_simulate(map_path: &Path, args: &[String]) {
    let Some(ticks) = parse_number(args, "--ticks").filter(|&n| n > 0) else {
        eprintln!("Error: --ticks <N> with N > 0 is required");
        process::exit(1);
    };
    let frame_ms = parse_number(args, "--frame-ms").unwrap_or(16);
    let intent = parse_intent(args);

    let mut engine = match SimulationEngine::load(map_path, load_config(args)) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };
    engine.queue_command(PlayerCommand::SetMovement { intent });

    let mut snapshot = engine.tick(frame_ms);
    for _ in 1..ticks {
        if engine.outcome().is_terminal() {
            break;
        }
        snapshot = engine.tick(frame_ms);
    }
    log::info!(
        "Stopped at tick {} ({} ms) with outcome {:?}",
        snapshot.time.tick,
        snapshot.time.now_ms,
        snapshot.outcome
    );

    match serde_json::to_string_pretty(&snapshot) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Error: failed to serialise snapshot: {e}");
            process::exit(1);
        }
    }
}
