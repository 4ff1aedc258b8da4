//! map-prep: .tmap generation, inspection and headless round runner.
//!
//! Usage:
//!   map-prep generate --seed 7 --output arena.tmap
//!   map-prep inspect arena.tmap
//!   map-prep simulate --map arena.tmap --ticks 2000 --config sim.json

use std::path::{Path, PathBuf};
use std::process;

use anyhow::{bail, Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use tankfield_core::enums::GamePhase;
use tankfield_procgen::RandomMapSupplier;
use tankfield_sim::{SimConfig, SimulationEngine};
use tankfield_terrain::tmap::write_tmap;
use tankfield_terrain::{Board, MapDocument, MapSupplier, TmapFileSupplier};

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let result = match args[1].as_str() {
        "generate" => cmd_generate(&args[2..]),
        "inspect" => cmd_inspect(&args[2..]),
        "simulate" => cmd_simulate(&args[2..]),
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {other}");
            print_usage();
            process::exit(1);
        }
    };

    if let Err(err) = result {
        eprintln!("Error: {err:#}");
        process::exit(1);
    }
}

fn print_usage() {
    eprintln!(
        "map-prep: tankfield map tool\n\
         \n\
         Commands:\n\
         \n\
         generate  Write a procedural map as .tmap\n\
         \n\
           --seed <N>         Generator seed (default: 0)\n\
           --output <path>    Output .tmap file path\n\
         \n\
         inspect   Load a .tmap and print the board\n\
         \n\
           <path>             .tmap file to load\n\
         \n\
         simulate  Run a headless round without player input\n\
         \n\
           --map <path>       .tmap file (default: procedural map from --seed)\n\
           --seed <N>         Map and simulation seed (default: 0)\n\
           --ticks <N>        Tick limit (default: 2000)\n\
           --config <path>    JSON SimConfig overrides (optional)\n\
         \n\
         Examples:\n\
         \n\
           map-prep generate --seed 7 --output maps/arena.tmap\n\
           map-prep simulate --map maps/arena.tmap --ticks 5000\n"
    );
}

fn flag_value<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == name)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

fn parse_number<T: std::str::FromStr>(args: &[String], name: &str, default: T) -> Result<T> {
    match flag_value(args, name) {
        Some(text) => text
            .parse()
            .map_err(|_| anyhow::anyhow!("{name} expects a number, got {text:?}")),
        None => Ok(default),
    }
}

// --- Generate command ---

fn cmd_generate(args: &[String]) -> Result<()> {
    let seed: u64 = parse_number(args, "--seed", 0)?;
    let Some(output) = flag_value(args, "--output").map(PathBuf::from) else {
        bail!("--output <path> is required");
    };

    let mut supplier = RandomMapSupplier::new(seed);
    let document = MapDocument::from_supplier(&mut supplier)
        .with_context(|| format!("generating map from seed {seed}"))?;
    write_tmap(&document, &output)
        .with_context(|| format!("writing {}", output.display()))?;

    info!(
        seed,
        placements = document.placements.len(),
        opponents = document.enemy_tanks.len(),
        output = %output.display(),
        "map written"
    );
    Ok(())
}

// --- Inspect command ---

fn cmd_inspect(args: &[String]) -> Result<()> {
    let Some(path) = args.first() else {
        bail!("inspect needs a .tmap path");
    };
    let board = load_board(Path::new(path))?;
    let size = board.size();
    println!("{}×{} cells, objective at {}", size.x, size.y, board.objective_position());
    println!(
        "{} enemy start(s), {} friendly start(s), {} opponent(s)",
        board.enemy_start_positions().len(),
        board.friendly_start_positions().len(),
        board.initial_enemy_tanks().len()
    );
    print!("{}", board.to_ascii());
    Ok(())
}

fn load_board(path: &Path) -> Result<Board> {
    let mut board = Board::new();
    board
        .load(&mut TmapFileSupplier::new(path))
        .with_context(|| format!("loading {}", path.display()))?;
    Ok(board)
}

// --- Simulate command ---

fn cmd_simulate(args: &[String]) -> Result<()> {
    let seed: u64 = parse_number(args, "--seed", 0)?;
    let ticks: u64 = parse_number(args, "--ticks", 2000)?;

    let mut config = match flag_value(args, "--config") {
        Some(path) => {
            let text = std::fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
            serde_json::from_str::<SimConfig>(&text).with_context(|| format!("parsing {path}"))?
        }
        None => SimConfig::default(),
    };
    if flag_value(args, "--seed").is_some() {
        config.seed = seed;
    }

    let mut supplier: Box<dyn MapSupplier> = match flag_value(args, "--map") {
        Some(path) => Box::new(TmapFileSupplier::new(path)),
        None => Box::new(RandomMapSupplier::new(seed)),
    };

    let mut engine = SimulationEngine::new(config);
    engine
        .start_round(supplier.as_mut())
        .context("starting round")?;

    let mut last = None;
    for _ in 0..ticks {
        let report = engine.tick();
        let over = matches!(report.phase, GamePhase::RoundOver(_));
        last = Some(report);
        if over {
            break;
        }
    }

    let Some(report) = last else {
        bail!("--ticks must be at least 1");
    };
    println!("phase after tick {}: {:?}", report.time.tick, report.phase);
    println!(
        "opponents: {} left, {} active, {} destroyed",
        report.stats.opponent_lives, report.stats.opponents_active, report.stats.opponents_destroyed
    );
    println!("player lives: {:?}", report.stats.player_lives);
    println!("objective destroyed: {}", report.objective.destroyed);
    Ok(())
}
