//! Mission balance simulator CLI.
//!
//! Run Monte Carlo simulations of exiles working through a mission route.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                         # Default: 500 runs, marauder
//!   cargo run --bin simulate -- -n 100 -c witch      # 100 witch runs
//!   cargo run --bin simulate -- --seed 42            # Reproducible run
//!   RUST_LOG=exile=debug cargo run --bin simulate    # Engine debug logging

use exile::core::context::EngineContext;
use exile::simulator::{run_simulation, SimConfig};
use std::env;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    let (config, json_path) = parse_args(&args);

    let default_filter = if config.verbosity >= 2 { "exile=info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let ctx = match EngineContext::standard() {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Failed to load content: {e}");
            return ExitCode::FAILURE;
        }
    };

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║              EXILE MISSION SIMULATOR                          ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Configuration:");
    println!("  Runs:           {}", config.num_runs);
    println!("  Class:          {}", config.class_id);
    println!("  Route:          {}", config.route.join(" → "));
    println!("  Missions/Run:   {}", config.missions_per_run);
    println!("  Clears/Advance: {}", config.clears_to_advance);
    println!("  Auto Equip:     {}", config.auto_equip);
    println!("  Passives:       {}", config.allocate_passives);
    if let Some(seed) = config.seed {
        println!("  Seed:           {}", seed);
    }
    println!();
    println!("Running simulation...");
    println!();

    let report = match run_simulation(&config, &ctx) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Simulation failed: {e}");
            return ExitCode::FAILURE;
        }
    };

    if config.verbosity > 0 {
        println!("{}", report.to_text());
    }

    if let Some(path) = json_path {
        if let Err(e) = std::fs::write(&path, report.to_json()) {
            eprintln!("Failed to write JSON report to {path}: {e}");
            return ExitCode::FAILURE;
        }
        println!("JSON report saved to: {}", path);
    }

    ExitCode::SUCCESS
}

fn parse_args(args: &[String]) -> (SimConfig, Option<String>) {
    let mut config = SimConfig::default();
    let mut json_path = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-n" | "--runs" => {
                if i + 1 < args.len() {
                    config.num_runs = args[i + 1].parse().unwrap_or(500);
                    i += 1;
                }
            }
            "-c" | "--class" => {
                if i + 1 < args.len() {
                    config.class_id = args[i + 1].clone();
                    i += 1;
                }
            }
            "-r" | "--route" => {
                if i + 1 < args.len() {
                    config.route = args[i + 1].split(',').map(|m| m.trim().to_string()).collect();
                    i += 1;
                }
            }
            "-m" | "--missions" => {
                if i + 1 < args.len() {
                    config.missions_per_run = args[i + 1].parse().unwrap_or(60);
                    i += 1;
                }
            }
            "-s" | "--seed" => {
                if i + 1 < args.len() {
                    config.seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "--mission" => {
                if i + 1 < args.len() {
                    config = SimConfig {
                        seed: config.seed,
                        class_id: config.class_id.clone(),
                        ..SimConfig::mission_balance_test(&args[i + 1])
                    };
                    i += 1;
                }
            }
            "--naked" => {
                config.auto_equip = false;
                config.allocate_passives = false;
            }
            "--json" => {
                json_path = Some(match args.get(i + 1) {
                    Some(path) if !path.starts_with('-') => {
                        i += 1;
                        path.clone()
                    }
                    _ => "sim_report.json".to_string(),
                });
            }
            "-q" | "--quiet" => {
                config.verbosity = 0;
            }
            "-v" | "--verbose" => {
                config.verbosity = 2;
            }
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            _ => {}
        }
        i += 1;
    }

    (config, json_path)
}

fn print_help() {
    println!("Exile Mission Simulator");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin simulate -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -n, --runs <N>        Number of simulated exiles (default: 500)");
    println!("    -c, --class <ID>      Starting class (default: marauder)");
    println!("    -r, --route <A,B,..>  Comma-separated mission route");
    println!("    -m, --missions <N>    Mission attempts per run (default: 60)");
    println!("    -s, --seed <S>        Random seed for reproducibility");
    println!("    --mission <ID>        Balance-check a single mission");
    println!("    --naked               No gear upgrades and no passives");
    println!("    --json [PATH]         Save JSON report (default: sim_report.json)");
    println!("    -q, --quiet           Skip the text report");
    println!("    -v, --verbose         Log every run");
    println!("    -h, --help            Show this help");
    println!();
    println!("EXAMPLES:");
    println!("    cargo run --bin simulate -- -n 100 -c ranger");
    println!("    cargo run --bin simulate -- --mission haunted_crypt --seed 7");
    println!("    cargo run --bin simulate -- --naked --json naked.json");
}
