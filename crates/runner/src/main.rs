use bondsim_analytics::{
    GraduationMetrics, SummaryStats, calculate_aggregate_metrics, calculate_graduation_metrics,
};
use bondsim_core::BondingCurve;
use bondsim_runner::SimulationConfig;
use serde::Serialize;
use std::collections::BTreeMap;

fn print_help() {
    eprintln!(
        r#"Bondsim - Monte Carlo simulator for bonding curves

USAGE:
    bondsim [OPTIONS]

OPTIONS:
    --config <PATH>       Load configuration from JSON file
    --simulations <N>     Override the number of simulation runs
    --seed <N>            Override the RNG seed
    --scenarios           Run the preset market scenarios instead of a batch
    --help                Print this help message

ENVIRONMENT VARIABLES:
    RUST_LOG              Log level filter

EXAMPLES:
    # Run the embedded default configuration
    bondsim

    # Reproducible batch of 500 runs
    bondsim --config curve.json --simulations 500 --seed 42

    # Compare market regimes
    bondsim --scenarios
"#
    );
}

/// Batch report printed as JSON
#[derive(Serialize)]
struct BatchReport<'a> {
    curve: &'a str,
    num_simulations: usize,
    graduation: GraduationMetrics,
    metrics: BTreeMap<&'static str, SummaryStats>,
}

fn parse_value<T: std::str::FromStr>(args: &[String], i: usize, flag: &str) -> T {
    let Some(raw) = args.get(i) else {
        eprintln!("Error: {} requires a value", flag);
        std::process::exit(1);
    };
    match raw.parse() {
        Ok(value) => value,
        Err(_) => {
            eprintln!("Error: invalid value for {}: {}", flag, raw);
            std::process::exit(1);
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();
    let mut config_path: Option<String> = None;
    let mut simulations: Option<usize> = None;
    let mut seed: Option<u64> = None;
    let mut scenarios = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            "--config" | "-c" => {
                i += 1;
                config_path = Some(parse_value(&args, i, "--config"));
            }
            "--simulations" | "-n" => {
                i += 1;
                simulations = Some(parse_value(&args, i, "--simulations"));
            }
            "--seed" => {
                i += 1;
                seed = Some(parse_value(&args, i, "--seed"));
            }
            "--scenarios" => scenarios = true,
            arg => {
                eprintln!("Unknown argument: {}", arg);
                print_help();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let mut config = match config_path {
        Some(path) => {
            log::info!("Loading configuration from: {}", path);
            SimulationConfig::from_file(&path)?
        }
        None => {
            log::info!("Using default configuration");
            SimulationConfig::load_default()?
        }
    };
    if let Some(n) = simulations {
        config.num_simulations = n;
    }
    if seed.is_some() {
        config.seed = seed;
    }
    config.validate()?;

    let mut engine = config.build_engine()?;
    log::info!(
        "Curve: {} (supply {}, graduation at {})",
        engine.curve().name(),
        engine.curve().total_supply(),
        engine.curve().graduation_threshold()
    );

    if scenarios {
        let summaries = engine.simulate_market_scenarios()?;
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(());
    }

    let results = engine.run_batch_simulations(config.num_simulations, &config.trades)?;
    let report = BatchReport {
        curve: engine.curve().name(),
        num_simulations: results.len(),
        graduation: calculate_graduation_metrics(&results),
        metrics: calculate_aggregate_metrics(&results),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
