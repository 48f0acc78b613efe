//! division-elimination CLI
//!
//! Decide from the command line which teams of a division are eliminated.
//!
//! # Usage
//!
//! ```bash
//! # Analyse every team of a division file
//! division-elimination analyze --input division.txt
//!
//! # Output as JSON, with flow numbers
//! division-elimination analyze --input division.txt --format json --verbose
//!
//! # Dump one team's flow network as Graphviz DOT
//! division-elimination network --input division.txt --team Philadelphia
//!
//! # Generate a random division for testing
//! division-elimination generate --teams 8
//! ```

use division_elimination::core::division::Division;
use division_elimination::elimination::analyzer::{AnalyzerConfig, EliminationAnalyzer};
use division_elimination::elimination::network::EliminationNetwork;
use division_elimination::elimination::observer::LogObserver;
use division_elimination::simulation::random_division::{
    generate_random_division, RandomDivisionConfig,
};
use log::LevelFilter;
use std::fs;
use std::process;

fn print_usage() {
    eprintln!(
        r#"division-elimination — which teams can no longer finish first

USAGE:
    division-elimination <COMMAND> [OPTIONS]

COMMANDS:
    analyze     Decide elimination for every team of a division
    network     Print the flow network for one team as Graphviz DOT
    generate    Generate a random division (for testing)
    help        Show this message

OPTIONS (analyze):
    --input <FILE>      Path to the division file
    --format <FORMAT>   Output format: text (default) or json
    --verbose           Include max-flow numbers and debug logging

OPTIONS (network):
    --input <FILE>      Path to the division file
    --team <NAME>       Team whose network to print

OPTIONS (generate):
    --teams <N>         Number of teams (default: 5)
    --max-games <N>     Most games left between two teams (default: 6)
    --output <FILE>     Write to file instead of stdout

Set RUST_LOG=trace to dump capacities, residual capacities and flows.

EXAMPLES:
    division-elimination analyze --input division.txt
    division-elimination analyze --input division.txt --format json
    division-elimination network --input division.txt --team Philadelphia
    division-elimination generate --teams 12 --output big.txt"#
    );
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(default)
        .parse_default_env()
        .init();
}

fn load_division(path: &str) -> Division {
    Division::from_file(path).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    })
}

fn require_value(args: &[String], i: usize, flag: &str, what: &str) -> String {
    args.get(i).cloned().unwrap_or_else(|| {
        eprintln!("{} requires {}", flag, what);
        process::exit(1);
    })
}

fn cmd_analyze(args: &[String]) {
    let mut input_path = None;
    let mut format = "text".to_string();
    let mut verbose = false;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--input" => {
                i += 1;
                input_path = Some(require_value(args, i, "--input", "a file path"));
            }
            "--format" => {
                i += 1;
                format = require_value(args, i, "--format", "'text' or 'json'");
            }
            "--verbose" | "-v" => verbose = true,
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    init_logging(verbose);

    let path = input_path.unwrap_or_else(|| {
        eprintln!("Error: --input <FILE> is required");
        process::exit(1);
    });

    let division = load_division(&path);
    let analyzer = EliminationAnalyzer::new(&division)
        .with_config(AnalyzerConfig { verbose })
        .with_observer(LogObserver);

    let report = analyzer.analyze_all().unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    });

    match format.as_str() {
        "json" => match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing report: {}", e);
                process::exit(1);
            }
        },
        "text" => print!("{}", report),
        other => {
            eprintln!("Unknown format: {} (expected 'text' or 'json')", other);
            process::exit(1);
        }
    }
}

fn cmd_network(args: &[String]) {
    let mut input_path = None;
    let mut team = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--input" => {
                i += 1;
                input_path = Some(require_value(args, i, "--input", "a file path"));
            }
            "--team" => {
                i += 1;
                team = Some(require_value(args, i, "--team", "a team name"));
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    init_logging(false);

    let (path, team) = match (input_path, team) {
        (Some(path), Some(team)) => (path, team),
        _ => {
            eprintln!("Error: --input <FILE> and --team <NAME> are required");
            process::exit(1);
        }
    };

    let division = load_division(&path);
    let index = division.index_of(&team).unwrap_or_else(|| {
        eprintln!("Error: no team named '{}' in {}", team, path);
        process::exit(1);
    });

    match EliminationNetwork::build(&division, index) {
        Ok(network) => println!("{}", network.to_dot()),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn cmd_generate(args: &[String]) {
    let mut config = RandomDivisionConfig::default();
    let mut output_path: Option<String> = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--teams" => {
                i += 1;
                config.team_count = args
                    .get(i)
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(|| {
                        eprintln!("--teams requires a number");
                        process::exit(1);
                    });
            }
            "--max-games" => {
                i += 1;
                config.max_games_per_pair = args
                    .get(i)
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(|| {
                        eprintln!("--max-games requires a number");
                        process::exit(1);
                    });
            }
            "--output" => {
                i += 1;
                output_path = Some(require_value(args, i, "--output", "a file path"));
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    init_logging(false);

    let division = generate_random_division(&config).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    });

    if let Some(path) = output_path {
        fs::write(&path, division.to_string()).unwrap_or_else(|e| {
            eprintln!("Error writing to '{}': {}", path, e);
            process::exit(1);
        });
        eprintln!(
            "Generated a division of {} teams with {} games left → {}",
            division.len(),
            division.total_games_remaining(),
            path
        );
    } else {
        print!("{}", division);
    }
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = args[1].as_str();
    let rest = &args[2..];

    match command {
        "analyze" => cmd_analyze(rest),
        "network" => cmd_network(rest),
        "generate" => cmd_generate(rest),
        "help" | "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            process::exit(1);
        }
    }
}
