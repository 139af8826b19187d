//! Mastermind Solver - CLI
//!
//! Plays 5-slot, 8-color Mastermind against a remote referee, a local
//! referee or a human at the keyboard.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mastermind_solver::{
    commands::{
        SolveConfig, play_remote, print_test_all_statistics, random_secrets, run_benchmark,
        run_simple, run_test_all, solve_code,
    },
    core::Code,
    output::{print_benchmark_result, print_session_report},
    protocol::ResponseLayout,
    solver::{CancelToken, DiversityStrategy, MAX_ROUNDS, SessionConfig, StrategyType},
};
use std::process::ExitCode;
use tracing::{Level, debug};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "mastermind_solver",
    about = "Mastermind solver for 5 slots and 8 colors over a parity-checked wire protocol",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Strategy: diversity (default) or first
    #[arg(short, long, global = true, default_value = "diversity")]
    strategy: String,

    /// Distinct colors at which the diversity scan stops
    #[arg(short, long, global = true, default_value_t = DiversityStrategy::DEFAULT_THRESHOLD)]
    threshold: u32,

    /// Response layout: 'checked' (parity bit) or 'classic' (two-bit error class)
    #[arg(short, long, global = true, default_value = "checked")]
    layout: ResponseLayout,

    /// Rounds allowed before the game counts as lost (at least 1)
    #[arg(
        short = 'r',
        long,
        global = true,
        default_value_t = MAX_ROUNDS,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    max_rounds: u32,

    /// Log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Simple CLI mode (default - you score the guesses)
    Simple,

    /// Play one game against a server
    Play {
        /// Server host name or address
        host: String,

        /// Server port
        port: u16,
    },

    /// Solve a secret against a local referee
    Solve {
        /// The secret, e.g. "25160" or "2 5 1 6 0" (random if omitted)
        secret: Option<String>,

        /// Show candidate counts for every round
        #[arg(short, long)]
        details: bool,
    },

    /// Benchmark solver performance on random secrets
    Benchmark {
        /// Number of random secrets to test
        #[arg(short = 'n', long, default_value = "50")]
        count: usize,
    },

    /// Test solver on ALL possible secrets
    TestAll {
        /// Limit number of secrets to test
        #[arg(long)]
        limit: Option<usize>,
    },
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let strategy = StrategyType::from_name(&cli.strategy).with_threshold(cli.threshold);
    let config = SessionConfig {
        max_rounds: cli.max_rounds,
        layout: cli.layout,
    };
    debug!(strategy = strategy.name(), ?config, "configured");

    match cli.command {
        None | Some(Commands::Simple) => {
            run_simple(&strategy).context("Interactive session failed")?;
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::Play { host, port }) => {
            let report = play_remote(&host, port, &strategy, config, CancelToken::new())?;
            print_session_report(&report, None, cli.verbose > 0);
            println!("Rounds: {}", report.rounds());
            Ok(ExitCode::from(report.outcome.exit_code()))
        }
        Some(Commands::Solve { secret, details }) => {
            let mut solve_config = match secret {
                Some(text) => SolveConfig::new(
                    text.parse::<Code>()
                        .with_context(|| format!("Invalid secret: {text}"))?,
                ),
                None => SolveConfig::random(),
            };
            solve_config.session = config;

            let report = solve_code(&solve_config, &strategy)?;
            print_session_report(&report, Some(solve_config.secret), details);
            Ok(ExitCode::from(report.outcome.exit_code()))
        }
        Some(Commands::Benchmark { count }) => {
            println!("Running benchmark with {count} random secrets...");
            println!("Strategy: {}\n", strategy.name());

            let secrets = random_secrets(count);
            let result = run_benchmark(&strategy, &secrets, config);
            print_benchmark_result(&result);
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::TestAll { limit }) => {
            println!("Strategy: {}", strategy.name());

            let stats = run_test_all(&strategy, limit, config);
            print_test_all_statistics(&stats);
            Ok(ExitCode::SUCCESS)
        }
    }
}
