//! PH-Tree - command line entrypoint.
//!
//! Hosts the demonstration and benchmark programs, plus helpers to
//! validate or generate a configuration file.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use phtree_lib::config::{self, AppConfig, ConfigLoader, LogConfig};
use phtree_lib::error::{report_error, AppError, AppResult, ErrorContext};
use phtree_lib::workload::{run_benchmark, run_demo};
use serde::Serialize;
use tracing::info;
use tracing_error::ErrorLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Command line arguments for the PH-Tree tool.
#[derive(Parser, Debug)]
#[clap(name = "phtree", version, author, about)]
struct Args {
    /// Path to configuration file
    #[clap(short, long, value_parser)]
    config: Option<PathBuf>,

    /// Command to execute
    #[clap(subcommand)]
    command: Option<Command>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Run the API demonstration
    Demo {
        /// Number of concurrent tasks
        #[clap(long)]
        tasks: Option<usize>,

        /// Seed for key generation
        #[clap(long)]
        seed: Option<u64>,

        /// Print the report as JSON
        #[clap(long)]
        json: bool,
    },

    /// Time bulk insert, search and removal of random keys
    Bench {
        /// Number of keys to insert and remove
        #[clap(long)]
        points: Option<usize>,

        /// Number of random lookups
        #[clap(long)]
        queries: Option<usize>,

        /// Components per key
        #[clap(long)]
        dimensions: Option<usize>,

        /// Maximum descent depth of the tree
        #[clap(long)]
        max_depth: Option<usize>,

        /// Seed for key generation
        #[clap(long)]
        seed: Option<u64>,

        /// Print the report as JSON
        #[clap(long)]
        json: bool,
    },

    /// Validate the configuration file
    Validate,

    /// Generate a default configuration file
    GenConfig {
        /// Path to output configuration file
        #[clap(short, long, value_parser)]
        output: PathBuf,
    },
}

/// Initialize the logging system.
fn init_logging(log: &LogConfig) -> AppResult<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.level));
    let registry = tracing_subscriber::registry()
        .with(filter)
        .with(ErrorLayer::default());

    let result = if log.json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_file(log.source_location)
                    .with_line_number(log.source_location)
                    .with_thread_names(true),
            )
            .try_init()
    } else {
        registry
            .with(
                fmt::layer()
                    .pretty()
                    .with_file(log.source_location)
                    .with_line_number(log.source_location)
                    .with_thread_names(true),
            )
            .try_init()
    };

    result.map_err(|e| AppError::Custom(format!("Failed to set global tracing subscriber: {e}")))
}

fn print_json<T: Serialize>(report: &T) -> AppResult<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

fn run(args: Args) -> AppResult<()> {
    let loader = ConfigLoader::new(args.config.as_deref(), config::ENV_PREFIX);
    let mut config = loader.load()?;

    init_logging(&config.log)?;
    phtree_lib::init();

    match args.command.unwrap_or(Command::Demo {
        tasks: None,
        seed: None,
        json: false,
    }) {
        Command::Demo { tasks, seed, json } => {
            if let Some(tasks) = tasks {
                config.demo.tasks = tasks;
            }
            if seed.is_some() {
                config.demo.seed = seed;
            }

            info!(
                max_depth = config.demo.max_depth,
                tasks = config.demo.tasks,
                "Starting PH-Tree demonstration"
            );

            let runtime = tokio::runtime::Builder::new_multi_thread()
                .worker_threads(config.demo.worker_threads)
                .enable_all()
                .build()?;
            let report = runtime.block_on(run_demo(&config.demo))?;

            for outcome in &report.tasks {
                info!(
                    "Task {} inserted {:?} => {}, found {:?}, removed {:?}",
                    outcome.task, outcome.key, outcome.inserted, outcome.found, outcome.removed
                );
            }
            info!("Demonstration finished with {} entries left", report.remaining);

            if json {
                print_json(&report)?;
            }
            Ok(())
        }
        Command::Bench {
            points,
            queries,
            dimensions,
            max_depth,
            seed,
            json,
        } => {
            let bench = &mut config.bench;
            bench.points = points.unwrap_or(bench.points);
            bench.queries = queries.unwrap_or(bench.queries);
            bench.dimensions = dimensions.unwrap_or(bench.dimensions);
            bench.max_depth = max_depth.unwrap_or(bench.max_depth);
            if seed.is_some() {
                bench.seed = seed;
            }

            info!(?bench, "Starting PH-Tree benchmark");
            let report = run_benchmark(bench)?;
            info!(
                hits = report.hits,
                nodes = report.loaded.nodes,
                deepest = report.loaded.deepest,
                "Benchmark finished"
            );

            if json {
                print_json(&report)?;
            }
            Ok(())
        }
        Command::Validate => {
            // `load` already validated; reaching this point means success.
            info!("Configuration validated successfully");
            Ok(())
        }
        Command::GenConfig { output } => {
            info!("Generating default configuration");
            let default_config = AppConfig::default();

            if let Some(parent) = output.parent() {
                std::fs::create_dir_all(parent)?;
            }

            let toml = toml::to_string_pretty(&default_config)
                .map_err(|e| AppError::Custom(format!("Failed to serialize config: {e}")))?;
            std::fs::write(&output, toml)?;

            info!("Default configuration written to {:?}", output);
            Ok(())
        }
    }
}

/// Main entry point for the application.
fn main() -> ExitCode {
    let args = <Args as clap::Parser>::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report_error(ErrorContext::new(e, "phtree").with_span_trace());
            ExitCode::FAILURE
        }
    }
}
