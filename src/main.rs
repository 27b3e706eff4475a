//! cresults - Command-line tool for inspecting conformance result files

use anyhow::Context;
use clap::{Parser, Subcommand};
use conformance_results::commands::*;
use conformance_results::ui::{CliUI, UI};
use log::LevelFilter;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cresults")]
#[command(about = "Conformance result inspection tool", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show grouped totals and failing tests
    Summary {
        /// Results file
        results: PathBuf,

        /// Configuration file (defaults to results.conf next to the results)
        #[arg(short, long, env = "CRESULTS_CONFIG")]
        config: Option<PathBuf>,
    },

    /// Show the status of a test or subtest
    Result {
        /// Results file
        results: PathBuf,

        /// Test path, or test path followed by a subtest name
        path: String,
    },

    /// Merge a partial JSON result into a test
    Update {
        /// Results file
        results: PathBuf,

        /// Test path
        test: String,

        /// JSON mapping, e.g. '{"subtest": {"int2": "pass"}}'
        partial: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    match run(cli.command) {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            let _ = CliUI::new().error(&format!("{:#}", e));
            std::process::exit(1);
        }
    }
}

fn run(command: Commands) -> anyhow::Result<i32> {
    let mut ui = CliUI::new();

    let cmd: Box<dyn Command> = match command {
        Commands::Summary { results, config } => Box::new(SummaryCommand::with_config(results, config)),
        Commands::Result { results, path } => Box::new(ResultCommand::new(results, path)),
        Commands::Update {
            results,
            test,
            partial,
        } => Box::new(UpdateCommand::new(results, test, partial)),
    };

    let exit_code = cmd
        .execute(&mut ui)
        .with_context(|| format!("{} failed", cmd.name()))?;
    Ok(exit_code)
}
