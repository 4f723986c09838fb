//! ---
//! wb_section: "05-cli"
//! wb_subsection: "binary"
//! wb_type: "source"
//! wb_scope: "code"
//! wb_description: "Suite runner CLI for the warbench performance acceptance harness."
//! wb_version: "v0.1.0"
//! wb_owner: "tbd"
//! ---
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod run;

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Scenario-driven performance acceptance runner",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Run one or more TOML scenario suites")]
    Run(run::RunArgs),
    #[command(about = "List the registered step patterns")]
    Steps,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Run(args) => run::run(args),
        Commands::Steps => {
            run::list_steps()?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
