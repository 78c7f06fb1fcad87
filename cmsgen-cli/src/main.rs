//! cmsgen CLI - CMS schema compiler.
//!
//! Commands:
//! - `cmsgen compile`: Compile and write `.pages.yml`
//! - `cmsgen collections`: List modelled collections
//! - `cmsgen features`: List feature flag names
//!
//! Exit codes:
//! - 0: Success
//! - 1: Error

use std::path::Path;

use clap::Parser;
use cmsgen::compile::{run_compile, Destination};
use cmsgen::list::{collections_table, feature_list};
use cmsgen::{Cli, Commands};
use cmsgen_fields::BuiltinRegistry;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    // Initialize tracing with appropriate level
    let filter = if cli.debug {
        EnvFilter::new("cmsgen=debug,cmsgen_compiler=debug,cmsgen_config=debug,cmsgen_fields=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .init();

    std::process::exit(dispatch_command(cli));
}

/// Dispatch a parsed CLI to the appropriate command handler.
fn dispatch_command(cli: Cli) -> i32 {
    match cli.command {
        Commands::Compile(args) => result_to_exit(compile(&cli.project, &args)),
        Commands::Collections => {
            println!("{}", collections_table(&BuiltinRegistry::new()));
            0
        }
        Commands::Features => {
            println!("{}", feature_list());
            0
        }
    }
}

fn compile(project: &Path, args: &cmsgen::CompileArgs) -> anyhow::Result<()> {
    let report = run_compile(project, args)?;
    match report.destination {
        Destination::Stdout => print!("{}", report.yaml),
        Destination::File(path) => {
            eprintln!("Wrote {} entries to {}", report.entries, path.display())
        }
    }
    Ok(())
}

/// Convert a `Result<(), E: Display>` to an exit code.
fn result_to_exit<E: std::fmt::Display>(result: Result<(), E>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            1
        }
    }
}
