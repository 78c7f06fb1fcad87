//! CLI definition for the cmsgen command-line interface.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// cmsgen - CMS schema compiler
///
/// Compiles a site's enabled collections, feature flags and page layouts
/// into the editor configuration file.
#[derive(Parser, Debug)]
#[command(name = "cmsgen")]
#[command(version)]
#[command(about = "Compile a site's CMS content model into .pages.yml")]
pub struct Cli {
    /// Enable debug output to stderr
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Project root holding `.cms/`
    #[arg(short = 'C', long, global = true, default_value = ".")]
    pub project: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compile the content model and write it out
    Compile(CompileArgs),
    /// List the collections the compiler can model
    Collections,
    /// List the known feature flags
    Features,
}

#[derive(Args, Debug, Default, Clone)]
pub struct CompileArgs {
    /// Read this configuration file instead of `.cms/cmsgen.*`
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Write here instead of the configured output path
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Share repeated field definitions through YAML anchors
    #[arg(long)]
    pub dedupe: bool,

    /// Print the document instead of writing a file
    #[arg(long, conflicts_with = "output")]
    pub stdout: bool,
}
