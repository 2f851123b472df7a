mod check;
mod inspect;
mod schema;

use clap::{Parser, Subcommand};
use scopebind_api::ScopeType;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "scopebind",
    version,
    about = "Resolve scope bindings declared for action classes",
    long_about = "Scopebind reads a declarative binding manifest and shows which members of an \
                  action are read from, or written back to, each scope."
)]
pub struct Cli {
    /// Mirror log output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show resolved descriptors for a class, or for one of its action methods
    Inspect {
        /// Path to the JSON binding manifest
        #[arg(value_name = "MANIFEST")]
        manifest: PathBuf,
        /// Fully qualified class name
        #[arg(long)]
        class: String,
        /// Action method whose parameter bindings are appended
        #[arg(long)]
        method: Option<String>,
        /// Restrict output to one scope
        #[arg(long)]
        scope: Option<ScopeType>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Inspect every class and action method and report configuration errors
    #[command(
        long_about = "Inspects every class in the manifest, plus every method with parameters \
                      that is not a bean setter. Exits with a non-zero status on any error."
    )]
    Check {
        /// Path to the JSON binding manifest
        #[arg(value_name = "MANIFEST")]
        manifest: PathBuf,
    },
    /// Print the JSON schema of binding manifests
    Schema,
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let _guard = scopebind_core::logging::init_logging("cli", cli.verbose);

    match cli.command {
        Commands::Inspect {
            manifest,
            class,
            method,
            scope,
            json,
        } => inspect::run(&manifest, &class, method.as_deref(), scope, json),
        Commands::Check { manifest } => check::run(&manifest),
        Commands::Schema => schema::run(),
    }
}
