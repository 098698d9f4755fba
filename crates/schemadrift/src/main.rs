//! Schemadrift launcher.
//!
//! Compares exported TypeScript type declarations against the observed
//! schema of a schemaless document store and reports the drift.

use clap::{Parser, Subcommand};
use schemadrift_logging::{init_logging, LogConfig};
use std::path::PathBuf;
use std::process::ExitCode;

mod cli;

use cli::{check, extract, sample};

#[derive(Parser, Debug)]
#[command(
    name = "schemadrift",
    about = "Reconcile typed declarations with a document store's observed schema",
    version
)]
struct Cli {
    /// Enable verbose logging (info/debug to stderr)
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compare declared types against the store's observed schema
    Check {
        /// Root directory of the declaration source tree
        #[arg(short = 't', long = "types")]
        types: PathBuf,

        /// Store export directory (omit to run offline, declarations only)
        #[arg(short = 's', long = "store")]
        store: Option<PathBuf>,

        /// Documents to sample per collection
        #[arg(long, default_value_t = schemadrift::reconcile::DEFAULT_SAMPLE_LIMIT)]
        samples: usize,

        /// Write the JSON report to this file
        #[arg(short = 'o', long = "output")]
        output: Option<PathBuf>,

        /// Print the JSON report to stdout instead of the console rendering
        #[arg(long)]
        json: bool,

        /// Suppress the console rendering
        #[arg(short = 'q', long)]
        quiet: bool,
    },

    /// Dump the declared schema extracted from a source tree
    Extract {
        /// Root directory of the declaration source tree
        #[arg(short = 't', long = "types")]
        types: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Dump the observed schema inferred from a store export
    Sample {
        /// Store export directory
        #[arg(short = 's', long = "store")]
        store: PathBuf,

        /// Documents to sample per collection
        #[arg(long, default_value_t = schemadrift::reconcile::DEFAULT_SAMPLE_LIMIT)]
        samples: usize,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let args = Cli::parse();

    if let Err(e) = init_logging(LogConfig {
        app_name: "schemadrift",
        verbose: args.verbose,
    }) {
        eprintln!("WARNING: logging unavailable: {:#}", e);
    }

    let result = match args.command {
        Commands::Check {
            types,
            store,
            samples,
            output,
            json,
            quiet,
        } => check::run(check::CheckArgs {
            types,
            store,
            samples,
            output,
            json,
            quiet,
        }),
        Commands::Extract { types, json } => extract::run(extract::ExtractArgs { types, json }),
        Commands::Sample {
            store,
            samples,
            json,
        } => sample::run(sample::SampleArgs {
            store,
            samples,
            json,
        }),
    };

    match result {
        Ok(status) => status.exit_code(),
        Err(e) => {
            eprintln!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
