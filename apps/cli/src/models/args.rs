//! # CLI Argument Definitions

use clap::{Args, Parser, Subcommand};
use sfa_domain::FieldType;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "sfa")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
#[command(about = "Learn, inspect and suggest form values from an encrypted local store")]
pub struct Cli {
    /// Directory holding the store (overrides `storage.data_dir`)
    #[arg(long, global = true, env = "SFA_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Configuration file; defaults to `autofill.*` in the working directory if present
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Write the first-run settings and create the key
    Install,
    /// Show settings and store statistics
    Status,
    /// Classify an input from its attributes
    Classify(FieldArgs),
    /// Record a value the user typed
    Learn {
        field_type: FieldType,
        value: String,
        /// Site the value was typed on; without it the value is learned for all sites only
        #[arg(long, short)]
        domain: Option<String>,
        /// With --domain, also learn the value for all sites
        #[arg(long, short, requires = "domain")]
        global: bool,
    },
    /// Print the value that would be suggested
    Suggest {
        field_type: FieldType,
        /// Site to suggest for; falls back to values learned for all sites
        #[arg(long, short)]
        domain: Option<String>,
    },
    /// Count learned field types and sites
    Stats {
        /// Print the whole decrypted table as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete every stored value and the key
    Clear {
        /// Confirm; learned values cannot be recovered
        #[arg(long)]
        yes: bool,
    },
    /// Run the periodic cleanup check
    Cleanup {
        /// Current time in Unix milliseconds (defaults to now)
        #[arg(long)]
        now: Option<i64>,
    },
    /// Turn suggestions and learning on
    Enable,
    /// Turn suggestions and learning off
    Disable,
}

#[derive(Debug, Clone, Default, Args)]
pub struct FieldArgs {
    /// The `type` attribute
    #[arg(long = "type", short = 't')]
    pub input_type: Option<String>,
    #[arg(long, short, default_value = "")]
    pub name: String,
    #[arg(long, default_value = "")]
    pub id: String,
    #[arg(long, short, default_value = "")]
    pub placeholder: String,
    /// Associated label text
    #[arg(long, short, default_value = "")]
    pub label: String,
}
