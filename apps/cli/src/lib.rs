//! # sfa
//!
//! Command line access to the local autofill store: classify inputs, learn and suggest
//! values, inspect or wipe the encrypted pattern table, and run the install and cleanup
//! hooks a browser host would otherwise trigger.
#![allow(clippy::print_stdout, clippy::print_stderr)]

pub mod handlers;
pub mod models;

pub use models::args::{Cli, Command, FieldArgs};

use crate::handlers::{classify, maintenance, patterns, status};
use anyhow::{Context, Result};
use sfa_agent::AgentBuilder;
use sfa_domain::config::AppConfig;
use std::process::ExitCode;
use tracing::debug;

/// Runs one parsed command against the store described by `config`.
///
/// # Errors
/// Returns an error if the store cannot be opened or the command fails.
pub async fn run(cli: Cli, config: AppConfig) -> Result<ExitCode> {
    if let Command::Classify(args) = &cli.command {
        classify::classify_field(args);
        return Ok(ExitCode::SUCCESS);
    }

    let mut builder =
        AgentBuilder::new(config).init_key(matches!(cli.command, Command::Install));
    if let Some(dir) = cli.data_dir {
        builder = builder.data_dir(dir);
    }
    let agent = builder.build().await.context("Failed to open the autofill store")?;
    debug!(command = ?cli.command, "Store opened");

    match cli.command {
        Command::Install => status::install(&agent).await?,
        Command::Status => status::status(&agent).await?,
        Command::Classify(_) => {},
        Command::Learn { field_type, value, domain, global } => {
            patterns::learn(&agent, field_type, &value, domain.as_deref(), global).await?;
        },
        Command::Suggest { field_type, domain } => {
            return patterns::suggest(&agent, field_type, domain.as_deref());
        },
        Command::Stats { json } => patterns::stats(&agent, json).await?,
        Command::Clear { yes } => maintenance::clear(&agent, yes).await?,
        Command::Cleanup { now } => maintenance::cleanup(&agent, now).await?,
        Command::Enable => maintenance::set_enabled(&agent, true).await?,
        Command::Disable => maintenance::set_enabled(&agent, false).await?,
    }
    Ok(ExitCode::SUCCESS)
}
