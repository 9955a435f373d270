use anyhow::Context;
use clap::Parser;
use sfa_cli::{Cli, run};
use sfa_domain::config::AppConfig;
use sfa_kernel::config::load_config;
use sfa_logger::Logger;
use std::process::ExitCode;

#[sfa_runtime::main(cli)]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let config: AppConfig =
        load_config(cli.config.as_deref()).context("Failed to load configuration")?;

    let _log = Logger::builder()
        .name(env!("CARGO_PKG_NAME"))
        .env_filter(config.logging.level.as_str())
        .json(config.logging.json)
        .maybe_directory(config.logging.dir.clone())
        .init()?;

    run(cli, config).await
}
