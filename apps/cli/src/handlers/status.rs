use anyhow::Result;
use sfa_agent::DiskAgent;
use sfa_kernel::clock::{format_millis, now_millis};

/// Writes the first-run settings and prints them.
///
/// # Errors
/// Returns an error if the settings cannot be written.
pub async fn install(agent: &DiskAgent) -> Result<()> {
    let settings = agent.on_installed(now_millis()).await?;
    println!("installed: enabled={}, security={}", settings.enabled, settings.security_level);
    Ok(())
}

/// # Errors
/// Returns an error if the settings cannot be read.
pub async fn status(agent: &DiskAgent) -> Result<()> {
    let settings = agent.installation().read().await?;
    let stats = agent.patterns().stats();

    println!("enabled:      {}", settings.enabled);
    println!("security:     {}", settings.security_level);
    match settings.last_cleanup {
        Some(at) => println!("last cleanup: {}", format_millis(at)),
        None => println!("last cleanup: never (run `sfa install`)"),
    }
    println!("field types:  {}", stats.field_types);
    println!("sites:        {}", stats.sites);
    Ok(())
}
