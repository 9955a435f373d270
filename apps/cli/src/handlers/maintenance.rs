use anyhow::{Result, bail};
use sfa_agent::{DiskAgent, HostRequest};
use sfa_kernel::now_millis;

/// Deletes every stored value and the key.
///
/// # Errors
/// Returns an error without `yes` or if the store cannot be cleared.
pub async fn clear(agent: &DiskAgent, yes: bool) -> Result<()> {
    if !yes {
        bail!("Refusing to delete learned values without --yes");
    }
    agent.handle(HostRequest::ClearAll).await?;
    println!("cleared");
    Ok(())
}

/// Runs one cleanup tick at `now` (Unix milliseconds, defaults to the current time).
///
/// # Errors
/// Returns an error if the settings cannot be read or written.
pub async fn cleanup(agent: &DiskAgent, now: Option<i64>) -> Result<()> {
    if agent.on_cleanup_tick(now.unwrap_or_else(now_millis)).await? {
        println!("cleanup ran");
    } else {
        println!("cleanup not due");
    }
    Ok(())
}

/// # Errors
/// Returns an error if the flag cannot be written.
pub async fn set_enabled(agent: &DiskAgent, enabled: bool) -> Result<()> {
    agent.set_enabled(enabled).await?;
    println!("{}", if enabled { "enabled" } else { "disabled" });
    Ok(())
}
