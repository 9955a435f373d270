use anyhow::{Context, Result, bail};
use sfa_agent::{DiskAgent, HostRequest};
use sfa_domain::{DomainKey, FieldType};
use sfa_patterns::Learned;
use std::process::ExitCode;

fn site_key(domain: &str) -> Result<DomainKey> {
    DomainKey::site(domain).with_context(|| format!("'{domain}' is not a usable hostname"))
}

fn ensure_enabled(agent: &DiskAgent) -> Result<()> {
    if !agent.is_enabled() {
        bail!("Autofill is disabled; run `sfa enable` first");
    }
    Ok(())
}

fn describe(learned: Learned) -> String {
    match learned {
        Learned::Ignored => "ignored (shorter than two characters)".to_owned(),
        Learned::Recorded { count, rank } => format!("seen {count}x, rank {}", rank + 1),
        Learned::Evicted => "dropped, ten more frequent values are kept".to_owned(),
    }
}

/// Records `value` under `domain`, or only across sites without one.
///
/// # Errors
/// Returns an error if autofill is disabled, the domain is unusable or the table cannot be
/// persisted.
pub async fn learn(
    agent: &DiskAgent,
    field_type: FieldType,
    value: &str,
    domain: Option<&str>,
    global: bool,
) -> Result<()> {
    ensure_enabled(agent)?;

    let mut targets = Vec::with_capacity(2);
    if let Some(domain) = domain {
        targets.push(site_key(domain)?);
    }
    if domain.is_none() || global {
        targets.push(DomainKey::wildcard());
    }

    for key in &targets {
        let learned = agent
            .patterns()
            .learn(field_type, value, key)
            .await
            .with_context(|| format!("Failed to learn {field_type} for {key}"))?;
        println!("{field_type} @ {key}: {}", describe(learned));
    }
    Ok(())
}

/// Prints the suggestion for `field_type`; exits with failure when there is none.
///
/// # Errors
/// Returns an error if autofill is disabled or the domain is unusable.
pub fn suggest(agent: &DiskAgent, field_type: FieldType, domain: Option<&str>) -> Result<ExitCode> {
    ensure_enabled(agent)?;

    let key = domain.map(site_key).transpose()?.unwrap_or_else(DomainKey::wildcard);
    match agent.patterns().suggest(field_type, &key) {
        Some(value) => {
            println!("{value}");
            Ok(ExitCode::SUCCESS)
        },
        None => {
            eprintln!("No {field_type} learned for {key}");
            Ok(ExitCode::FAILURE)
        },
    }
}

/// Prints the counters, every bucket, or the `getStats` response with `json`.
///
/// # Errors
/// Returns an error if the table cannot be encoded.
pub async fn stats(agent: &DiskAgent, json: bool) -> Result<()> {
    if json {
        let response = agent.handle(HostRequest::GetStats).await?;
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    let table = agent.patterns().snapshot();
    let stats = table.stats();
    println!("field types: {}", stats.field_types);
    println!("sites:       {}", stats.sites);

    for field_type in table.field_types() {
        for (domain, entry) in table.buckets(field_type) {
            let ranked: Vec<String> =
                entry.ranked().map(|(value, count)| format!("{value} ({count})")).collect();
            let (field, site) = (field_type.as_str(), domain.as_str());
            println!("{field:<10} {site:<24} {}", ranked.join(", "));
        }
    }
    Ok(())
}
