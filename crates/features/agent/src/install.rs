//! Installation flags and the periodic cleanup check.
//!
//! The flags live next to the encrypted table as separate plain JSON values under
//! `enabled`, `securityLevel` and `lastCleanup`. Scheduling the cleanup alarm is the host's
//! job; [`Installation::on_cleanup_tick`] is what it runs.

use crate::error::AgentError;
use sfa_domain::{InstallSettings, SecurityLevel, keys};
use sfa_kernel::clock::older_than_days;
use sfa_storage::{KeyValueStore, KeyValueStoreExt};
use std::sync::Arc;
use tracing::{debug, info};

pub const CLEANUP_ALARM: &str = "cleanup";
/// Minutes before the first cleanup tick after install.
pub const CLEANUP_DELAY_MINUTES: u32 = 1;
/// Minutes between cleanup ticks.
pub const CLEANUP_PERIOD_MINUTES: u32 = 1_440;
/// `lastCleanup` is refreshed once it is older than this.
pub const CLEANUP_MAX_AGE_DAYS: i64 = 30;

/// Reads and writes the installation flags.
#[derive(Debug)]
pub struct Installation<K> {
    storage: Arc<K>,
}

impl<K> Clone for Installation<K> {
    fn clone(&self) -> Self {
        Self { storage: Arc::clone(&self.storage) }
    }
}

impl<K: KeyValueStore> Installation<K> {
    #[must_use]
    pub const fn new(storage: Arc<K>) -> Self {
        Self { storage }
    }

    /// Current flags. Missing values read as their defaults.
    ///
    /// # Errors
    /// [`AgentError::Storage`] if a flag cannot be read or decoded.
    pub async fn read(&self) -> Result<InstallSettings, AgentError> {
        let defaults = InstallSettings::default();
        let enabled: Option<bool> = self.storage.get_json(keys::ENABLED).await?;
        let security_level: Option<SecurityLevel> =
            self.storage.get_json(keys::SECURITY_LEVEL).await?;
        let last_cleanup: Option<i64> = self.storage.get_json(keys::LAST_CLEANUP).await?;

        Ok(InstallSettings {
            enabled: enabled.unwrap_or(defaults.enabled),
            security_level: security_level.unwrap_or(defaults.security_level),
            last_cleanup,
        })
    }

    /// Writes the first-run flags: enabled, high security, cleaned up `now`.
    ///
    /// # Errors
    /// [`AgentError::Storage`] if a flag cannot be written.
    pub async fn on_installed(&self, now: i64) -> Result<InstallSettings, AgentError> {
        let settings = InstallSettings { last_cleanup: Some(now), ..InstallSettings::default() };
        self.storage.set_json(keys::ENABLED, &settings.enabled).await?;
        self.storage.set_json(keys::SECURITY_LEVEL, &settings.security_level).await?;
        self.storage.set_json(keys::LAST_CLEANUP, &now).await?;

        info!(security_level = %settings.security_level, "Installed");
        Ok(settings)
    }

    /// Refreshes `lastCleanup` if it is missing or older than [`CLEANUP_MAX_AGE_DAYS`].
    /// Returns whether it did.
    ///
    /// # Errors
    /// [`AgentError::Storage`] if the timestamp cannot be read or written.
    pub async fn on_cleanup_tick(&self, now: i64) -> Result<bool, AgentError> {
        let last: Option<i64> = self.storage.get_json(keys::LAST_CLEANUP).await?;
        if last.is_some_and(|last| !older_than_days(last, now, CLEANUP_MAX_AGE_DAYS)) {
            debug!(?last, "Cleanup not due");
            return Ok(false);
        }

        self.storage.set_json(keys::LAST_CLEANUP, &now).await?;
        info!(?last, now, "Cleanup ran");
        Ok(true)
    }

    /// # Errors
    /// [`AgentError::Storage`] if the flag cannot be written.
    pub async fn set_enabled(&self, enabled: bool) -> Result<(), AgentError> {
        self.storage.set_json(keys::ENABLED, &enabled).await?;
        info!(enabled, "Autofill toggled");
        Ok(())
    }
}
