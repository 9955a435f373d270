use crate::error::AgentError;
use crate::install::Installation;
use crate::page::{FieldId, PageSnapshot, Prefill, SubmitReport};
use crate::protocol::{HostRequest, HostResponse, StatusResponse};
use fxhash::FxHashMap;
use parking_lot::Mutex;
use sfa_classifier::{classify, is_fillable};
use sfa_domain::{DomainKey, FieldType, InstallSettings};
use sfa_patterns::{Learned, PatternStore};
use sfa_storage::KeyValueStore;
use sfa_vault::EnvelopeCipher;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, warn};

/// Fields seen on the current page.
#[derive(Debug, Default)]
struct PageState {
    hostname: String,
    fields: FxHashMap<FieldId, FieldType>,
    /// Suggestions waiting for the field's first focus.
    armed: FxHashMap<FieldId, String>,
}

impl PageState {
    fn enter(&mut self, hostname: &str) {
        if self.hostname != hostname {
            *self = Self { hostname: hostname.to_owned(), ..Self::default() };
        }
    }
}

/// Connects one page to the pattern store.
///
/// The host reports the page's inputs through [`scan`](Self::scan) on load and after every
/// DOM mutation, calls [`on_focus`](Self::on_focus) when an input gains focus and
/// [`on_submit`](Self::on_submit) when a form is submitted. DOM observation itself stays
/// with the host.
pub struct PageAgent<K, E> {
    patterns: PatternStore<K, E>,
    install: Installation<K>,
    enabled: AtomicBool,
    page: Mutex<PageState>,
}

impl<K, E> std::fmt::Debug for PageAgent<K, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageAgent")
            .field("patterns", &self.patterns)
            .field("enabled", &self.enabled.load(Ordering::Acquire))
            .finish_non_exhaustive()
    }
}

impl<K, E> PageAgent<K, E>
where
    K: KeyValueStore,
    E: EnvelopeCipher,
{
    /// Creates an agent and reads the installation flags.
    ///
    /// # Errors
    /// [`AgentError::Storage`] if the flags cannot be read.
    pub async fn new(storage: Arc<K>, patterns: PatternStore<K, E>) -> Result<Self, AgentError> {
        let install = Installation::new(storage);
        let settings = install.read().await?;

        Ok(Self {
            patterns,
            install,
            enabled: AtomicBool::new(settings.enabled),
            page: Mutex::new(PageState::default()),
        })
    }

    #[must_use]
    pub const fn patterns(&self) -> &PatternStore<K, E> {
        &self.patterns
    }

    #[must_use]
    pub const fn installation(&self) -> &Installation<K> {
        &self.install
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    /// Persists the enabled flag. While disabled nothing is suggested or learned.
    ///
    /// # Errors
    /// [`AgentError::Storage`] if the flag cannot be written.
    pub async fn set_enabled(&self, enabled: bool) -> Result<(), AgentError> {
        self.install.set_enabled(enabled).await?;
        self.enabled.store(enabled, Ordering::Release);
        if !enabled {
            self.page.lock().armed.clear();
        }
        Ok(())
    }

    /// # Errors
    /// See [`Installation::on_installed`].
    pub async fn on_installed(&self, now: i64) -> Result<InstallSettings, AgentError> {
        let settings = self.install.on_installed(now).await?;
        self.enabled.store(settings.enabled, Ordering::Release);
        Ok(settings)
    }

    /// # Errors
    /// See [`Installation::on_cleanup_tick`].
    pub async fn on_cleanup_tick(&self, now: i64) -> Result<bool, AgentError> {
        self.install.on_cleanup_tick(now).await
    }

    /// Classifies every visible fillable input and arms a suggestion for each empty one.
    ///
    /// Scanning the same page again refreshes the known fields and the armed suggestions.
    /// A new hostname forgets the previous page.
    pub fn scan(&self, page: &PageSnapshot) -> Vec<Prefill> {
        if !self.is_enabled() {
            return Vec::new();
        }

        let domain = DomainKey::site(&page.hostname).unwrap_or_else(DomainKey::wildcard);
        let mut state = self.page.lock();
        state.enter(&page.hostname);

        let mut prefills = Vec::new();
        for field in &page.fields {
            if !field.visible || !is_fillable(field.descriptor.input_type.as_deref()) {
                continue;
            }

            let field_type = classify(&field.descriptor);
            state.fields.insert(field.id.clone(), field_type);

            if !field.value.is_empty() {
                continue;
            }
            if let Some(value) = self.patterns.suggest(field_type, &domain) {
                state.armed.insert(field.id.clone(), value.clone());
                prefills.push(Prefill { field: field.id.clone(), field_type, value });
            }
        }

        debug!(
            %domain,
            fields = state.fields.len(),
            prefills = prefills.len(),
            "Scanned page"
        );
        prefills
    }

    /// The armed suggestion for `field`, if it is still empty. Fires at most once per arm.
    pub fn on_focus(&self, field: &FieldId, current_value: &str) -> Option<String> {
        let armed = self.page.lock().armed.remove(field)?;
        current_value.is_empty().then_some(armed)
    }

    /// Learns the value of every scanned field for the page's site and for `*`.
    ///
    /// Learns run one after another, each awaited before the next. Failures are logged and
    /// counted; they never abort the submission.
    pub async fn on_submit(&self, page: &PageSnapshot) -> SubmitReport {
        let mut report = SubmitReport::default();
        if !self.is_enabled() {
            return report;
        }

        let observed: Vec<(FieldType, String)> = {
            let mut state = self.page.lock();
            state.enter(&page.hostname);
            page.fields
                .iter()
                .filter(|field| !field.value.is_empty())
                .filter_map(|field| state.fields.get(&field.id).map(|t| (*t, field.value.clone())))
                .collect()
        };

        let site = DomainKey::site(&page.hostname);
        let wildcard = DomainKey::wildcard();
        for (field_type, value) in &observed {
            for domain in site.iter().chain(std::iter::once(&wildcard)) {
                match self.patterns.learn(*field_type, value, domain).await {
                    Ok(Learned::Ignored) => report.ignored += 1,
                    Ok(_) => report.learned += 1,
                    Err(e) => {
                        warn!(%field_type, %domain, error = %e, "Could not learn value");
                        report.failed += 1;
                    },
                }
            }
        }

        info!(
            hostname = %page.hostname,
            learned = report.learned,
            ignored = report.ignored,
            failed = report.failed,
            "Form submitted"
        );
        report
    }

    /// Answers one host message.
    ///
    /// # Errors
    /// * [`AgentError::Storage`] if flags cannot be read.
    /// * [`AgentError::Patterns`] if the store cannot be cleared.
    pub async fn handle(&self, request: HostRequest) -> Result<HostResponse, AgentError> {
        match request {
            HostRequest::GetStats => Ok(HostResponse::Stats { patterns: self.patterns.snapshot() }),
            HostRequest::GetStatus => {
                let settings = self.install.read().await?;
                Ok(HostResponse::Status(StatusResponse {
                    enabled: settings.enabled,
                    security_level: settings.security_level,
                }))
            },
            HostRequest::ClearAll => {
                self.clear_all().await?;
                Ok(HostResponse::Cleared { cleared: true })
            },
        }
    }

    /// Removes every persisted value and forgets the in-memory key and table.
    ///
    /// Learned values are gone for good; the next learn generates a new key.
    ///
    /// # Errors
    /// [`AgentError::Patterns`] if the store cannot be cleared in time.
    pub async fn clear_all(&self) -> Result<(), AgentError> {
        self.patterns.clear().await?;

        *self.page.lock() = PageState::default();
        self.enabled.store(InstallSettings::default().enabled, Ordering::Release);
        warn!("All stored data cleared");
        Ok(())
    }
}
