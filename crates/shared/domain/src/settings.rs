use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecurityLevel {
    Low,
    Medium,
    #[default]
    High,
}

impl fmt::Display for SecurityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        })
    }
}

/// Installation flags kept next to (not inside) the encrypted pattern table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallSettings {
    pub enabled: bool,
    pub security_level: SecurityLevel,
    /// Unix time in milliseconds; `None` before the first install.
    pub last_cleanup: Option<i64>,
}

impl Default for InstallSettings {
    fn default() -> Self {
        Self { enabled: true, security_level: SecurityLevel::High, last_cleanup: None }
    }
}
