//! Messages the host UI sends to the agent.
//!
//! ```json
//! {"action": "getStats"}   -> {"patterns": {"email": {"*": {"values": [..], "count": {..}}}}}
//! {"action": "getStatus"}  -> {"enabled": true, "securityLevel": "high"}
//! {"action": "clearAll"}   -> {"cleared": true}
//! ```

use serde::{Deserialize, Serialize};
use sfa_domain::SecurityLevel;
use sfa_patterns::PatternTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum HostRequest {
    /// The whole decrypted table, empty if nothing was learned.
    GetStats,
    GetStatus,
    /// Removes every persisted value, the key included.
    ClearAll,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HostResponse {
    Stats { patterns: PatternTable },
    Status(StatusResponse),
    Cleared { cleared: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub enabled: bool,
    pub security_level: SecurityLevel,
}
