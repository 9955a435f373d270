//! Storage key names. They match the names the browser extension has always used, so
//! existing data stays readable.

/// Exported encryption key, stored unencrypted.
pub const ENC_KEY: &str = "encKey";
/// Encrypted pattern table envelope.
pub const LEARNED_PATTERNS: &str = "learnedPatterns";
pub const ENABLED: &str = "enabled";
pub const SECURITY_LEVEL: &str = "securityLevel";
/// Unix time in milliseconds of the last cleanup pass.
pub const LAST_CLEANUP: &str = "lastCleanup";
