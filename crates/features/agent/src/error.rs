use sfa_patterns::PatternError;
use sfa_storage::StorageError;
use sfa_vault::VaultError;
use std::borrow::Cow;

#[sfa_derive::sfa_error]
pub enum AgentError {
    #[error("Pattern store error{}: {source}", format_context(.context))]
    Patterns { source: PatternError, context: Option<Cow<'static, str>> },

    #[error("Storage error{}: {source}", format_context(.context))]
    Storage { source: StorageError, context: Option<Cow<'static, str>> },

    #[error("Key initialization error{}: {source}", format_context(.context))]
    Vault { source: VaultError, context: Option<Cow<'static, str>> },

    #[error("Internal agent error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
