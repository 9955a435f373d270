use sfa_kernel::DeadlineExceeded;
use sfa_storage::StorageError;
use sfa_vault::VaultError;
use std::borrow::Cow;

/// What the pattern store surfaces to its callers.
///
/// All variants are recoverable: the in-memory table stays usable and the caller decides
/// whether to retry. A stored envelope that cannot be decrypted never reaches here; it
/// resets the table. A key that cannot be imported does, as [`PatternError::Vault`].
#[sfa_derive::sfa_error]
pub enum PatternError {
    #[error("Pattern storage error{}: {source}", format_context(.context))]
    Storage { source: StorageError, context: Option<Cow<'static, str>> },

    #[error("Pattern encryption error{}: {source}", format_context(.context))]
    Vault { source: VaultError, context: Option<Cow<'static, str>> },

    #[error("Pattern store timed out{}: {source}", format_context(.context))]
    Timeout { source: DeadlineExceeded, context: Option<Cow<'static, str>> },
}
