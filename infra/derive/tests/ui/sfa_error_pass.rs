use sfa_derive::sfa_error;
use std::borrow::Cow;

#[sfa_error]
pub enum KeySlotError {
    #[error("Key slot unreadable{}: {source}", format_context(.context))]
    Decode {
        #[source]
        source: std::num::ParseIntError,
        context: Option<Cow<'static, str>>,
    },

    #[error("Key slot error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn slot_len(raw: &str) -> Result<u32, KeySlotError> {
    Ok(raw.parse::<u32>()?)
}

fn main() {
    assert_eq!(slot_len("32").ok(), Some(32));
    assert!(matches!(slot_len("x"), Err(KeySlotError::Decode { context: None, .. })));
}
