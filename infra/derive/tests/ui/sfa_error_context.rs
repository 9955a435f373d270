use sfa_derive::sfa_error;
use std::borrow::Cow;

#[sfa_error]
pub enum ReadError {
    #[error("Read failed{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Internal read error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn open_missing() -> Result<Vec<u8>, ReadError> {
    std::fs::read("/definitely/not/here.bin").context("Reading fixture")
}

fn main() {
    let err = open_missing().expect_err("missing file must fail");
    let text = err.to_string();
    assert!(text.starts_with("Read failed (Reading fixture): "), "{text}");

    let internal: ReadError = "boom".into();
    assert_eq!(internal.to_string(), "Internal read error: boom");

    let tagged: Result<(), ReadError> = Err(ReadError::from(String::from("late")));
    let tagged = tagged.context("while closing").expect_err("still an error");
    assert_eq!(tagged.to_string(), "Internal read error (while closing): late");
}
