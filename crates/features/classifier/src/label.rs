use sfa_domain::LabelSource;

/// Best-effort label text of an input, lower-cased.
///
/// First associated `<label for>`, else the enclosing `<label>`, else a `<label>` directly
/// before the input, else empty.
#[must_use]
pub fn resolve_label(source: &LabelSource) -> String {
    source
        .explicit
        .first()
        .map(String::as_str)
        .or(source.enclosing.as_deref())
        .or_else(|| {
            source
                .previous_sibling
                .as_ref()
                .filter(|sibling| sibling.tag.eq_ignore_ascii_case("label"))
                .map(|sibling| sibling.text.as_str())
        })
        .map(str::to_lowercase)
        .unwrap_or_default()
}
