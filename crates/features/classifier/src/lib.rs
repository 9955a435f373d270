//! # Field classification
//!
//! Maps what the host knows about an input element to a [`FieldType`].
//!
//! Classification is a pure fold over the static [`RULES`] table: the declared `type`, name,
//! id, placeholder and resolved label are joined into one lower-cased haystack, and the first
//! rule whose keywords (English or Japanese) occur in it decides the type. Anything that
//! matches nothing is [`FieldType::Text`].
//!
//! ```rust
//! use sfa_classifier::classify;
//! use sfa_domain::{FieldDescriptor, FieldType};
//!
//! let field = FieldDescriptor::default().with_name("billing_zip");
//! assert_eq!(classify(&field), FieldType::Zipcode);
//!
//! let field = FieldDescriptor::default().with_label("お名前");
//! assert_eq!(classify(&field), FieldType::FirstName);
//! ```

mod label;
mod rules;

pub use label::resolve_label;
pub use rules::{RULES, Rule};
pub use sfa_domain::{FieldDescriptor, FieldType};

use tracing::trace;

/// Input types the host should hand to [`classify`]. `None` is an input without a `type`.
pub const FILLABLE_INPUT_TYPES: [&str; 3] = ["text", "email", "tel"];

/// The ordered rule table.
#[must_use]
pub const fn rules() -> &'static [Rule] {
    &RULES
}

/// `true` for inputs the agent scans: `text`, `email`, `tel`, or no declared type.
#[must_use]
pub fn is_fillable(input_type: Option<&str>) -> bool {
    input_type.is_none_or(|t| FILLABLE_INPUT_TYPES.iter().any(|f| f.eq_ignore_ascii_case(t.trim())))
}

/// The lower-cased text every rule is matched against.
#[must_use]
pub fn haystack(descriptor: &FieldDescriptor) -> String {
    format!(
        "{} {} {} {} {}",
        descriptor.input_type.as_deref().unwrap_or_default(),
        descriptor.name,
        descriptor.id,
        descriptor.placeholder,
        resolve_label(&descriptor.label),
    )
    .to_lowercase()
}

/// Classifies one input. Total: unmatched inputs are [`FieldType::Text`].
#[must_use]
pub fn classify(descriptor: &FieldDescriptor) -> FieldType {
    let declared = descriptor.input_type.as_deref().map(str::trim).unwrap_or_default();
    let by_type = RULES
        .iter()
        .position(|rule| rule.input_types.iter().any(|t| t.eq_ignore_ascii_case(declared)));
    let by_keyword = rules::first_hit(&haystack(descriptor));

    let field_type = by_type
        .into_iter()
        .chain(by_keyword)
        .min()
        .map_or(FieldType::Text, |index| RULES[index].field_type);

    trace!(%field_type, "Classified field");
    field_type
}
