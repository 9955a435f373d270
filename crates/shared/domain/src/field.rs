use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Semantic category of an input element.
///
/// Serialized in camelCase (`firstName`), the spelling used by stored pattern tables.
/// Declaration order is the classifier's priority order, with [`FieldType::Text`] last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldType {
    Email,
    Phone,
    Zipcode,
    Address,
    City,
    State,
    FirstName,
    LastName,
    Company,
    Text,
}

impl FieldType {
    pub const ALL: [Self; 10] = [
        Self::Email,
        Self::Phone,
        Self::Zipcode,
        Self::Address,
        Self::City,
        Self::State,
        Self::FirstName,
        Self::LastName,
        Self::Company,
        Self::Text,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Zipcode => "zipcode",
            Self::Address => "address",
            Self::City => "city",
            Self::State => "state",
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Company => "company",
            Self::Text => "text",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFieldType(pub String);

impl fmt::Display for UnknownFieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown field type '{}'", self.0)
    }
}

impl std::error::Error for UnknownFieldType {}

impl FromStr for FieldType {
    type Err = UnknownFieldType;

    /// Accepts the stored spelling case-insensitively, plus `first-name` / `first_name` forms.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded: String =
            s.chars().filter(|c| !matches!(c, '-' | '_')).flat_map(char::to_lowercase).collect();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(&folded))
            .ok_or_else(|| UnknownFieldType(s.to_owned()))
    }
}
