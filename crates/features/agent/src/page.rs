use serde::{Deserialize, Serialize};
use sfa_domain::{FieldDescriptor, FieldType};
use std::fmt;

/// Host-assigned handle of one input element, stable for the lifetime of the page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldId(String);

impl FieldId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FieldId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for FieldId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// One input element as the host sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputField {
    pub id: FieldId,
    #[serde(default)]
    pub descriptor: FieldDescriptor,
    /// Current value of the element.
    #[serde(default)]
    pub value: String,
    /// `false` for elements without layout (`display: none` or detached).
    #[serde(default = "visible_by_default")]
    pub visible: bool,
}

const fn visible_by_default() -> bool {
    true
}

impl InputField {
    #[must_use]
    pub fn new(id: impl Into<FieldId>, descriptor: FieldDescriptor) -> Self {
        Self { id: id.into(), descriptor, value: String::new(), visible: true }
    }

    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    #[must_use]
    pub const fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }
}

/// The inputs of a page at one moment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageSnapshot {
    /// Hostname of the page; empty for `file://` and similar.
    pub hostname: String,
    pub fields: Vec<InputField>,
}

impl PageSnapshot {
    #[must_use]
    pub fn new(hostname: impl Into<String>) -> Self {
        Self { hostname: hostname.into(), fields: Vec::new() }
    }

    #[must_use]
    pub fn with_field(mut self, field: InputField) -> Self {
        self.fields.push(field);
        self
    }
}

/// A suggestion to show in an empty field. It is filled in on the field's first focus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prefill {
    pub field: FieldId,
    pub field_type: FieldType,
    pub value: String,
}

/// What one form submission taught the store. Counts are per learn call: every value is
/// learned for its site and for `*`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitReport {
    pub learned: usize,
    /// Too short to learn.
    pub ignored: usize,
    /// Could not be persisted; kept in memory.
    pub failed: usize,
}
