use serde::{Deserialize, Serialize};

/// What the host reports about one input element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FieldDescriptor {
    /// The `type` attribute; `None` when the element has none.
    pub input_type: Option<String>,
    pub name: String,
    pub id: String,
    pub placeholder: String,
    pub label: LabelSource,
}

/// Candidate label texts, in the order the page offers them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LabelSource {
    /// Texts of `<label for=..>` elements associated with the input.
    pub explicit: Vec<String>,
    /// Text of the nearest enclosing `<label>`.
    pub enclosing: Option<String>,
    /// The element immediately before the input.
    pub previous_sibling: Option<SiblingElement>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiblingElement {
    pub tag: String,
    pub text: String,
}

impl FieldDescriptor {
    #[must_use]
    pub fn with_type(mut self, input_type: impl Into<String>) -> Self {
        self.input_type = Some(input_type.into());
        self
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    #[must_use]
    pub fn with_label(mut self, text: impl Into<String>) -> Self {
        self.label.explicit.push(text.into());
        self
    }

    #[must_use]
    pub fn with_enclosing_label(mut self, text: impl Into<String>) -> Self {
        self.label.enclosing = Some(text.into());
        self
    }

    #[must_use]
    pub fn with_previous_sibling(mut self, tag: impl Into<String>, text: impl Into<String>) -> Self {
        self.label.previous_sibling = Some(SiblingElement { tag: tag.into(), text: text.into() });
        self
    }
}
