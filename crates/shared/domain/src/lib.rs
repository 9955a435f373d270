//! # Domain Models
//!
//! Pure data shared by every autofill crate: field types, domain keys, the input
//! descriptor seen by the classifier, installation settings, storage key names and the
//! configuration tree. The only dependency is `serde`.

pub mod config;
pub mod descriptor;
pub mod domain;
pub mod field;
pub mod keys;
pub mod settings;

pub use descriptor::{FieldDescriptor, LabelSource, SiblingElement};
pub use domain::DomainKey;
pub use field::{FieldType, UnknownFieldType};
pub use settings::{InstallSettings, SecurityLevel};
