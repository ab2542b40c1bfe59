//! Student roster entry.

use serde::{Deserialize, Serialize};

/// One roster entry, keyed by `nis`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Student {
    /// Display name. Never written to logs.
    pub name: String,
    /// Student identification number; unique roster key.
    pub nis: String,
    /// Class label such as `7A`. Serialized as `class`.
    #[serde(rename = "class")]
    pub class_name: String,
}

impl Student {
    pub fn new(
        name: impl Into<String>,
        nis: impl Into<String>,
        class_name: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            nis: nis.into(),
            class_name: class_name.into(),
        }
    }
}
