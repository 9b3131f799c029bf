use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One implementor relationship: `target` implements `capability`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct ImplementorRecord {
    pub target: String,
    pub capability: String,
    /// Auto-trait or blanket impl produced by the compiler rather than written by hand.
    #[serde(default)]
    pub synthetic: bool,
    /// Fully qualified paths of the types the rendered impl links to.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<String>,
}

impl ImplementorRecord {
    #[must_use]
    pub fn new(target: impl Into<String>, capability: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            capability: capability.into(),
            synthetic: false,
            types: Vec::new(),
        }
    }

    #[must_use]
    pub fn synthetic(mut self) -> Self {
        self.synthetic = true;
        self
    }

    #[must_use]
    pub fn with_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.types = types.into_iter().map(Into::into).collect();
        self
    }
}
