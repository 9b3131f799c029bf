use crate::ImplementorRecord;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A single generator's contribution: every record it produced under one key.
///
/// Fragments are immutable once built. The key names the logical group
/// (normally the crate the generator ran on); records keep the order the
/// generator emitted them in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Fragment<R> {
    key: String,
    records: Vec<R>,
}

impl<R> Fragment<R> {
    /// Builds a fragment. The key is not checked here; the registry rejects
    /// malformed fragments when they are submitted.
    #[must_use]
    pub fn new(key: impl Into<String>, records: Vec<R>) -> Self {
        Self {
            key: key.into(),
            records,
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn records(&self) -> &[R] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn into_parts(self) -> (String, Vec<R>) {
        (self.key, self.records)
    }
}

/// JSON schema of a fragment document carrying [`ImplementorRecord`]s.
pub fn fragment_schema_json() -> serde_json::Result<serde_json::Value> {
    serde_json::to_value(schemars::schema_for!(Fragment<ImplementorRecord>))
}
