mod merge;

pub use merge::{merge, MergeArgs};

use anyhow::{Context, Result};

pub fn schema() -> Result<serde_json::Value> {
    docindex_protocol::fragment_schema_json().context("failed to encode fragment schema")
}
