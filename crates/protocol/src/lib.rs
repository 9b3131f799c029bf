//! # Docindex Protocol
//!
//! Data contract shared by fragment generators (one per compiled crate) and the
//! registry that merges them.
//!
//! ```text
//! Generator (per crate)
//!     │
//!     └──> Fragment { key, records[] }
//!            │
//!            └──> FragmentRegistry::submit  (docindex-registry)
//! ```
//!
//! Records are opaque to the registry. [`ImplementorRecord`] is the payload the
//! documentation generators emit today.

mod fragment;
mod record;

pub use fragment::{fragment_schema_json, Fragment};
pub use record::ImplementorRecord;
