//! # Docindex Registry
//!
//! Merges documentation index fragments produced by independent generators
//! into one queryable registry, regardless of whether a fragment shows up
//! before or after the consumer that owns the registry.
//!
//! ## Flow
//!
//! ```text
//! Loader (one per crate)
//!     │
//!     └──> FragmentRegistry::submit
//!            │
//!            ├─ no registrar yet ──> pending buffer (FIFO)
//!            │                          │
//!            │      FragmentRegistry::attach drains it
//!            │                          │
//!            └─ registrar attached ─────┴──> Registrar::accept
//!                                               │
//!                                               └─> RegistryStore::merge
//! ```
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use docindex_protocol::{Fragment, ImplementorRecord};
//! use docindex_registry::{FragmentRegistry, RegistryStore};
//!
//! # fn main() -> docindex_registry::Result<()> {
//! let registry: FragmentRegistry<ImplementorRecord> = FragmentRegistry::new();
//! registry.submit(Fragment::new("fj", vec![ImplementorRecord::new("Shape", "Debug")]))?;
//!
//! let store: Arc<RegistryStore<ImplementorRecord>> = Arc::new(RegistryStore::new());
//! registry.attach_shared(store.clone());
//!
//! assert_eq!(store.lookup("fj").len(), 1);
//! assert!(store.lookup("fj_math").is_empty());
//! # Ok(())
//! # }
//! ```

mod config;
mod error;
mod loader;
mod pending;
mod registrar;
mod registry;
mod store;

pub use config::{DuplicateKeyPolicy, RegistryConfig, REGISTRY_CONFIG_SCHEMA_VERSION};
pub use error::{RegistryError, Result};
pub use loader::Loader;
pub use registrar::Registrar;
pub use registry::{FragmentRegistry, RegistryState};
pub use store::{RegistryStats, RegistryStore};

pub use docindex_protocol::Fragment;
