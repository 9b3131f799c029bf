use crate::config::RegistryConfig;
use crate::error::{RegistryError, Result};
use crate::pending::PendingBuffer;
use crate::registrar::Registrar;
use docindex_protocol::Fragment;
use log::{debug, info, warn};
use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryState {
    /// No registrar yet; submissions wait in the pending buffer.
    Buffering,
    /// A registrar is attached; submissions are delivered directly.
    Attached,
}

/// Entry point for loaders: accepts fragments in any order relative to the
/// registrar that will eventually consume them.
///
/// Every submitted fragment reaches exactly one registrar exactly once.
/// Fragments submitted before the first [`attach`](Self::attach) are held in
/// FIFO order and handed over during that attach; afterwards they go straight
/// to whichever registrar is attached at submission time.
pub struct FragmentRegistry<R> {
    slot: Mutex<Slot<R>>,
    config: RegistryConfig,
}

enum Slot<R> {
    Buffering(PendingBuffer<R>),
    Attached {
        registrar: Arc<dyn Registrar<R>>,
        attachments: usize,
    },
}

impl<R: Send + 'static> FragmentRegistry<R> {
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    #[must_use]
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            slot: Mutex::new(Slot::Buffering(PendingBuffer::new())),
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Delivers `fragment` to the attached registrar, or buffers it when none
    /// is attached yet. Malformed fragments are rejected before any state is
    /// touched.
    pub fn submit(&self, fragment: Fragment<R>) -> Result<()> {
        self.validate(&fragment)?;

        let mut slot = self.slot.lock();
        match &mut *slot {
            Slot::Buffering(pending) => {
                debug!(
                    "buffering fragment {:?} ({} record(s), {} pending)",
                    fragment.key(),
                    fragment.len(),
                    pending.len() + 1
                );
                pending.push(fragment);
            }
            Slot::Attached { registrar, .. } => {
                debug!(
                    "delivering fragment {:?} ({} record(s))",
                    fragment.key(),
                    fragment.len()
                );
                registrar.accept(fragment);
            }
        }
        Ok(())
    }

    pub fn attach(&self, registrar: impl Registrar<R> + 'static) {
        self.attach_shared(Arc::new(registrar));
    }

    /// Installs `registrar`, replacing any previous one.
    ///
    /// On the first attach the pending buffer is drained into `registrar`
    /// before this returns; no later submission can overtake the drained
    /// fragments. Re-attaching only swaps the target for future submissions.
    pub fn attach_shared(&self, registrar: Arc<dyn Registrar<R>>) {
        let mut slot = self.slot.lock();
        let attachments = match &*slot {
            Slot::Buffering(_) => 0,
            Slot::Attached { attachments, .. } => *attachments,
        };
        let previous = std::mem::replace(
            &mut *slot,
            Slot::Attached {
                registrar: Arc::clone(&registrar),
                attachments: attachments + 1,
            },
        );

        match previous {
            Slot::Buffering(pending) => {
                let drained = pending.len();
                for fragment in pending.into_drain() {
                    registrar.accept(fragment);
                }
                info!("registrar attached; drained {drained} pending fragment(s)");
            }
            Slot::Attached { .. } => {
                warn!(
                    "replacing attached registrar (attachment #{}); delivered fragments stay with the previous one",
                    attachments + 1
                );
            }
        }
    }

    #[must_use]
    pub fn state(&self) -> RegistryState {
        match &*self.slot.lock() {
            Slot::Buffering(_) => RegistryState::Buffering,
            Slot::Attached { .. } => RegistryState::Attached,
        }
    }

    /// Fragments waiting for the first registrar. Always zero once attached.
    #[must_use]
    pub fn pending_len(&self) -> usize {
        match &*self.slot.lock() {
            Slot::Buffering(pending) => pending.len(),
            Slot::Attached { .. } => 0,
        }
    }

    /// How many times a registrar has been attached.
    #[must_use]
    pub fn attachments(&self) -> usize {
        match &*self.slot.lock() {
            Slot::Buffering(_) => 0,
            Slot::Attached { attachments, .. } => *attachments,
        }
    }

    fn validate(&self, fragment: &Fragment<R>) -> Result<()> {
        let key = fragment.key();
        if key.is_empty() {
            return Err(RegistryError::invalid_fragment("fragment key is empty"));
        }
        if let Some(max_key_len) = self.config.max_key_len {
            if key.len() > max_key_len {
                return Err(RegistryError::invalid_fragment(format!(
                    "fragment key is {} bytes long (max {max_key_len})",
                    key.len()
                )));
            }
        }
        Ok(())
    }
}

impl<R: Send + 'static> Default for FragmentRegistry<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RegistryStore;
    use pretty_assertions::assert_eq;

    #[test]
    fn starts_buffering() {
        let registry: FragmentRegistry<u32> = FragmentRegistry::new();
        assert_eq!(registry.state(), RegistryState::Buffering);
        assert_eq!(registry.attachments(), 0);
    }

    #[test]
    fn empty_key_is_rejected_without_buffering() {
        let registry: FragmentRegistry<u32> = FragmentRegistry::new();
        let err = registry
            .submit(Fragment::new("", vec![1]))
            .expect_err("empty key");
        assert!(matches!(err, RegistryError::InvalidFragment { .. }));
        assert_eq!(registry.pending_len(), 0);
    }

    #[test]
    fn default_config_accepts_long_and_blank_keys() {
        let registry: FragmentRegistry<u32> = FragmentRegistry::new();
        let store: Arc<RegistryStore<u32>> = Arc::new(RegistryStore::new());
        registry.attach_shared(store.clone());

        let long_key = "k".repeat(300);
        registry
            .submit(Fragment::new(long_key.clone(), vec![1]))
            .expect("long key");
        registry
            .submit(Fragment::new(" ", vec![2]))
            .expect("blank key");

        assert_eq!(store.lookup(&long_key), vec![1]);
        assert_eq!(store.lookup(" "), vec![2]);
    }

    #[test]
    fn overlong_key_is_rejected() {
        let config = RegistryConfig {
            max_key_len: Some(4),
            ..RegistryConfig::default()
        };
        let registry: FragmentRegistry<u32> = FragmentRegistry::with_config(config);
        let err = registry
            .submit(Fragment::new("fj_kernel", vec![1]))
            .expect_err("long key");
        assert!(err.to_string().contains("max 4"));
        registry
            .submit(Fragment::new("fj", vec![1]))
            .expect("short key");
        assert_eq!(registry.pending_len(), 1);
    }

    #[test]
    fn attach_switches_state_and_empties_buffer() {
        let registry: FragmentRegistry<u32> = FragmentRegistry::new();
        registry.submit(Fragment::new("a", vec![1])).expect("submit");
        assert_eq!(registry.pending_len(), 1);

        let store: Arc<RegistryStore<u32>> = Arc::new(RegistryStore::new());
        registry.attach_shared(store.clone());

        assert_eq!(registry.state(), RegistryState::Attached);
        assert_eq!(registry.pending_len(), 0);
        assert_eq!(store.lookup("a"), vec![1]);
    }

    #[test]
    fn closures_can_act_as_registrars() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let registry = FragmentRegistry::new();
        registry
            .submit(Fragment::new("early", vec!["x"]))
            .expect("submit");

        let sink = Arc::clone(&seen);
        registry.attach(move |fragment: Fragment<&'static str>| {
            sink.lock().push(fragment.key().to_string());
        });
        registry
            .submit(Fragment::new("late", vec!["y"]))
            .expect("submit");

        assert_eq!(*seen.lock(), vec!["early".to_string(), "late".to_string()]);
    }
}
