use crate::error::Result;
use crate::registry::FragmentRegistry;
use docindex_protocol::Fragment;

/// Collects the records one build artifact contributes and submits them as a
/// single fragment.
///
/// `submit` consumes the loader, so one loader can never deliver its fragment
/// twice. Two loaders sharing a key both land in the store (append semantics).
#[derive(Debug, Clone)]
pub struct Loader<R> {
    key: String,
    records: Vec<R>,
}

impl<R> Loader<R> {
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            records: Vec::new(),
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn record(&mut self, record: R) -> &mut Self {
        self.records.push(record);
        self
    }

    pub fn extend<I>(&mut self, records: I) -> &mut Self
    where
        I: IntoIterator<Item = R>,
    {
        self.records.extend(records);
        self
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
    pub fn into_fragment(self) -> Fragment<R> {
        Fragment::new(self.key, self.records)
    }
}

impl<R: Send + 'static> Loader<R> {
    pub fn submit(self, registry: &FragmentRegistry<R>) -> Result<()> {
        registry.submit(self.into_fragment())
    }
}
