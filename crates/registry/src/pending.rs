use docindex_protocol::Fragment;
use std::collections::VecDeque;

/// FIFO of fragments submitted before any registrar was attached.
pub(crate) struct PendingBuffer<R> {
    fragments: VecDeque<Fragment<R>>,
}

impl<R> PendingBuffer<R> {
    pub(crate) fn new() -> Self {
        Self {
            fragments: VecDeque::new(),
        }
    }

    pub(crate) fn push(&mut self, fragment: Fragment<R>) {
        self.fragments.push_back(fragment);
    }

    pub(crate) fn len(&self) -> usize {
        self.fragments.len()
    }

    /// Hands back every buffered fragment, oldest first.
    pub(crate) fn into_drain(self) -> impl Iterator<Item = Fragment<R>> {
        self.fragments.into_iter()
    }
}
