use crate::Identifier;
use std::collections::VecDeque;

/// A FIFO of prefetched identifiers.
///
/// Appends at the tail, removes from the head, both O(1). There is no hard
/// capacity; the owning [`crate::PrefetchFactory`] bounds it through its
/// watermarks.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IdentifierQueue {
    ids: VecDeque<Identifier>,
}

impl IdentifierQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            ids: VecDeque::with_capacity(capacity),
        }
    }

    /// Appends `id` at the tail.
    pub fn enqueue(&mut self, id: Identifier) {
        self.ids.push_back(id);
    }

    /// Removes and returns the head, or `None` if empty.
    pub fn dequeue(&mut self) -> Option<Identifier> {
        self.ids.pop_front()
    }

    /// Puts `id` back at the head, ahead of everything queued.
    pub fn push_front(&mut self, id: Identifier) {
        self.ids.push_front(id);
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Iterates from head to tail without consuming.
    pub fn iter(&self) -> impl Iterator<Item = &Identifier> {
        self.ids.iter()
    }
}

impl Extend<Identifier> for IdentifierQueue {
    fn extend<I: IntoIterator<Item = Identifier>>(&mut self, iter: I) {
        self.ids.extend(iter);
    }
}
