//! Per-cycle event queue attached to component data.

/// Staged and received events of one component event.
///
/// Locally triggered events are staged until the next flush serializes and
/// clears them. Events delivered by updates are appended to the received
/// list, which lives until [`EventQueue::clear`] at the end of the cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct EventQueue<T> {
    received: Vec<T>,
    staged: Vec<T>,
}

impl<T> Default for EventQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> EventQueue<T> {
    /// Creates an empty queue.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            received: Vec::new(),
            staged: Vec::new(),
        }
    }

    /// Stages an event for the next flush.
    pub fn trigger(&mut self, value: T) {
        self.staged.push(value);
    }

    /// Appends an event received from an update.
    pub fn add_event(&mut self, value: T) {
        self.received.push(value);
    }

    /// Returns the events staged since the last flush.
    #[must_use]
    pub fn staged(&self) -> &[T] {
        &self.staged
    }

    /// Returns true if any event is waiting to be flushed.
    #[must_use]
    pub fn has_staged(&self) -> bool {
        !self.staged.is_empty()
    }

    /// Drops staged events after they were serialized.
    pub fn clear_staged(&mut self) {
        self.staged.clear();
    }

    /// Drops received events.
    pub fn clear(&mut self) {
        self.received.clear();
    }

    /// Iterates over received events in arrival order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.received.iter()
    }

    /// Number of received events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.received.len()
    }

    /// Returns true if no event was received.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.received.is_empty()
    }
}

impl<'a, T> IntoIterator for &'a EventQueue<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.received.iter()
    }
}

impl<T> IntoIterator for EventQueue<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.received.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trigger_stages_only() {
        let mut queue = EventQueue::new();
        queue.trigger(1u32);
        queue.trigger(2);
        assert!(queue.has_staged());
        assert_eq!(queue.staged(), &[1, 2]);
        assert!(queue.is_empty());

        queue.clear_staged();
        assert!(!queue.has_staged());
    }

    #[test]
    fn test_add_event_appends() {
        let mut queue = EventQueue::new();
        queue.add_event("a");
        queue.add_event("b");
        queue.add_event("a");
        assert_eq!(queue.len(), 3);
        assert_eq!(queue.iter().copied().collect::<Vec<_>>(), vec!["a", "b", "a"]);

        queue.clear();
        assert!(queue.is_empty());
    }

    #[test]
    fn test_clear_keeps_staged() {
        let mut queue = EventQueue::default();
        queue.trigger(7i32);
        queue.add_event(8);
        queue.clear();
        assert_eq!(queue.staged(), &[7]);
        assert_eq!((&queue).into_iter().count(), 0);
    }
}
