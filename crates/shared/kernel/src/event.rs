//! Listener lists for host callbacks where the first answer wins.

use parking_lot::RwLock;
use std::fmt;

type Listener<I, O> = Box<dyn Fn(&I) -> Option<O> + Send + Sync>;

/// An ordered list of listeners asked in registration order.
///
/// [`Callback::invoke`] returns the first `Some` answer; later listeners are not asked.
/// A typical use is letting several features offer a tooltip component for one item
/// stack, where the first feature that recognizes the stack provides it.
///
/// ```rust
/// use modkit_kernel::event::Callback;
///
/// let tooltip: Callback<String, usize> = Callback::new();
/// tooltip.register(|stack: &String| stack.starts_with("shulker").then_some(27));
/// tooltip.register(|stack: &String| stack.starts_with("bundle").then_some(64));
///
/// assert_eq!(tooltip.invoke(&"bundle".to_owned()), Some(64));
/// assert_eq!(tooltip.invoke(&"dirt".to_owned()), None);
/// ```
pub struct Callback<I, O> {
    listeners: RwLock<Vec<Listener<I, O>>>,
}

impl<I, O> Callback<I, O> {
    #[must_use]
    pub fn new() -> Self {
        Self { listeners: RwLock::new(Vec::new()) }
    }

    pub fn register<L>(&self, listener: L)
    where
        L: Fn(&I) -> Option<O> + Send + Sync + 'static,
    {
        self.listeners.write().push(Box::new(listener));
    }

    /// Asks each listener in order and returns the first answer.
    pub fn invoke(&self, input: &I) -> Option<O> {
        self.listeners.read().iter().find_map(|listener| listener(input))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.read().is_empty()
    }
}

impl<I, O> Default for Callback<I, O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I, O> fmt::Debug for Callback<I, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback").field("listeners", &self.len()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_first_answer_wins_and_stops_the_chain() {
        let asked = Arc::new(AtomicUsize::new(0));
        let callback: Callback<u32, &'static str> = Callback::new();

        let counter = Arc::clone(&asked);
        callback.register(move |n| {
            counter.fetch_add(1, Ordering::SeqCst);
            (*n > 10).then_some("big")
        });
        callback.register(|_| Some("fallback"));
        let counter = Arc::clone(&asked);
        callback.register(move |_| {
            counter.fetch_add(100, Ordering::SeqCst);
            Some("never")
        });

        assert_eq!(callback.invoke(&42), Some("big"));
        assert_eq!(callback.invoke(&1), Some("fallback"));
        assert_eq!(asked.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_empty_callback_declines() {
        let callback: Callback<(), u8> = Callback::default();
        assert!(callback.is_empty());
        assert_eq!(callback.invoke(&()), None);
    }
}
