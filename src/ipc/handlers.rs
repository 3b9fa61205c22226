//! Single-slot listener table.
//!
//! Each channel holds at most one listener. Defining a listener for a channel
//! replaces whatever was there, so registering twice never produces duplicate
//! invocations.

use std::sync::Arc;

use dashmap::DashMap;

use super::messages::IpcEvent;

/// Event listener.
pub type Listener = Arc<dyn Fn(&IpcEvent) + Send + Sync>;

/// Channel name → listener.
#[derive(Default, Clone)]
pub struct HandlerTable {
    slots: Arc<DashMap<String, Listener>>,
}

impl HandlerTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install `listener` for `channel`, dropping any previous one.
    pub fn define(&self, channel: impl Into<String>, listener: impl Fn(&IpcEvent) + Send + Sync + 'static) {
        let channel = channel.into();
        if self.slots.insert(channel.clone(), Arc::new(listener)).is_some() {
            crate::debug!("ipc"; "replaced listener for `{}`", channel);
        }
    }

    /// Remove the listener for `channel`. Returns whether one existed.
    pub fn remove(&self, channel: &str) -> bool {
        self.slots.remove(channel).is_some()
    }

    /// Deliver `event` to its channel's listener. Returns whether one ran.
    pub fn dispatch(&self, event: &IpcEvent) -> bool {
        // Clone the Arc out so the listener runs without holding the shard lock
        let listener = self.slots.get(&event.channel).map(|slot| Arc::clone(slot.value()));
        match listener {
            Some(listener) => {
                listener(event);
                true
            }
            None => {
                crate::debug!("ipc"; "no listener for `{}`", event.channel);
                false
            }
        }
    }

    pub fn contains(&self, channel: &str) -> bool {
        self.slots.contains_key(channel)
    }

    /// Number of channels with a listener.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counter() -> Arc<AtomicUsize> {
        Arc::new(AtomicUsize::new(0))
    }

    #[test]
    fn test_redefine_replaces_listener() {
        let table = HandlerTable::new();
        let (first, second) = (counter(), counter());

        let c = Arc::clone(&first);
        table.define("menu", move |_| {
            c.fetch_add(1, Ordering::SeqCst);
        });
        let c = Arc::clone(&second);
        table.define("menu", move |_| {
            c.fetch_add(1, Ordering::SeqCst);
        });

        assert_eq!(table.len(), 1);
        assert!(table.dispatch(&IpcEvent::new("menu", vec![])));
        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_channels_are_independent() {
        let table = HandlerTable::new();
        let hits = counter();

        let c = Arc::clone(&hits);
        table.define("open", move |event| {
            assert_eq!(event.args.len(), 1);
            c.fetch_add(1, Ordering::SeqCst);
        });

        assert!(!table.dispatch(&IpcEvent::new("close", vec![])));
        assert!(table.dispatch(&IpcEvent::new("open", vec![serde_json::json!("a.txt")])));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_listener_may_redefine_itself() {
        let table = HandlerTable::new();
        let inner = table.clone();
        table.define("once", move |_| {
            inner.define("once", |_| {});
        });

        assert!(table.dispatch(&IpcEvent::new("once", vec![])));
        assert!(table.contains("once"));
        assert!(table.remove("once"));
        assert!(table.is_empty());
    }
}
