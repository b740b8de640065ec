//! EventEmitter<E>: a typed pub/sub primitive over a closed event set.
//!
//! The set of event names is the `Kind` of an [`Event`] implementation, so
//! subscribing to an undeclared name does not compile.
//!
//! Listeners are stored as `Arc<dyn Fn(&E)>` so snapshots are cheap.
//! Snapshot-on-emit semantics mean:
//!   - A listener added *during* emission is NOT called until the next emit.
//!   - `remove_all_listeners()` during emission does not stop the persistent
//!     listeners of the current round.
//!   - A one-shot listener is unregistered right before it is called, and is
//!     skipped if it is no longer registered by then (already fired by a
//!     re-entrant emit, or cleared). One that never got its turn because an
//!     earlier listener panicked stays registered.
//!
//! Panics inside a listener propagate to the caller and skip the remaining
//! listeners of that round. There is no isolation between listeners.
//!
//! All methods take `&self` (interior mutability via `parking_lot::Mutex`),
//! and the lock is never held while a listener runs.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

/// A closed family of events. Each variant of the implementing type carries
/// its own payload; `Kind` is the payload-free name used for subscription.
pub trait Event {
    type Kind: Copy + Eq + Hash + fmt::Debug;

    /// The name this event is dispatched under.
    fn kind(&self) -> Self::Kind;
}

/// Closure type for event listeners.
pub type ListenerFn<E> = dyn Fn(&E) + Send + Sync;

struct Listener<E> {
    id: u64,
    once: bool,
    callback: Arc<ListenerFn<E>>,
}

/// Typed synchronous event emitter.
pub struct EventEmitter<E: Event> {
    listeners: Mutex<HashMap<E::Kind, Vec<Listener<E>>>>,
    next_id: AtomicU64,
}

impl<E: Event> EventEmitter<E> {
    /// Create a new, empty emitter.
    pub fn new() -> Self {
        Self {
            listeners: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Append `handler` to the listeners for `kind`.
    pub fn on(&self, kind: E::Kind, handler: impl Fn(&E) + Send + Sync + 'static) -> &Self {
        self.register(kind, false, Arc::new(handler))
    }

    /// Like [`on`](Self::on), but the handler is removed after its first call.
    pub fn once(&self, kind: E::Kind, handler: impl Fn(&E) + Send + Sync + 'static) -> &Self {
        self.register(kind, true, Arc::new(handler))
    }

    fn register(&self, kind: E::Kind, once: bool, callback: Arc<ListenerFn<E>>) -> &Self {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.listeners
            .lock()
            .entry(kind)
            .or_default()
            .push(Listener { id, once, callback });
        self
    }

    /// Dispatch `event` to every listener registered for its kind, in
    /// registration order.
    ///
    /// Returns `true` iff at least one listener was registered at call time.
    pub fn emit(&self, event: &E) -> bool {
        let kind = event.kind();
        let snapshot: Vec<(Option<u64>, Arc<ListenerFn<E>>)> = {
            let guard = self.listeners.lock();
            let Some(list) = guard.get(&kind) else {
                return false;
            };
            if list.is_empty() {
                return false;
            }
            list.iter()
                .map(|l| (l.once.then_some(l.id), Arc::clone(&l.callback)))
                .collect()
        };

        for (once_id, callback) in &snapshot {
            if let Some(id) = once_id {
                if !self.unregister(kind, *id) {
                    continue;
                }
            }
            callback(event);
        }
        true
    }

    /// Remove listener `id` from `kind`; false if it was already gone.
    fn unregister(&self, kind: E::Kind, id: u64) -> bool {
        let mut guard = self.listeners.lock();
        let Some(list) = guard.get_mut(&kind) else {
            return false;
        };
        let before = list.len();
        list.retain(|l| l.id != id);
        list.len() != before
    }

    /// Drop every listener of every kind, including pending one-shots.
    pub fn remove_all_listeners(&self) {
        self.listeners.lock().clear();
    }

    /// Number of listeners currently registered for `kind`.
    pub fn listener_count(&self, kind: E::Kind) -> usize {
        self.listeners.lock().get(&kind).map_or(0, Vec::len)
    }
}

impl<E: Event> Default for EventEmitter<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Event> fmt::Debug for EventEmitter<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let guard = self.listeners.lock();
        let mut map = f.debug_map();
        for (kind, list) in guard.iter() {
            let ids: Vec<(u64, bool)> = list.iter().map(|l| (l.id, l.once)).collect();
            map.entry(kind, &ids);
        }
        map.finish()
    }
}
