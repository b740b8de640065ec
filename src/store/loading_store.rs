//! LoadingStore: the shared "is anything loading?" coordinator.
//!
//! # Threading model
//!
//! `LoadingStore` is `Send + Sync` and is usually shared as
//! `Arc<LoadingStore>`. Two locks are used:
//!   - `op_lock`: a re-entrant lock held for the whole of a mutating call,
//!     mutation and notification together. Other threads wait; listeners on
//!     the emitting thread can still call back into the store.
//!   - `counters`: the state triple, held only long enough to read or write
//!     it and never while a listener runs.

use log::{debug, info};
use parking_lot::{Mutex, ReentrantMutex};

use crate::events::{EventEmitter, LoadingChange, LoadingEvent, LoadingEventKind};
use crate::id::InstanceKey;

use super::counters::{Counters, StopOutcome};

/// Reference-counted loading state with synchronous notifications.
#[derive(Debug, Default)]
pub struct LoadingStore {
    op_lock: ReentrantMutex<()>,
    counters: Mutex<Counters>,
    emitter: EventEmitter<LoadingEvent>,
}

impl LoadingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one outstanding unit of loading, optionally attributed to `key`.
    pub fn start_loading(&self, key: Option<&InstanceKey>) {
        self.mutate("start", |counters| counters.start(key));
    }

    /// Release one unit of loading.
    ///
    /// With a key, the global counter only moves if that key has an
    /// outstanding start of its own; a stray stop from one caller can never
    /// hide another caller's loading. Without a key the global counter is
    /// decremented directly (floored at zero).
    pub fn stop_loading(&self, key: Option<&InstanceKey>) {
        self.mutate("stop", |counters| {
            if let (StopOutcome::Orphan, Some(key)) = (counters.stop(key), key) {
                if counters.knows(key) {
                    debug!("Ignoring stop from {}: local counter already at zero", key);
                } else {
                    debug!("Ignoring stop from {}: never started", key);
                }
            }
        });
    }

    /// Force the loading flag (`Some`) or hand it back to the counter (`None`).
    pub fn override_loading(&self, state: Option<bool>) {
        self.mutate("override", |counters| counters.set_override(state));
    }

    pub fn is_global_loading(&self) -> bool {
        self.counters.lock().derive()
    }

    pub fn is_local_loading(&self, key: &InstanceKey) -> bool {
        self.counters.lock().local(key) > 0
    }

    pub fn local_counter(&self, key: &InstanceKey) -> usize {
        self.counters.lock().local(key)
    }

    pub fn global_counter(&self) -> usize {
        self.counters.lock().global()
    }

    pub fn override_state(&self) -> Option<bool> {
        self.counters.lock().override_state()
    }

    /// Current state in the shape of a `change` payload.
    pub fn snapshot(&self) -> LoadingChange {
        Self::change_of(&self.counters.lock())
    }

    /// Subscribe to a loading event.
    pub fn on(&self, kind: LoadingEventKind, handler: impl Fn(&LoadingEvent) + Send + Sync + 'static) -> &Self {
        self.emitter.on(kind, handler);
        self
    }

    /// Subscribe to the next occurrence of a loading event only.
    pub fn once(&self, kind: LoadingEventKind, handler: impl Fn(&LoadingEvent) + Send + Sync + 'static) -> &Self {
        self.emitter.once(kind, handler);
        self
    }

    pub fn remove_all_listeners(&self) {
        self.emitter.remove_all_listeners();
    }

    pub fn emitter(&self) -> &EventEmitter<LoadingEvent> {
        &self.emitter
    }

    fn change_of(counters: &Counters) -> LoadingChange {
        LoadingChange {
            is_loading: counters.derive(),
            is_override_state: counters.override_state().is_some(),
        }
    }

    /// Apply `op` and publish the result: `start`/`stop` on a boundary
    /// crossing, then exactly one `change`. The `change` payload is read after
    /// the boundary listeners ran, so it reflects any nested mutation they made.
    fn mutate(&self, op: &str, apply: impl FnOnce(&mut Counters)) {
        let _op = self.op_lock.lock();

        let (was_loading, is_loading) = {
            let mut counters = self.counters.lock();
            let was_loading = counters.derive();
            apply(&mut *counters);
            debug!(
                "{}: global={} override={:?} loading={}",
                op,
                counters.global(),
                counters.override_state(),
                counters.derive()
            );
            (was_loading, counters.derive())
        };

        match (was_loading, is_loading) {
            (false, true) => {
                info!("Loading started ({})", op);
                self.emitter.emit(&LoadingEvent::Start);
            }
            (true, false) => {
                info!("Loading stopped ({})", op);
                self.emitter.emit(&LoadingEvent::Stop);
            }
            _ => {}
        }
        self.emitter.emit(&LoadingEvent::Change(Some(self.snapshot())));
    }
}
