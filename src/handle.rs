//! Per-caller wrapper around a shared [`LoadingStore`].
//!
//! A `LoadingHandle` owns one [`InstanceKey`] and passes it to every start
//! and stop it issues, so each caller's contribution is locally bounded.

use std::future::Future;
use std::sync::Arc;

use log::debug;

use crate::id::InstanceKey;
use crate::store::LoadingStore;

#[derive(Debug, Clone)]
pub struct LoadingHandle {
    store: Arc<LoadingStore>,
    key: InstanceKey,
}

impl LoadingHandle {
    /// Bind a freshly generated key to `store`.
    pub fn new(store: Arc<LoadingStore>) -> Self {
        Self::with_key(store, InstanceKey::generate())
    }

    pub fn with_key(store: Arc<LoadingStore>, key: InstanceKey) -> Self {
        debug!("New loading handle {}", key);
        Self { store, key }
    }

    pub fn key(&self) -> &InstanceKey {
        &self.key
    }

    pub fn store(&self) -> &Arc<LoadingStore> {
        &self.store
    }

    pub fn start(&self) {
        self.store.start_loading(Some(&self.key));
    }

    pub fn stop(&self) {
        self.store.stop_loading(Some(&self.key));
    }

    /// The shared flag, not just this caller's share of it.
    pub fn is_loading(&self) -> bool {
        self.store.is_global_loading()
    }

    pub fn is_local_loading(&self) -> bool {
        self.store.is_local_loading(&self.key)
    }

    pub fn local_counter(&self) -> usize {
        self.store.local_counter(&self.key)
    }

    /// Start now and stop when the returned guard is dropped.
    pub fn guard(&self) -> LoadingGuard {
        self.start();
        LoadingGuard {
            handle: self.clone(),
        }
    }

    /// Await `future` with this caller marked as loading.
    ///
    /// The stop is issued once the future settles, whatever its output, and
    /// also if the returned future is dropped before completing. The output
    /// (including any `Err`) is handed back untouched.
    pub async fn track<F>(&self, future: F) -> F::Output
    where
        F: Future,
    {
        let _guard = self.guard();
        future.await
    }
}

/// Outstanding start issued by [`LoadingHandle::guard`].
#[derive(Debug)]
#[must_use = "dropping the guard immediately stops loading"]
pub struct LoadingGuard {
    handle: LoadingHandle,
}

impl LoadingGuard {
    pub fn key(&self) -> &InstanceKey {
        self.handle.key()
    }
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        debug!("Releasing loading guard for {}", self.key());
        self.handle.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::LoadingEventKind;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn store() -> Arc<LoadingStore> {
        Arc::new(LoadingStore::new())
    }

    #[test]
    fn test_new_generates_distinct_keys() {
        let store = store();
        let a = LoadingHandle::new(Arc::clone(&store));
        let b = LoadingHandle::new(store);
        assert_ne!(a.key(), b.key());
    }

    #[test]
    fn test_start_stop_uses_own_key() {
        let store = store();
        let a = LoadingHandle::with_key(Arc::clone(&store), InstanceKey::from("a"));
        let b = LoadingHandle::with_key(Arc::clone(&store), InstanceKey::from("b"));

        b.start();
        a.stop();
        assert!(a.is_loading());
        assert!(!a.is_local_loading());
        assert!(b.is_local_loading());
        assert_eq!(b.local_counter(), 1);

        b.stop();
        assert!(!store.is_global_loading());
    }

    #[test]
    fn test_guard_stops_on_drop() {
        let store = store();
        let handle = LoadingHandle::new(Arc::clone(&store));
        {
            let guard = handle.guard();
            assert_eq!(guard.key(), handle.key());
            assert!(handle.is_local_loading());
            assert!(store.is_global_loading());
        }
        assert!(!handle.is_local_loading());
        assert!(!store.is_global_loading());
    }

    #[tokio::test]
    async fn test_track_returns_value_and_balances() {
        let store = store();
        let handle = LoadingHandle::new(Arc::clone(&store));
        let inner = handle.clone();

        let value = handle
            .track(async move {
                assert!(inner.is_local_loading());
                42
            })
            .await;

        assert_eq!(value, 42);
        assert_eq!(handle.local_counter(), 0);
        assert!(!store.is_global_loading());
    }

    #[tokio::test]
    async fn test_track_propagates_error_and_still_stops() {
        let store = store();
        let handle = LoadingHandle::new(Arc::clone(&store));
        let stops = Arc::new(AtomicUsize::new(0));
        let s = Arc::clone(&stops);
        store.on(LoadingEventKind::Stop, move |_| {
            s.fetch_add(1, Ordering::SeqCst);
        });

        let result: Result<(), String> = handle.track(async { Err("boom".to_string()) }).await;

        assert_eq!(result, Err("boom".to_string()));
        assert_eq!(stops.load(Ordering::SeqCst), 1);
        assert!(!store.is_global_loading());
    }

    #[tokio::test]
    async fn test_track_stops_when_cancelled() {
        let store = store();
        let handle = LoadingHandle::new(Arc::clone(&store));

        let outcome = tokio::time::timeout(
            Duration::from_millis(10),
            handle.track(tokio::time::sleep(Duration::from_secs(60))),
        )
        .await;

        assert!(outcome.is_err());
        assert!(!handle.is_local_loading());
        assert!(!store.is_global_loading());
    }

    #[tokio::test]
    async fn test_overlapping_tracks_keep_flag_up() {
        let store = store();
        let a = LoadingHandle::new(Arc::clone(&store));
        let b = LoadingHandle::new(Arc::clone(&store));

        let fast = a.track(tokio::time::sleep(Duration::from_millis(5)));
        let slow = b.track(async {
            tokio::time::sleep(Duration::from_millis(30)).await;
        });
        let probe = async {
            tokio::time::sleep(Duration::from_millis(15)).await;
            store.is_global_loading()
        };

        let (_, _, mid) = tokio::join!(fast, slow, probe);

        assert!(mid);
        assert!(!store.is_global_loading());
    }
}
