//! Counter state behind the loading flag
//!
//! `Counters` is the plain (global counter, override, local counters) triple.
//! It knows nothing about events; [`LoadingStore`](super::LoadingStore) wraps
//! it and publishes the transitions.

use std::collections::HashMap;

use crate::id::InstanceKey;

/// What a stop call did to the counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopOutcome {
    /// Keyed stop with a positive local counter: both counters decremented
    Released,
    /// Keyed stop whose local counter was already zero: nothing changed
    Orphan,
    /// Unkeyed stop: global counter decremented (floored at zero)
    Unkeyed,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Counters {
    global: usize,
    override_state: Option<bool>,
    local: HashMap<InstanceKey, usize>,
}

impl Counters {
    pub fn new() -> Self {
        Self::default()
    }

    /// The loading flag: the override if present, otherwise `global > 0`.
    pub fn derive(&self) -> bool {
        self.override_state.unwrap_or(self.global > 0)
    }

    pub fn start(&mut self, key: Option<&InstanceKey>) {
        self.global = self.global.saturating_add(1);
        if let Some(key) = key {
            let local = self.local.entry(key.clone()).or_insert(0);
            *local = local.saturating_add(1);
        }
    }

    /// Keyed stops only touch the global counter while the key's own local
    /// counter is positive. Unkeyed stops decrement the global counter directly.
    pub fn stop(&mut self, key: Option<&InstanceKey>) -> StopOutcome {
        match key {
            Some(key) => match self.local.get_mut(key) {
                Some(local) if *local > 0 => {
                    *local -= 1;
                    self.global = self.global.saturating_sub(1);
                    StopOutcome::Released
                }
                _ => StopOutcome::Orphan,
            },
            None => {
                self.global = self.global.saturating_sub(1);
                StopOutcome::Unkeyed
            }
        }
    }

    pub fn set_override(&mut self, state: Option<bool>) {
        self.override_state = state;
    }

    pub fn global(&self) -> usize {
        self.global
    }

    pub fn override_state(&self) -> Option<bool> {
        self.override_state
    }

    /// Local counter for `key`; zero for keys never seen.
    pub fn local(&self, key: &InstanceKey) -> usize {
        self.local.get(key).copied().unwrap_or(0)
    }

    /// Whether an entry exists for `key`, even if squashed to zero.
    pub fn knows(&self, key: &InstanceKey) -> bool {
        self.local.contains_key(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> InstanceKey {
        InstanceKey::from(s)
    }

    #[test]
    fn test_new_is_idle() {
        let c = Counters::new();
        assert_eq!(c.global(), 0);
        assert_eq!(c.override_state(), None);
        assert!(!c.derive());
    }

    #[test]
    fn test_keyed_start_stop_lockstep() {
        let mut c = Counters::new();
        let a = key("a");
        c.start(Some(&a));
        c.start(Some(&a));
        assert_eq!(c.global(), 2);
        assert_eq!(c.local(&a), 2);

        assert_eq!(c.stop(Some(&a)), StopOutcome::Released);
        assert_eq!(c.global(), 1);
        assert_eq!(c.local(&a), 1);
    }

    #[test]
    fn test_orphan_keyed_stop_leaves_global() {
        let mut c = Counters::new();
        c.start(Some(&key("b")));
        assert_eq!(c.stop(Some(&key("a"))), StopOutcome::Orphan);
        assert_eq!(c.global(), 1);
        assert_eq!(c.local(&key("a")), 0);
        assert!(!c.knows(&key("a")));
    }

    #[test]
    fn test_unkeyed_stop_floors_at_zero() {
        let mut c = Counters::new();
        assert_eq!(c.stop(None), StopOutcome::Unkeyed);
        assert_eq!(c.global(), 0);
        c.start(None);
        c.stop(None);
        c.stop(None);
        assert_eq!(c.global(), 0);
    }

    #[test]
    fn test_local_entry_squashed_not_removed() {
        let mut c = Counters::new();
        let a = key("a");
        c.start(Some(&a));
        c.stop(Some(&a));
        assert_eq!(c.local(&a), 0);
        assert!(c.knows(&a));
        assert_eq!(c.stop(Some(&a)), StopOutcome::Orphan);
    }

    #[test]
    fn test_override_wins_over_counter() {
        let mut c = Counters::new();
        c.set_override(Some(true));
        assert!(c.derive());

        c.start(None);
        c.set_override(Some(false));
        assert!(!c.derive());

        c.set_override(None);
        assert!(c.derive());
    }
}
