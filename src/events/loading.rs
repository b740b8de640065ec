//! Loading events published by the [`LoadingStore`](crate::store::LoadingStore).

use serde::{Deserialize, Serialize};

use super::emitter::Event;

/// Names of the loading events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadingEventKind {
    /// Derived flag went false -> true
    Start,
    /// Derived flag went true -> false
    Stop,
    /// Any mutation, boundary or not
    Change,
}

/// Payload of a `change` event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadingChange {
    pub is_loading: bool,
    pub is_override_state: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadingEvent {
    Start,
    Stop,
    /// The store always attaches a payload; `None` is reserved for external
    /// emitters that signal "something changed" without a state snapshot.
    Change(Option<LoadingChange>),
}

impl LoadingEvent {
    /// The change payload, if this is a `change` event carrying one.
    pub fn change(&self) -> Option<LoadingChange> {
        match self {
            LoadingEvent::Change(payload) => *payload,
            _ => None,
        }
    }
}

impl Event for LoadingEvent {
    type Kind = LoadingEventKind;

    fn kind(&self) -> LoadingEventKind {
        match self {
            LoadingEvent::Start => LoadingEventKind::Start,
            LoadingEvent::Stop => LoadingEventKind::Stop,
            LoadingEvent::Change(_) => LoadingEventKind::Change,
        }
    }
}
