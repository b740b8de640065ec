//! Loadwatch - a shared "is anything loading?" signal
//!
//! Any number of independent callers start and stop loading against one
//! [`LoadingStore`]; the store folds them into a single boolean and notifies
//! subscribers synchronously on every transition.

pub mod config;
pub mod error;
pub mod events;
pub mod handle;
pub mod id;
pub mod store;

pub use error::{LoadwatchError, Result};
pub use events::{Event, EventEmitter, LoadingChange, LoadingEvent, LoadingEventKind};
pub use handle::{LoadingGuard, LoadingHandle};
pub use id::InstanceKey;
pub use store::LoadingStore;
