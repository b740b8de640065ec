//! Event layer
//!
//! - [`emitter`]: generic typed pub/sub ([`EventEmitter<E>`]).
//! - [`loading`]: the closed `start` / `stop` / `change` event set.

pub mod emitter;
pub mod loading;

pub use emitter::{Event, EventEmitter, ListenerFn};
pub use loading::{LoadingChange, LoadingEvent, LoadingEventKind};
