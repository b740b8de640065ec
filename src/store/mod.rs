//! Loading state module
//!
//! Implements the reference-counted loading flag shared by every caller,
//! with per-caller sub-counters and an optional manual override.

pub mod counters;
pub mod loading_store;

pub use counters::{Counters, StopOutcome};
pub use loading_store::LoadingStore;
