//! ID generation utilities for Loadwatch
//!
//! Provides the opaque [`InstanceKey`] used to attribute start/stop calls to
//! one logical caller.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use rand::Rng;
use serde::{Deserialize, Serialize};

static NEXT_SEQ: AtomicU64 = AtomicU64::new(1);

/// Get current timestamp in milliseconds since Unix epoch
pub fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Caller-stable identifier for per-instance loading bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstanceKey(String);

impl InstanceKey {
    /// Generate a process-unique key
    ///
    /// Format: `inst-{timestamp_ms}-{seq}-{random_hex}`
    /// Example: `inst-1738300800123-7-a1b2`
    pub fn generate() -> Self {
        let timestamp = now_ms();
        let seq = NEXT_SEQ.fetch_add(1, Ordering::Relaxed);
        let random: u16 = rand::rng().random();
        Self(format!("inst-{}-{}-{:04x}", timestamp, seq, random))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InstanceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for InstanceKey {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for InstanceKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}
