//! Development-mode render tracking.
//!
//! Enabled through [`DevSettings::track_renders`], which is read once at
//! startup and handed to the list. Each row render is recorded with a
//! fingerprint of the props it was rendered from; a render whose fingerprint
//! matches the previous render of the same row is reported as avoidable.

use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use crate::config::DevSettings;
use crate::report::ActionId;

/// FNV-1a, stable across runs and platforms.
pub struct Fnv1a(u64);

impl Default for Fnv1a {
    fn default() -> Self {
        Self(0xcbf2_9ce4_8422_2325) // offset basis
    }
}

impl Hasher for Fnv1a {
    fn write(&mut self, bytes: &[u8]) {
        for byte in bytes {
            self.0 ^= u64::from(*byte);
            self.0 = self.0.wrapping_mul(0x0000_0100_0000_01b3); // FNV prime
        }
    }

    fn finish(&self) -> u64 {
        self.0
    }
}

pub fn fingerprint<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut hasher = Fnv1a::default();
    value.hash(&mut hasher);
    hasher.finish()
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub renders: u64,
    pub avoidable: u64,
}

#[derive(Debug, Default)]
pub struct RenderTracker {
    enabled: bool,
    last: HashMap<ActionId, u64>,
    stats: RenderStats,
}

impl RenderTracker {
    pub fn new(settings: &DevSettings) -> Self {
        if settings.track_renders {
            tracing::info!("Render tracking enabled");
        }
        Self {
            enabled: settings.track_renders,
            ..Self::default()
        }
    }

    pub fn record(&mut self, id: ActionId, fingerprint: u64) {
        if !self.enabled {
            return;
        }
        self.stats.renders += 1;
        if self.last.insert(id, fingerprint) == Some(fingerprint) {
            self.stats.avoidable += 1;
            tracing::debug!(target: "render_tracking", action = %id, "re-rendered with unchanged props");
        }
    }

    pub fn stats(&self) -> RenderStats {
        self.stats
    }
}
