//! Saturating volume level
//!
//! The sink takes a linear gain in [0.0, 1.0]. Anything outside that range is
//! clamped rather than rejected, so a slider dragged past its edge still lands
//! on silence or full volume.

use serde::{Deserialize, Serialize};

/// Linear volume level in [0.0, 1.0]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Volume(f64);

impl Volume {
    /// Silence
    pub const MIN: Volume = Volume(0.0);

    /// Unity gain (mount default)
    pub const MAX: Volume = Volume(1.0);

    /// Create a volume level, saturating to [0.0, 1.0]
    ///
    /// Returns `None` for NaN, which has no meaningful position on a slider.
    pub fn new(level: f64) -> Option<Self> {
        if level.is_nan() {
            None
        } else {
            Some(Self(level.clamp(0.0, 1.0)))
        }
    }

    /// Get level as a linear gain (0.0-1.0)
    pub fn level(self) -> f64 {
        self.0
    }

    /// Get level as a slider fill percentage (0-100)
    pub fn percent(self) -> f64 {
        self.0 * 100.0
    }

    /// Check if the level is silence
    pub fn is_silent(self) -> bool {
        self.0 == 0.0
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::MAX
    }
}
