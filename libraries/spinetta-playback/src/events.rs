//! Transport Events
//!
//! Event-based communication for UI synchronization. Events are queued by the
//! controller as state changes and drained by the renderer:
//! - State changes (play/pause, end of track)
//! - Position and duration updates from the sink
//! - Volume and toggle changes
//! - Sink failures

use crate::types::TransportState;
use serde::{Deserialize, Serialize};

/// Events emitted by the transport controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TransportEvent {
    /// Transport switched between paused and playing
    StateChanged {
        /// The new transport state
        state: TransportState,
    },

    /// Position moved (sink tick or seek)
    PositionUpdate {
        /// Current position in seconds
        position_secs: f64,
        /// Track duration in seconds (0 = unknown)
        duration_secs: f64,
    },

    /// Sink reported the track duration
    DurationChanged {
        /// Duration in seconds (0 = unknown)
        duration_secs: f64,
    },

    /// Volume changed
    VolumeChanged {
        /// New level (0.0-1.0)
        level: f64,
    },

    /// Shuffle toggled
    ShuffleChanged { enabled: bool },

    /// Repeat toggled
    RepeatChanged { enabled: bool },

    /// Like toggled
    LikeChanged { liked: bool },

    /// A new track was handed to the sink
    TrackLoaded {
        /// Title of the new track
        title: String,
    },

    /// Track reached its end
    TrackFinished {
        /// Whether playback restarted from the top
        looped: bool,
    },

    /// Sink refused a command
    Error {
        /// Error message
        message: String,
    },
}

impl TransportEvent {
    /// Whether the event changes what the play/pause button shows
    pub fn affects_transport(&self) -> bool {
        matches!(
            self,
            TransportEvent::StateChanged { .. } | TransportEvent::TrackFinished { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_affecting_events() {
        assert!(TransportEvent::StateChanged {
            state: TransportState::Playing
        }
        .affects_transport());
        assert!(TransportEvent::TrackFinished { looped: false }.affects_transport());
        assert!(!TransportEvent::VolumeChanged { level: 0.5 }.affects_transport());
        assert!(!TransportEvent::LikeChanged { liked: true }.affects_transport());
    }
}
