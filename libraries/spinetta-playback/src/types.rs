//! Core types for transport control

use crate::format::{format_time, progress_percent};
use crate::volume::Volume;
use serde::{Deserialize, Serialize};

/// Transport state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportState {
    /// Not producing sound (mount state, paused, or ended without repeat)
    Paused,

    /// Sink has been asked to play
    Playing,
}

impl From<bool> for TransportState {
    fn from(is_playing: bool) -> Self {
        if is_playing {
            TransportState::Playing
        } else {
            TransportState::Paused
        }
    }
}

/// Mutable playback record owned by the transport controller
///
/// Lives for the lifetime of a mounted player and is never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackState {
    /// True iff the sink was last asked to play and has not ended or failed
    pub is_playing: bool,

    /// Position in seconds, within [0, duration] once duration is known
    pub current_time: f64,

    /// Track length in seconds (0 = unknown / metadata not loaded)
    pub duration: f64,

    /// Output level
    pub volume: Volume,

    /// Like button state
    pub is_liked: bool,

    /// Shuffle toggle (display only, there is no queue to shuffle)
    pub is_shuffled: bool,

    /// Repeat toggle, loops the track when it ends
    pub is_repeated: bool,
}

impl PlaybackState {
    /// Transport state derived from `is_playing`
    pub fn transport(&self) -> TransportState {
        self.is_playing.into()
    }

    /// Whether the sink has reported a usable duration
    pub fn has_duration(&self) -> bool {
        self.duration > 0.0
    }

    /// Position to display; 0 while the duration is unknown
    pub fn display_time(&self) -> f64 {
        if self.has_duration() {
            self.current_time
        } else {
            0.0
        }
    }
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            is_playing: false,
            current_time: 0.0,
            duration: 0.0,
            volume: Volume::default(),
            is_liked: false,
            is_shuffled: false,
            is_repeated: false,
        }
    }
}

/// Descriptive metadata of the loaded track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackInfo {
    /// Track title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Album name (optional)
    #[serde(default)]
    pub album: Option<String>,

    /// Header caption, e.g. "PLAYING FROM ALBUM"
    #[serde(default)]
    pub context_label: Option<String>,

    /// Media URL handed to the sink
    pub source_url: String,

    /// Cover image URL (optional)
    #[serde(default)]
    pub artwork_url: Option<String>,
}

impl TrackInfo {
    /// Create track info with only the required fields
    pub fn new(
        title: impl Into<String>,
        artist: impl Into<String>,
        source_url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            album: None,
            context_label: None,
            source_url: source_url.into(),
            artwork_url: None,
        }
    }

    /// Set album name
    pub fn with_album(mut self, album: impl Into<String>) -> Self {
        self.album = Some(album.into());
        self
    }

    /// Set header caption
    pub fn with_context_label(mut self, label: impl Into<String>) -> Self {
        self.context_label = Some(label.into());
        self
    }

    /// Set cover image URL
    pub fn with_artwork_url(mut self, url: impl Into<String>) -> Self {
        self.artwork_url = Some(url.into());
        self
    }
}

/// Immutable view of the transport handed to the renderer
///
/// Carries the raw state plus the derived values the widget displays, so the
/// renderer never does its own arithmetic on durations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackSnapshot {
    pub state: TransportState,
    pub is_playing: bool,
    pub current_time: f64,
    pub duration: f64,
    pub volume: f64,
    pub is_liked: bool,
    pub is_shuffled: bool,
    pub is_repeated: bool,

    /// Progress bar fill (0-100), 0 while duration is unknown
    pub progress_percent: f64,

    /// Volume bar fill (0-100)
    pub volume_percent: f64,

    /// Elapsed time label (`M:SS`)
    pub elapsed_label: String,

    /// Duration label (`M:SS`)
    pub duration_label: String,

    /// Loaded track, if any
    pub track: Option<TrackInfo>,
}

impl PlaybackSnapshot {
    /// Build a snapshot from state and the loaded track
    pub fn new(state: &PlaybackState, track: Option<&TrackInfo>) -> Self {
        let elapsed = state.display_time();

        Self {
            state: state.transport(),
            is_playing: state.is_playing,
            current_time: elapsed,
            duration: state.duration,
            volume: state.volume.level(),
            is_liked: state.is_liked,
            is_shuffled: state.is_shuffled,
            is_repeated: state.is_repeated,
            progress_percent: progress_percent(elapsed, state.duration),
            volume_percent: state.volume.percent(),
            elapsed_label: format_time(elapsed),
            duration_label: format_time(state.duration),
            track: track.cloned(),
        }
    }
}

/// Configuration for a mounted player
///
/// Defaults reproduce the mount state: paused at full volume with every
/// toggle off. Settings are read-only input; nothing is written back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Initial volume (0.0-1.0, default: 1.0); saturated on use
    pub initial_volume: f64,

    /// Initial repeat toggle (default: false)
    pub repeat: bool,

    /// Initial shuffle toggle (default: false)
    pub shuffle: bool,

    /// Initial like toggle (default: false)
    pub liked: bool,

    /// Mirror the repeat toggle to the sink's native loop flag (default: true)
    pub mirror_loop_to_sink: bool,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            initial_volume: 1.0,
            repeat: false,
            shuffle: false,
            liked: false,
            mirror_loop_to_sink: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_matches_mount() {
        let state = PlaybackState::default();
        assert!(!state.is_playing);
        assert_eq!(state.current_time, 0.0);
        assert_eq!(state.duration, 0.0);
        assert_eq!(state.volume.level(), 1.0);
        assert!(!state.is_liked);
        assert!(!state.is_shuffled);
        assert!(!state.is_repeated);
        assert_eq!(state.transport(), TransportState::Paused);
    }

    #[test]
    fn default_config() {
        let config = PlayerConfig::default();
        assert_eq!(config.initial_volume, 1.0);
        assert!(!config.repeat);
        assert!(!config.shuffle);
        assert!(!config.liked);
        assert!(config.mirror_loop_to_sink);
    }

    #[test]
    fn display_time_hidden_until_duration_known() {
        let state = PlaybackState {
            current_time: 42.0,
            ..Default::default()
        };
        assert_eq!(state.display_time(), 0.0);

        let state = PlaybackState {
            current_time: 42.0,
            duration: 200.0,
            ..Default::default()
        };
        assert_eq!(state.display_time(), 42.0);
    }

    #[test]
    fn snapshot_derives_display_fields() {
        let state = PlaybackState {
            is_playing: true,
            current_time: 65.0,
            duration: 260.0,
            volume: Volume::new(0.5).unwrap(),
            is_liked: true,
            ..Default::default()
        };
        let track = TrackInfo::new("Bajan", "Luis Alberto Spinetta", "https://cdn/bajan.mp3")
            .with_album("Artaud");

        let snapshot = PlaybackSnapshot::new(&state, Some(&track));

        assert_eq!(snapshot.state, TransportState::Playing);
        assert_eq!(snapshot.elapsed_label, "1:05");
        assert_eq!(snapshot.duration_label, "4:20");
        assert!((snapshot.progress_percent - 25.0).abs() < 1e-9);
        assert!((snapshot.volume_percent - 50.0).abs() < 1e-9);
        assert_eq!(snapshot.track.as_ref().map(|t| t.title.as_str()), Some("Bajan"));
    }

    #[test]
    fn snapshot_without_duration_has_zero_progress() {
        let state = PlaybackState {
            current_time: 3.0,
            ..Default::default()
        };
        let snapshot = PlaybackSnapshot::new(&state, None);
        assert_eq!(snapshot.progress_percent, 0.0);
        assert_eq!(snapshot.elapsed_label, "0:00");
        assert!(snapshot.track.is_none());
    }

    #[test]
    fn track_info_builder() {
        let track = TrackInfo::new("Bajan", "Luis Alberto Spinetta", "bajan.mp3")
            .with_album("Artaud")
            .with_context_label("PLAYING FROM ALBUM")
            .with_artwork_url("cover.svg");

        assert_eq!(track.album.as_deref(), Some("Artaud"));
        assert_eq!(track.context_label.as_deref(), Some("PLAYING FROM ALBUM"));
        assert_eq!(track.artwork_url.as_deref(), Some("cover.svg"));
    }
}
