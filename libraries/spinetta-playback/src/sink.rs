//! Platform-agnostic audio sink trait
//!
//! Abstracts the media playback primitive (an `<audio>` element in the
//! browser, a decoder + output stream elsewhere). The controller drives the
//! sink imperatively and learns about progress only through notifications.

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Platform media playback primitive
///
/// Implementors own decoding and output. Commands are fire-and-forget: a
/// returned `Ok` only means the request was accepted, and an asynchronous
/// failure is reported later as [`SinkNotification::PlaybackRejected`].
pub trait AudioSink {
    /// Start or resume producing sound
    fn play(&mut self) -> Result<()>;

    /// Stop producing sound, keeping the position
    fn pause(&mut self) -> Result<()>;

    /// Get playback position in seconds
    fn current_time(&self) -> f64;

    /// Move playback position (seconds)
    fn set_current_time(&mut self, seconds: f64);

    /// Get output level (0.0-1.0)
    fn volume(&self) -> f64;

    /// Set output level (0.0-1.0)
    fn set_volume(&mut self, level: f64);

    /// Get track duration in seconds
    ///
    /// `None` until metadata has loaded.
    fn duration(&self) -> Option<f64>;

    /// Point the sink at a new media URL
    fn set_source(&mut self, _url: &str) {}

    /// Loop natively at end of track
    ///
    /// Sinks without native looping ignore this; the controller loops them
    /// itself when `Ended` arrives.
    fn set_looping(&mut self, _looping: bool) {}
}

/// Notification from the sink to the controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SinkNotification {
    /// Playback position moved (seconds)
    PositionAdvanced(f64),

    /// Metadata loaded, duration in seconds
    DurationKnown(f64),

    /// Track played to its end
    Ended,

    /// A previously accepted play request failed
    PlaybackRejected(String),
}
