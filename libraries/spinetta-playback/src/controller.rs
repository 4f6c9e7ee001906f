//! Transport controller - playback state and intent handling
//!
//! Maps user intents (play/pause, seek, volume, toggles) onto the audio sink
//! and folds sink notifications back into [`PlaybackState`].
//!
//! ```text
//!            toggle_play_pause (play)
//!   Paused ---------------------------> Playing --+
//!     ^  <---------------------------     |       | on_ended, repeat=true
//!     |      toggle_play_pause (pause)    |       | (seek 0, play again)
//!     +-----------------------------------+  <----+
//!            on_ended, repeat=false
//! ```

use crate::{
    error::{Result, TransportError},
    events::TransportEvent,
    sink::{AudioSink, SinkNotification},
    types::{PlaybackSnapshot, PlaybackState, PlayerConfig, TrackInfo},
    volume::Volume,
};
use std::collections::VecDeque;
use tracing::{debug, warn};

/// Most events the queue holds before the oldest are dropped
pub const MAX_PENDING_EVENTS: usize = 256;

/// Single-track transport controller
///
/// Owns the playback state and, optionally, the sink. Without a sink every
/// sink-touching intent is a no-op; toggles still work so the UI stays live
/// before media is mounted.
pub struct TransportController {
    state: PlaybackState,
    track: Option<TrackInfo>,
    sink: Option<Box<dyn AudioSink>>,
    mirror_loop_to_sink: bool,

    // Event queue for UI synchronization
    pending_events: VecDeque<TransportEvent>,
}

impl TransportController {
    /// Create a controller in the mount state described by `config`
    pub fn new(config: &PlayerConfig) -> Self {
        let volume = Volume::new(config.initial_volume).unwrap_or_default();

        Self {
            state: PlaybackState {
                volume,
                is_liked: config.liked,
                is_shuffled: config.shuffle,
                is_repeated: config.repeat,
                ..Default::default()
            },
            track: None,
            sink: None,
            mirror_loop_to_sink: config.mirror_loop_to_sink,
            pending_events: VecDeque::new(),
        }
    }

    // ===== Sink =====

    /// Attach the sink, pushing current volume and loop setting into it
    pub fn attach_sink(&mut self, mut sink: Box<dyn AudioSink>) {
        sink.set_volume(self.state.volume.level());
        if self.mirror_loop_to_sink {
            sink.set_looping(self.state.is_repeated);
        }
        if let Some(ref track) = self.track {
            sink.set_source(&track.source_url);
        }
        debug!(volume = self.state.volume.level(), "sink attached");
        self.sink = Some(sink);
    }

    /// Detach and return the sink
    pub fn detach_sink(&mut self) -> Option<Box<dyn AudioSink>> {
        let sink = self.sink.take();
        if sink.is_some() {
            debug!("sink detached");
        }
        sink
    }

    /// Check if a sink is attached
    pub fn has_sink(&self) -> bool {
        self.sink.is_some()
    }

    // ===== Track =====

    /// Hand a new track to the sink
    ///
    /// Position and duration reset until the sink reports metadata; volume and
    /// toggles carry over. Loading a source stops the sink, so the transport
    /// drops to paused.
    pub fn load_track(&mut self, track: TrackInfo) {
        if let Some(ref mut sink) = self.sink {
            sink.set_source(&track.source_url);
        }

        let was_playing = self.state.is_playing;
        self.state.is_playing = false;
        self.state.current_time = 0.0;
        self.state.duration = 0.0;

        debug!(title = %track.title, url = %track.source_url, "track loaded");
        self.push_event(TransportEvent::TrackLoaded {
            title: track.title.clone(),
        });
        self.track = Some(track);

        if was_playing {
            self.emit_state_changed();
        }
        self.emit_position_update();
    }

    /// Get the loaded track
    pub fn track(&self) -> Option<&TrackInfo> {
        self.track.as_ref()
    }

    // ===== Playback Control =====

    /// Request play if paused, pause if playing
    ///
    /// The state flips as soon as the sink accepts the command. If the sink
    /// refuses it synchronously the state is left alone and the error is
    /// returned; a later rejection arrives as
    /// [`SinkNotification::PlaybackRejected`].
    pub fn toggle_play_pause(&mut self) -> Result<()> {
        let Some(ref mut sink) = self.sink else {
            debug!("toggle_play_pause ignored: no sink");
            return Ok(());
        };

        let resume = !self.state.is_playing;
        let result = if resume { sink.play() } else { sink.pause() };

        if let Err(e) = result {
            warn!(error = %e, resume, "sink refused transport command");
            self.emit_error(&e);
            return Err(e);
        }

        self.state.is_playing = resume;
        debug!(playing = resume, "transport toggled");
        self.emit_state_changed();
        Ok(())
    }

    /// Check if playing
    pub fn is_playing(&self) -> bool {
        self.state.is_playing
    }

    // ===== Seeking =====

    /// Seek to a fraction of the track (0.0 - 1.0)
    ///
    /// Out-of-range fractions saturate. With an unknown duration this seeks
    /// to 0. NaN is ignored.
    pub fn seek(&mut self, fraction: f64) {
        if fraction.is_nan() {
            warn!("seek ignored: fraction is NaN");
            return;
        }

        let Some(ref mut sink) = self.sink else {
            debug!("seek ignored: no sink");
            return;
        };

        let position = fraction.clamp(0.0, 1.0) * self.state.duration;
        sink.set_current_time(position);
        self.state.current_time = position;

        debug!(position, "seek");
        self.emit_position_update();
    }

    // ===== Volume =====

    /// Set volume (0.0 - 1.0), saturating out-of-range values
    pub fn set_volume(&mut self, fraction: f64) {
        let Some(volume) = Volume::new(fraction) else {
            warn!("set_volume ignored: level is NaN");
            return;
        };

        let Some(ref mut sink) = self.sink else {
            debug!("set_volume ignored: no sink");
            return;
        };

        sink.set_volume(volume.level());
        self.state.volume = volume;
        self.push_event(TransportEvent::VolumeChanged {
            level: volume.level(),
        });
    }

    /// Get current volume (0.0 - 1.0)
    pub fn volume(&self) -> f64 {
        self.state.volume.level()
    }

    // ===== Toggles =====

    /// Flip shuffle
    pub fn toggle_shuffle(&mut self) {
        self.state.is_shuffled = !self.state.is_shuffled;
        self.push_event(TransportEvent::ShuffleChanged {
            enabled: self.state.is_shuffled,
        });
    }

    /// Flip repeat, mirroring it to the sink's loop flag when configured
    pub fn toggle_repeat(&mut self) {
        self.state.is_repeated = !self.state.is_repeated;

        if self.mirror_loop_to_sink {
            if let Some(ref mut sink) = self.sink {
                sink.set_looping(self.state.is_repeated);
            }
        }

        self.push_event(TransportEvent::RepeatChanged {
            enabled: self.state.is_repeated,
        });
    }

    /// Flip like
    pub fn toggle_like(&mut self) {
        self.state.is_liked = !self.state.is_liked;
        self.push_event(TransportEvent::LikeChanged {
            liked: self.state.is_liked,
        });
    }

    // ===== Sink Notifications =====

    /// Dispatch a sink notification
    pub fn handle_notification(&mut self, notification: SinkNotification) {
        match notification {
            SinkNotification::PositionAdvanced(seconds) => self.on_position_advanced(seconds),
            SinkNotification::DurationKnown(seconds) => self.on_duration_known(seconds),
            SinkNotification::Ended => self.on_ended(),
            SinkNotification::PlaybackRejected(reason) => self.on_playback_rejected(&reason),
        }
    }

    /// Sink position moved
    pub fn on_position_advanced(&mut self, seconds: f64) {
        if !seconds.is_finite() {
            return;
        }

        self.state.current_time = self.bounded_position(seconds);
        self.emit_position_update();
    }

    /// Sink metadata loaded
    ///
    /// Non-finite (live stream) or negative durations count as unknown.
    pub fn on_duration_known(&mut self, seconds: f64) {
        let duration = if seconds.is_finite() && seconds > 0.0 {
            seconds
        } else {
            0.0
        };

        self.state.duration = duration;
        self.state.current_time = self.bounded_position(self.state.current_time);

        debug!(duration, "duration known");
        self.push_event(TransportEvent::DurationChanged {
            duration_secs: duration,
        });
    }

    /// Track reached its end
    ///
    /// With repeat on, rewinds the sink and plays again; otherwise drops to
    /// paused and leaves the sink position where it ended.
    pub fn on_ended(&mut self) {
        let was_playing = self.state.is_playing;
        let looped = self.state.is_repeated && self.restart_track();

        if !looped {
            self.state.is_playing = false;
        }

        debug!(looped, "track ended");
        self.push_event(TransportEvent::TrackFinished { looped });
        if self.state.is_playing != was_playing {
            self.emit_state_changed();
        }
    }

    /// A play request the sink had accepted failed later
    pub fn on_playback_rejected(&mut self, reason: &str) {
        warn!(reason, "sink rejected playback");

        self.emit_error(&TransportError::Sink(reason.to_string()));
        if self.state.is_playing {
            self.state.is_playing = false;
            self.emit_state_changed();
        }
    }

    // ===== State Queries =====

    /// Get playback state
    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    /// Snapshot for the renderer
    pub fn snapshot(&self) -> PlaybackSnapshot {
        PlaybackSnapshot::new(&self.state, self.track.as_ref())
    }

    // ===== Events =====

    /// Drain all pending events
    pub fn drain_events(&mut self) -> Vec<TransportEvent> {
        self.pending_events.drain(..).collect()
    }

    /// Number of events waiting to be drained
    pub fn pending_event_count(&self) -> usize {
        self.pending_events.len()
    }

    /// Check if there are pending events
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    // ===== Internal =====

    /// Rewind and play again; false if there is no sink or it refused
    fn restart_track(&mut self) -> bool {
        let Some(ref mut sink) = self.sink else {
            return false;
        };

        sink.set_current_time(0.0);
        self.state.current_time = 0.0;

        match sink.play() {
            Ok(()) => {
                self.state.is_playing = true;
                self.emit_position_update();
                true
            }
            Err(e) => {
                warn!(error = %e, "sink refused to restart track");
                self.emit_error(&e);
                false
            }
        }
    }

    /// Clamp a sink position into [0, duration] once duration is known
    fn bounded_position(&self, seconds: f64) -> f64 {
        let seconds = seconds.max(0.0);
        if self.state.has_duration() {
            seconds.min(self.state.duration)
        } else {
            seconds
        }
    }

    /// Queue an event
    ///
    /// Back-to-back position updates collapse into the newest one, and the
    /// queue never grows past [`MAX_PENDING_EVENTS`].
    fn push_event(&mut self, event: TransportEvent) {
        if matches!(event, TransportEvent::PositionUpdate { .. })
            && matches!(
                self.pending_events.back(),
                Some(TransportEvent::PositionUpdate { .. })
            )
        {
            self.pending_events.pop_back();
        }

        if self.pending_events.len() >= MAX_PENDING_EVENTS {
            if let Some(dropped) = self.pending_events.pop_front() {
                debug!(?dropped, "event queue full, dropping oldest");
            }
        }

        self.pending_events.push_back(event);
    }

    fn emit_state_changed(&mut self) {
        self.push_event(TransportEvent::StateChanged {
            state: self.state.transport(),
        });
    }

    fn emit_position_update(&mut self) {
        self.push_event(TransportEvent::PositionUpdate {
            position_secs: self.state.current_time,
            duration_secs: self.state.duration,
        });
    }

    fn emit_error(&mut self, error: &TransportError) {
        self.push_event(TransportEvent::Error {
            message: error.to_string(),
        });
    }
}

impl Default for TransportController {
    fn default() -> Self {
        Self::new(&PlayerConfig::default())
    }
}
