//! Spinetta Player - Transport Control
//!
//! Platform-agnostic transport control for a single-track audio player widget.
//!
//! This crate provides:
//! - Play/pause state machine with end-of-track repeat
//! - Seek by fraction of the track
//! - Saturating volume control (0.0-1.0)
//! - Shuffle, repeat and like toggles
//! - Scoped registration of sink notification handlers
//! - Snapshots and time labels for the renderer
//!
//! # Architecture
//!
//! `spinetta-playback` does not decode or output audio. The platform media
//! primitive is provided via the [`AudioSink`] trait, and its notifications
//! (position, metadata, end of track) arrive through [`SinkEvents`].
//! Browser bindings for `<audio>` elements live behind the `wasm` feature.
//!
//! # Example: Basic Transport
//!
//! ```rust
//! use spinetta_playback::{PlayerConfig, TransportController, TrackInfo};
//!
//! let mut controller = TransportController::new(&PlayerConfig::default());
//!
//! controller.load_track(
//!     TrackInfo::new("Bajan", "Luis Alberto Spinetta", "/media/bajan.mp3")
//!         .with_album("Artaud"),
//! );
//!
//! // Without a sink, transport intents are no-ops but toggles still apply
//! controller.toggle_play_pause().ok();
//! controller.toggle_like();
//!
//! let snapshot = controller.snapshot();
//! assert!(!snapshot.is_playing);
//! assert!(snapshot.is_liked);
//! assert_eq!(snapshot.elapsed_label, "0:00");
//! ```
//!
//! # Example: Platform Integration
//!
//! ```rust,no_run
//! use spinetta_playback::{
//!     AudioSink, NotificationHandler, Player, PlayerConfig, Result, SinkEvents, Subscription,
//! };
//!
//! // Implement AudioSink for your platform
//! struct MyOutput {
//!     position: f64,
//!     volume: f64,
//! }
//!
//! impl AudioSink for MyOutput {
//!     fn play(&mut self) -> Result<()> {
//!         Ok(())
//!     }
//!
//!     fn pause(&mut self) -> Result<()> {
//!         Ok(())
//!     }
//!
//!     fn current_time(&self) -> f64 {
//!         self.position
//!     }
//!
//!     fn set_current_time(&mut self, seconds: f64) {
//!         self.position = seconds;
//!     }
//!
//!     fn volume(&self) -> f64 {
//!         self.volume
//!     }
//!
//!     fn set_volume(&mut self, level: f64) {
//!         self.volume = level;
//!     }
//!
//!     fn duration(&self) -> Option<f64> {
//!         Some(180.0)
//!     }
//! }
//!
//! // And a notification source that registers the handler
//! struct MyEvents;
//!
//! impl SinkEvents for MyEvents {
//!     fn subscribe(&self, handler: NotificationHandler) -> Result<Subscription> {
//!         // ... register handler with the platform
//!         Ok(Subscription::new(|| { /* ... deregister */ }))
//!     }
//! }
//!
//! let player = Player::mount(
//!     Box::new(MyOutput { position: 0.0, volume: 1.0 }),
//!     &MyEvents,
//!     &PlayerConfig::default(),
//! )?;
//!
//! player.toggle_play_pause()?;
//! player.seek(0.5);
//! // Handlers are released when `player` is dropped
//! # Ok::<(), spinetta_playback::TransportError>(())
//! ```

mod config;
mod controller;
mod error;
mod events;
pub mod format;
mod player;
mod sink;
mod subscription;
pub mod types;
mod volume;

pub mod wasm;

// Public exports
pub use self::config::ENV_PREFIX;
pub use controller::{TransportController, MAX_PENDING_EVENTS};
pub use error::{Result, TransportError};
pub use events::TransportEvent;
pub use player::{EventListener, Player, SnapshotObserver};
pub use sink::{AudioSink, SinkNotification};
pub use subscription::{NotificationHandler, SinkEvents, Subscription};
pub use types::{PlaybackSnapshot, PlaybackState, PlayerConfig, TrackInfo, TransportState};
pub use volume::Volume;
