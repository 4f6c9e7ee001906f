//! Scoped subscription to sink notifications
//!
//! A [`Subscription`] owns the deregistration of whatever a [`SinkEvents`]
//! implementation registered. Release runs exactly once: on `dispose()` or on
//! drop, whichever comes first.

use crate::error::Result;
use crate::sink::SinkNotification;
use std::fmt;
use std::rc::Rc;

/// Callback receiving sink notifications
pub type NotificationHandler = Rc<dyn Fn(SinkNotification)>;

/// Source of sink notifications
///
/// Implementors register `handler` for every notification they can observe
/// (position, metadata, end of track, playback rejection) and return a guard
/// that removes all of those registrations.
pub trait SinkEvents {
    fn subscribe(&self, handler: NotificationHandler) -> Result<Subscription>;
}

/// RAII guard for a set of notification registrations
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Create a guard that runs `release` once
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// Guard with nothing to release
    pub fn empty() -> Self {
        Self { release: None }
    }

    /// Check if the registrations are still in place
    pub fn is_active(&self) -> bool {
        self.release.is_some()
    }

    /// Release the registrations now
    ///
    /// Safe to call repeatedly; only the first call does anything.
    pub fn dispose(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}
