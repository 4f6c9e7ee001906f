//! Mounted player
//!
//! Binds a [`TransportController`] to a sink and its notification source for
//! the lifetime of one mount. Handlers are registered once in
//! [`Player::mount`] and released once, by [`Player::unmount`] or drop.
//!
//! Everything runs on one thread. The controller sits in a `RefCell`; a
//! notification that arrives while an intent holds the controller (a sink that
//! reports synchronously from inside `play()`, say) is queued and applied as
//! soon as the controller is free, in arrival order.

use crate::{
    controller::TransportController,
    error::Result,
    events::TransportEvent,
    sink::{AudioSink, SinkNotification},
    subscription::{NotificationHandler, SinkEvents, Subscription},
    types::{PlaybackSnapshot, PlayerConfig, TrackInfo},
};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};
use tracing::{debug, info};

/// Callback receiving a fresh snapshot after every change
pub type SnapshotObserver = Box<dyn Fn(&PlaybackSnapshot)>;

/// Callback receiving each queued event, which is drained as it is delivered
pub type EventListener = Box<dyn Fn(&TransportEvent)>;

/// State shared between the player and its notification handler
struct Shared {
    controller: RefCell<TransportController>,
    pending: RefCell<VecDeque<SinkNotification>>,
    observer: RefCell<Option<SnapshotObserver>>,
    listener: RefCell<Option<EventListener>>,
}

impl Shared {
    /// Apply queued notifications while the controller is free
    ///
    /// Returns the number applied.
    fn drain_pending(&self) -> usize {
        let mut applied = 0;

        while let Ok(mut controller) = self.controller.try_borrow_mut() {
            let Some(notification) = self.pending.borrow_mut().pop_front() else {
                break;
            };
            controller.handle_notification(notification);
            applied += 1;
        }

        applied
    }

    fn deliver(&self, notification: SinkNotification) {
        self.pending.borrow_mut().push_back(notification);
        if self.drain_pending() > 0 {
            self.notify_observer();
        }
    }

    fn notify_observer(&self) {
        // Controller borrow must end before callbacks run: they may call
        // back into the player.
        let (snapshot, events) = match self.controller.try_borrow_mut() {
            Ok(mut controller) => {
                let events = if self.listener.borrow().is_some() {
                    controller.drain_events()
                } else {
                    Vec::new()
                };
                (controller.snapshot(), events)
            }
            Err(_) => return,
        };

        if let Some(ref listener) = *self.listener.borrow() {
            for event in &events {
                listener(event);
            }
        }

        if let Some(ref observer) = *self.observer.borrow() {
            observer(&snapshot);
        }
    }
}

/// Handler that forwards notifications into `shared` for as long as it lives
fn notification_handler(shared: Weak<Shared>) -> NotificationHandler {
    Rc::new(move |notification| {
        if let Some(shared) = shared.upgrade() {
            shared.deliver(notification);
        }
    })
}

/// A transport controller mounted on a sink
pub struct Player {
    subscription: RefCell<Subscription>,
    shared: Rc<Shared>,
    mounted: Cell<bool>,
}

impl Player {
    /// Mount: create the controller, attach the sink, register handlers
    pub fn mount(
        sink: Box<dyn AudioSink>,
        events: &dyn SinkEvents,
        config: &PlayerConfig,
    ) -> Result<Self> {
        let mut controller = TransportController::new(config);
        controller.attach_sink(sink);

        let shared = Rc::new(Shared {
            controller: RefCell::new(controller),
            pending: RefCell::new(VecDeque::new()),
            observer: RefCell::new(None),
            listener: RefCell::new(None),
        });

        let subscription = events.subscribe(notification_handler(Rc::downgrade(&shared)))?;
        info!("player mounted");

        Ok(Self {
            subscription: RefCell::new(subscription),
            shared,
            mounted: Cell::new(true),
        })
    }

    /// Release handlers and detach the sink
    ///
    /// Intents after unmount behave as on a controller without a sink. Safe
    /// to call from inside an observer.
    pub fn unmount(&self) {
        if !self.mounted.replace(false) {
            return;
        }

        self.subscription.borrow_mut().dispose();
        self.shared.pending.borrow_mut().clear();
        self.shared.controller.borrow_mut().detach_sink();
        info!("player unmounted");
    }

    /// Check if handlers are registered
    pub fn is_mounted(&self) -> bool {
        self.mounted.get()
    }

    /// Register the renderer callback, replacing any previous one
    pub fn set_observer(&self, observer: impl Fn(&PlaybackSnapshot) + 'static) {
        *self.shared.observer.borrow_mut() = Some(Box::new(observer));
    }

    /// Remove the renderer callback
    pub fn clear_observer(&self) {
        self.shared.observer.borrow_mut().take();
    }

    /// Register an event callback, replacing any previous one
    ///
    /// While a listener is set, events are handed to it after every change
    /// and no longer accumulate for [`Player::drain_events`].
    pub fn set_event_listener(&self, listener: impl Fn(&TransportEvent) + 'static) {
        *self.shared.listener.borrow_mut() = Some(Box::new(listener));
    }

    /// Remove the event callback
    pub fn clear_event_listener(&self) {
        self.shared.listener.borrow_mut().take();
    }

    /// Deliver a notification directly, for hosts that poll their sink
    pub fn notify(&self, notification: SinkNotification) {
        if self.is_mounted() {
            self.shared.deliver(notification);
        } else {
            debug!(?notification, "notification after unmount dropped");
        }
    }

    // ===== Intents =====

    /// See [`TransportController::toggle_play_pause`]
    pub fn toggle_play_pause(&self) -> Result<()> {
        self.with_controller(TransportController::toggle_play_pause)
    }

    /// See [`TransportController::seek`]
    pub fn seek(&self, fraction: f64) {
        self.with_controller(|c| c.seek(fraction));
    }

    /// See [`TransportController::set_volume`]
    pub fn set_volume(&self, fraction: f64) {
        self.with_controller(|c| c.set_volume(fraction));
    }

    pub fn toggle_shuffle(&self) {
        self.with_controller(TransportController::toggle_shuffle);
    }

    pub fn toggle_repeat(&self) {
        self.with_controller(TransportController::toggle_repeat);
    }

    pub fn toggle_like(&self) {
        self.with_controller(TransportController::toggle_like);
    }

    /// See [`TransportController::load_track`]
    pub fn load_track(&self, track: TrackInfo) {
        self.with_controller(|c| c.load_track(track));
    }

    // ===== State Queries =====

    pub fn snapshot(&self) -> PlaybackSnapshot {
        self.shared.controller.borrow().snapshot()
    }

    pub fn drain_events(&self) -> Vec<TransportEvent> {
        self.shared.controller.borrow_mut().drain_events()
    }

    /// Run an intent, then apply notifications it triggered and notify the
    /// observer
    fn with_controller<R>(&self, intent: impl FnOnce(&mut TransportController) -> R) -> R {
        let result = {
            let mut controller = self.shared.controller.borrow_mut();
            intent(&mut *controller)
        };
        self.shared.drain_pending();
        self.shared.notify_observer();
        result
    }
}

impl Drop for Player {
    fn drop(&mut self) {
        self.unmount();
    }
}
