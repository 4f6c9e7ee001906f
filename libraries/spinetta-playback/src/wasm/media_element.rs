//! `HtmlMediaElement` as an audio sink

use crate::error::{Result, TransportError};
use crate::sink::{AudioSink, SinkNotification};
use crate::subscription::{NotificationHandler, SinkEvents, Subscription};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Event, EventTarget, HtmlMediaElement};

type Listener = Closure<dyn FnMut(Event)>;

/// Handler slot for play() promise rejections, filled while subscribed
type RejectionSlot = Rc<RefCell<Option<NotificationHandler>>>;

/// Sink half: commands go straight to the element
pub struct MediaElementSink {
    element: HtmlMediaElement,
    rejections: RejectionSlot,
}

/// Notification half: `timeupdate`, `loadedmetadata` and `ended` listeners
pub struct MediaElementEvents {
    element: HtmlMediaElement,
    rejections: RejectionSlot,
}

/// Split a media element into its sink and notification halves
pub fn media_element_pair(element: HtmlMediaElement) -> (MediaElementSink, MediaElementEvents) {
    let rejections: RejectionSlot = Rc::new(RefCell::new(None));
    (
        MediaElementSink {
            element: element.clone(),
            rejections: rejections.clone(),
        },
        MediaElementEvents {
            element,
            rejections,
        },
    )
}

fn js_error(value: &JsValue) -> TransportError {
    TransportError::Sink(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
}

impl AudioSink for MediaElementSink {
    fn play(&mut self) -> Result<()> {
        let promise = self.element.play().map_err(|e| js_error(&e))?;

        // Autoplay policy and decode errors surface as a rejected promise
        let rejections = self.rejections.clone();
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(err) = JsFuture::from(promise).await {
                let handler = rejections.borrow().clone();
                if let Some(handler) = handler {
                    let reason = js_error(&err).to_string();
                    handler(SinkNotification::PlaybackRejected(reason));
                }
            }
        });

        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        self.element.pause().map_err(|e| js_error(&e))
    }

    fn current_time(&self) -> f64 {
        self.element.current_time()
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.element.set_current_time(seconds);
    }

    fn volume(&self) -> f64 {
        self.element.volume()
    }

    fn set_volume(&mut self, level: f64) {
        self.element.set_volume(level);
    }

    fn duration(&self) -> Option<f64> {
        // NaN before metadata, +Infinity for live streams
        let duration = self.element.duration();
        duration.is_finite().then_some(duration)
    }

    fn set_source(&mut self, url: &str) {
        self.element.set_src(url);
    }

    fn set_looping(&mut self, looping: bool) {
        self.element.set_loop(looping);
    }
}

impl MediaElementEvents {
    fn listener(
        handler: &NotificationHandler,
        read: impl Fn() -> SinkNotification + 'static,
    ) -> Listener {
        let handler = handler.clone();
        Closure::<dyn FnMut(Event)>::new(move |_event: Event| handler(read()))
    }
}

impl SinkEvents for MediaElementEvents {
    fn subscribe(&self, handler: NotificationHandler) -> Result<Subscription> {
        let target: EventTarget = self.element.clone().into();

        let position = {
            let element = self.element.clone();
            Self::listener(&handler, move || {
                SinkNotification::PositionAdvanced(element.current_time())
            })
        };
        let metadata = {
            let element = self.element.clone();
            Self::listener(&handler, move || {
                SinkNotification::DurationKnown(element.duration())
            })
        };
        let ended = Self::listener(&handler, || SinkNotification::Ended);

        let listeners = vec![
            ("timeupdate", position),
            ("loadedmetadata", metadata),
            ("ended", ended),
        ];

        for (index, (name, listener)) in listeners.iter().enumerate() {
            if let Err(err) =
                target.add_event_listener_with_callback(name, listener.as_ref().unchecked_ref())
            {
                // Roll back what was already registered
                for (name, listener) in &listeners[..index] {
                    let _ = target
                        .remove_event_listener_with_callback(name, listener.as_ref().unchecked_ref());
                }
                return Err(js_error(&err));
            }
        }

        *self.rejections.borrow_mut() = Some(handler.clone());

        // Metadata may have loaded before we subscribed
        if self.element.ready_state() >= HtmlMediaElement::HAVE_METADATA {
            handler(SinkNotification::DurationKnown(self.element.duration()));
        }

        let rejections = self.rejections.clone();
        Ok(Subscription::new(move || {
            for (name, listener) in &listeners {
                if let Err(err) = target
                    .remove_event_listener_with_callback(name, listener.as_ref().unchecked_ref())
                {
                    warn!(event = *name, error = ?err, "failed to remove media listener");
                }
            }
            rejections.borrow_mut().take();
        }))
    }
}
