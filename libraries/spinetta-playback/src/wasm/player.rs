//! WASM-compatible Player wrapper

use super::media_element::media_element_pair;
use crate::format::{format_time, pointer_fraction};
use crate::{Player, PlayerConfig, TrackInfo, TransportError, TransportEvent};
use js_sys::Function;
use tracing::warn;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlAudioElement, HtmlMediaElement};

/// WASM-compatible player
///
/// Mounts the transport on an `<audio>` element and exposes the widget's
/// intents with a JavaScript-friendly API. Call `unmount()` (or `free()`)
/// when the component goes away.
///
/// Intents take `&self` so `onChange` and `onEvent` callbacks may call back
/// into the player.
#[wasm_bindgen]
pub struct WasmPlayer {
    inner: Player,
}

#[wasm_bindgen]
impl WasmPlayer {
    /// Mount on an audio element
    ///
    /// `config` is an optional object with `initial_volume`, `repeat`,
    /// `shuffle`, `liked` and `mirror_loop_to_sink`.
    #[wasm_bindgen(constructor)]
    pub fn new(element: HtmlAudioElement, config: JsValue) -> Result<WasmPlayer, JsValue> {
        // Enable panic hooks for better error messages in console
        console_error_panic_hook::set_once();

        let config: PlayerConfig = if config.is_undefined() || config.is_null() {
            PlayerConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&format!("Invalid player config: {}", e)))?
        };
        config.validate().map_err(to_js)?;

        let element: HtmlMediaElement = element.into();
        let (sink, events) = media_element_pair(element);
        let inner = Player::mount(Box::new(sink), &events, &config).map_err(to_js)?;

        Ok(Self { inner })
    }

    /// Release media listeners and detach from the element
    pub fn unmount(&self) {
        self.inner.unmount();
    }

    // ===== Playback Control =====

    /// Play if paused, pause if playing
    #[wasm_bindgen(js_name = togglePlayPause)]
    pub fn toggle_play_pause(&self) -> Result<(), JsValue> {
        self.inner.toggle_play_pause().map_err(to_js)
    }

    /// Seek to a fraction of the track (0.0 - 1.0)
    pub fn seek(&self, fraction: f64) {
        self.inner.seek(fraction);
    }

    /// Seek from a click on the progress bar
    #[wasm_bindgen(js_name = seekFromPointer)]
    pub fn seek_from_pointer(&self, client_x: f64, track_left: f64, track_width: f64) {
        self.inner
            .seek(pointer_fraction(client_x, track_left, track_width));
    }

    /// Set volume (0.0 - 1.0)
    #[wasm_bindgen(js_name = setVolume)]
    pub fn set_volume(&self, fraction: f64) {
        self.inner.set_volume(fraction);
    }

    /// Set volume from a click on the volume bar
    #[wasm_bindgen(js_name = setVolumeFromPointer)]
    pub fn set_volume_from_pointer(&self, client_x: f64, track_left: f64, track_width: f64) {
        self.inner
            .set_volume(pointer_fraction(client_x, track_left, track_width));
    }

    // ===== Toggles =====

    #[wasm_bindgen(js_name = toggleShuffle)]
    pub fn toggle_shuffle(&self) {
        self.inner.toggle_shuffle();
    }

    #[wasm_bindgen(js_name = toggleRepeat)]
    pub fn toggle_repeat(&self) {
        self.inner.toggle_repeat();
    }

    #[wasm_bindgen(js_name = toggleLike)]
    pub fn toggle_like(&self) {
        self.inner.toggle_like();
    }

    // ===== Track =====

    /// Load a track (`{ title, artist, sourceUrl, album?, contextLabel?, artworkUrl? }`)
    #[wasm_bindgen(js_name = loadTrack)]
    pub fn load_track(&self, track: JsValue) -> Result<(), JsValue> {
        let track: TrackInfo = serde_wasm_bindgen::from_value(track)
            .map_err(|e| JsValue::from_str(&format!("Failed to parse track: {}", e)))?;
        self.inner.load_track(track);
        Ok(())
    }

    // ===== State Queries =====

    /// Current snapshot as a plain object
    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.snapshot())
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    /// Take all queued events as an array of plain objects
    ///
    /// Empty while an `onEvent` or `onError` callback is registered.
    #[wasm_bindgen(js_name = drainEvents)]
    pub fn drain_events(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.drain_events())
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    /// Format seconds as `M:SS`
    #[wasm_bindgen(js_name = formatTime)]
    pub fn format_time(seconds: f64) -> String {
        format_time(seconds)
    }

    // ===== Event Listeners =====

    /// Register a callback receiving a snapshot after every change
    #[wasm_bindgen(js_name = onChange)]
    pub fn on_change(&self, callback: Function) {
        self.inner.set_observer(move |snapshot| {
            match serde_wasm_bindgen::to_value(snapshot) {
                Ok(value) => call_js(&callback, &value, "onChange"),
                Err(e) => warn!(error = %e, "failed to serialize snapshot"),
            }
        });
    }

    /// Register a callback receiving every transport event as it happens
    ///
    /// Replaces any `onError` callback.
    #[wasm_bindgen(js_name = onEvent)]
    pub fn on_event(&self, callback: Function) {
        self.inner.set_event_listener(move |event| {
            match serde_wasm_bindgen::to_value(event) {
                Ok(value) => call_js(&callback, &value, "onEvent"),
                Err(e) => warn!(error = %e, "failed to serialize event"),
            }
        });
    }

    /// Register a callback receiving sink error messages
    ///
    /// Other events are discarded while it is set. Replaces any `onEvent`
    /// callback.
    #[wasm_bindgen(js_name = onError)]
    pub fn on_error(&self, callback: Function) {
        self.inner.set_event_listener(move |event| {
            if let TransportEvent::Error { message } = event {
                call_js(&callback, &JsValue::from_str(message), "onError");
            }
        });
    }
}

fn call_js(callback: &Function, value: &JsValue, name: &str) {
    if let Err(e) = callback.call1(&JsValue::NULL, value) {
        warn!(callback = name, error = ?e, "JavaScript callback threw");
    }
}

fn to_js(error: TransportError) -> JsValue {
    JsValue::from_str(&error.to_string())
}
