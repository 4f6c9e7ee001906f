//! WASM bindings for spinetta-playback
//!
//! This module binds the transport to an HTML media element, allowing the
//! widget's controls to be driven from JavaScript.

#[cfg(feature = "wasm")]
pub mod media_element;

#[cfg(feature = "wasm")]
pub mod player;

#[cfg(feature = "wasm")]
pub use media_element::{media_element_pair, MediaElementEvents, MediaElementSink};

#[cfg(feature = "wasm")]
pub use player::WasmPlayer;
