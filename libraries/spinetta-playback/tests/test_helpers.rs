//! Shared test infrastructure: a recording sink and a hand-fired
//! notification source.

use spinetta_playback::{
    AudioSink, NotificationHandler, Result, SinkEvents, SinkNotification, Subscription,
    TransportError,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize logging once per test binary
pub fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::DEBUG)
            .try_init();
    });
}

/// Command received by the mock sink
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Play,
    Pause,
    Seek(f64),
    Volume(f64),
    Source(String),
    Looping(bool),
}

/// What the mock sink has been told, shared with the test
#[derive(Debug)]
pub struct SinkState {
    pub commands: Vec<Command>,
    pub position: f64,
    pub volume: f64,
    pub duration: Option<f64>,
    pub looping: bool,
    /// Simulate failures
    pub fail_play: bool,
}

impl SinkState {
    pub fn plays(&self) -> usize {
        self.commands.iter().filter(|c| **c == Command::Play).count()
    }

    pub fn seeks(&self) -> Vec<f64> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                Command::Seek(position) => Some(*position),
                _ => None,
            })
            .collect()
    }
}

/// Mock audio sink recording every command
pub struct MockSink {
    state: Rc<RefCell<SinkState>>,
}

impl MockSink {
    pub fn new() -> (Self, Rc<RefCell<SinkState>>) {
        let state = Rc::new(RefCell::new(SinkState {
            commands: Vec::new(),
            position: 0.0,
            volume: 1.0,
            duration: None,
            looping: false,
            fail_play: false,
        }));
        (
            Self {
                state: state.clone(),
            },
            state,
        )
    }
}

impl AudioSink for MockSink {
    fn play(&mut self) -> Result<()> {
        let mut state = self.state.borrow_mut();
        if state.fail_play {
            return Err(TransportError::Sink("NotSupportedError".to_string()));
        }
        state.commands.push(Command::Play);
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        self.state.borrow_mut().commands.push(Command::Pause);
        Ok(())
    }

    fn current_time(&self) -> f64 {
        self.state.borrow().position
    }

    fn set_current_time(&mut self, seconds: f64) {
        let mut state = self.state.borrow_mut();
        state.position = seconds;
        state.commands.push(Command::Seek(seconds));
    }

    fn volume(&self) -> f64 {
        self.state.borrow().volume
    }

    fn set_volume(&mut self, level: f64) {
        let mut state = self.state.borrow_mut();
        state.volume = level;
        state.commands.push(Command::Volume(level));
    }

    fn duration(&self) -> Option<f64> {
        self.state.borrow().duration
    }

    fn set_source(&mut self, url: &str) {
        let mut state = self.state.borrow_mut();
        state.position = 0.0;
        state.duration = None;
        state.commands.push(Command::Source(url.to_string()));
    }

    fn set_looping(&mut self, looping: bool) {
        let mut state = self.state.borrow_mut();
        state.looping = looping;
        state.commands.push(Command::Looping(looping));
    }
}

/// Notification source the test fires by hand
///
/// Counts registrations and releases so tests can check the subscription
/// lifecycle.
#[derive(Clone, Default)]
pub struct MockEvents {
    pub handler: Rc<RefCell<Option<NotificationHandler>>>,
    pub registrations: Rc<Cell<usize>>,
    pub releases: Rc<Cell<usize>>,
    pub fail_subscribe: bool,
}

impl MockEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire a notification as the platform would
    pub fn fire(&self, notification: SinkNotification) {
        let handler = self.handler.borrow().clone();
        if let Some(handler) = handler {
            handler(notification);
        }
    }

    /// Whether a handler is currently registered
    pub fn is_listening(&self) -> bool {
        self.handler.borrow().is_some()
    }
}

impl SinkEvents for MockEvents {
    fn subscribe(&self, handler: NotificationHandler) -> Result<Subscription> {
        if self.fail_subscribe {
            return Err(TransportError::Sink("addEventListener failed".to_string()));
        }

        self.registrations.set(self.registrations.get() + 1);
        *self.handler.borrow_mut() = Some(handler);

        let slot = self.handler.clone();
        let releases = self.releases.clone();
        Ok(Subscription::new(move || {
            slot.borrow_mut().take();
            releases.set(releases.get() + 1);
        }))
    }
}
