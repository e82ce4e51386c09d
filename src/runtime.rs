use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent};

use crate::score::HighScoreRecord;

/// Unified event type consumed by the app loop. Keystrokes, ticks, and
/// pushed high-score updates all arrive here, so the loop serializes them;
/// a tick and a keystroke can never interleave mid-mutation.
#[derive(Clone, Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize,
    Tick,
    /// A record pushed by the high-score store. May arrive at any point in
    /// the session lifecycle; each one fully replaces the cached best.
    Score(HighScoreRecord),
}

/// Source of loop events (keyboard, resize, forwarded store updates).
pub trait EventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    /// Returns Ok(event) if an event arrives before the timeout, or
    /// Err(Timeout) if it expires.
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError>;
}

/// Production event source using crossterm, with a sender handle so other
/// producers (the store subscription) can feed the same channel.
pub struct CrosstermEventSource {
    tx: Sender<AppEvent>,
    rx: Receiver<AppEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        let key_tx = tx.clone();
        std::thread::spawn(move || loop {
            match event::read() {
                Ok(CtEvent::Key(key)) => {
                    if key_tx.send(AppEvent::Key(key)).is_err() {
                        break;
                    }
                }
                Ok(CtEvent::Resize(_, _)) => {
                    if key_tx.send(AppEvent::Resize).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(_) => break,
            }
        });

        Self { tx, rx }
    }

    pub fn sender(&self) -> Sender<AppEvent> {
        self.tx.clone()
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Forwards pushed store records onto the app loop. The thread ends when
/// either side hangs up, so no update outlives the loop it feeds.
pub fn forward_high_scores(updates: Receiver<HighScoreRecord>, tx: Sender<AppEvent>) {
    std::thread::spawn(move || {
        for record in updates {
            if tx.send(AppEvent::Score(record)).is_err() {
                break;
            }
        }
    });
}

/// Configurable ticker interface
pub trait Ticker: Send + Sync + 'static {
    fn interval(&self) -> Duration;
}

/// Fixed interval ticker
#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Ticker for FixedTicker {
    fn interval(&self) -> Duration {
        self.interval
    }
}

/// Test event source for unit tests
pub struct TestEventSource {
    rx: Receiver<AppEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<AppEvent>) -> Self {
        Self { rx }
    }
}

impl EventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Runner that advances the application one event/tick at a time. Ticks are
/// scheduled against a fixed deadline rather than a detached timer, so
/// dropping the runner is full teardown: nothing can fire afterwards.
pub struct Runner<E: EventSource, T: Ticker> {
    event_source: E,
    ticker: T,
    next_tick: Instant,
}

impl<E: EventSource, T: Ticker> Runner<E, T> {
    pub fn new(event_source: E, ticker: T) -> Self {
        let next_tick = Instant::now() + ticker.interval();
        Self {
            event_source,
            ticker,
            next_tick,
        }
    }

    /// Returns the next event, or Tick once the current tick deadline
    /// passes. Each receive waits only for the time left to that deadline,
    /// so a busy event stream cannot push the tick out indefinitely.
    pub fn step(&mut self) -> AppEvent {
        let now = Instant::now();
        if now >= self.next_tick {
            self.next_tick = now + self.ticker.interval();
            return AppEvent::Tick;
        }
        match self.event_source.recv_timeout(self.next_tick - now) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) => {
                self.next_tick = Instant::now() + self.ticker.interval();
                AppEvent::Tick
            }
            Err(RecvTimeoutError::Disconnected) => {
                // No producers left; sleep out the remainder of the
                // interval so ticks keep their cadence.
                std::thread::sleep(self.next_tick.saturating_duration_since(Instant::now()));
                self.next_tick = Instant::now() + self.ticker.interval();
                AppEvent::Tick
            }
        }
    }
}
