use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent};

use crate::loader::{Delivery, LoadOutcome};

/// Elapsed-time readouts refresh once per second
pub const TICK_RATE_MS: u64 = 1000;

/// Unified event type consumed by the app runner
#[derive(Clone, Debug)]
pub enum SprintEvent {
    Key(KeyEvent),
    Resize,
    FocusGained,
    Tick,
    Loaded(LoadOutcome),
}

/// Source of terminal and loader events
pub trait SprintEventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    /// Returns Ok(event) if an event arrives before the timeout, or Err(Timeout) if it expires.
    fn recv_timeout(&self, timeout: Duration) -> Result<SprintEvent, RecvTimeoutError>;
}

/// Route finished loads into an event queue
pub fn delivery_for(tx: Sender<SprintEvent>) -> Delivery {
    let tx = Mutex::new(tx);
    Arc::new(move |outcome: LoadOutcome| {
        if let Ok(tx) = tx.lock() {
            // receiver gone means the app is shutting down
            let _ = tx.send(SprintEvent::Loaded(outcome));
        }
    })
}

/// Production event source using crossterm
pub struct CrosstermEventSource {
    tx: Sender<SprintEvent>,
    rx: Receiver<SprintEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        let input_tx = tx.clone();

        std::thread::spawn(move || loop {
            let evt = match event::read() {
                Ok(CtEvent::Key(key)) => SprintEvent::Key(key),
                Ok(CtEvent::Resize(_, _)) => SprintEvent::Resize,
                Ok(CtEvent::FocusGained) => SprintEvent::FocusGained,
                Ok(_) => continue,
                Err(_) => break,
            };
            if input_tx.send(evt).is_err() {
                break;
            }
        });

        Self { tx, rx }
    }

    /// Sender for posting events from other threads into this queue
    pub fn sender(&self) -> Sender<SprintEvent> {
        self.tx.clone()
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl SprintEventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<SprintEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
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

impl Default for FixedTicker {
    fn default() -> Self {
        Self::new(Duration::from_millis(TICK_RATE_MS))
    }
}

impl Ticker for FixedTicker {
    fn interval(&self) -> Duration {
        self.interval
    }
}

/// Test event source for unit tests
pub struct TestEventSource {
    rx: Receiver<SprintEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<SprintEvent>) -> Self {
        Self { rx }
    }
}

impl SprintEventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<SprintEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Runner that advances the application one event/tick at a time.
/// Ticks fire on a fixed schedule no matter how many events arrive in between.
pub struct Runner<E: SprintEventSource, T: Ticker> {
    event_source: E,
    ticker: T,
    next_tick: Instant,
}

impl<E: SprintEventSource, T: Ticker> Runner<E, T> {
    pub fn new(event_source: E, ticker: T) -> Self {
        let next_tick = Instant::now() + ticker.interval();
        Self {
            event_source,
            ticker,
            next_tick,
        }
    }

    /// Blocks until the next event or the tick deadline, whichever comes first
    pub fn step(&mut self) -> SprintEvent {
        let now = Instant::now();
        if now >= self.next_tick {
            return self.tick(now);
        }

        match self
            .event_source
            .recv_timeout(self.next_tick.saturating_duration_since(now))
        {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) => self.tick(Instant::now()),
            Err(RecvTimeoutError::Disconnected) => {
                // nothing left to wait on but the clock
                std::thread::sleep(self.next_tick.saturating_duration_since(Instant::now()));
                self.tick(Instant::now())
            }
        }
    }

    fn tick(&mut self, now: Instant) -> SprintEvent {
        self.next_tick += self.ticker.interval();
        // skip missed ticks rather than firing a burst
        if self.next_tick <= now {
            self.next_tick = now + self.ticker.interval();
        }
        SprintEvent::Tick
    }
}
