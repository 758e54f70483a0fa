//! Timer-driven host for one [`GameState`].
//!
//! The session owns the periodic tick timer as an explicit resource. Ticks,
//! direction changes and restarts all go through a single mutex, so the
//! tick thread and the input thread never interleave partial updates. Every
//! state change is published as a [`Snapshot`] to subscribers.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{Receiver, Sender, select};

use crate::config::DEFAULT_TICK_INTERVAL_MS;
use crate::game::{GamePhase, GameState, Snapshot};
use crate::input::Direction;

type Subscribers = Arc<Mutex<Vec<Sender<Snapshot>>>>;

/// Shared game state plus the timer that drives it.
pub struct GameSession {
    state: Arc<Mutex<GameState>>,
    subscribers: Subscribers,
    tick_interval: Duration,
    ticker: Option<Ticker>,
}

struct Ticker {
    stop_tx: Sender<()>,
    handle: JoinHandle<()>,
}

impl GameSession {
    /// Wraps `state` with the default 150 ms tick interval.
    #[must_use]
    pub fn new(state: GameState) -> Self {
        Self::with_interval(state, Duration::from_millis(DEFAULT_TICK_INTERVAL_MS))
    }

    #[must_use]
    pub fn with_interval(state: GameState, tick_interval: Duration) -> Self {
        Self {
            state: Arc::new(Mutex::new(state)),
            subscribers: Arc::new(Mutex::new(Vec::new())),
            tick_interval,
            ticker: None,
        }
    }

    /// Restarts the game and installs a fresh tick timer.
    ///
    /// Any timer left over from a previous game is cancelled first.
    pub fn start(&mut self) {
        self.stop();

        let snapshot = {
            let mut state = lock(&self.state);
            state.start();
            state.snapshot()
        };
        let running = snapshot.phase == GamePhase::Running;
        publish(&self.subscribers, &snapshot);

        if running {
            self.ticker = Some(self.spawn_ticker());
        }
    }

    /// Cancels the tick timer. Calling it with no timer installed is a no-op.
    pub fn stop(&mut self) {
        let Some(ticker) = self.ticker.take() else {
            return;
        };

        // The tick thread may already have exited on game over, in which
        // case the receiver is gone and the send fails harmlessly.
        let _ = ticker.stop_tx.send(());
        if ticker.handle.join().is_err() {
            log::error!("tick thread panicked");
        }
    }

    /// Forwards a heading change to the engine.
    ///
    /// Returns whether the engine stored it.
    pub fn set_pending_direction(&self, direction: Direction) -> bool {
        lock(&self.state).set_pending_direction(direction)
    }

    /// Returns a copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        lock(&self.state).snapshot()
    }

    /// Registers a render surface. It receives a snapshot on every change.
    #[must_use]
    pub fn subscribe(&self) -> Receiver<Snapshot> {
        let (tx, rx) = crossbeam_channel::unbounded();
        lock(&self.subscribers).push(tx);
        rx
    }

    /// Returns true while a tick thread is alive.
    #[must_use]
    pub fn is_ticking(&self) -> bool {
        self.ticker
            .as_ref()
            .is_some_and(|ticker| !ticker.handle.is_finished())
    }

    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Runs `f` with exclusive access to the engine.
    ///
    /// Changes made here are not published; call [`GameSession::snapshot`]
    /// afterwards if a surface needs them.
    pub fn with_state<R>(&self, f: impl FnOnce(&mut GameState) -> R) -> R {
        f(&mut lock(&self.state))
    }

    fn spawn_ticker(&self) -> Ticker {
        let (stop_tx, stop_rx) = crossbeam_channel::bounded::<()>(1);
        let state = Arc::clone(&self.state);
        let subscribers = Arc::clone(&self.subscribers);
        let interval = self.tick_interval;

        let handle = thread::spawn(move || run_ticker(&state, &subscribers, &stop_rx, interval));

        Ticker { stop_tx, handle }
    }
}

impl Drop for GameSession {
    fn drop(&mut self) {
        self.stop();
    }
}

fn run_ticker(
    state: &Mutex<GameState>,
    subscribers: &Subscribers,
    stop_rx: &Receiver<()>,
    interval: Duration,
) {
    let clock = crossbeam_channel::tick(interval);
    log::debug!("tick timer started ({} ms)", interval.as_millis());

    loop {
        select! {
            recv(stop_rx) -> _ => break,
            recv(clock) -> _ => {
                let snapshot = {
                    let mut state = lock(state);
                    state.tick();
                    state.snapshot()
                };
                publish(subscribers, &snapshot);

                if snapshot.phase != GamePhase::Running {
                    break;
                }
            }
        }
    }

    log::debug!("tick timer stopped");
}

fn publish(subscribers: &Subscribers, snapshot: &Snapshot) {
    lock(subscribers).retain(|tx| tx.send(snapshot.clone()).is_ok());
}

// State is plain data and every mutation completes before unlocking, so a
// poisoned lock still holds a consistent value.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
