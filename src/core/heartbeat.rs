//! Periodic empty entries written from a background thread.
//!
//! The thread sleeps on a condition variable, so a stop request wakes it
//! immediately; [`Heartbeat::stop`] waits a bounded time and then lets the
//! thread go rather than blocking shutdown.

use crate::errors::{AppError, AppResult};
use crate::models::Entry;
use crate::store::EntryStore;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::sync::{Arc, Condvar, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{info, warn};

#[derive(Default)]
struct StopSignal {
    stopped: Mutex<bool>,
    cv: Condvar,
}

impl StopSignal {
    fn stop(&self) {
        *self.stopped.lock().unwrap_or_else(|e| e.into_inner()) = true;
        self.cv.notify_all();
    }

    /// Sleep up to `timeout`; `true` once a stop was requested.
    fn wait(&self, timeout: Duration) -> bool {
        let guard = self.stopped.lock().unwrap_or_else(|e| e.into_inner());
        let (guard, _) = self
            .cv
            .wait_timeout_while(guard, timeout, |stopped| !*stopped)
            .unwrap_or_else(|e| e.into_inner());
        *guard
    }
}

pub struct Heartbeat {
    signal: Arc<StopSignal>,
    done: Receiver<()>,
    handle: Option<JoinHandle<()>>,
    interval: Duration,
}

impl Heartbeat {
    /// Append an empty entry to `store` every `interval` until stopped.
    pub fn start(store: Arc<EntryStore>, interval: Duration) -> AppResult<Self> {
        if interval.is_zero() {
            return Err(AppError::Heartbeat("interval must be greater than zero".into()));
        }

        let signal = Arc::new(StopSignal::default());
        let (tx, done) = mpsc::channel();

        let thread_signal = Arc::clone(&signal);
        let handle = thread::Builder::new()
            .name("zlog-heartbeat".into())
            .spawn(move || {
                while !thread_signal.wait(interval) {
                    // outcomes are reported by the store itself
                    let _ = store.append(&Entry::now(""));
                }
                let _ = tx.send(());
            })
            .map_err(|e| AppError::Heartbeat(e.to_string()))?;

        info!(interval_ms = interval.as_millis() as u64, "heartbeat started");

        Ok(Self {
            signal,
            done,
            handle: Some(handle),
            interval,
        })
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Request a stop and wait at most `timeout` for the thread to exit.
    /// Returns `false` when the thread was left running in the background.
    pub fn stop(mut self, timeout: Duration) -> bool {
        self.signal.stop();
        let Some(handle) = self.handle.take() else {
            return true;
        };

        match self.done.recv_timeout(timeout) {
            Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                let _ = handle.join();
                info!("heartbeat stopped");
                true
            }
            Err(RecvTimeoutError::Timeout) => {
                warn!(
                    timeout_ms = timeout.as_millis() as u64,
                    "heartbeat did not stop in time, detaching"
                );
                false
            }
        }
    }
}

impl Drop for Heartbeat {
    fn drop(&mut self) {
        self.signal.stop();
    }
}
