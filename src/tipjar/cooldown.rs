//! Refresh cooldown counter.
//!
//! # Design Decisions
//! - One ticker task at a time; starting a new countdown aborts the old one
//! - The task handle lives in the `Cooldown`, which aborts it on drop
//! - Remaining seconds are published on a watch channel for views

use std::sync::Mutex;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

const TICK: Duration = Duration::from_secs(1);

/// Seconds remaining before the next refresh is allowed.
#[derive(Debug)]
pub struct Cooldown {
    remaining: watch::Sender<u32>,
    ticker: Mutex<Option<JoinHandle<()>>>,
}

impl Cooldown {
    pub fn new() -> Self {
        let (remaining, _) = watch::channel(0);
        Self {
            remaining,
            ticker: Mutex::new(None),
        }
    }

    /// Seconds left; 0 means refresh is allowed.
    pub fn remaining(&self) -> u32 {
        *self.remaining.borrow()
    }

    pub fn is_active(&self) -> bool {
        self.remaining() > 0
    }

    /// Watch the countdown.
    pub fn subscribe(&self) -> watch::Receiver<u32> {
        self.remaining.subscribe()
    }

    /// Restart the countdown at `secs`. Must be called inside a tokio runtime.
    pub fn start(&self, secs: u32) {
        self.remaining.send_replace(secs);

        let mut ticker = self.ticker.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(previous) = ticker.take() {
            previous.abort();
        }
        if secs == 0 {
            return;
        }

        let remaining = self.remaining.clone();
        *ticker = Some(tokio::spawn(async move {
            loop {
                tokio::time::sleep(TICK).await;
                let mut left = 0;
                remaining.send_modify(|r| {
                    *r = r.saturating_sub(1);
                    left = *r;
                });
                if left == 0 {
                    break;
                }
            }
        }));
    }
}

impl Default for Cooldown {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Cooldown {
    fn drop(&mut self) {
        let ticker = self.ticker.get_mut().unwrap_or_else(|e| e.into_inner());
        if let Some(handle) = ticker.take() {
            handle.abort();
        }
    }
}
