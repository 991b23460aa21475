//! Connection Limiter
//!
//! Optional cap on concurrent connection handlers, built on a bounded
//! crossbeam channel used as a token pool.

use crossbeam::channel::{bounded, Receiver, Sender};

/// Hands out permits, one per live connection
pub struct ConnectionLimiter {
    /// `None` when unbounded
    tokens: Option<(Sender<()>, Receiver<()>)>,
}

impl ConnectionLimiter {
    /// Create a limiter admitting `max` concurrent connections (0 = unbounded)
    pub fn new(max: usize) -> Self {
        if max == 0 {
            return Self { tokens: None };
        }

        let (tx, rx) = bounded(max);
        for _ in 0..max {
            // Cannot fail: capacity is exactly `max` and we hold the receiver.
            let _ = tx.send(());
        }
        Self {
            tokens: Some((tx, rx)),
        }
    }

    /// Wait for a free slot
    pub fn acquire(&self) -> Permit {
        match &self.tokens {
            Some((tx, rx)) => {
                if rx.is_empty() {
                    tracing::debug!("Connection limit reached, waiting for a free slot");
                }
                match rx.recv() {
                    Ok(()) => Permit {
                        slot: Some(tx.clone()),
                    },
                    Err(_) => Permit { slot: None },
                }
            }
            None => Permit { slot: None },
        }
    }

    /// Free slots right now, `None` when unbounded
    pub fn available(&self) -> Option<usize> {
        self.tokens.as_ref().map(|(_, rx)| rx.len())
    }
}

/// Returns its slot to the limiter when dropped
pub struct Permit {
    slot: Option<Sender<()>>,
}

impl Drop for Permit {
    fn drop(&mut self) {
        if let Some(tx) = self.slot.take() {
            let _ = tx.send(());
        }
    }
}
