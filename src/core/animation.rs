//! One-shot deferred timer that turns header transitions on.
//!
//! The first auto-hide must be instant, so `animate` is only switched on a
//! short delay after the header hides.  The timer is a plain owned
//! [`tokio::time::Sleep`]: there is no spawned task, so dropping the owner
//! (or calling [`AnimationTimer::cancel`]) is all it takes to make sure the
//! callback never lands on a discarded header.

use std::future;
use std::pin::Pin;
use std::time::Duration;

use tokio::time::{self, Sleep};

/// Delay between the first auto-hide and enabling transitions.
pub const ANIMATE_DELAY: Duration = Duration::from_millis(100);

#[derive(Debug)]
pub struct AnimationTimer {
    delay: Duration,
    pending: Option<Pin<Box<Sleep>>>,
}

impl AnimationTimer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Arm the timer.  A timer that is already pending keeps its deadline.
    pub fn arm(&mut self) {
        if self.pending.is_some() {
            return;
        }
        tracing::debug!(delay_ms = self.delay.as_millis() as u64, "animation timer armed");
        self.pending = Some(Box::pin(time::sleep(self.delay)));
    }

    /// Drop the pending deadline, if any.  Safe to call repeatedly.
    pub fn cancel(&mut self) {
        if self.pending.take().is_some() {
            tracing::debug!("animation timer cancelled");
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Resolves once the armed deadline passes, then disarms.  Never resolves
    /// while nothing is armed.  Cancel-safe: dropping the future leaves the
    /// deadline in place.
    pub async fn fired(&mut self) {
        match self.pending.as_mut() {
            Some(sleep) => {
                sleep.as_mut().await;
                self.pending = None;
                tracing::debug!("animation timer fired");
            }
            None => future::pending().await,
        }
    }
}

impl Default for AnimationTimer {
    fn default() -> Self {
        Self::new(ANIMATE_DELAY)
    }
}
