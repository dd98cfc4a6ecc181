//! The mounted header: state machine + animation timer + scroll subscription.
//!
//! All three live and die together.  Dropping a [`StickyHeader`] releases the
//! subscription and the pending timer on every exit path, which is what makes
//! remounting (e.g. toggling `fixed`) leak-free.

use std::future;
use std::time::Duration;

use super::animation::AnimationTimer;
use super::header::{HeaderFlags, HeaderGeometry, HeaderStateMachine, Thresholds};
use super::viewport::{ScrollSubscription, Viewport};

/// How a header is mounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderOptions {
    pub geometry: HeaderGeometry,
    pub animate_delay: Duration,
    /// Permanently pinned: no subscription, flags never move.
    pub fixed: bool,
}

impl Default for HeaderOptions {
    fn default() -> Self {
        Self {
            geometry: HeaderGeometry::default(),
            animate_delay: super::animation::ANIMATE_DELAY,
            fixed: false,
        }
    }
}

/// Something the event loop should feed back into [`StickyHeader::handle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderSignal {
    Scrolled(u32),
    AnimationReady,
}

pub struct StickyHeader {
    options: HeaderOptions,
    machine: HeaderStateMachine,
    timer: AnimationTimer,
    subscription: Option<ScrollSubscription>,
}

impl StickyHeader {
    /// Mount against a viewport.  A fixed header never subscribes.
    pub fn mount(options: HeaderOptions, viewport: &mut impl Viewport) -> Self {
        let subscription = if options.fixed {
            None
        } else {
            Some(viewport.subscribe())
        };
        tracing::debug!(fixed = options.fixed, "header mounted");
        Self {
            options,
            machine: HeaderStateMachine::starting_at(options.geometry, viewport.scroll_y()),
            timer: AnimationTimer::new(options.animate_delay),
            subscription,
        }
    }

    /// Tear down and mount again with new options.  The old subscription and
    /// timer are released before the new ones exist.
    pub fn remount(&mut self, options: HeaderOptions, viewport: &mut impl Viewport) {
        self.release();
        *self = Self::mount(options, viewport);
    }

    pub fn unmount(mut self) {
        self.release();
    }

    /// Cancel the timer and drop the subscription.  Idempotent.
    fn release(&mut self) {
        self.timer.cancel();
        if let Some(sub) = self.subscription.take() {
            sub.unsubscribe();
            tracing::debug!("header unsubscribed");
        }
    }

    pub fn options(&self) -> HeaderOptions {
        self.options
    }

    pub fn flags(&self) -> HeaderFlags {
        self.machine.flags()
    }

    pub fn thresholds(&self) -> Thresholds {
        self.machine.thresholds()
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn animation_pending(&self) -> bool {
        self.timer.is_pending()
    }

    /// Wait for the next scroll sample or the animation deadline.  Pends
    /// forever for a fixed header.  Cancel-safe.
    pub async fn recv(&mut self) -> HeaderSignal {
        let Self {
            subscription,
            timer,
            ..
        } = self;

        let scrolled = async {
            match subscription.as_mut() {
                Some(sub) => sub.recv().await,
                None => future::pending().await,
            }
        };

        tokio::select! {
            Some(y) = scrolled => HeaderSignal::Scrolled(y),
            () = timer.fired() => HeaderSignal::AnimationReady,
        }
    }

    /// Non-blocking drain of queued scroll samples, in delivery order.
    pub fn try_recv_scroll(&mut self) -> Option<HeaderSignal> {
        self.subscription
            .as_mut()
            .and_then(ScrollSubscription::try_recv)
            .map(HeaderSignal::Scrolled)
    }

    /// Apply one signal.  Returns `true` if the flags changed.
    pub fn handle(&mut self, signal: HeaderSignal) -> bool {
        match signal {
            HeaderSignal::Scrolled(y) => {
                let outcome = self.machine.on_scroll(y);
                if outcome.reset {
                    self.timer.cancel();
                }
                if outcome.arm_animation {
                    self.timer.arm();
                }
                outcome.changed
            }
            HeaderSignal::AnimationReady => self.machine.enable_animation(),
        }
    }
}
