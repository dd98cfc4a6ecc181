//! Page viewport: the single source of scroll offsets.
//!
//! Listeners never hold a reference to the viewport.  Each subscription owns
//! the receiving half of an unbounded channel, so publishing an offset is a
//! non-blocking send and dropping the subscription is the unsubscribe.

use tokio::sync::mpsc;

/// Capability the header needs from whatever is scrolling.
pub trait Viewport {
    /// Start receiving every offset change, in order.
    fn subscribe(&mut self) -> ScrollSubscription;
    /// Current absolute vertical offset.
    fn scroll_y(&self) -> u32;
}

// ───────────────────────────────────────── subscription ──────

/// Live scroll listener.  Unsubscribes on drop.
#[derive(Debug)]
pub struct ScrollSubscription {
    rx: mpsc::UnboundedReceiver<u32>,
}

impl ScrollSubscription {
    /// Next published offset, or `None` once the viewport is gone.
    pub async fn recv(&mut self) -> Option<u32> {
        self.rx.recv().await
    }

    /// Non-blocking variant used when draining.
    pub fn try_recv(&mut self) -> Option<u32> {
        self.rx.try_recv().ok()
    }

    /// Explicit form of dropping the subscription.
    pub fn unsubscribe(mut self) {
        self.rx.close();
    }
}

// ───────────────────────────────────────── page viewport ─────

/// A vertically scrollable page measured in virtual pixels.
#[derive(Debug, Default)]
pub struct PageViewport {
    scroll_y: u32,
    /// Largest reachable offset (page height minus viewport height).
    max_scroll_y: u32,
    listeners: Vec<mpsc::UnboundedSender<u32>>,
}

impl PageViewport {
    pub fn new(max_scroll_y: u32) -> Self {
        Self {
            max_scroll_y,
            ..Self::default()
        }
    }

    pub fn max_scroll_y(&self) -> u32 {
        self.max_scroll_y
    }

    /// Resize the scrollable range.  Clamps (and publishes) the offset if
    /// the page got shorter.
    pub fn set_max_scroll_y(&mut self, max: u32) {
        self.max_scroll_y = max;
        if self.scroll_y > max {
            self.scroll_to(max);
        }
    }

    /// Jump to an absolute offset.  Returns `true` if it moved.
    pub fn scroll_to(&mut self, y: u32) -> bool {
        let y = y.min(self.max_scroll_y);
        if y == self.scroll_y {
            return false;
        }
        self.scroll_y = y;
        self.publish(y);
        true
    }

    /// Scroll relative to the current offset, saturating at both ends.
    pub fn scroll_by(&mut self, delta: i64) -> bool {
        let target = (i64::from(self.scroll_y) + delta).clamp(0, i64::from(self.max_scroll_y));
        self.scroll_to(u32::try_from(target).unwrap_or(self.max_scroll_y))
    }

    /// Number of subscriptions still alive.
    pub fn listener_count(&mut self) -> usize {
        self.listeners.retain(|tx| !tx.is_closed());
        self.listeners.len()
    }

    fn publish(&mut self, y: u32) {
        // A failed send means the subscription was dropped.
        self.listeners.retain(|tx| tx.send(y).is_ok());
    }
}

impl Viewport for PageViewport {
    fn subscribe(&mut self) -> ScrollSubscription {
        let (tx, rx) = mpsc::unbounded_channel();
        self.listeners.push(tx);
        tracing::debug!(listeners = self.listeners.len(), "scroll listener added");
        ScrollSubscription { rx }
    }

    fn scroll_y(&self) -> u32 {
        self.scroll_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn publishes_every_change_in_order() {
        let mut vp = PageViewport::new(1000);
        let mut sub = vp.subscribe();
        vp.scroll_to(10);
        vp.scroll_to(30);
        vp.scroll_by(-5);

        assert_eq!(sub.try_recv(), Some(10));
        assert_eq!(sub.try_recv(), Some(30));
        assert_eq!(sub.try_recv(), Some(25));
        assert_eq!(sub.try_recv(), None);
    }

    #[test]
    fn unchanged_offset_is_not_published() {
        let mut vp = PageViewport::new(100);
        let mut sub = vp.subscribe();
        assert!(!vp.scroll_to(0));
        assert!(!vp.scroll_by(-10));
        assert_eq!(sub.try_recv(), None);
    }

    #[test]
    fn clamps_to_range() {
        let mut vp = PageViewport::new(50);
        vp.scroll_to(80);
        assert_eq!(vp.scroll_y(), 50);
        vp.scroll_by(-500);
        assert_eq!(vp.scroll_y(), 0);

        vp.scroll_to(50);
        vp.set_max_scroll_y(20);
        assert_eq!(vp.scroll_y(), 20);
    }

    #[test]
    fn dropping_subscription_unsubscribes() {
        let mut vp = PageViewport::new(100);
        let a = vp.subscribe();
        let b = vp.subscribe();
        assert_eq!(vp.listener_count(), 2);

        drop(a);
        assert_eq!(vp.listener_count(), 1);

        b.unsubscribe();
        vp.scroll_to(5);
        assert_eq!(vp.listener_count(), 0);
    }

    #[tokio::test]
    async fn recv_ends_when_viewport_dropped() {
        let mut vp = PageViewport::new(100);
        let mut sub = vp.subscribe();
        vp.scroll_to(7);
        drop(vp);
        assert_eq!(sub.recv().await, Some(7));
        assert_eq!(sub.recv().await, None);
    }
}
