//! Scroll-driven visibility state machine for the page header.
//!
//! The header hides once the page has scrolled past its own height.  It
//! sticks back to the top of the viewport only after a deliberate upward
//! scroll of at least `hysteresis` pixels past the point where the direction
//! reversed, and unsticks again after the same distance downward.  The two
//! edges (`stick_at` / `unstick_at`) are recentred around the current offset
//! on every reversal, so small jitter never flips the header.

// ───────────────────────────────────────── settings ──────────

/// Default header height in virtual pixels.
pub const HEADER_HEIGHT: u32 = 64;

/// Default distance the user has to travel past a reversal point before the
/// header sticks (or unsticks).
pub const HYSTERESIS: u32 = 30;

/// Geometry the state machine needs.  Both values are fixed for the lifetime
/// of a mounted header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderGeometry {
    /// Offsets strictly greater than this hide the header.
    pub height: u32,
    /// Width of the dead band around a reversal point.
    pub hysteresis: u32,
}

impl Default for HeaderGeometry {
    fn default() -> Self {
        Self {
            height: HEADER_HEIGHT,
            hysteresis: HYSTERESIS,
        }
    }
}

// ───────────────────────────────────────── state ─────────────

/// The three flags the presentation layer renders from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeaderFlags {
    /// Pinned to the top of the viewport while the page is scrolled.
    pub stuck: bool,
    /// Taken out of the page flow because the user scrolled past it.
    pub hidden: bool,
    /// Transitions apply to further `hidden` / `stuck` changes.
    pub animate: bool,
}

impl HeaderFlags {
    /// Header is out of flow and slid away.  Derived, never stored.
    pub fn unstuck(&self) -> bool {
        self.hidden && !self.stuck
    }
}

/// Hysteresis edges.  At most one is armed at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Thresholds {
    /// Offsets strictly below this stick an unstuck header.
    pub stick_at: Option<i64>,
    /// Offsets strictly above this unstick a stuck header.
    pub unstick_at: Option<i64>,
}

/// What a single scroll sample did to the flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollOutcome {
    /// Any flag changed; the header needs a redraw.
    pub changed: bool,
    /// `hidden` just went false→true while `animate` is still off, so the
    /// animation-enable timer should be armed.
    pub arm_animation: bool,
    /// The sample landed on the very top and reset everything.
    pub reset: bool,
}

// ───────────────────────────────────────── machine ───────────

/// Owns the header flags and thresholds for one mounted header.
#[derive(Debug, Clone)]
pub struct HeaderStateMachine {
    geometry: HeaderGeometry,
    flags: HeaderFlags,
    thresholds: Thresholds,
    last_scroll_y: Option<i64>,
}

impl HeaderStateMachine {
    pub fn new(geometry: HeaderGeometry) -> Self {
        Self {
            geometry,
            flags: HeaderFlags::default(),
            thresholds: Thresholds::default(),
            last_scroll_y: None,
        }
    }

    /// Treat `scroll_y` as the previous sample, so the first notification
    /// after mounting mid-page already has a direction.
    pub fn starting_at(geometry: HeaderGeometry, scroll_y: u32) -> Self {
        Self {
            last_scroll_y: Some(i64::from(scroll_y)),
            ..Self::new(geometry)
        }
    }

    pub fn flags(&self) -> HeaderFlags {
        self.flags
    }

    pub fn thresholds(&self) -> Thresholds {
        self.thresholds
    }

    /// Feed one scroll notification.  O(1), never blocks.
    pub fn on_scroll(&mut self, scroll_y: u32) -> ScrollOutcome {
        let before = self.flags;
        let y = i64::from(scroll_y);
        let band = i64::from(self.geometry.hysteresis);
        let mut outcome = ScrollOutcome::default();

        if scroll_y == 0 {
            self.flags = HeaderFlags::default();
            // Both edges are dropped so nothing fires on the way back down
            // from the top; the next downward sample arms `stick_at` afresh.
            self.thresholds = Thresholds::default();
            self.last_scroll_y = Some(0);
            outcome.reset = true;
            outcome.changed = self.flags != before;
            if outcome.changed {
                tracing::debug!("header reset at top");
            }
            return outcome;
        }

        if scroll_y > self.geometry.height && !self.flags.hidden {
            self.flags.hidden = true;
            outcome.arm_animation = !self.flags.animate;
            tracing::debug!(scroll_y, "header hidden");
        }

        // Re-arming below reads the value from before any edge fires.
        let was_stuck = self.flags.stuck;

        if !was_stuck && self.thresholds.stick_at.is_some_and(|at| y < at) {
            self.thresholds.stick_at = None;
            self.thresholds.unstick_at = Some(y + band);
            self.flags.stuck = true;
            tracing::debug!(scroll_y, "header stuck");
        } else if was_stuck && self.thresholds.unstick_at.is_some_and(|at| y > at) {
            self.thresholds.unstick_at = None;
            self.thresholds.stick_at = Some(y - band);
            self.flags.stuck = false;
            tracing::debug!(scroll_y, "header unstuck");
        }

        if let Some(last) = self.last_scroll_y {
            if last > y && was_stuck {
                self.thresholds.unstick_at = Some(y + band);
            }
            if last < y && !was_stuck {
                self.thresholds.stick_at = Some(y - band);
            }
        }

        self.last_scroll_y = Some(y);
        outcome.changed = self.flags != before;
        outcome
    }

    /// Called by the deferred timer.  Returns `true` if the flag flipped.
    pub fn enable_animation(&mut self) -> bool {
        if self.flags.animate {
            return false;
        }
        self.flags.animate = true;
        tracing::debug!("header animation enabled");
        true
    }
}

impl Default for HeaderStateMachine {
    fn default() -> Self {
        Self::new(HeaderGeometry::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(machine: &mut HeaderStateMachine, offsets: &[u32]) {
        for &y in offsets {
            machine.on_scroll(y);
        }
    }

    #[test]
    fn top_resets_every_flag() {
        let mut m = HeaderStateMachine::default();
        feed(&mut m, &[0, 200, 150, 100]);
        m.enable_animation();
        assert!(m.flags().hidden && m.flags().stuck && m.flags().animate);

        let outcome = m.on_scroll(0);
        assert!(outcome.reset && outcome.changed);
        assert_eq!(m.flags(), HeaderFlags::default());
        assert_eq!(m.thresholds(), Thresholds::default());
    }

    #[test]
    fn hides_only_past_header_height() {
        let mut m = HeaderStateMachine::default();
        m.on_scroll(0);
        m.on_scroll(64);
        assert!(!m.flags().hidden);

        let mut m = HeaderStateMachine::default();
        m.on_scroll(0);
        let outcome = m.on_scroll(65);
        assert!(m.flags().hidden);
        assert!(outcome.changed && outcome.arm_animation);
    }

    #[test]
    fn hide_requests_timer_once() {
        let mut m = HeaderStateMachine::default();
        assert!(m.on_scroll(100).arm_animation);
        assert!(!m.on_scroll(200).arm_animation);
        assert!(!m.on_scroll(90).arm_animation);
    }

    #[test]
    fn stick_edge_is_strict() {
        let mut m = HeaderStateMachine::default();
        feed(&mut m, &[0, 100, 200]);
        assert_eq!(m.thresholds().stick_at, Some(170));

        m.on_scroll(170);
        assert!(!m.flags().stuck);

        m.on_scroll(169);
        assert!(m.flags().stuck);
        assert_eq!(m.thresholds().stick_at, None);
        assert_eq!(m.thresholds().unstick_at, Some(199));
    }

    #[test]
    fn unstick_edge_trails_upward_motion() {
        let mut m = HeaderStateMachine::default();
        feed(&mut m, &[0, 300, 250]);
        assert!(m.flags().stuck);
        assert_eq!(m.thresholds().unstick_at, Some(280));

        m.on_scroll(200);
        assert_eq!(m.thresholds().unstick_at, Some(230));

        m.on_scroll(230);
        assert!(m.flags().stuck);

        m.on_scroll(231);
        assert!(!m.flags().stuck);
        assert_eq!(m.thresholds().unstick_at, None);
        assert_eq!(m.thresholds().stick_at, Some(201));
    }

    #[test]
    fn jitter_inside_band_never_flips() {
        let mut m = HeaderStateMachine::default();
        feed(&mut m, &[0, 400]);
        let stick_at = m.thresholds().stick_at.unwrap_or_default();
        assert_eq!(stick_at, 370);

        // Wobble above the edge; every downward step drags it along.
        for &y in &[390, 380, 395, 372, 385, 370, 371] {
            m.on_scroll(y);
            assert!(!m.flags().stuck, "stuck at {y}");
        }
        assert_eq!(m.thresholds().stick_at, Some(341));

        m.on_scroll(340);
        assert!(m.flags().stuck);
        assert_eq!(m.thresholds().unstick_at, Some(370));

        // Wobble below the unstick edge; every upward step drags it along.
        for &y in &[360, 350, 379, 365, 395] {
            m.on_scroll(y);
            assert!(m.flags().stuck, "unstuck at {y}");
        }
        assert_eq!(m.thresholds().unstick_at, Some(395));

        m.on_scroll(396);
        assert!(!m.flags().stuck);
    }

    #[test]
    fn repeated_offset_is_idempotent() {
        let mut m = HeaderStateMachine::default();
        feed(&mut m, &[0, 120, 80]);
        let flags = m.flags();
        let thresholds = m.thresholds();
        for _ in 0..5 {
            assert!(!m.on_scroll(80).changed);
        }
        assert_eq!(m.flags(), flags);
        assert_eq!(m.thresholds(), thresholds);

        let mut fresh = HeaderStateMachine::default();
        fresh.on_scroll(0);
        assert!(!fresh.on_scroll(0).changed);
    }

    #[test]
    fn at_most_one_edge_armed() {
        let mut m = HeaderStateMachine::default();
        for &y in &[0, 50, 120, 300, 260, 240, 270, 330, 310, 5, 900, 10] {
            m.on_scroll(y);
            let t = m.thresholds();
            assert!(t.stick_at.is_none() || t.unstick_at.is_none(), "both armed at {y}");
        }
    }

    #[test]
    fn scenario_down_then_up() {
        let mut m = HeaderStateMachine::default();
        m.on_scroll(0);

        m.on_scroll(70);
        assert!(m.flags().hidden);
        assert_eq!(m.thresholds().stick_at, Some(40));

        m.on_scroll(40);
        assert!(!m.flags().stuck);

        m.on_scroll(5);
        assert!(m.flags().stuck);
        assert!(m.flags().hidden);
        assert_eq!(m.thresholds().unstick_at, Some(35));
    }

    #[test]
    fn large_jump_fires_before_rearming() {
        let mut m = HeaderStateMachine::default();
        feed(&mut m, &[0, 500, 400]);
        assert!(m.flags().stuck);
        assert_eq!(m.thresholds().unstick_at, Some(430));

        // One sample far past the edge: unstick fires, then the downward
        // re-arm is skipped because the header was stuck going in.
        m.on_scroll(5000);
        assert!(!m.flags().stuck);
        assert_eq!(m.thresholds().stick_at, Some(4970));
        assert_eq!(m.thresholds().unstick_at, None);

        // And straight back up.
        m.on_scroll(1);
        assert!(m.flags().stuck);
        assert_eq!(m.thresholds().unstick_at, Some(31));
    }

    #[test]
    fn unstuck_is_derived() {
        let mut m = HeaderStateMachine::default();
        feed(&mut m, &[0, 100]);
        assert!(m.flags().unstuck());
        m.on_scroll(60);
        assert!(m.flags().stuck);
        assert!(!m.flags().unstuck());
    }

    #[test]
    fn enable_animation_is_one_way() {
        let mut m = HeaderStateMachine::default();
        assert!(m.enable_animation());
        assert!(!m.enable_animation());
        m.on_scroll(300);
        m.on_scroll(100);
        assert!(m.flags().animate);
    }

    #[test]
    fn first_sample_has_no_direction_unless_seeded() {
        let mut m = HeaderStateMachine::default();
        m.on_scroll(300);
        assert_eq!(m.thresholds().stick_at, None);

        let mut m = HeaderStateMachine::starting_at(HeaderGeometry::default(), 200);
        m.on_scroll(300);
        assert_eq!(m.flags(), HeaderFlags { hidden: true, ..HeaderFlags::default() });
        assert_eq!(m.thresholds().stick_at, Some(270));
    }

    #[test]
    fn custom_geometry() {
        let mut m = HeaderStateMachine::new(HeaderGeometry {
            height: 10,
            hysteresis: 4,
        });
        feed(&mut m, &[0, 11, 20]);
        assert!(m.flags().hidden);
        assert_eq!(m.thresholds().stick_at, Some(16));
        m.on_scroll(15);
        assert!(m.flags().stuck);
        assert_eq!(m.thresholds().unstick_at, Some(19));
    }
}
