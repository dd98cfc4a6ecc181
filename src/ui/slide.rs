//! Vertical slide of the pinned header with exponential ease-out.
//!
//! `shift` is the fraction of the header's height translated upward:
//! `0.0` fully on screen, `1.0` fully slid away.  With transitions enabled
//! each tick moves the shift a fixed fraction of the remaining distance;
//! without them the header snaps.

/// Header slide animator.
#[derive(Debug, Clone)]
pub struct HeaderSlide {
    shift: f64,
    target: f64,
    /// `shift += (target - shift) * speed` each tick.  0.5 settles in six
    /// ticks, about 150 ms at the 25 ms frame tick.
    speed: f64,
}

impl HeaderSlide {
    pub fn new(speed: f64) -> Self {
        Self {
            shift: 0.0,
            target: 0.0,
            speed: speed.clamp(0.05, 0.95),
        }
    }

    /// Point the slide at "away" or "shown".  Snaps unless `animate`.
    pub fn set_target(&mut self, away: bool, animate: bool) {
        self.target = if away { 1.0 } else { 0.0 };
        if !animate {
            self.shift = self.target;
        }
    }

    /// Advance one frame.
    pub fn tick(&mut self) {
        self.shift += (self.target - self.shift) * self.speed;
        if (self.target - self.shift).abs() < 0.02 {
            self.shift = self.target;
        }
    }

    /// Rows the header is pushed above the viewport top.
    pub fn row_shift(&self, height_rows: u16) -> u16 {
        (self.shift * f64::from(height_rows)).round() as u16
    }

    pub fn is_animating(&self) -> bool {
        self.shift != self.target
    }
}

impl Default for HeaderSlide {
    fn default() -> Self {
        Self::new(0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snaps_without_animation() {
        let mut slide = HeaderSlide::default();
        slide.set_target(true, false);
        assert_eq!(slide.row_shift(4), 4);
        assert!(!slide.is_animating());
    }

    #[test]
    fn eases_toward_target() {
        let mut slide = HeaderSlide::default();
        slide.set_target(true, false);
        slide.set_target(false, true);
        assert!(slide.is_animating());

        let mut previous = slide.row_shift(100);
        let mut ticks = 0;
        while slide.is_animating() {
            slide.tick();
            let now = slide.row_shift(100);
            assert!(now <= previous);
            previous = now;
            ticks += 1;
            assert!(ticks < 50, "slide never settled");
        }
        assert_eq!(slide.row_shift(100), 0);
    }
}
