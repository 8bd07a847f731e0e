//! One-shot viewport intersection detection.
//!
//! A [`ViewportObserver`] watches a single page region.  The first time the
//! region overlaps the (margin-adjusted) viewport by at least the requested
//! amount, [`ViewportObserver::poll`] yields a [`Trigger`] and the observer
//! unsubscribes.  Later exits and re-entries are ignored.
//!
//! Coordinates are page rows: row 0 is the top of the page, the viewport is
//! the window of rows currently on screen.

use std::time::Instant;

use tracing::{debug, trace};

use super::error::RevealError;

// ───────────────────────────────────────── geometry ──────────

/// A vertical span of page rows occupied by an observed element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Region {
    pub top: i32,
    pub height: u16,
}

impl Region {
    pub fn new(top: i32, height: u16) -> Self {
        Self { top, height }
    }

    pub fn bottom(&self) -> i32 {
        self.top + self.height as i32
    }
}

/// The window of page rows currently on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub top: i32,
    pub height: u16,
}

impl Viewport {
    pub fn new(top: i32, height: u16) -> Self {
        Self { top, height }
    }

    /// Grow (positive) or shrink (negative) the viewport on both edges.
    /// Returns `(top, bottom)` as half-open row bounds.
    fn bounds_with(&self, margin: Margin) -> (i32, i32) {
        let inset = match margin {
            Margin::Rows(rows) => rows,
            Margin::Percent(pct) => (self.height as f32 * pct / 100.0).round() as i32,
        };
        let top = self.top - inset;
        let bottom = self.top + self.height as i32 + inset;
        (top, bottom.max(top))
    }
}

/// Adjustment applied to the viewport before testing intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Margin {
    Rows(i32),
    /// Percentage of the viewport height; `-10.0` shrinks each edge by 10%.
    Percent(f32),
}

impl Default for Margin {
    fn default() -> Self {
        Margin::Rows(0)
    }
}

/// How much of the region must be inside the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Amount {
    /// Any overlap at all.
    #[default]
    Some,
    /// A fraction (0.0 to 1.0) of the region's height.
    Fraction(f32),
}

impl Amount {
    fn required_rows(&self, height: u16) -> u16 {
        match *self {
            Amount::Some => 1,
            Amount::Fraction(f) => {
                let rows = (height as f32 * f.clamp(0.0, 1.0)).ceil() as u16;
                rows.max(1)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ObserveOptions {
    pub margin: Margin,
    pub amount: Amount,
}

impl ObserveOptions {
    pub fn margin(mut self, margin: Margin) -> Self {
        self.margin = margin;
        self
    }

    pub fn amount(mut self, amount: Amount) -> Self {
        self.amount = amount;
        self
    }
}

/// Whether the host can report intersections at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntersectionSupport {
    #[default]
    Supported,
    Unsupported,
}

/// Does `region` overlap the margin-adjusted viewport by at least `amount`?
pub fn intersects(region: Region, viewport: Viewport, options: ObserveOptions) -> bool {
    let (top, bottom) = viewport.bounds_with(options.margin);
    if region.height == 0 {
        return region.top >= top && region.top < bottom;
    }
    let overlap = region.bottom().min(bottom) - region.top.max(top);
    if overlap <= 0 {
        return false;
    }
    overlap as u32 >= options.amount.required_rows(region.height) as u32
}

// ───────────────────────────────────────── observer ──────────

/// The signal emitted exactly once per observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trigger {
    pub at: Instant,
}

/// Fire-once state.  There is no transition back to `Armed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Latch {
    Armed,
    Fired(Instant),
}

/// Watches one region and latches on the first qualifying intersection.
#[derive(Debug)]
pub struct ViewportObserver {
    region: Region,
    options: ObserveOptions,
    support: IntersectionSupport,
    latch: Latch,
    /// `true` while the observer holds its subscription.
    subscribed: bool,
}

impl ViewportObserver {
    pub fn observe(region: Region, options: ObserveOptions, support: IntersectionSupport) -> Self {
        if support == IntersectionSupport::Unsupported {
            debug!("{}; firing on first poll", RevealError::ObserverUnsupported);
        }
        Self {
            region,
            options,
            support,
            latch: Latch::Armed,
            subscribed: true,
        }
    }

    /// Move the watched region (e.g. after a re-layout).  Has no effect on an
    /// observer that already fired.
    pub fn set_region(&mut self, region: Region) {
        self.region = region;
    }

    /// When the observer fired, if it has.
    pub fn fired_at(&self) -> Option<Instant> {
        match self.latch {
            Latch::Armed => None,
            Latch::Fired(at) => Some(at),
        }
    }

    pub fn is_released(&self) -> bool {
        !self.subscribed
    }

    /// Check the region against the viewport.  Returns the trigger exactly
    /// once; every later call returns `None`.
    pub fn poll(&mut self, viewport: Viewport, now: Instant) -> Option<Trigger> {
        if !self.subscribed {
            return None;
        }
        let hit = match self.support {
            IntersectionSupport::Unsupported => true,
            IntersectionSupport::Supported => intersects(self.region, viewport, self.options),
        };
        if !hit {
            return None;
        }
        trace!(region = ?self.region, ?viewport, "viewport trigger");
        self.latch = Latch::Fired(now);
        self.subscribed = false;
        Some(Trigger { at: now })
    }

    /// Drop the subscription.  Safe to call any number of times.
    pub fn release(&mut self) -> bool {
        std::mem::replace(&mut self.subscribed, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn watch(region: Region, options: ObserveOptions) -> ViewportObserver {
        ViewportObserver::observe(region, options, IntersectionSupport::Supported)
    }

    #[test]
    fn intersection_respects_amount() {
        let region = Region::new(20, 10);
        let any = ObserveOptions::default();
        assert!(!intersects(region, Viewport::new(0, 20), any));
        assert!(intersects(region, Viewport::new(0, 21), any));

        let fifth = any.amount(Amount::Fraction(0.2));
        assert!(!intersects(region, Viewport::new(0, 21), fifth));
        assert!(intersects(region, Viewport::new(0, 22), fifth));

        let all = any.amount(Amount::Fraction(1.0));
        assert!(!intersects(region, Viewport::new(0, 29), all));
        assert!(intersects(region, Viewport::new(0, 30), all));
    }

    #[test]
    fn negative_margin_shrinks_viewport() {
        let region = Region::new(18, 4);
        let inset = ObserveOptions::default().margin(Margin::Percent(-10.0));
        // 20-row viewport loses 2 rows at each edge: visible rows are 2..18.
        assert!(!intersects(region, Viewport::new(0, 20), inset));
        assert!(intersects(region, Viewport::new(1, 20), inset));
        assert!(intersects(region, Viewport::new(0, 20), ObserveOptions::default()));
    }

    #[test]
    fn zero_height_region_is_a_point() {
        let region = Region::new(5, 0);
        assert!(intersects(region, Viewport::new(0, 10), ObserveOptions::default()));
        assert!(!intersects(region, Viewport::new(6, 10), ObserveOptions::default()));
    }

    #[test]
    fn fires_once_on_first_enter() {
        let t0 = Instant::now();
        let mut obs = watch(Region::new(50, 5), ObserveOptions::default());
        // Scroll toward, into, out of and back into the region.
        let tops = [0, 20, 40, 48, 0, 48, 100, 48];
        let mut fired = Vec::new();
        for (step, top) in tops.into_iter().enumerate() {
            let now = t0 + Duration::from_millis(step as u64 * 10);
            if let Some(trigger) = obs.poll(Viewport::new(top, 10), now) {
                fired.push((step, trigger.at));
            }
        }
        assert_eq!(fired, vec![(3, t0 + Duration::from_millis(30))]);
        assert_eq!(obs.fired_at(), Some(t0 + Duration::from_millis(30)));
        assert!(obs.is_released());
    }

    #[test]
    fn unsupported_host_fires_immediately() {
        let t0 = Instant::now();
        let mut obs = ViewportObserver::observe(
            Region::new(10_000, 5),
            ObserveOptions::default(),
            IntersectionSupport::Unsupported,
        );
        assert_eq!(obs.poll(Viewport::new(0, 10), t0), Some(Trigger { at: t0 }));
        assert_eq!(obs.poll(Viewport::new(0, 10), t0), None);
    }

    #[test]
    fn released_observer_never_fires() {
        let mut obs = watch(Region::new(0, 5), ObserveOptions::default());
        assert!(obs.release());
        assert!(!obs.release());
        assert_eq!(obs.poll(Viewport::new(0, 10), Instant::now()), None);
        assert_eq!(obs.latch, Latch::Armed);
    }

    #[test]
    fn set_region_follows_relayout() {
        let mut obs = watch(Region::new(100, 5), ObserveOptions::default());
        assert_eq!(obs.poll(Viewport::new(0, 10), Instant::now()), None);
        obs.set_region(Region::new(3, 5));
        assert!(obs.poll(Viewport::new(0, 10), Instant::now()).is_some());
    }
}
