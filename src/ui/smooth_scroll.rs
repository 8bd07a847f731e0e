//! Page scroll with exponential ease-out.
//!
//! Input moves the target row immediately; the drawn position closes a fixed
//! fraction of the remaining distance every frame, so long jumps decelerate
//! visibly instead of snapping.

const DEFAULT_SPEED: f64 = 0.35;

/// Eased scroll position over a page of `max` rows.
#[derive(Debug, Clone)]
pub struct SmoothScroll {
    /// Fractional position currently drawn.
    position: f64,
    /// Where the user asked to be.
    target: i32,
    /// Largest valid target (page height minus viewport height).
    max: i32,
    /// Fraction of the remaining distance covered per frame.
    speed: f64,
}

impl SmoothScroll {
    /// A non-finite `speed` falls back to the default.
    pub fn new(speed: f64) -> Self {
        let speed = if speed.is_finite() { speed } else { DEFAULT_SPEED };
        Self {
            position: 0.0,
            target: 0,
            max: 0,
            speed: speed.clamp(0.05, 1.0),
        }
    }

    /// Update the scrollable range (after a resize or relayout).
    pub fn set_limit(&mut self, page_height: i32, viewport_height: u16) {
        self.max = (page_height - viewport_height as i32).max(0);
        self.target = self.target.clamp(0, self.max);
    }

    pub fn scroll_by(&mut self, rows: i32) {
        self.scroll_to(self.target.saturating_add(rows));
    }

    pub fn scroll_to(&mut self, row: i32) {
        self.target = row.clamp(0, self.max);
    }

    pub fn scroll_to_end(&mut self) {
        self.target = self.max;
    }

    /// Move toward the target.  Call once per frame.
    pub fn tick(&mut self) {
        let remaining = self.target as f64 - self.position;
        self.position += remaining * self.speed;
        if (self.target as f64 - self.position).abs() < 0.4 {
            self.position = self.target as f64;
        }
    }

    /// Row currently drawn at the top of the viewport.
    pub fn row(&self) -> i32 {
        self.position.round() as i32
    }

    pub fn target(&self) -> i32 {
        self.target
    }

    /// True until the drawn position has reached the target.
    pub fn is_animating(&self) -> bool {
        self.position != self.target as f64
    }
}
