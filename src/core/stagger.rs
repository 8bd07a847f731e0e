//! Stagger timing — which item starts when.
//!
//! `delay(i) = base_delay + i * increment`.  Everything here is a pure
//! function of the configuration and the index, so any number of containers
//! may share a config.

use std::time::Duration;

use tracing::debug;

use super::error::RevealError;
use super::tween::Easing;

/// Timing profile for one container's children.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaggerConfig {
    /// Offset before the first item begins.
    pub base_delay: Duration,
    /// Extra delay per position.
    pub increment: Duration,
    /// Length of each item's transition.
    pub duration: Duration,
    pub easing: Easing,
}

/// Timing assigned to the item at `index`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduledReveal {
    pub index: usize,
    pub delay: Duration,
    pub duration: Duration,
    pub easing: Easing,
}

impl StaggerConfig {
    /// Top-level cards.
    pub const COARSE: StaggerConfig = StaggerConfig {
        base_delay: Duration::ZERO,
        increment: Duration::from_millis(100),
        duration: Duration::from_millis(500),
        easing: Easing::EaseOut,
    };

    /// Rows nested inside a card.
    pub const FINE: StaggerConfig = StaggerConfig {
        base_delay: Duration::from_millis(50),
        increment: Duration::from_millis(15),
        duration: Duration::from_millis(200),
        easing: Easing::EaseOut,
    };

    /// One transition with no stagger (titles, whole cards).
    pub const fn single(duration: Duration) -> Self {
        Self {
            base_delay: Duration::ZERO,
            increment: Duration::ZERO,
            duration,
            easing: Easing::EaseOut,
        }
    }

    pub fn with_increment(mut self, increment: Duration) -> Self {
        self.increment = increment;
        self
    }

    /// The slot of item `index` as a profile of its own, for children that
    /// each carry their own container but keep their place in the stagger.
    pub fn nth(&self, index: usize) -> Self {
        Self {
            base_delay: self.delay(index),
            increment: Duration::ZERO,
            ..*self
        }
    }

    /// Reduced motion: everything lands at once with no tween.
    pub fn reduced(self) -> Self {
        Self {
            base_delay: Duration::ZERO,
            increment: Duration::ZERO,
            duration: Duration::ZERO,
            easing: self.easing,
        }
    }

    pub fn delay(&self, index: usize) -> Duration {
        let steps = u32::try_from(index).unwrap_or(u32::MAX);
        self.base_delay
            .saturating_add(self.increment.saturating_mul(steps))
    }

    pub fn schedule(&self, count: usize) -> Vec<ScheduledReveal> {
        if count == 0 {
            debug!("{}", RevealError::EmptyListInput { context: "stagger schedule" });
            return Vec::new();
        }
        (0..count)
            .map(|index| ScheduledReveal {
                index,
                delay: self.delay(index),
                duration: self.duration,
                easing: self.easing,
            })
            .collect()
    }

    /// Time from the trigger until the last of `count` items has finished.
    pub fn total_span(&self, count: usize) -> Duration {
        match count {
            0 => Duration::ZERO,
            n => self.delay(n - 1).saturating_add(self.duration),
        }
    }
}
