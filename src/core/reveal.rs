//! Per-element reveal state machine and the containers that drive it.
//!
//! A [`RevealableItem`] starts `Hidden` and moves to `Visible` once, when its
//! scheduled time arrives.  Scheduling happens through a [`RevealGroup`]: the
//! group's observer fires, the stagger config assigns each child a delay from
//! the trigger instant, and subsequent ticks flip children as their time comes
//! up.  All timers are deadlines polled from the UI tick, so tearing an item
//! down simply forgets its deadline.

use std::time::{Duration, Instant};

use tracing::{debug, trace};

use super::stagger::StaggerConfig;
use super::tween::{Easing, Tween, Variants, VisualState};
use super::viewport::{
    IntersectionSupport, ObserveOptions, Region, Trigger, Viewport, ViewportObserver,
};

// ───────────────────────────────────────── state ─────────────

/// Presentation state of one rendered instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RevealState {
    #[default]
    Hidden,
    Visible,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Waiting.  `pending` is the scheduled reveal time, if any.
    Hidden { pending: Option<Instant> },
    /// Terminal.
    Visible { since: Instant },
}

/// Timing of the transition the renderer should play.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionTiming {
    pub duration: Duration,
    pub easing: Easing,
}

/// Everything the renderer needs to draw one instance this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Presentation {
    pub state: RevealState,
    pub visual: VisualState,
    pub timing: TransitionTiming,
}

impl Presentation {
    /// Nothing would be drawn.
    pub fn is_invisible(&self) -> bool {
        self.visual.opacity <= 0.0
    }
}

// ───────────────────────────────────────── item ──────────────

/// A single rendered unit that transitions `Hidden → Visible` exactly once.
#[derive(Debug, Clone)]
pub struct RevealableItem {
    phase: Phase,
    variants: Variants,
    timing: TransitionTiming,
    mounted: bool,
}

impl RevealableItem {
    pub fn new(variants: Variants, duration: Duration, easing: Easing) -> Self {
        Self {
            phase: Phase::Hidden { pending: None },
            variants,
            timing: TransitionTiming { duration, easing },
            mounted: true,
        }
    }

    pub fn state(&self) -> RevealState {
        match self.phase {
            Phase::Hidden { .. } => RevealState::Hidden,
            Phase::Visible { .. } => RevealState::Visible,
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Scheduled reveal time, while one is pending.
    pub fn pending(&self) -> Option<Instant> {
        match self.phase {
            Phase::Hidden { pending } if self.is_mounted() => pending,
            _ => None,
        }
    }

    /// Arrange for the item to become visible at `at`.  Ignored when the item
    /// is already scheduled, already visible, or unmounted.
    pub fn schedule(&mut self, at: Instant) {
        if !self.is_mounted() {
            return;
        }
        if let Phase::Hidden { pending } = &mut self.phase {
            pending.get_or_insert(at);
        }
    }

    /// Advance the timer.  Returns `true` on the tick the item becomes visible.
    pub fn tick(&mut self, now: Instant) -> bool {
        if !self.is_mounted() {
            return false;
        }
        match self.phase {
            Phase::Hidden { pending: Some(at) } if now >= at => {
                self.phase = Phase::Visible { since: at };
                true
            }
            _ => false,
        }
    }

    /// Remove the item from the render tree, cancelling any pending reveal.
    pub fn unmount(&mut self) {
        if let Phase::Hidden { pending } = &mut self.phase {
            *pending = None;
        }
        self.mounted = false;
    }

    /// Sample the current visual parameters.
    pub fn presentation(&self, now: Instant) -> Presentation {
        let visual = match self.phase {
            Phase::Hidden { .. } => self.variants.for_state(RevealState::Hidden),
            Phase::Visible { since } => {
                let progress = Tween::progress(since, self.timing.duration, now);
                Tween::sample(
                    self.variants.for_state(RevealState::Hidden),
                    self.variants.for_state(RevealState::Visible),
                    progress,
                    self.timing.easing,
                )
            }
        };
        Presentation {
            state: self.state(),
            visual,
            timing: self.timing,
        }
    }

    /// Visible and done tweening.
    pub fn is_settled(&self, now: Instant) -> bool {
        match self.phase {
            Phase::Visible { since } => now.saturating_duration_since(since) >= self.timing.duration,
            Phase::Hidden { .. } => false,
        }
    }
}

// ───────────────────────────────────────── group ─────────────

/// A container: one observer, one stagger profile, an ordered list of children.
#[derive(Debug)]
pub struct RevealGroup {
    label: String,
    observer: ViewportObserver,
    stagger: StaggerConfig,
    items: Vec<RevealableItem>,
    torn_down: bool,
}

impl RevealGroup {
    pub fn new(
        label: impl Into<String>,
        region: Region,
        options: ObserveOptions,
        support: IntersectionSupport,
        stagger: StaggerConfig,
        variants: Variants,
        count: usize,
    ) -> Self {
        let items = (0..count)
            .map(|_| RevealableItem::new(variants, stagger.duration, stagger.easing))
            .collect();
        Self {
            label: label.into(),
            observer: ViewportObserver::observe(region, options, support),
            stagger,
            items,
            torn_down: false,
        }
    }

    pub fn set_region(&mut self, region: Region) {
        self.observer.set_region(region);
    }

    /// Poll the observer, schedule children on its trigger, then tick every
    /// child.  Returns the number of children that became visible.
    pub fn update(&mut self, viewport: Viewport, now: Instant) -> usize {
        if self.torn_down {
            return 0;
        }
        if let Some(trigger) = self.observer.poll(viewport, now) {
            self.arm(trigger);
        }
        let mut revealed = 0;
        for item in &mut self.items {
            if item.tick(now) {
                revealed += 1;
            }
        }
        revealed
    }

    fn arm(&mut self, trigger: Trigger) {
        debug!(
            group = %self.label,
            items = self.items.len(),
            span = ?self.stagger.total_span(self.items.len()),
            "reveal triggered"
        );
        for reveal in self.stagger.schedule(self.items.len()) {
            let at = trigger.at + reveal.delay;
            trace!(group = %self.label, index = reveal.index, delay = ?reveal.delay, "scheduled");
            self.items[reveal.index].schedule(at);
        }
    }

    pub fn presentation(&self, index: usize, now: Instant) -> Option<Presentation> {
        self.items.get(index).map(|item| item.presentation(now))
    }

    pub fn revealed_count(&self) -> usize {
        self.items
            .iter()
            .filter(|item| item.state() == RevealState::Visible)
            .count()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// The observer is still subscribed and has not fired yet.
    pub fn is_watching(&self) -> bool {
        !self.observer.is_released()
    }

    /// Every child is visible and finished tweening.
    pub fn is_settled(&self, now: Instant) -> bool {
        self.items.iter().all(|item| item.is_settled(now))
    }

    /// Something is scheduled or mid-tween and the UI should keep ticking.
    pub fn is_animating(&self, now: Instant) -> bool {
        self.items.iter().any(|item| {
            item.pending().is_some() || (item.state() == RevealState::Visible && !item.is_settled(now))
        })
    }

    /// Release the observer and unmount every child.  Idempotent.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        let fired_at = self.observer.fired_at();
        self.observer.release();
        for item in &mut self.items {
            item.unmount();
        }
        trace!(group = %self.label, ?fired_at, "torn down");
    }
}

impl Drop for RevealGroup {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn group(stagger: StaggerConfig, count: usize) -> RevealGroup {
        RevealGroup::new(
            "test",
            Region::new(40, 10),
            ObserveOptions::default(),
            IntersectionSupport::Supported,
            stagger,
            Variants::rise(),
            count,
        )
    }

    #[test]
    fn item_reveals_at_scheduled_time() {
        let t0 = Instant::now();
        let mut item = RevealableItem::new(Variants::rise(), ms(500), Easing::EaseOut);
        assert_eq!(item.state(), RevealState::Hidden);
        assert!(!item.tick(t0 + ms(1000)), "unscheduled items stay hidden");

        item.schedule(t0 + ms(100));
        assert!(!item.tick(t0 + ms(99)));
        assert!(item.tick(t0 + ms(100)));
        assert_eq!(item.state(), RevealState::Visible);
        assert!(!item.tick(t0 + ms(200)), "transition happens once");
    }

    #[test]
    fn first_schedule_wins() {
        let t0 = Instant::now();
        let mut item = RevealableItem::new(Variants::rise(), ms(0), Easing::Linear);
        item.schedule(t0 + ms(50));
        item.schedule(t0 + ms(10));
        assert_eq!(item.pending(), Some(t0 + ms(50)));
    }

    #[test]
    fn state_sequence_never_reverts() {
        let t0 = Instant::now();
        let mut item = RevealableItem::new(Variants::slide_in(), ms(200), Easing::EaseOut);
        let mut seen = vec![item.state()];
        for step in 0..50u64 {
            let now = t0 + ms(step * 7);
            if step == 5 {
                item.schedule(now + ms(30));
            }
            if step == 20 {
                item.schedule(now);
            }
            item.tick(now);
            if seen.last() != Some(&item.state()) {
                seen.push(item.state());
            }
        }
        assert_eq!(seen, vec![RevealState::Hidden, RevealState::Visible]);
    }

    #[test]
    fn unmount_cancels_pending_reveal() {
        let t0 = Instant::now();
        let mut item = RevealableItem::new(Variants::rise(), ms(500), Easing::EaseOut);
        item.schedule(t0 + ms(100));
        item.unmount();
        assert_eq!(item.pending(), None);
        assert!(!item.tick(t0 + ms(1000)));
        item.schedule(t0 + ms(1100));
        assert!(!item.tick(t0 + ms(2000)));
        assert_eq!(item.state(), RevealState::Hidden);
        assert!(!item.is_mounted());
    }

    #[test]
    fn presentation_tweens_after_reveal() {
        let t0 = Instant::now();
        let mut item = RevealableItem::new(Variants::rise(), ms(500), Easing::Linear);
        let hidden = item.presentation(t0);
        assert!(hidden.is_invisible());
        assert_eq!(hidden.visual.offset_y, 2);

        item.schedule(t0);
        item.tick(t0);
        let mid = item.presentation(t0 + ms(250));
        assert_eq!(mid.state, RevealState::Visible);
        assert!((mid.visual.opacity - 0.5).abs() < 1e-3);
        assert!(!item.is_settled(t0 + ms(250)));

        let done = item.presentation(t0 + ms(500));
        assert_eq!(done.visual, VisualState::IDENTITY);
        assert!(item.is_settled(t0 + ms(500)));
        assert_eq!(done.timing.duration, ms(500));
    }

    #[test]
    fn group_waits_for_viewport() {
        let t0 = Instant::now();
        let mut g = group(StaggerConfig::FINE, 3);
        assert_eq!(g.update(Viewport::new(0, 20), t0), 0);
        assert!(g.items.iter().all(|i| i.pending().is_none()));
        assert!(g.is_watching());
    }

    #[test]
    fn group_reveals_in_list_order() {
        let t0 = Instant::now();
        let mut g = group(StaggerConfig::COARSE, 4);
        g.update(Viewport::new(35, 20), t0);

        let mut order = Vec::new();
        for step in 0..=40u64 {
            let now = t0 + ms(step * 10);
            g.update(Viewport::new(35, 20), now);
            for i in 0..g.len() {
                if g.items.get(i).map(|it| it.state()) == Some(RevealState::Visible) && !order.contains(&i) {
                    order.push(i);
                }
            }
        }
        assert_eq!(order, vec![0, 1, 2, 3]);

        let first = g.items.first().and_then(|i| i.pending());
        assert!(first.is_none(), "pending clears once visible");
    }

    #[test]
    fn coarse_group_end_to_end_timing() {
        let t0 = Instant::now();
        let mut g = group(StaggerConfig::COARSE, 4);
        g.update(Viewport::new(35, 20), t0);
        assert_eq!(g.revealed_count(), 1, "item 0 has zero delay");
        assert_eq!(g.update(Viewport::new(35, 20), t0 + ms(299)), 2);
        assert_eq!(g.items.get(3).map(|i| i.state()), Some(RevealState::Hidden));
        assert_eq!(g.update(Viewport::new(35, 20), t0 + ms(300)), 1);
        assert_eq!(g.revealed_count(), 4);
        assert!(g.is_animating(t0 + ms(300)));
        assert!(g.is_settled(t0 + ms(800)));
    }

    #[test]
    fn scrolling_away_does_not_hide() {
        let t0 = Instant::now();
        let mut g = group(StaggerConfig::FINE, 2);
        g.update(Viewport::new(35, 20), t0);
        g.update(Viewport::new(500, 20), t0 + ms(100));
        assert_eq!(g.revealed_count(), 2);
        g.update(Viewport::new(35, 20), t0 + ms(200));
        assert_eq!(g.revealed_count(), 2);
    }

    #[test]
    fn update_counts_every_item_revealed_on_one_frame() {
        let t0 = Instant::now();
        let mut g = group(StaggerConfig::FINE, 4);
        assert_eq!(g.update(Viewport::new(35, 20), t0), 0, "fine profile starts after 50ms");
        assert_eq!(g.update(Viewport::new(35, 20), t0 + ms(80)), 3);
        assert_eq!(g.update(Viewport::new(35, 20), t0 + ms(80)), 0);
        assert_eq!(g.update(Viewport::new(35, 20), t0 + ms(95)), 1);
        assert_eq!(g.revealed_count(), 4);
    }

    #[test]
    fn teardown_mid_stagger_is_silent() {
        let t0 = Instant::now();
        let mut g = group(StaggerConfig::COARSE, 4);
        g.update(Viewport::new(35, 20), t0 + ms(0));
        g.update(Viewport::new(35, 20), t0 + ms(150));
        assert_eq!(g.revealed_count(), 2);

        g.teardown();
        g.teardown();
        assert!(!g.is_watching());
        assert_eq!(g.update(Viewport::new(35, 20), t0 + ms(1000)), 0);
        assert_eq!(g.revealed_count(), 2);
        assert!(g.items.iter().all(|i| !i.is_mounted() && i.pending().is_none()));
    }

    #[test]
    fn empty_group_is_settled() {
        let t0 = Instant::now();
        let mut g = group(StaggerConfig::FINE, 0);
        assert_eq!(g.update(Viewport::new(35, 20), t0), 0);
        assert_eq!(g.len(), 0);
        assert!(g.is_settled(t0));
        assert!(g.observer.fired_at().is_some());
    }
}
