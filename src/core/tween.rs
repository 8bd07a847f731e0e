//! Data-driven transition descriptors and the generic tween that interpolates
//! between them.
//!
//! A [`Variants`] value names the visual parameters of each reveal state; the
//! renderer never sees animation objects, only sampled [`VisualState`]s.

use std::time::{Duration, Instant};

use super::reveal::RevealState;

/// Interpolation curve for a transition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Easing {
    #[default]
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
}

impl Easing {
    /// Apply easing to progress (0.0 to 1.0).
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
        }
    }

    /// Parse the config-file spelling (`ease_out`, `linear`, ...).
    pub fn from_config_key(s: &str) -> Option<Self> {
        match s {
            "linear" => Some(Easing::Linear),
            "ease_in" => Some(Easing::EaseIn),
            "ease_out" => Some(Easing::EaseOut),
            "ease_in_out" => Some(Easing::EaseInOut),
            _ => None,
        }
    }
}

/// Drawable parameters of one named state.  Offsets are in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualState {
    pub opacity: f32,
    pub offset_x: i16,
    pub offset_y: i16,
}

impl VisualState {
    /// Full opacity at the identity position.
    pub const IDENTITY: VisualState = VisualState {
        opacity: 1.0,
        offset_x: 0,
        offset_y: 0,
    };

    pub const fn transparent(offset_x: i16, offset_y: i16) -> Self {
        Self {
            opacity: 0.0,
            offset_x,
            offset_y,
        }
    }
}

/// State name → descriptor table for a revealable element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Variants {
    pub hidden: VisualState,
    pub visible: VisualState,
}

impl Variants {
    /// Cards and titles: fade in while rising two rows.
    pub const fn rise() -> Self {
        Self {
            hidden: VisualState::transparent(0, 2),
            visible: VisualState::IDENTITY,
        }
    }

    /// List rows: fade in while sliding one column from the left.
    pub const fn slide_in() -> Self {
        Self {
            hidden: VisualState::transparent(-1, 0),
            visible: VisualState::IDENTITY,
        }
    }

    pub fn for_state(&self, state: RevealState) -> VisualState {
        match state {
            RevealState::Hidden => self.hidden,
            RevealState::Visible => self.visible,
        }
    }
}

/// Stateless interpolator over [`VisualState`]s.
pub struct Tween;

impl Tween {
    /// Linear progress of a transition that started at `start`, clamped to
    /// `[0, 1]`.  A zero duration is complete immediately.
    pub fn progress(start: Instant, duration: Duration, now: Instant) -> f32 {
        if duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(start);
        (elapsed.as_secs_f32() / duration.as_secs_f32()).min(1.0)
    }

    /// Sample the eased state between `from` and `to` at linear `progress`.
    pub fn sample(from: VisualState, to: VisualState, progress: f32, easing: Easing) -> VisualState {
        let t = easing.apply(progress);
        VisualState {
            opacity: lerp_f32(from.opacity, to.opacity, t),
            offset_x: lerp_i16(from.offset_x, to.offset_x, t),
            offset_y: lerp_i16(from.offset_y, to.offset_y, t),
        }
    }
}

fn lerp_f32(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

fn lerp_i16(from: i16, to: i16, t: f32) -> i16 {
    let from = from as f32;
    let to = to as f32;
    (from + (to - from) * t).round() as i16
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 4] = [
        Easing::Linear,
        Easing::EaseIn,
        Easing::EaseOut,
        Easing::EaseInOut,
    ];

    #[test]
    fn easing_boundaries() {
        for easing in ALL {
            assert_eq!(easing.apply(0.0), 0.0, "{easing:?} at 0");
            assert_eq!(easing.apply(1.0), 1.0, "{easing:?} at 1");
        }
    }

    #[test]
    fn easing_monotonic() {
        for easing in ALL {
            let mut prev = 0.0;
            for i in 1..=20 {
                let val = easing.apply(i as f32 / 20.0);
                assert!(val >= prev, "{easing:?} not monotonic at step {i}");
                prev = val;
            }
        }
    }

    #[test]
    fn ease_out_starts_fast() {
        assert_eq!(Easing::EaseOut.apply(0.5), 0.75);
        assert!(Easing::EaseOut.apply(0.25) > 0.25);
    }

    #[test]
    fn progress_clamps_and_handles_zero_duration() {
        let start = Instant::now();
        let d = Duration::from_millis(200);
        assert_eq!(Tween::progress(start, d, start), 0.0);
        assert!((Tween::progress(start, d, start + Duration::from_millis(100)) - 0.5).abs() < 1e-6);
        assert_eq!(Tween::progress(start, d, start + Duration::from_secs(5)), 1.0);
        assert_eq!(Tween::progress(start, Duration::ZERO, start), 1.0);
    }

    #[test]
    fn sample_endpoints_match_descriptors() {
        let v = Variants::rise();
        assert_eq!(Tween::sample(v.hidden, v.visible, 0.0, Easing::EaseOut), v.hidden);
        assert_eq!(Tween::sample(v.hidden, v.visible, 1.0, Easing::EaseOut), v.visible);

        let mid = Tween::sample(v.hidden, v.visible, 0.5, Easing::Linear);
        assert!((mid.opacity - 0.5).abs() < 1e-6);
        assert_eq!(mid.offset_y, 1);
    }

    #[test]
    fn variants_lookup_by_state() {
        let v = Variants::slide_in();
        assert_eq!(v.for_state(RevealState::Hidden).offset_x, -1);
        assert_eq!(v.for_state(RevealState::Visible), VisualState::IDENTITY);
    }

    #[test]
    fn easing_config_keys() {
        assert_eq!(Easing::from_config_key("ease_out"), Some(Easing::EaseOut));
        assert_eq!(Easing::from_config_key("bounce"), None);
    }
}
