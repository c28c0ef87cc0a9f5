//! Easing curves and a reference [`TransitionApplier`].
//!
//! [`TweenApplier`] keeps one offset tween per item and decays it to zero.
//! Hosts that draw items themselves can add [`TweenApplier::offset`] to an
//! item's resting layout rect to get its rendered rect.
//!
//! ```
//! use std::time::Duration;
//! use sortflow::transition::{Easing, TweenApplier};
//! use sortflow::{ItemId, TransitionApplier};
//! use sortflow_core::math::Vec2;
//!
//! let mut tweens = TweenApplier::new();
//! let item = ItemId::from_raw(1);
//! tweens.apply_transition(item, Vec2::new(100.0, 0.0), Duration::from_millis(100), Easing::Linear);
//!
//! tweens.update(Duration::from_millis(50));
//! assert!((tweens.offset(item).x - 50.0).abs() < 0.01);
//!
//! tweens.update(Duration::from_millis(50));
//! assert!(!tweens.is_animating(item));
//! ```

use std::time::Duration;

use serde::Deserialize;
use sortflow_core::alloc::HashMap;
use sortflow_core::math::Vec2;

use crate::host::TransitionApplier;
use crate::id::ItemId;

/// Easing curves for item transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    /// Quadratic, slow start.
    EaseIn,
    /// Quadratic, slow end.
    #[default]
    EaseOut,
    /// Quadratic, slow start and end.
    EaseInOut,
    CubicIn,
    CubicOut,
    CubicInOut,
}

impl Easing {
    /// Map normalised time to progress. `t` is clamped to `[0, 1]`.
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => t * (2.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
            Easing::CubicIn => t * t * t,
            Easing::CubicOut => {
                let u = t - 1.0;
                u * u * u + 1.0
            }
            Easing::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = 2.0 * t - 2.0;
                    0.5 * u * u * u + 1.0
                }
            }
        }
    }
}

/// A translation decaying from `start` to zero.
#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    start: Vec2,
    duration: Duration,
    elapsed: Duration,
    easing: Easing,
}

impl Tween {
    pub fn new(start: Vec2, duration: Duration, easing: Easing) -> Self {
        Self {
            start,
            duration,
            elapsed: Duration::ZERO,
            easing,
        }
    }

    /// Fraction of the duration that has elapsed, in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    /// Current translation.
    pub fn offset(&self) -> Vec2 {
        self.start * (1.0 - self.easing.apply(self.progress()))
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Advance by `dt`. Returns true while still running.
    pub fn update(&mut self, dt: Duration) -> bool {
        self.elapsed = (self.elapsed + dt).min(self.duration);
        !self.is_finished()
    }
}

/// In-memory [`TransitionApplier`] driven by the host's frame clock.
#[derive(Debug, Default)]
pub struct TweenApplier {
    tweens: HashMap<ItemId, Tween>,
}

impl TweenApplier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance every tween, dropping the finished ones.
    pub fn update(&mut self, dt: Duration) {
        self.tweens.retain(|_, tween| tween.update(dt));
    }

    /// Current translation of `item`, zero when idle.
    pub fn offset(&self, item: ItemId) -> Vec2 {
        self.tweens.get(&item).map_or(Vec2::ZERO, Tween::offset)
    }

    pub fn is_animating(&self, item: ItemId) -> bool {
        self.tweens.contains_key(&item)
    }

    pub fn tween(&self, item: ItemId) -> Option<&Tween> {
        self.tweens.get(&item)
    }

    /// Number of items currently translating.
    pub fn active_count(&self) -> usize {
        self.tweens.len()
    }

    pub fn clear(&mut self) {
        self.tweens.clear();
    }
}

impl TransitionApplier for TweenApplier {
    fn apply_transition(&mut self, item: ItemId, delta: Vec2, duration: Duration, easing: Easing) {
        if duration.is_zero() || delta == Vec2::ZERO {
            self.tweens.remove(&item);
            return;
        }
        // A new transition replaces the old one; the caller already measured
        // the in-flight position into `delta`.
        self.tweens.insert(item, Tween::new(delta, duration, easing));
    }
}
