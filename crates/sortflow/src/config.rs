//! Per-container configuration.
//!
//! Options are plain data so they can live in a TOML file next to the rest of
//! a host's settings:
//!
//! ```toml
//! direction = "horizontal"
//! swap_threshold = 0.65
//! invert_swap = true
//! inverted_swap_threshold = 0.2
//! animation_ms = 180
//! easing = "ease_in_out"
//! ```
//!
//! Thresholds are validated once, when a container is registered, so the
//! decision engine can treat them as trusted.

use std::fmt;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use sortflow_core::geometry::{Orientation, Rect};

use crate::error::ConfigError;
use crate::id::ContainerId;
use crate::transition::Easing;

/// Resolves a container's principal axis at decision time.
pub trait OrientationResolver: Send + Sync {
    /// `item_rects` are the container's visible items in order.
    fn resolve(&self, container: ContainerId, item_rects: &[Rect]) -> Orientation;
}

impl<F> OrientationResolver for F
where
    F: Fn(ContainerId, &[Rect]) -> Orientation + Send + Sync,
{
    fn resolve(&self, container: ContainerId, item_rects: &[Rect]) -> Orientation {
        self(container, item_rects)
    }
}

/// How a container's principal axis is chosen.
#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Vertical,
    Horizontal,
    /// Inferred from the first two items: side by side means horizontal.
    #[default]
    Auto,
    /// Host-provided resolver.
    #[serde(skip)]
    Custom(Arc<dyn OrientationResolver>),
}

impl Direction {
    /// Wrap a resolver function.
    pub fn custom(resolver: impl OrientationResolver + 'static) -> Self {
        Direction::Custom(Arc::new(resolver))
    }

    pub fn resolve(&self, container: ContainerId, item_rects: &[Rect]) -> Orientation {
        match self {
            Direction::Vertical => Orientation::Vertical,
            Direction::Horizontal => Orientation::Horizontal,
            Direction::Auto => detect_orientation(item_rects),
            Direction::Custom(resolver) => resolver.resolve(container, item_rects),
        }
    }
}

impl fmt::Debug for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Vertical => f.write_str("Vertical"),
            Direction::Horizontal => f.write_str("Horizontal"),
            Direction::Auto => f.write_str("Auto"),
            Direction::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl From<Orientation> for Direction {
    fn from(orientation: Orientation) -> Self {
        match orientation {
            Orientation::Vertical => Direction::Vertical,
            Orientation::Horizontal => Direction::Horizontal,
        }
    }
}

/// Guess the layout axis from item geometry.
///
/// Two items sharing a row with the second starting at or after the first's
/// right edge are laid out horizontally; everything else is a column.
pub fn detect_orientation(item_rects: &[Rect]) -> Orientation {
    match item_rects {
        [first, second, ..] => {
            let same_row = second.top < first.bottom() && first.top < second.bottom();
            if same_row && second.left >= first.right() {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            }
        }
        _ => Orientation::Vertical,
    }
}

/// Options for one sortable container.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SortableOptions {
    /// Principal axis of the container.
    pub direction: Direction,
    /// Fraction of a target's span, centred on its midpoint, that triggers a swap.
    pub swap_threshold: f32,
    /// Always use edge-triggered (inverted) swapping.
    pub invert_swap: bool,
    /// Edge zone fraction used in inverted mode. Falls back to `swap_threshold`.
    pub inverted_swap_threshold: Option<f32>,
    /// Distance in pixels past the first/last item before the pointer counts as
    /// "before everything" / "after everything". Also the reach used to find
    /// nearby empty containers.
    pub empty_insert_threshold: f32,
    /// Base transition duration in milliseconds. Zero disables animation.
    pub animation_ms: f32,
    /// Easing handed to the transition applier.
    pub easing: Easing,
    /// Allow reordering within this container.
    pub sort: bool,
    /// Ignore drags entirely.
    pub disabled: bool,
}

impl Default for SortableOptions {
    fn default() -> Self {
        Self {
            direction: Direction::Auto,
            swap_threshold: 1.0,
            invert_swap: false,
            inverted_swap_threshold: None,
            empty_insert_threshold: 5.0,
            animation_ms: 150.0,
            easing: Easing::EaseOut,
            sort: true,
            disabled: false,
        }
    }
}

impl SortableOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse options from a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let options: SortableOptions = toml::from_str(source)?;
        options.validate()?;
        Ok(options)
    }

    /// Read and parse a TOML options file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    pub fn direction(mut self, direction: impl Into<Direction>) -> Self {
        self.direction = direction.into();
        self
    }

    pub fn swap_threshold(mut self, threshold: f32) -> Self {
        self.swap_threshold = threshold;
        self
    }

    pub fn invert_swap(mut self, invert: bool) -> Self {
        self.invert_swap = invert;
        self
    }

    pub fn inverted_swap_threshold(mut self, threshold: f32) -> Self {
        self.inverted_swap_threshold = Some(threshold);
        self
    }

    pub fn empty_insert_threshold(mut self, threshold: f32) -> Self {
        self.empty_insert_threshold = threshold;
        self
    }

    pub fn animation_ms(mut self, ms: f32) -> Self {
        self.animation_ms = ms;
        self
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn sort(mut self, sort: bool) -> Self {
        self.sort = sort;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Edge zone fraction for inverted swaps.
    pub fn effective_inverted_swap_threshold(&self) -> f32 {
        self.inverted_swap_threshold.unwrap_or(self.swap_threshold)
    }

    /// Base transition duration, rounded to the microsecond.
    pub fn animation_duration(&self) -> Duration {
        Duration::from_micros((self.animation_ms.max(0.0) * 1000.0).round() as u64)
    }

    /// Check every threshold and duration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_fraction("swap_threshold", self.swap_threshold)?;
        if let Some(inverted) = self.inverted_swap_threshold {
            check_fraction("inverted_swap_threshold", inverted)?;
        }
        if !self.empty_insert_threshold.is_finite() || self.empty_insert_threshold < 0.0 {
            return Err(ConfigError::InvalidThreshold {
                name: "empty_insert_threshold",
                value: self.empty_insert_threshold,
                expected: "a finite value >= 0",
            });
        }
        if !self.animation_ms.is_finite() || self.animation_ms < 0.0 {
            return Err(ConfigError::InvalidDuration(self.animation_ms));
        }
        Ok(())
    }
}

fn check_fraction(name: &'static str, value: f32) -> Result<(), ConfigError> {
    // NaN fails both comparisons, so it lands here too.
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidThreshold {
            name,
            value,
            expected: "a value in (0, 1]",
        })
    }
}
