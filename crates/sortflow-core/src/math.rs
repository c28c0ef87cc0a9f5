//! Vector math re-exported from [`glam`].
//!
//! Pointer positions, drag offsets and transition deltas are all [`Vec2`]s.
//!
//! ```
//! use sortflow_core::math::Vec2;
//!
//! let grab = Vec2::new(12.0, 4.0);
//! let pointer = Vec2::new(112.0, 44.0);
//! assert_eq!(pointer - grab, Vec2::new(100.0, 40.0));
//! ```
//!
//! [`glam`]: https://docs.rs/glam

pub use glam::{Vec2, vec2};
