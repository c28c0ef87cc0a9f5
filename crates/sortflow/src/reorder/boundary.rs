//! Detection of pointers beyond either end of a container's item run.
//!
//! These let a user drop into empty trailing space (or ahead of the first
//! item) without hovering an item at all.

use sortflow_core::geometry::{Orientation, Rect};
use sortflow_core::math::Vec2;

/// Pointer is beyond the last item by more than `threshold`.
///
/// Vertical lists count the space below the last item's column and anything
/// to its right. Horizontal lists count the space right of the last item
/// (from its top down, covering wrapped rows) and anything below it.
pub fn pointer_past_last(pointer: Vec2, last: &Rect, axis: Orientation, threshold: f32) -> bool {
    let Vec2 { x, y } = pointer;
    match axis {
        Orientation::Vertical => {
            x > last.right() + threshold
                || (x >= last.left && x <= last.right() && y > last.bottom() + threshold)
        }
        Orientation::Horizontal => {
            (x > last.right() + threshold && y > last.top)
                || (x <= last.right() && y > last.bottom() + threshold)
        }
    }
}

/// Pointer is ahead of the first item by more than `threshold`.
pub fn pointer_before_first(pointer: Vec2, first: &Rect, axis: Orientation, threshold: f32) -> bool {
    let Vec2 { x, y } = pointer;
    match axis {
        Orientation::Vertical => {
            x < first.left - threshold || (y < first.top - threshold && x < first.right())
        }
        Orientation::Horizontal => {
            y < first.top - threshold || (y < first.bottom() && x < first.left - threshold)
        }
    }
}
