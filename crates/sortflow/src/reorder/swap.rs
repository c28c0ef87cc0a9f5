//! Swap zone geometry.
//!
//! A target item is split along the principal axis into zones. In regular
//! mode a centred band of `swap_threshold × span` commits a swap. In inverted
//! mode only bands of `inverted_swap_threshold × span / 2` at each edge do,
//! and the side follows whichever half the pointer is in.

use sortflow_core::geometry::{Orientation, Rect};

use super::types::Side;

/// Thresholds for one evaluation, already adjusted for line and container changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwapZones {
    pub swap_threshold: f32,
    pub inverted_swap_threshold: f32,
    /// Use edge zones from the start.
    pub invert: bool,
}

/// Hysteresis inputs, present only when the target was the last swap target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shadow {
    pub last_direction: Option<Side>,
    pub target_move_distance: f32,
}

/// Side that makes the dragged item appear to take the target's slot.
pub fn insert_side(dragged_index: Option<usize>, target_index: usize) -> Side {
    match dragged_index {
        Some(dragged) if dragged < target_index => Side::After,
        _ => Side::Before,
    }
}

/// Whether the two rects share a row (vertical lists: a column) on the cross axis.
///
/// Items on different lines always swap on the full target span.
pub fn in_same_line(dragged: &Rect, target: &Rect, axis: Orientation) -> bool {
    let cross = axis.cross();
    dragged.start(cross) == target.start(cross)
        || dragged.end(cross) == target.end(cross)
        || dragged.mid(cross) == target.mid(cross)
}

/// Decide whether, and to which side, the pointer swaps with `target`.
///
/// `past_first_invert` is the session latch; it may be set here and stays set
/// for as long as the same target is hovered.
pub fn swap_direction(
    pointer_on_axis: f32,
    target: &Rect,
    axis: Orientation,
    zones: &SwapZones,
    shadow: Option<Shadow>,
    past_first_invert: &mut bool,
    insert_side: Side,
) -> Option<Side> {
    let p = pointer_on_axis;
    let length = target.span(axis);
    let s1 = target.start(axis);
    let s2 = target.end(axis);
    let mut invert = zones.invert;

    if !invert {
        match shadow {
            Some(shadow) if shadow.target_move_distance < length * zones.swap_threshold => {
                // The target is still sliding out of the way of the last swap.
                let half_inverted = length * zones.inverted_swap_threshold / 2.0;
                if !*past_first_invert {
                    let crossed = match shadow.last_direction {
                        Some(Side::After) => p > s1 + half_inverted,
                        _ => p < s2 - half_inverted,
                    };
                    *past_first_invert = crossed;
                }
                if !*past_first_invert {
                    return None;
                }
                invert = true;
            }
            _ => {
                let margin = length * (1.0 - zones.swap_threshold) / 2.0;
                if p > s1 + margin && p < s2 - margin {
                    return Some(insert_side);
                }
            }
        }
    }

    if invert {
        let edge = length * zones.inverted_swap_threshold / 2.0;
        if p < s1 + edge || p > s2 - edge {
            let mid = s1 + length / 2.0;
            if p > mid {
                return Some(Side::After);
            }
            if p < mid {
                return Some(Side::Before);
            }
        }
    }

    None
}
