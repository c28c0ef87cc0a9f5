//! The reorder decision function.
//!
//! [`evaluate`] maps a pointer plus pre-measured geometry to a [`Decision`].
//! It reads rects only; measuring, vetoing and mutating belong to the caller.

use sortflow_core::geometry::{Orientation, Rect};
use sortflow_core::math::Vec2;
use sortflow_core::profiling::profile_function;

use crate::config::SortableOptions;
use crate::id::ItemId;

use super::boundary::{pointer_before_first, pointer_past_last};
use super::swap::{Shadow, SwapZones, in_same_line, insert_side, swap_direction};
use super::types::{Decision, HysteresisState, Side};

/// The hovered item, measured.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetInfo {
    pub item: ItemId,
    pub index: usize,
    pub rect: Rect,
    /// The item is mid-transition on both axes or otherwise must not be
    /// swapped with right now.
    pub locked: bool,
}

/// First or last item of the container's run, measured.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeItem {
    pub item: ItemId,
    pub rect: Rect,
    pub animating: bool,
}

/// Everything one evaluation needs, gathered by the caller.
#[derive(Debug, Clone, Copy)]
pub struct ReorderQuery<'a> {
    pub pointer: Vec2,
    pub orientation: Orientation,
    pub options: &'a SortableOptions,
    pub dragged: ItemId,
    pub dragged_rect: Rect,
    /// Whether the dragged item is itself mid-transition.
    pub dragged_animating: bool,
    /// Index of the dragged item in this container, `None` when it currently
    /// lives in another container.
    pub dragged_index: Option<usize>,
    /// Visible items of the hovered container, in order.
    pub items: &'a [ItemId],
    pub first: Option<EdgeItem>,
    pub last: Option<EdgeItem>,
    pub target: Option<TargetInfo>,
}

/// Evaluate one pointer position.
///
/// The only state touched is the hysteresis observation (target-change reset,
/// first-invert latch, last-target reset when hovering the dragged item).
/// Committing a swap is left to the caller, so evaluating the same pointer
/// twice without a mutation in between yields the same decision.
pub fn evaluate(query: &ReorderQuery<'_>, hysteresis: &mut HysteresisState) -> Decision {
    profile_function!();

    let Some(last) = query.last else {
        // Nothing to sort against: the container is empty.
        return Decision::InsertAtEnd;
    };
    let threshold = query.options.empty_insert_threshold;

    if !last.animating && pointer_past_last(query.pointer, &last.rect, query.orientation, threshold) {
        return if last.item == query.dragged {
            Decision::None
        } else {
            Decision::InsertAtEnd
        };
    }

    if let Some(first) = query.first
        && !first.animating
        && pointer_before_first(query.pointer, &first.rect, query.orientation, threshold)
    {
        return if first.item == query.dragged {
            Decision::None
        } else {
            Decision::InsertAtStart
        };
    }

    let Some(target) = query.target else {
        return Decision::None;
    };

    if target.item == query.dragged {
        if !query.dragged_animating {
            hysteresis.clear_target();
        }
        return Decision::None;
    }

    if target.locked {
        return Decision::None;
    }

    let different_line = !in_same_line(&query.dragged_rect, &target.rect, query.orientation);
    let different_container = query.dragged_index.is_none();
    let invert = hysteresis.observe_target(
        target.item,
        (!different_line && query.options.invert_swap) || different_container,
    );
    let zones = SwapZones {
        swap_threshold: if different_line {
            1.0
        } else {
            query.options.swap_threshold
        },
        inverted_swap_threshold: query.options.effective_inverted_swap_threshold(),
        invert,
    };

    let shadow = (hysteresis.last_target == Some(target.item)).then_some(Shadow {
        last_direction: hysteresis.last_direction,
        target_move_distance: hysteresis.target_move_distance,
    });

    let side = swap_direction(
        query.orientation.along(query.pointer),
        &target.rect,
        query.orientation,
        &zones,
        shadow,
        &mut hysteresis.past_first_invert_threshold,
        insert_side(query.dragged_index, target.index),
    );

    let Some(side) = side else {
        return Decision::None;
    };

    // Already beside the target on that side.
    if let Some(dragged_index) = query.dragged_index {
        let neighbour = match side {
            Side::After => dragged_index.checked_sub(1),
            Side::Before => dragged_index.checked_add(1),
        };
        if neighbour.and_then(|i| query.items.get(i)) == Some(&target.item) {
            return Decision::None;
        }
    }

    tracing::trace!(item = %target.item, ?side, "swap zone hit");
    Decision::relative(target.item, side)
}
