//! Interfaces the host implements.
//!
//! The engine owns no visual elements. Measuring, reordering and animating
//! items all go through these traits, keeping the core independent of any
//! particular UI toolkit.

use std::time::Duration;

use sortflow_core::geometry::Rect;
use sortflow_core::math::Vec2;

use crate::id::{ContainerId, ItemId};
use crate::transition::Easing;

/// Measures items and containers in absolute coordinates.
pub trait GeometryProvider {
    /// Bounding rect of `item`.
    ///
    /// With `compensate_transform` unset this is where the item is drawn right
    /// now, including any in-flight transition offset. With it set, that
    /// offset is removed and the item's resting layout rect is returned.
    fn measure(&self, item: ItemId, compensate_transform: bool) -> Option<Rect>;

    /// Bounding rect of a container.
    fn measure_container(&self, container: ContainerId) -> Option<Rect>;
}

/// Where to place an item inside a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertPosition {
    /// Directly before the given sibling.
    Before(ItemId),
    /// After every other item.
    AtEnd,
}

/// Owns the backing sequences and performs reorders.
pub trait ContainerMutator {
    /// Visible items of `container` in order. Unknown containers are empty.
    fn items(&self, container: ContainerId) -> Vec<ItemId>;

    /// Move `item` into `container` at `position`, removing it from wherever
    /// it was. Must be observable through [`ContainerMutator::items`] as soon
    /// as it returns.
    fn insert(&mut self, container: ContainerId, item: ItemId, position: InsertPosition);
}

/// Renders a translation from `delta` back to zero over `duration`.
pub trait TransitionApplier {
    /// Fire and forget. The applier cleans up after `duration` on its own.
    fn apply_transition(&mut self, item: ItemId, delta: Vec2, duration: Duration, easing: Easing);
}

/// Details of a pending move handed to a [`MoveHook`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveEvent {
    /// Container the drag started in.
    pub from: ContainerId,
    /// Container the item would be inserted into.
    pub to: ContainerId,
    pub dragged: ItemId,
    pub dragged_rect: Rect,
    /// Item the insertion is relative to, if any.
    pub related: Option<ItemId>,
    pub related_rect: Option<Rect>,
    /// Whether the engine intends to insert after `related`.
    pub will_insert_after: bool,
}

/// Answer from a [`MoveHook`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MoveVerdict {
    /// Proceed as decided.
    #[default]
    Allow,
    /// Cancel this move. Not an error; the evaluation simply yields no reorder.
    Veto,
    /// Proceed, but insert before the related item.
    ForceBefore,
    /// Proceed, but insert after the related item.
    ForceAfter,
}

impl From<bool> for MoveVerdict {
    fn from(allow: bool) -> Self {
        if allow { MoveVerdict::Allow } else { MoveVerdict::Veto }
    }
}

/// Optional veto or override of a reorder decision.
pub trait MoveHook {
    fn on_move(&mut self, event: &MoveEvent) -> MoveVerdict;
}

impl<F> MoveHook for F
where
    F: FnMut(&MoveEvent) -> MoveVerdict,
{
    fn on_move(&mut self, event: &MoveEvent) -> MoveVerdict {
        self(event)
    }
}

/// Everything the drag controller needs from its host.
///
/// Transitions and move hooks are optional capabilities. Without an applier
/// every animation cycle completes immediately.
pub trait SortHost: GeometryProvider + ContainerMutator {
    fn transition_applier(&mut self) -> Option<&mut dyn TransitionApplier> {
        None
    }

    fn move_hook(&mut self) -> Option<&mut dyn MoveHook> {
        None
    }
}
