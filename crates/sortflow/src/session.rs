//! The single active drag.

use sortflow_core::math::Vec2;

use crate::id::{ContainerId, ItemId};
use crate::reorder::HysteresisState;

/// State of the drag in progress. Owned by the
/// [`DragController`](crate::DragController); at most one exists.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub(crate) dragged: ItemId,
    pub(crate) origin: ContainerId,
    pub(crate) origin_index: usize,
    /// Sibling that followed the item when the drag started, used to put it back.
    pub(crate) origin_next: Option<ItemId>,
    pub(crate) current: ContainerId,
    pub(crate) pointer: Vec2,
    pub(crate) offset: Vec2,
    pub(crate) hysteresis: HysteresisState,
}

impl DragSession {
    pub(crate) fn new(
        dragged: ItemId,
        origin: ContainerId,
        origin_index: usize,
        origin_next: Option<ItemId>,
        pointer: Vec2,
        offset: Vec2,
    ) -> Self {
        Self {
            dragged,
            origin,
            origin_index,
            origin_next,
            current: origin,
            pointer,
            offset,
            hysteresis: HysteresisState::new(),
        }
    }

    pub fn dragged(&self) -> ItemId {
        self.dragged
    }

    /// Container the drag started in.
    pub fn origin(&self) -> ContainerId {
        self.origin
    }

    pub fn origin_index(&self) -> usize {
        self.origin_index
    }

    /// Container the dragged item currently lives in.
    pub fn current(&self) -> ContainerId {
        self.current
    }

    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    /// Pointer position relative to the dragged item's origin at drag start.
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    pub fn hysteresis(&self) -> &HysteresisState {
        &self.hysteresis
    }
}

/// Outcome of a completed drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropEvent {
    pub item: ItemId,
    pub from: ContainerId,
    pub to: ContainerId,
    pub old_index: usize,
    pub new_index: usize,
}

impl DropEvent {
    /// Whether the drop changed anything.
    pub fn moved(&self) -> bool {
        self.from != self.to || self.old_index != self.new_index
    }
}
