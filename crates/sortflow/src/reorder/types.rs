//! Shared types for the reorder engine.

use crate::id::ItemId;

/// Which side of a target the dragged item goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Before,
    After,
}

impl Side {
    pub fn reverse(&self) -> Self {
        match self {
            Side::Before => Side::After,
            Side::After => Side::Before,
        }
    }

    /// `-1` for before, `1` for after.
    pub fn sign(&self) -> i8 {
        match self {
            Side::Before => -1,
            Side::After => 1,
        }
    }

    pub fn is_after(&self) -> bool {
        matches!(self, Side::After)
    }
}

/// Outcome of one drag-over evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Decision {
    /// Leave everything where it is.
    #[default]
    None,
    /// Insert the dragged item directly before the given item.
    InsertBefore(ItemId),
    /// Insert the dragged item directly after the given item.
    InsertAfter(ItemId),
    /// Insert at the head of the container.
    InsertAtStart,
    /// Insert at the tail of the container.
    InsertAtEnd,
}

impl Decision {
    pub fn is_none(&self) -> bool {
        matches!(self, Decision::None)
    }

    /// Build a side-relative decision.
    pub fn relative(target: ItemId, side: Side) -> Self {
        match side {
            Side::Before => Decision::InsertBefore(target),
            Side::After => Decision::InsertAfter(target),
        }
    }

    /// The item this decision is relative to, if any.
    pub fn target(&self) -> Option<ItemId> {
        match self {
            Decision::InsertBefore(item) | Decision::InsertAfter(item) => Some(*item),
            _ => None,
        }
    }

    /// Side of a relative decision.
    pub fn side(&self) -> Option<Side> {
        match self {
            Decision::InsertBefore(_) => Some(Side::Before),
            Decision::InsertAfter(_) => Some(Side::After),
            _ => None,
        }
    }
}

/// Per-session memory that keeps decisions from flapping near zone edges.
///
/// `last_direction == None` means no swap has been committed against
/// `last_target` yet; it never means "centred".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HysteresisState {
    pub last_target: Option<ItemId>,
    pub last_direction: Option<Side>,
    pub past_first_invert_threshold: bool,
    /// Edge-only swapping forced by `invert_swap` on a shared line or by a
    /// container change. Fixed when a target is first hovered.
    pub circumstantial_invert: bool,
    /// How far the last target slid along the axis after the first swap against it.
    pub target_move_distance: f32,
    /// Target's leading edge captured when a first swap is committed, until
    /// the post-mutation position is known.
    pending_target_start: Option<f32>,
}

impl HysteresisState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called at the start of every evaluation against `target`.
    ///
    /// `circumstantial_invert` only takes effect while `target` is not the
    /// last swap target. Returns the mode in force.
    pub(crate) fn observe_target(&mut self, target: ItemId, circumstantial_invert: bool) -> bool {
        if self.last_target != Some(target) {
            self.past_first_invert_threshold = false;
            self.circumstantial_invert = circumstantial_invert;
        }
        self.circumstantial_invert
    }

    /// Whether the next committed swap should measure how far its target slides.
    pub fn tracks_move_distance(&self) -> bool {
        !self.circumstantial_invert
    }

    /// Forget the last target, e.g. when the pointer returns to the dragged item.
    pub fn clear_target(&mut self) {
        self.last_target = None;
        self.pending_target_start = None;
    }

    /// Record an accepted swap against `target`, whose leading edge is
    /// currently at `target_start`.
    ///
    /// The slide distance is only measured for the first swap against a
    /// target, and only when `track_move` is set.
    pub fn commit_swap(&mut self, target: ItemId, side: Side, target_start: f32, track_move: bool) {
        let first_swap = self.last_target != Some(target);
        self.last_target = Some(target);
        self.last_direction = Some(side);
        self.pending_target_start = (first_swap && track_move).then_some(target_start);
    }

    /// Finish a commit once the container has been reordered.
    pub fn settle(&mut self, target_start_after: f32) {
        if let Some(before) = self.pending_target_start.take() {
            self.target_move_distance = (before - target_start_after).abs();
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
