//! A registered sortable container.

use sortflow_core::geometry::{Orientation, Rect};

use crate::animation::{AnimationStateManager, AnimationSummary};
use crate::config::SortableOptions;
use crate::error::ConfigError;
use crate::id::{ContainerId, ItemId};

/// Options and animation state of one container.
#[derive(Debug)]
pub struct SortableList {
    id: ContainerId,
    options: SortableOptions,
    animation: AnimationStateManager,
    /// Last in-list swap target, locked until this container's animation completes.
    pub(crate) ignore_while_animating: Option<ItemId>,
}

impl SortableList {
    /// Validates `options`; invalid thresholds never reach the decision engine.
    pub fn new(id: ContainerId, options: SortableOptions) -> Result<Self, ConfigError> {
        options.validate()?;
        let animation = AnimationStateManager::new(id, options.animation_duration(), options.easing);
        Ok(Self {
            id,
            options,
            animation,
            ignore_while_animating: None,
        })
    }

    pub fn id(&self) -> ContainerId {
        self.id
    }

    pub fn options(&self) -> &SortableOptions {
        &self.options
    }

    pub fn animation(&self) -> &AnimationStateManager {
        &self.animation
    }

    pub fn animation_mut(&mut self) -> &mut AnimationStateManager {
        &mut self.animation
    }

    pub fn ignore_while_animating(&self) -> Option<ItemId> {
        self.ignore_while_animating
    }

    /// Principal axis given the container's visible item rects.
    pub fn orientation(&self, item_rects: &[Rect]) -> Orientation {
        self.options.direction.resolve(self.id, item_rects)
    }

    /// Update the swap lock after an animation cycle on this container.
    ///
    /// A cycle that completed on the spot releases the lock, even when it
    /// superseded the completion the lock was waiting for.
    pub(crate) fn finish_cycle(&mut self, summary: &AnimationSummary, swap_target: Option<ItemId>) {
        if summary.completed {
            self.ignore_while_animating = None;
        } else if let Some(target) = swap_target {
            self.ignore_while_animating = Some(target);
        }
    }

    /// Whether `item` must not be swapped with right now.
    pub fn is_locked(&self, item: ItemId) -> bool {
        self.ignore_while_animating == Some(item) || self.animation.is_animating_both_axes(item)
    }
}
