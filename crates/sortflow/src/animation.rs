//! Animation State Manager: FLIP transitions for reordered items.
//!
//! One manager per container. A cycle is:
//!
//! 1. [`AnimationStateManager::capture`] before the container is mutated,
//!    recording where every visible item is drawn and where it rests.
//! 2. The host mutates the container.
//! 3. [`AnimationStateManager::animate_all`] measures the new resting rects,
//!    hands each moved item's inverse offset to the transition applier and
//!    schedules the cycle's completion.
//!
//! When a reorder interrupts an item that is sliding back to where it came
//! from, the new transition is shortened so the item keeps its speed instead
//! of restarting the full duration from a point part-way along.

use std::mem;
use std::time::Duration;

use sortflow_core::alloc::HashMap;
use sortflow_core::geometry::Rect;
use sortflow_core::profiling::profile_function;

use crate::host::{GeometryProvider, SortHost};
use crate::id::{ContainerId, ItemId};
use crate::scheduler::{Scheduler, TimerId};
use crate::transition::Easing;

/// Callback invoked once an animation cycle has finished.
pub type CompletionCallback = Box<dyn FnOnce() + 'static>;

/// Deferred work owned by animation managers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationTask {
    /// Drop an item's record once its transition has run.
    Expire { container: ContainerId, item: ItemId },
    /// Run a container's completion callbacks.
    Complete { container: ContainerId },
}

impl AnimationTask {
    pub fn container(&self) -> ContainerId {
        match self {
            AnimationTask::Expire { container, .. } | AnimationTask::Complete { container } => *container,
        }
    }
}

/// One captured item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationState {
    pub item: ItemId,
    /// Where the item was drawn at capture time, in-flight offset included.
    pub rect: Rect,
    /// Resting rect at capture time.
    pub from_rect: Rect,
}

impl AnimationState {
    /// State for an item that is not currently translated.
    pub fn new(item: ItemId, rect: Rect) -> Self {
        Self {
            item,
            rect,
            from_rect: rect,
        }
    }
}

/// Bookkeeping for an item with a running transition.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationRecord {
    pub from_rect: Rect,
    pub to_rect: Rect,
    pub prev_from_rect: Rect,
    pub prev_to_rect: Rect,
    pub animating_rect: Rect,
    pub duration: Duration,
    pub animating_x: bool,
    pub animating_y: bool,
    expiry: TimerId,
}

impl AnimationRecord {
    pub fn expiry(&self) -> TimerId {
        self.expiry
    }
}

/// What one [`AnimationStateManager::animate_all`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AnimationSummary {
    /// Items handed to the transition applier.
    pub scheduled: usize,
    /// Longest transition, zero when nothing moved.
    pub duration: Duration,
    /// Whether completion callbacks already ran.
    pub completed: bool,
}

pub struct AnimationStateManager {
    container: ContainerId,
    duration: Duration,
    easing: Easing,
    captured: Vec<AnimationState>,
    records: HashMap<ItemId, AnimationRecord>,
    completion: Option<TimerId>,
    callbacks: Vec<CompletionCallback>,
}

impl std::fmt::Debug for AnimationStateManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimationStateManager")
            .field("container", &self.container)
            .field("duration", &self.duration)
            .field("captured", &self.captured.len())
            .field("records", &self.records.len())
            .field("completion", &self.completion)
            .field("callbacks", &self.callbacks.len())
            .finish()
    }
}

impl AnimationStateManager {
    /// A `duration` of zero disables transitions for this container.
    pub fn new(container: ContainerId, duration: Duration, easing: Easing) -> Self {
        Self {
            container,
            duration,
            easing,
            captured: Vec::new(),
            records: HashMap::new(),
            completion: None,
            callbacks: Vec::new(),
        }
    }

    pub fn container(&self) -> ContainerId {
        self.container
    }

    pub fn base_duration(&self) -> Duration {
        self.duration
    }

    /// Snapshot `items` ahead of a mutation, replacing any previous capture.
    pub fn capture<G: GeometryProvider + ?Sized>(&mut self, geometry: &G, items: &[ItemId]) {
        self.captured.clear();
        if self.duration.is_zero() {
            return;
        }

        for &item in items {
            let Some(rect) = geometry.measure(item, false) else {
                tracing::trace!(%item, "skipping unmeasurable item");
                continue;
            };
            let from_rect = if self.records.contains_key(&item) {
                geometry.measure(item, true).unwrap_or(rect)
            } else {
                rect
            };
            self.captured.push(AnimationState { item, rect, from_rect });
        }
    }

    /// Add a state to the current capture by hand.
    pub fn add_animation_state(&mut self, state: AnimationState) {
        self.captured.push(state);
    }

    /// Remove an item from the current capture. Absent items are ignored.
    pub fn remove_animation_state(&mut self, item: ItemId) -> Option<AnimationState> {
        let index = self.captured.iter().position(|state| state.item == item)?;
        Some(self.captured.remove(index))
    }

    /// States captured for the next cycle.
    pub fn captured(&self) -> &[AnimationState] {
        &self.captured
    }

    /// Running record for `item`. Expired records are removed, never returned.
    pub fn record(&self, item: ItemId) -> Option<&AnimationRecord> {
        self.records.get(&item)
    }

    pub fn is_animating(&self, item: ItemId) -> bool {
        self.records.contains_key(&item)
    }

    /// Mid-transition on both axes, e.g. moving diagonally between rows.
    pub fn is_animating_both_axes(&self, item: ItemId) -> bool {
        self.records
            .get(&item)
            .is_some_and(|record| record.animating_x && record.animating_y)
    }

    /// Whether a completion is scheduled and not yet run.
    pub fn has_pending_completion(&self) -> bool {
        self.completion.is_some()
    }

    /// Animate every captured item to its post-mutation rect.
    ///
    /// Consumes the capture. Callbacks of a cycle that is still pending are
    /// carried over, so each callback runs exactly once, after the latest
    /// cycle ends.
    pub fn animate_all<H: SortHost + ?Sized>(
        &mut self,
        host: &mut H,
        scheduler: &mut Scheduler<AnimationTask>,
        on_complete: Option<CompletionCallback>,
    ) -> AnimationSummary {
        profile_function!();

        if let Some(timer) = self.completion.take() {
            scheduler.cancel(timer);
        }
        self.callbacks.extend(on_complete);
        let captured = mem::take(&mut self.captured);

        if self.duration.is_zero() || host.transition_applier().is_none() {
            self.run_callbacks();
            return AnimationSummary {
                completed: true,
                ..Default::default()
            };
        }

        let plans: Vec<_> = captured
            .iter()
            .filter_map(|state| {
                let to_rect = host.measure(state.item, true)?;
                self.plan(state, to_rect)
            })
            .collect();

        let mut summary = AnimationSummary::default();
        if let Some(applier) = host.transition_applier() {
            for plan in &plans {
                let delta = plan.state.rect.origin() - plan.to_rect.origin();
                applier.apply_transition(plan.state.item, delta, plan.duration, self.easing);
            }
        }

        for plan in plans {
            let item = plan.state.item;
            if let Some(previous) = self.records.get(&item) {
                scheduler.cancel(previous.expiry);
            }
            let expiry = scheduler.schedule(
                plan.duration,
                AnimationTask::Expire {
                    container: self.container,
                    item,
                },
            );
            let delta = plan.state.rect.origin() - plan.to_rect.origin();
            self.records.insert(
                item,
                AnimationRecord {
                    from_rect: plan.state.from_rect,
                    to_rect: plan.to_rect,
                    prev_from_rect: plan.state.from_rect,
                    prev_to_rect: plan.to_rect,
                    animating_rect: plan.state.rect,
                    duration: plan.duration,
                    animating_x: delta.x != 0.0,
                    animating_y: delta.y != 0.0,
                    expiry,
                },
            );
            summary.scheduled += 1;
            summary.duration = summary.duration.max(plan.duration);
        }

        if summary.scheduled == 0 {
            self.run_callbacks();
            summary.completed = true;
        } else {
            self.completion = Some(scheduler.schedule(
                summary.duration,
                AnimationTask::Complete {
                    container: self.container,
                },
            ));
            tracing::debug!(
                container = %self.container,
                items = summary.scheduled,
                duration = ?summary.duration,
                "scheduled transitions"
            );
        }

        summary
    }

    /// Handle a fired task addressed to this container.
    ///
    /// Returns true when this completed the current cycle.
    pub fn on_timer(&mut self, timer: TimerId, task: AnimationTask) -> bool {
        match task {
            AnimationTask::Expire { item, .. } => {
                if self.records.get(&item).is_some_and(|record| record.expiry == timer) {
                    self.records.remove(&item);
                }
                false
            }
            AnimationTask::Complete { .. } => {
                if self.completion != Some(timer) {
                    return false;
                }
                self.completion = None;
                self.run_callbacks();
                true
            }
        }
    }

    /// Cancel every timer and forget all state. Pending callbacks are dropped.
    pub fn clear(&mut self, scheduler: &mut Scheduler<AnimationTask>) {
        for record in self.records.values() {
            scheduler.cancel(record.expiry);
        }
        if let Some(timer) = self.completion.take() {
            scheduler.cancel(timer);
        }
        self.records.clear();
        self.captured.clear();
        self.callbacks.clear();
    }

    fn plan(&self, state: &AnimationState, to_rect: Rect) -> Option<TransitionPlan> {
        if state.from_rect == to_rect {
            return None;
        }

        let mut duration = Duration::ZERO;
        // Heading back to where the running transition started, along the same line.
        if let Some(record) = self.records.get(&state.item)
            && record.prev_from_rect == to_rect
            && colinear(&state.rect, &state.from_rect, &to_rect)
        {
            duration = interrupted_duration(&state.rect, &record.prev_from_rect, &record.prev_to_rect, self.duration);
        }
        if duration.is_zero() {
            duration = self.duration;
        }

        Some(TransitionPlan {
            state: *state,
            to_rect,
            duration,
        })
    }

    fn run_callbacks(&mut self) {
        for callback in self.callbacks.drain(..) {
            callback();
        }
    }
}

struct TransitionPlan {
    state: AnimationState,
    to_rect: Rect,
    duration: Duration,
}

/// Whether `animating` lies on the line through `from` and `to`.
///
/// Compares slopes exactly. A zero horizontal difference on either side
/// fails the test, which falls back to a full-length transition.
pub fn colinear(animating: &Rect, from: &Rect, to: &Rect) -> bool {
    let animating_dx = animating.left - to.left;
    let from_dx = from.left - to.left;
    if animating_dx == 0.0 || from_dx == 0.0 {
        return false;
    }
    (animating.top - to.top) / animating_dx == (from.top - to.top) / from_dx
}

/// Duration for returning to `prev_from` from part-way along `prev_from → prev_to`,
/// proportional to how far the item had already travelled.
pub fn interrupted_duration(animating: &Rect, prev_from: &Rect, prev_to: &Rect, base: Duration) -> Duration {
    let total = prev_from.origin_distance(prev_to);
    if total == 0.0 {
        return Duration::ZERO;
    }
    let travelled = prev_from.origin_distance(animating);
    base.mul_f32((travelled / total).min(1.0))
}
