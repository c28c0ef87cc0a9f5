//! Drag session controller.
//!
//! [`DragController`] is the public face of the engine. It owns the registered
//! containers, the shared timer queue and the single [`DragSession`], and runs
//! one complete reorder cycle per [`DragController::drag_over`]:
//!
//! evaluate → move hook → re-validate → capture → mutate → hysteresis → animate
//!
//! Nothing here is process-global; hosts keep the controller wherever suits them
//! and pass themselves in as the [`SortHost`] on every call.

use std::time::Duration;

use indexmap::IndexMap;
use sortflow_core::geometry::{Orientation, Rect};
use sortflow_core::math::Vec2;

use crate::animation::{AnimationState, AnimationSummary, AnimationTask, CompletionCallback};
use crate::config::SortableOptions;
use crate::error::{SortError, SortResult};
use crate::host::{InsertPosition, MoveEvent, MoveVerdict, SortHost};
use crate::id::{ContainerId, ItemId};
use crate::list::SortableList;
use crate::reorder::{self, Decision, EdgeItem, ReorderQuery, Side, TargetInfo};
use crate::scheduler::Scheduler;
use crate::session::{DragSession, DropEvent};

#[derive(Debug, Default)]
pub struct DragController {
    lists: IndexMap<ContainerId, SortableList>,
    scheduler: Scheduler<AnimationTask>,
    session: Option<DragSession>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a container, replacing any previous registration under `id`.
    pub fn register(&mut self, id: ContainerId, options: SortableOptions) -> SortResult<()> {
        let list = SortableList::new(id, options).inspect_err(|err| {
            tracing::warn!(container = %id, %err, "rejected container options");
        })?;
        if let Some(mut previous) = self.lists.insert(id, list) {
            previous.animation_mut().clear(&mut self.scheduler);
        }
        tracing::debug!(container = %id, "registered container");
        Ok(())
    }

    /// Remove a container and cancel its pending timers.
    pub fn unregister(&mut self, id: ContainerId) -> Option<SortableList> {
        let mut list = self.lists.shift_remove(&id)?;
        list.animation_mut().clear(&mut self.scheduler);
        if self.session.as_ref().is_some_and(|s| s.current == id || s.origin == id) {
            tracing::warn!(container = %id, "unregistered a container involved in the active drag");
        }
        Some(list)
    }

    pub fn list(&self, id: ContainerId) -> Option<&SortableList> {
        self.lists.get(&id)
    }

    /// Registered containers in registration order.
    pub fn lists(&self) -> impl Iterator<Item = &SortableList> {
        self.lists.values()
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// Virtual time of the animation clock.
    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    /// Start dragging `item` out of `container` with the pointer at `pointer`.
    pub fn start_drag<H: SortHost + ?Sized>(
        &mut self,
        host: &H,
        container: ContainerId,
        item: ItemId,
        pointer: Vec2,
    ) -> SortResult<()> {
        if let Some(session) = &self.session {
            return Err(SortError::SessionActive(session.dragged));
        }
        let list = self.lists.get(&container).ok_or(SortError::UnknownContainer(container))?;
        if list.options().disabled {
            return Err(SortError::Disabled(container));
        }

        let items = host.items(container);
        let index = items
            .iter()
            .position(|&candidate| candidate == item)
            .ok_or(SortError::ItemNotInContainer { item, container })?;
        let offset = host
            .measure(item, false)
            .map(|rect| pointer - rect.origin())
            .unwrap_or(Vec2::ZERO);

        self.session = Some(DragSession::new(
            item,
            container,
            index,
            items.get(index + 1).copied(),
            pointer,
            offset,
        ));
        tracing::debug!(%item, %container, index, "drag started");
        Ok(())
    }

    pub fn update_pointer(&mut self, pointer: Vec2) -> SortResult<()> {
        let session = self.session.as_mut().ok_or(SortError::NoActiveSession)?;
        session.pointer = pointer;
        Ok(())
    }

    /// Decide what hovering `target` in `container` at `pointer` would do.
    ///
    /// Performs no mutation. Repeated calls with the same arguments return the
    /// same decision.
    pub fn evaluate<H: SortHost + ?Sized>(
        &mut self,
        host: &H,
        container: ContainerId,
        pointer: Vec2,
        target: Option<ItemId>,
    ) -> SortResult<Decision> {
        let session = self.session.as_mut().ok_or(SortError::NoActiveSession)?;
        session.pointer = pointer;
        let decided = decide(host, &self.lists, container, session, target)?;
        Ok(decided.map(|(decision, _)| decision).unwrap_or_default())
    }

    /// Evaluate and, when the decision is a move, perform it with animation.
    ///
    /// Returns the decision that was applied, [`Decision::None`] when nothing moved.
    pub fn drag_over<H: SortHost + ?Sized>(
        &mut self,
        host: &mut H,
        container: ContainerId,
        pointer: Vec2,
        target: Option<ItemId>,
    ) -> SortResult<Decision> {
        let session = self.session.as_mut().ok_or(SortError::NoActiveSession)?;
        session.pointer = pointer;

        let Some((decision, snapshot)) = decide(&*host, &self.lists, container, session, target)? else {
            return Ok(Decision::None);
        };
        if decision.is_none() {
            return Ok(Decision::None);
        }

        let event = snapshot.move_event(session, container, decision);
        let verdict = match host.move_hook() {
            Some(hook) => hook.on_move(&event),
            None => MoveVerdict::Allow,
        };
        let Some(decision) = apply_verdict(decision, verdict) else {
            tracing::trace!(item = %session.dragged, "move vetoed");
            return Ok(Decision::None);
        };

        let Some(position) = insert_position(decision, &host.items(container), session.dragged) else {
            tracing::warn!(item = %session.dragged, ?decision, "target left the container before the move");
            return Ok(Decision::None);
        };

        let source = session.current;
        let dragged = session.dragged;
        let affected = if source == container {
            vec![container]
        } else {
            vec![container, source]
        };

        // Hysteresis bookkeeping for swaps against an item.
        let swap = decision.target().zip(decision.side()).map(|(target, side)| {
            let track = session.hysteresis.tracks_move_distance();
            let start = host.measure(target, true).map(|rect| rect.start(snapshot.orientation));
            (target, side, start, track)
        });

        for id in &affected {
            if let Some(list) = self.lists.get_mut(id) {
                let items = host.items(*id);
                list.animation_mut().capture(&*host, &items);
            }
        }

        host.insert(container, dragged, position);
        session.current = container;

        if let Some((target, side, start, track)) = swap {
            session
                .hysteresis
                .commit_swap(target, side, start.unwrap_or_default(), track && start.is_some());
            if let Some(after) = host.measure(target, true) {
                session.hysteresis.settle(after.start(snapshot.orientation));
            }
        }

        for id in &affected {
            let Some(list) = self.lists.get_mut(id) else {
                continue;
            };
            let summary = list.animation_mut().animate_all(host, &mut self.scheduler, None);
            let swap_target = decision.target().filter(|_| *id == container && source == container);
            list.finish_cycle(&summary, swap_target);
        }

        tracing::debug!(item = %dragged, %container, ?decision, "reordered");
        Ok(decision)
    }

    /// End the drag where the item currently sits.
    pub fn drop<H: SortHost + ?Sized>(&mut self, host: &H) -> SortResult<DropEvent> {
        let session = self.session.take().ok_or(SortError::NoActiveSession)?;
        let new_index = host
            .items(session.current)
            .iter()
            .position(|&item| item == session.dragged)
            .ok_or(SortError::ItemNotInContainer {
                item: session.dragged,
                container: session.current,
            })?;

        let event = DropEvent {
            item: session.dragged,
            from: session.origin,
            to: session.current,
            old_index: session.origin_index,
            new_index,
        };
        tracing::debug!(item = %event.item, from = %event.from, to = %event.to, new_index, "drag dropped");
        Ok(event)
    }

    /// Abort the drag without touching any container. Running transitions continue.
    pub fn cancel(&mut self) -> Option<DragSession> {
        let session = self.session.take()?;
        tracing::debug!(item = %session.dragged, "drag cancelled");
        Some(session)
    }

    /// Advance the animation clock, running expiries and completions that fall due.
    ///
    /// Returns the number of tasks dispatched.
    pub fn tick(&mut self, dt: Duration) -> usize {
        let due = self.scheduler.advance(dt);
        let count = due.len();
        for (timer, task) in due {
            let Some(list) = self.lists.get_mut(&task.container()) else {
                tracing::trace!(?task, "dropping task for unregistered container");
                continue;
            };
            if list.animation_mut().on_timer(timer, task) {
                list.ignore_while_animating = None;
            }
        }
        count
    }

    pub fn capture_animation_state<H: SortHost + ?Sized>(&mut self, host: &H, container: ContainerId) -> SortResult<()> {
        let list = self.list_mut(container)?;
        let items = host.items(container);
        list.animation_mut().capture(host, &items);
        Ok(())
    }

    pub fn add_animation_state(&mut self, container: ContainerId, state: AnimationState) -> SortResult<()> {
        self.list_mut(container)?.animation_mut().add_animation_state(state);
        Ok(())
    }

    /// Exclude `item` from the next cycle. Absent items are ignored.
    pub fn remove_animation_state(&mut self, container: ContainerId, item: ItemId) -> SortResult<Option<AnimationState>> {
        Ok(self.list_mut(container)?.animation_mut().remove_animation_state(item))
    }

    pub fn animate_all<H: SortHost + ?Sized>(
        &mut self,
        host: &mut H,
        container: ContainerId,
        on_complete: Option<CompletionCallback>,
    ) -> SortResult<AnimationSummary> {
        let list = self
            .lists
            .get_mut(&container)
            .ok_or(SortError::UnknownContainer(container))?;
        let summary = list.animation_mut().animate_all(host, &mut self.scheduler, on_complete);
        list.finish_cycle(&summary, None);
        Ok(summary)
    }

    /// Closest registered, enabled, empty container within its
    /// `empty_insert_threshold` of `pointer`.
    pub fn nearest_empty_container<H: SortHost + ?Sized>(&self, host: &H, pointer: Vec2) -> Option<ContainerId> {
        self.lists
            .values()
            .filter(|list| !list.options().disabled)
            .filter(|list| host.items(list.id()).is_empty())
            .filter_map(|list| {
                let distance = host.measure_container(list.id())?.distance_to_point(pointer);
                (distance <= list.options().empty_insert_threshold).then_some((list.id(), distance))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, _)| id)
    }

    fn list_mut(&mut self, container: ContainerId) -> SortResult<&mut SortableList> {
        self.lists
            .get_mut(&container)
            .ok_or(SortError::UnknownContainer(container))
    }
}

/// Visible items of a container measured for one evaluation.
struct Snapshot {
    orientation: Orientation,
    items: Vec<ItemId>,
    rects: Vec<Rect>,
    dragged_rect: Rect,
    dragged_index: Option<usize>,
}

impl Snapshot {
    /// `None` when the dragged item cannot be measured. Unmeasurable items are
    /// treated as invisible.
    fn take<H: SortHost + ?Sized>(host: &H, list: &SortableList, dragged: ItemId) -> Option<Self> {
        let dragged_rect = host.measure(dragged, false)?;
        let (items, rects): (Vec<_>, Vec<_>) = host
            .items(list.id())
            .into_iter()
            .filter_map(|item| host.measure(item, false).map(|rect| (item, rect)))
            .unzip();
        let dragged_index = items.iter().position(|&item| item == dragged);
        // Resting rects, so an in-flight transition cannot flip the detected axis.
        let layout: Vec<Rect> = items.iter().filter_map(|&item| host.measure(item, true)).collect();
        Some(Self {
            orientation: list.orientation(&layout),
            items,
            rects,
            dragged_rect,
            dragged_index,
        })
    }

    fn edge(&self, list: &SortableList, index: usize) -> Option<EdgeItem> {
        let item = *self.items.get(index)?;
        Some(EdgeItem {
            item,
            rect: self.rects[index],
            animating: list.animation().is_animating(item),
        })
    }

    fn rect_of(&self, item: ItemId) -> Option<Rect> {
        let index = self.items.iter().position(|&candidate| candidate == item)?;
        Some(self.rects[index])
    }

    fn query<'a>(
        &'a self,
        list: &'a SortableList,
        session: &DragSession,
        dragged_animating: bool,
        target: Option<ItemId>,
    ) -> ReorderQuery<'a> {
        let target = target.and_then(|item| {
            let index = self.items.iter().position(|&candidate| candidate == item)?;
            Some(TargetInfo {
                item,
                index,
                rect: self.rects[index],
                locked: list.is_locked(item),
            })
        });
        ReorderQuery {
            pointer: session.pointer,
            orientation: self.orientation,
            options: list.options(),
            dragged: session.dragged,
            dragged_rect: self.dragged_rect,
            dragged_animating,
            dragged_index: self.dragged_index,
            items: &self.items,
            first: self.edge(list, 0),
            last: self.items.len().checked_sub(1).and_then(|index| self.edge(list, index)),
            target,
        }
    }

    fn move_event(&self, session: &DragSession, container: ContainerId, decision: Decision) -> MoveEvent {
        let related = match decision {
            Decision::InsertBefore(item) | Decision::InsertAfter(item) => Some(item),
            Decision::InsertAtStart => self.items.first().copied(),
            Decision::InsertAtEnd => self.items.last().copied(),
            Decision::None => None,
        };
        MoveEvent {
            from: session.origin,
            to: container,
            dragged: session.dragged,
            dragged_rect: self.dragged_rect,
            related,
            related_rect: related.and_then(|item| self.rect_of(item)),
            will_insert_after: matches!(decision, Decision::InsertAfter(_) | Decision::InsertAtEnd),
        }
    }
}

/// Run the decision engine for `container`, or return `Ok(None)` when the
/// hover degrades to no decision before reaching it.
fn decide<H: SortHost + ?Sized>(
    host: &H,
    lists: &IndexMap<ContainerId, SortableList>,
    container: ContainerId,
    session: &mut DragSession,
    target: Option<ItemId>,
) -> SortResult<Option<(Decision, Snapshot)>> {
    let list = lists.get(&container).ok_or(SortError::UnknownContainer(container))?;
    if list.options().disabled {
        return Ok(None);
    }
    let Some(snapshot) = Snapshot::take(host, list, session.dragged) else {
        tracing::warn!(item = %session.dragged, "dragged item cannot be measured");
        return Ok(None);
    };

    if !list.options().sort {
        let decision = if session.current == container {
            Decision::None
        } else if session.origin == container {
            revert_decision(session, &snapshot.items)
        } else {
            // Entering a non-sorting container is still allowed.
            evaluate_snapshot(lists, list, &snapshot, session, target)
        };
        return Ok(Some((decision, snapshot)));
    }

    let decision = evaluate_snapshot(lists, list, &snapshot, session, target);
    Ok(Some((decision, snapshot)))
}

fn evaluate_snapshot(
    lists: &IndexMap<ContainerId, SortableList>,
    list: &SortableList,
    snapshot: &Snapshot,
    session: &mut DragSession,
    target: Option<ItemId>,
) -> Decision {
    let dragged_animating = lists
        .get(&session.current)
        .is_some_and(|current| current.animation().is_animating(session.dragged));
    let query = snapshot.query(list, session, dragged_animating, target);
    let decision = reorder::evaluate(&query, &mut session.hysteresis);
    tracing::trace!(container = %list.id(), ?decision, "evaluated");
    decision
}

/// Put the item back where it started in its origin container.
fn revert_decision(session: &DragSession, origin_items: &[ItemId]) -> Decision {
    match session.origin_next {
        Some(next) if origin_items.contains(&next) => Decision::InsertBefore(next),
        _ => Decision::InsertAtEnd,
    }
}

fn apply_verdict(decision: Decision, verdict: MoveVerdict) -> Option<Decision> {
    let forced = match verdict {
        MoveVerdict::Allow => return Some(decision),
        MoveVerdict::Veto => return None,
        MoveVerdict::ForceBefore => Side::Before,
        MoveVerdict::ForceAfter => Side::After,
    };
    Some(match decision.target() {
        Some(target) => Decision::relative(target, forced),
        None => decision,
    })
}

/// Translate a decision into a mutator position against the container as it is
/// now. `None` when the related item is no longer a member.
fn insert_position(decision: Decision, items: &[ItemId], dragged: ItemId) -> Option<InsertPosition> {
    let next_other = |from: usize| {
        items[from..]
            .iter()
            .copied()
            .find(|&item| item != dragged)
            .map_or(InsertPosition::AtEnd, InsertPosition::Before)
    };
    match decision {
        Decision::None => None,
        Decision::InsertBefore(target) => items.contains(&target).then_some(InsertPosition::Before(target)),
        Decision::InsertAfter(target) => {
            let index = items.iter().position(|&item| item == target)?;
            Some(next_other(index + 1))
        }
        Decision::InsertAtStart => Some(next_other(0)),
        Decision::InsertAtEnd => Some(InsertPosition::AtEnd),
    }
}
