//! Test utilities for sortflow.
//!
//! [`MockHost`] is an in-memory [`SortHost`]: containers are plain vectors laid
//! out on a fixed grid, transitions run through a [`TweenApplier`] and every
//! call the engine makes is recorded for verification.
//!
//! # Example
//!
//! ```rust
//! use sortflow::{ContainerId, DragController, SortableOptions};
//! use sortflow_core::geometry::{Orientation, Rect, Size};
//! use sortflow_core::math::vec2;
//! use sortflow_test_utils::{MockHost, item_ids};
//!
//! let list = ContainerId::new("list");
//! let items = item_ids(3);
//! let mut host = MockHost::new().with_container(
//!     list,
//!     Rect::new(0.0, 0.0, 300.0, 40.0),
//!     Orientation::Horizontal,
//!     Size::new(100.0, 40.0),
//!     &items,
//! );
//!
//! let mut controller = DragController::new();
//! controller.register(list, SortableOptions::new()).unwrap();
//! controller.start_drag(&host, list, items[0], vec2(50.0, 20.0)).unwrap();
//! controller.drag_over(&mut host, list, vec2(250.0, 20.0), Some(items[2])).unwrap();
//!
//! assert_eq!(host.order(list), vec![items[1], items[2], items[0]]);
//! assert_eq!(host.count_transitions(), 3);
//! ```
//!
//! # Interior Mutability
//!
//! Measuring goes through `&self`, so recorded calls live behind a
//! `parking_lot::Mutex`.

use std::time::Duration;

use indexmap::IndexMap;
use parking_lot::Mutex;
use sortflow::{
    ContainerId, ContainerMutator, Easing, GeometryProvider, InsertPosition, ItemId, MoveEvent, MoveHook, MoveVerdict,
    SortHost, TransitionApplier, TweenApplier,
};
use sortflow_core::alloc::HashMap;
use sortflow_core::geometry::{Orientation, Rect, Size};
use sortflow_core::math::{Vec2, vec2};

/// Items with raw ids `1..=count`.
pub fn item_ids(count: u64) -> Vec<ItemId> {
    (1..=count).map(ItemId::from_raw).collect()
}

/// A host call recorded for verification.
#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    Measure {
        item: ItemId,
        compensate_transform: bool,
    },
    Insert {
        container: ContainerId,
        item: ItemId,
        position: InsertPosition,
    },
    Transition {
        item: ItemId,
        delta: Vec2,
        duration: Duration,
    },
    Move(MoveEvent),
}

#[derive(Debug, Clone)]
struct MockContainer {
    bounds: Rect,
    orientation: Orientation,
    item_size: Size,
    items: Vec<ItemId>,
}

impl MockContainer {
    /// Resting rect of the item at `index`, packing earlier items along the axis.
    fn slot(&self, index: usize, sizes: &HashMap<ItemId, Size>) -> Rect {
        let size_of = |item: &ItemId| sizes.get(item).copied().unwrap_or(self.item_size);
        let offset: f32 = self.items[..index]
            .iter()
            .map(|item| match self.orientation {
                Orientation::Horizontal => size_of(item).width,
                Orientation::Vertical => size_of(item).height,
            })
            .sum();
        let origin = match self.orientation {
            Orientation::Horizontal => vec2(self.bounds.left + offset, self.bounds.top),
            Orientation::Vertical => vec2(self.bounds.left, self.bounds.top + offset),
        };
        Rect::from_origin_size(origin, size_of(&self.items[index]))
    }
}

/// In-memory host laying items out in a single row or column per container.
pub struct MockHost {
    calls: Mutex<Vec<HostCall>>,
    containers: IndexMap<ContainerId, MockContainer>,
    /// Per-item overrides of the container's item size.
    sizes: HashMap<ItemId, Size>,
    applier: TweenApplier,
    animations: bool,
    hook: Option<Box<dyn MoveHook>>,
}

impl Default for MockHost {
    fn default() -> Self {
        Self::new()
    }
}

impl MockHost {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            containers: IndexMap::new(),
            sizes: HashMap::new(),
            applier: TweenApplier::new(),
            animations: true,
            hook: None,
        }
    }

    pub fn with_container(
        mut self,
        id: ContainerId,
        bounds: Rect,
        orientation: Orientation,
        item_size: Size,
        items: &[ItemId],
    ) -> Self {
        self.add_container(id, bounds, orientation, item_size, items);
        self
    }

    pub fn add_container(
        &mut self,
        id: ContainerId,
        bounds: Rect,
        orientation: Orientation,
        item_size: Size,
        items: &[ItemId],
    ) {
        self.containers.insert(
            id,
            MockContainer {
                bounds,
                orientation,
                item_size,
                items: items.to_vec(),
            },
        );
    }

    /// Give `item` its own size wherever it is laid out.
    pub fn with_item_size(mut self, item: ItemId, size: Size) -> Self {
        self.sizes.insert(item, size);
        self
    }

    /// Report no transition applier, so every animation cycle completes at once.
    pub fn without_animations(mut self) -> Self {
        self.animations = false;
        self
    }

    pub fn with_move_hook(mut self, hook: impl MoveHook + 'static) -> Self {
        self.hook = Some(Box::new(hook));
        self
    }

    /// Advance running transitions.
    pub fn tick(&mut self, dt: Duration) {
        self.applier.update(dt);
    }

    pub fn applier(&self) -> &TweenApplier {
        &self.applier
    }

    /// Current order of a container. Unknown containers are empty.
    pub fn order(&self, container: ContainerId) -> Vec<ItemId> {
        self.containers
            .get(&container)
            .map(|c| c.items.clone())
            .unwrap_or_default()
    }

    pub fn container_of(&self, item: ItemId) -> Option<ContainerId> {
        self.containers
            .iter()
            .find(|(_, c)| c.items.contains(&item))
            .map(|(id, _)| *id)
    }

    /// Resting rect of `item`, ignoring any transition.
    pub fn layout_rect(&self, item: ItemId) -> Option<Rect> {
        self.containers.values().find_map(|c| {
            let index = c.items.iter().position(|&candidate| candidate == item)?;
            Some(c.slot(index, &self.sizes))
        })
    }

    /// Get all recorded calls.
    pub fn calls(&self) -> Vec<HostCall> {
        self.calls.lock().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().clear();
    }

    pub fn transitions(&self) -> Vec<(ItemId, Vec2, Duration)> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                HostCall::Transition { item, delta, duration } => Some((*item, *delta, *duration)),
                _ => None,
            })
            .collect()
    }

    pub fn count_transitions(&self) -> usize {
        self.transitions().len()
    }

    pub fn count_inserts(&self) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|call| matches!(call, HostCall::Insert { .. }))
            .count()
    }

    pub fn move_events(&self) -> Vec<MoveEvent> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                HostCall::Move(event) => Some(*event),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: HostCall) {
        self.calls.lock().push(call);
    }
}

impl GeometryProvider for MockHost {
    fn measure(&self, item: ItemId, compensate_transform: bool) -> Option<Rect> {
        self.record(HostCall::Measure {
            item,
            compensate_transform,
        });
        let rect = self.layout_rect(item)?;
        if compensate_transform {
            Some(rect)
        } else {
            Some(rect.translate(self.applier.offset(item)))
        }
    }

    fn measure_container(&self, container: ContainerId) -> Option<Rect> {
        self.containers.get(&container).map(|c| c.bounds)
    }
}

impl ContainerMutator for MockHost {
    fn items(&self, container: ContainerId) -> Vec<ItemId> {
        self.order(container)
    }

    fn insert(&mut self, container: ContainerId, item: ItemId, position: InsertPosition) {
        self.record(HostCall::Insert {
            container,
            item,
            position,
        });
        if !self.containers.contains_key(&container) {
            return;
        }
        for c in self.containers.values_mut() {
            c.items.retain(|&candidate| candidate != item);
        }
        let Some(target) = self.containers.get_mut(&container) else {
            return;
        };
        let index = match position {
            InsertPosition::Before(sibling) => target
                .items
                .iter()
                .position(|&candidate| candidate == sibling)
                .unwrap_or(target.items.len()),
            InsertPosition::AtEnd => target.items.len(),
        };
        target.items.insert(index, item);
    }
}

impl TransitionApplier for MockHost {
    fn apply_transition(&mut self, item: ItemId, delta: Vec2, duration: Duration, easing: Easing) {
        self.record(HostCall::Transition { item, delta, duration });
        self.applier.apply_transition(item, delta, duration, easing);
    }
}

impl MoveHook for MockHost {
    fn on_move(&mut self, event: &MoveEvent) -> MoveVerdict {
        self.record(HostCall::Move(*event));
        match self.hook.as_mut() {
            Some(hook) => hook.on_move(event),
            None => MoveVerdict::Allow,
        }
    }
}

impl SortHost for MockHost {
    fn transition_applier(&mut self) -> Option<&mut dyn TransitionApplier> {
        if self.animations { Some(self) } else { None }
    }

    /// Always consulted so every move is recorded; defers to the installed hook.
    fn move_hook(&mut self) -> Option<&mut dyn MoveHook> {
        Some(self)
    }
}
