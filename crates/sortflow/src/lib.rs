//! Sortflow - drag-to-reorder with interruptible FLIP animations
//!
//! This crate decides where a dragged item belongs and animates the items that
//! make room for it:
//! - Reorder Decision Engine with hysteresis against boundary flapping
//! - Animation State Manager that keeps perceived speed constant when a reorder
//!   interrupts a running transition
//! - Single-session drag controller driving both through host traits
//! - TOML-loadable per-container options
//!
//! The engine owns no visual elements. A host implements [`SortHost`] to measure
//! and reorder items, and optionally [`TransitionApplier`] to render transitions.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! # use sortflow::{ContainerId, DragController, SortableOptions, SortHost};
//! # use sortflow_core::math::vec2;
//! # fn run(host: &mut impl SortHost, list: ContainerId, items: &[sortflow::ItemId]) -> sortflow::SortResult<()> {
//! let mut controller = DragController::new();
//! controller.register(list, SortableOptions::new().swap_threshold(0.65))?;
//!
//! controller.start_drag(&*host, list, items[0], vec2(10.0, 10.0))?;
//! // On every pointer move, with the item under the pointer:
//! controller.drag_over(host, list, vec2(10.0, 140.0), Some(items[2]))?;
//! let dropped = controller.drop(&*host)?;
//!
//! // In the frame loop:
//! controller.tick(std::time::Duration::from_millis(16));
//! # let _ = dropped;
//! # Ok(())
//! # }
//! ```

pub mod animation;
pub mod config;
pub mod controller;
pub mod error;
pub mod host;
pub mod id;
pub mod list;
pub mod reorder;
pub mod scheduler;
pub mod session;
pub mod transition;

pub use animation::{AnimationRecord, AnimationState, AnimationStateManager, AnimationSummary, AnimationTask, CompletionCallback};
pub use config::{Direction, OrientationResolver, SortableOptions, detect_orientation};
pub use controller::DragController;
pub use error::{ConfigError, SortError, SortResult};
pub use host::{
    ContainerMutator, GeometryProvider, InsertPosition, MoveEvent, MoveHook, MoveVerdict, SortHost, TransitionApplier,
};
pub use id::{ContainerId, ItemId};
pub use list::SortableList;
pub use reorder::{Decision, HysteresisState, Side};
pub use scheduler::{Scheduler, TimerId};
pub use session::{DragSession, DropEvent};
pub use transition::{Easing, Tween, TweenApplier};
