//! Reorder Decision Engine.
//!
//! Turns a pointer position and item geometry into an insertion decision.
//! Hysteresis carried in a per-session [`HysteresisState`] keeps the decision
//! from oscillating while a swapped neighbour is still sliding into place.
//!
//! The engine is split into:
//! - **boundary**: pointer beyond either end of the item run
//! - **swap**: commit, shadow and inverted zones on a single target
//! - **engine**: the full evaluation combining both with adjacency checks

pub mod boundary;
pub mod engine;
pub mod swap;
pub mod types;

pub use boundary::{pointer_before_first, pointer_past_last};
pub use engine::{EdgeItem, ReorderQuery, TargetInfo, evaluate};
pub use swap::{Shadow, SwapZones, in_same_line, insert_side, swap_direction};
pub use types::{Decision, HysteresisState, Side};
