//! Sortflow Core
//!
//! Shared primitives for the sortflow drag-reorder engine: geometry, math,
//! collections, logging and profiling.

pub mod alloc;
pub mod geometry;
pub mod logging;
pub mod math;
pub mod profiling;
