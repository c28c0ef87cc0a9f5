//! Profiling scopes based on the `puffin` crate.
//!
//! With the `profiling` feature disabled the macros expand to nothing, so
//! call sites never need their own `cfg`.

#[cfg(feature = "profiling")]
pub use puffin::{profile_function, profile_scope};

#[cfg(not(feature = "profiling"))]
pub use crate::{noop_profile_function as profile_function, noop_profile_scope as profile_scope};

#[cfg(not(feature = "profiling"))]
#[doc(hidden)]
#[macro_export]
macro_rules! noop_profile_function {
    () => {};
    ($data:expr) => {};
}

#[cfg(not(feature = "profiling"))]
#[doc(hidden)]
#[macro_export]
macro_rules! noop_profile_scope {
    ($name:expr) => {};
    ($name:expr, $data:expr) => {};
}

/// Turn scope collection on or off.
///
/// Scopes are cheap when disabled; hosts usually enable them only while a
/// profiler viewer is attached.
pub fn set_enabled(enabled: bool) {
    #[cfg(feature = "profiling")]
    puffin::set_scopes_on(enabled);
    #[cfg(not(feature = "profiling"))]
    let _ = enabled;
}

/// Mark a frame boundary. Call once per host frame.
#[inline]
pub fn new_frame() {
    #[cfg(feature = "profiling")]
    puffin::GlobalProfiler::lock().new_frame();
}
