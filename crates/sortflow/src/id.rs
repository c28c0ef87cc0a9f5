//! Stable handles for items and containers.
//!
//! The engine never touches host objects directly; it refers to them through
//! these opaque ids and asks the host for geometry and ordering.

use std::fmt;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(u64);

        impl $name {
            /// Create an id by hashing a string key.
            pub fn new(key: &str) -> Self {
                Self(fnv1a(key))
            }

            /// Create an id from a raw value.
            pub const fn from_raw(id: u64) -> Self {
                Self(id)
            }

            pub const fn as_u64(&self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "#{}"), self.0)
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                Self(id)
            }
        }
    };
}

define_id!(
    /// A draggable item.
    ItemId,
    "item"
);

define_id!(
    /// A container holding an ordered run of items.
    ContainerId,
    "container"
);

/// FNV-1a, so string keys hash identically across runs.
fn fnv1a(s: &str) -> u64 {
    const FNV_OFFSET_BASIS: u64 = 0xcbf29ce484222325;
    const FNV_PRIME: u64 = 0x100000001b3;

    s.as_bytes().iter().fold(FNV_OFFSET_BASIS, |hash, byte| {
        (hash ^ *byte as u64).wrapping_mul(FNV_PRIME)
    })
}
