//! Error types for sortflow.
//!
//! Only setup and session misuse are errors. Anything that goes wrong while
//! deciding or animating degrades to "no reorder" or "no transition".

use std::path::PathBuf;

use crate::id::{ContainerId, ItemId};

/// Invalid container configuration, reported when options are loaded or registered.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A threshold is outside its allowed range.
    #[error("invalid {name}: {value} (expected {expected})")]
    InvalidThreshold {
        name: &'static str,
        value: f32,
        expected: &'static str,
    },

    /// Animation duration is not a finite, non-negative number of milliseconds.
    #[error("invalid animation duration: {0}ms")]
    InvalidDuration(f32),

    /// The TOML document could not be parsed into options.
    #[error("failed to parse sortable options: {0}")]
    Parse(#[from] toml::de::Error),

    /// The options file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised by the drag controller.
#[derive(Debug, thiserror::Error)]
pub enum SortError {
    /// A drag session is already in progress.
    #[error("a drag session is already active for item {0}")]
    SessionActive(ItemId),

    /// The operation needs an active drag session.
    #[error("no drag session is active")]
    NoActiveSession,

    /// The container was never registered with the controller.
    #[error("unknown container {0}")]
    UnknownContainer(ContainerId),

    /// The item is not a member of the given container.
    #[error("item {item} is not in container {container}")]
    ItemNotInContainer { item: ItemId, container: ContainerId },

    /// The container has dragging disabled.
    #[error("container {0} is disabled")]
    Disabled(ContainerId),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type for controller operations.
pub type SortResult<T> = Result<T, SortError>;
