//! Error types.
//!
//! Two families live here and they never mix:
//! - [`AccessError`] is a per-node fault raised while reading the input graph.
//!   The cloner absorbs it and omits the affected node.
//! - [`ExportError`] and [`ConfigError`] are returned to the caller.

use std::{io, path::PathBuf};

/// A fault raised while reading one node of the input graph.
///
/// These never escape an export: the traversal logs them and leaves the
/// faulted member, entry, or item out of the snapshot.
#[derive(Debug, thiserror::Error)]
pub enum AccessError {
    /// The record does not expose a member with this name.
    #[error("no member named `{name}`")]
    NoSuchMember {
        /// The requested member name.
        name: String,
    },
    /// An interior-mutability cell is currently borrowed mutably or locked.
    #[error("value is busy (already borrowed or locked)")]
    Busy,
    /// A lock was poisoned by a panic in another thread.
    #[error("lock poisoned")]
    Poisoned,
    /// A computed accessor failed.
    #[error("member unavailable: {reason}")]
    Unavailable {
        /// Why the member could not be produced.
        reason: String,
    },
}

impl AccessError {
    /// Constructs [`AccessError::NoSuchMember`].
    pub fn no_such_member(name: &str) -> Self {
        Self::NoSuchMember {
            name: name.to_owned(),
        }
    }

    /// Constructs [`AccessError::Unavailable`].
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }
}

/// Failure to persist a snapshot.
///
/// Traversal never fails; only the file-system steps can.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// The destination's parent directory could not be created.
    #[error("failed to create directory for {path}: {source}")]
    CreateDir {
        /// The destination path whose parent was being created.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The snapshot text could not be written.
    #[error("failed to write snapshot to {path}: {source}")]
    Write {
        /// The destination path.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// Invalid engine configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A token pattern failed to compile.
    #[error("invalid token pattern `{pattern}`: {source}")]
    InvalidTokenPattern {
        /// The offending pattern text.
        pattern: String,
        /// The regex compilation error.
        #[source]
        source: regex::Error,
    },
    /// A token pattern lacks a required named capture group.
    #[error("token pattern `{pattern}` has no `(?P<{group}>...)` capture group")]
    MissingCaptureGroup {
        /// The offending pattern text.
        pattern: String,
        /// The missing group name.
        group: &'static str,
    },
    /// A sensitive key fragment was empty, which would match every key.
    #[error("sensitive key fragments must not be empty")]
    EmptyKeyFragment,
}
