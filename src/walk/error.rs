//! Typed walk failures

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a walk.
///
/// Root problems are always fatal. Listing and metadata failures only
/// surface here when the corresponding policy is set to abort; under the
/// default skip policy they are tallied by the visitor instead.
#[derive(Debug, Error)]
pub enum WalkError {
    /// An empty root path was supplied.
    #[error("empty root path")]
    EmptyRoot,

    /// The root itself could not be read (missing or inaccessible).
    #[error("cannot access '{path}': {source}")]
    Root {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A directory's children could not be listed, or an entry's type
    /// could not be determined.
    #[error("cannot list '{path}': {source}")]
    List {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A fresh metadata query against a visited entry failed.
    #[error("cannot stat '{path}': {source}")]
    Metadata {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
