//! Per-entry visitor capability driven by the walker

use std::fs::FileType;
use std::io;
use std::path::Path;

use super::error::WalkError;

/// What kind of filesystem object an entry is, resolved without following
/// symlinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Regular file. The only kind that contributes to size totals.
    File,
    /// Directory. Will be descended into after its own visit.
    Dir,
    /// Symbolic link. Visited and counted, never followed.
    Symlink,
    /// Anything else (sockets, fifos, devices), or unknown because the
    /// type query failed under the skip policy.
    Other,
}

impl EntryKind {
    pub fn from_file_type(file_type: FileType) -> Self {
        if file_type.is_symlink() {
            EntryKind::Symlink
        } else if file_type.is_dir() {
            EntryKind::Dir
        } else if file_type.is_file() {
            EntryKind::File
        } else {
            EntryKind::Other
        }
    }

    pub fn is_dir(self) -> bool {
        self == EntryKind::Dir
    }
}

/// One visited filesystem entry: the path exactly as produced by the walk
/// (given root joined with descendant names) and its kind.
#[derive(Debug, Clone, Copy)]
pub struct Entry<'a> {
    pub path: &'a Path,
    pub kind: EntryKind,
}

/// Per-entry hook invoked by the walker, once per entry, in traversal
/// order.
///
/// Returning `Ok(())` continues the walk; returning an error aborts the
/// remainder immediately and the walker propagates it as the walk's
/// result.
pub trait Visitor {
    fn visit(&mut self, entry: &Entry<'_>) -> Result<(), WalkError>;

    /// Notification that a directory's children could not be listed (or an
    /// entry's type could not be determined) and the walk is continuing
    /// under the skip policy. The affected entry has already been visited.
    fn list_failed(&mut self, path: &Path, err: &io::Error) {
        let _ = (path, err);
    }
}
