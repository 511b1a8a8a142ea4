//! Recursive deterministic directory walking

use std::fs;
use std::path::Path;

use super::config::{ErrorPolicy, WalkConfig};
use super::error::WalkError;
use super::visitor::{Entry, EntryKind, Visitor};

/// Depth-first walker that visits every entry under a root exactly once.
///
/// A directory's own entry is visited before its children, and children
/// are visited in lexicographic filename order, so two walks over an
/// unmodified tree produce the same sequence. Symlinks are visited but
/// never descended into. The walker holds no aggregate state of its own;
/// everything observable accumulates in the visitor.
pub struct Walker {
    config: WalkConfig,
}

impl Walker {
    pub fn new(config: WalkConfig) -> Self {
        Self { config }
    }

    /// Walk the tree rooted at `root`, feeding every entry to `visitor`.
    ///
    /// Fails up front for an empty or inaccessible root, before any visit.
    /// Mid-walk listing failures follow the configured policy; an error
    /// returned by the visitor aborts the remainder of the walk and
    /// becomes the walk's result.
    pub fn walk<V: Visitor>(&self, root: &Path, visitor: &mut V) -> Result<(), WalkError> {
        if root.as_os_str().is_empty() {
            return Err(WalkError::EmptyRoot);
        }

        let file_type = match fs::symlink_metadata(root) {
            Ok(meta) => meta.file_type(),
            Err(source) => {
                return Err(WalkError::Root {
                    path: root.to_path_buf(),
                    source,
                });
            }
        };

        let kind = EntryKind::from_file_type(file_type);
        visitor.visit(&Entry { path: root, kind })?;

        if kind.is_dir() {
            self.walk_dir(root, root, visitor)?;
        }
        Ok(())
    }

    /// Visit the children of `dir` in filename order, recursing into
    /// subdirectories after their own visit.
    fn walk_dir<V: Visitor>(
        &self,
        root: &Path,
        dir: &Path,
        visitor: &mut V,
    ) -> Result<(), WalkError> {
        let reader = match fs::read_dir(dir) {
            Ok(reader) => reader,
            Err(source) => {
                return match self.config.on_list_error {
                    ErrorPolicy::Skip => {
                        visitor.list_failed(dir, &source);
                        Ok(())
                    }
                    ErrorPolicy::Abort => Err(WalkError::List {
                        path: dir.to_path_buf(),
                        source,
                    }),
                };
            }
        };

        let mut children = Vec::new();
        for item in reader {
            match item {
                Ok(child) => children.push(child),
                Err(source) => match self.config.on_list_error {
                    ErrorPolicy::Skip => visitor.list_failed(dir, &source),
                    ErrorPolicy::Abort => {
                        return Err(WalkError::List {
                            path: dir.to_path_buf(),
                            source,
                        });
                    }
                },
            }
        }
        children.sort_by_key(|child| child.file_name());

        for child in children {
            let path = child.path();

            if self.is_excluded(root, &path) {
                continue;
            }

            let (kind, type_error) = match child.file_type() {
                Ok(file_type) => (EntryKind::from_file_type(file_type), None),
                Err(source) if self.config.on_list_error == ErrorPolicy::Abort => {
                    return Err(WalkError::List { path, source });
                }
                // Entry stays in the sequence with its type unknown.
                Err(source) => (EntryKind::Other, Some(source)),
            };

            visitor.visit(&Entry { path: &path, kind })?;
            if let Some(err) = &type_error {
                visitor.list_failed(&path, err);
            }

            if kind.is_dir() {
                self.walk_dir(root, &path, visitor)?;
            }
        }

        Ok(())
    }

    fn is_excluded(&self, root: &Path, path: &Path) -> bool {
        if self.config.exclude.is_empty() {
            return false;
        }
        let relative = path.strip_prefix(root).unwrap_or(path);
        self.config.is_excluded(&relative.to_string_lossy())
    }
}
