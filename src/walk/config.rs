//! Configuration types for the walker

use regex::Regex;

/// What to do when a filesystem operation fails mid-walk.
///
/// Applies per failure class: directory listing failures are governed by
/// the walker's policy, metadata (stat) failures by the collector's.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Record the failure and keep walking. The affected entry stays in
    /// the visited sequence; whatever could not be resolved contributes
    /// nothing to the totals.
    #[default]
    Skip,
    /// Stop the walk immediately and report a typed error.
    Abort,
}

/// Configuration for walking behavior.
#[derive(Debug, Default)]
pub struct WalkConfig {
    /// Policy for directories whose children cannot be listed (and for
    /// entries whose type cannot be determined).
    pub on_list_error: ErrorPolicy,
    /// Entries whose root-relative path matches any of these are neither
    /// visited nor descended into.
    pub exclude: Vec<Regex>,
}

impl WalkConfig {
    /// True if the root-relative path matches any exclude pattern.
    pub(crate) fn is_excluded(&self, relative: &str) -> bool {
        self.exclude.iter().any(|re| re.is_match(relative))
    }
}
