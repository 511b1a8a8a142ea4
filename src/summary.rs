//! Accumulation of walk results and their display
//!
//! The collector is the visitor a walk is driven against: it records every
//! visited path in traversal order, resolves sizes for regular files, and
//! tallies failures skipped under the default policy. `finalize` turns it
//! into a [`WalkSummary`], which the printers render as plain lines, a
//! human-readable block, or JSON.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Serialize;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::walk::{Entry, EntryKind, ErrorPolicy, Visitor, WalkError};

/// Configuration for result collection.
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    /// Resolve sizes for regular files. When false, no metadata queries
    /// are issued at all and the summary carries no size total.
    pub track_sizes: bool,
    /// Policy for entries whose fresh metadata query fails.
    pub on_stat_error: ErrorPolicy,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            track_sizes: true,
            on_stat_error: ErrorPolicy::Skip,
        }
    }
}

/// Counters for failures skipped during a run, by class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ErrorTally {
    /// Directories whose children could not be listed, plus entries whose
    /// type could not be determined.
    pub list: u64,
    /// Entries whose fresh metadata query failed.
    pub metadata: u64,
}

impl ErrorTally {
    pub fn is_empty(&self) -> bool {
        self.list == 0 && self.metadata == 0
    }

    /// Short description of the nonzero classes, e.g.
    /// "2 unreadable directories, 1 unreadable entry".
    pub fn describe(&self) -> String {
        let mut parts = Vec::new();
        if self.list > 0 {
            let noun = if self.list == 1 { "directory" } else { "directories" };
            parts.push(format!("{} unreadable {}", self.list, noun));
        }
        if self.metadata > 0 {
            let noun = if self.metadata == 1 { "entry" } else { "entries" };
            parts.push(format!("{} unreadable {}", self.metadata, noun));
        }
        parts.join(", ")
    }
}

/// Everything one completed walk produced.
#[derive(Debug, Clone)]
pub struct WalkSummary {
    /// The root exactly as supplied by the caller.
    pub root: PathBuf,
    /// Every visited path, in traversal order, not deduplicated.
    pub visited: Vec<PathBuf>,
    /// Sum of regular-file sizes in bytes; `None` when size tracking was
    /// off. Directories, symlinks and special files contribute nothing.
    pub total_bytes: Option<u64>,
    /// Failures skipped under the default policy.
    pub skipped: ErrorTally,
}

impl WalkSummary {
    /// Number of visited entries, the root included.
    pub fn entries(&self) -> usize {
        self.visited.len()
    }
}

/// Visitor that accumulates one run's results.
///
/// Owns the visited sequence and the size total exclusively for the
/// lifetime of the run; nothing is shared or global, so repeated runs in
/// one process cannot leak state into each other.
#[derive(Debug, Default)]
pub struct SummaryCollector {
    config: CollectorConfig,
    visited: Vec<PathBuf>,
    total_bytes: u64,
    skipped: ErrorTally,
}

impl SummaryCollector {
    pub fn new(config: CollectorConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Consume the collector and produce the summary for `root`.
    pub fn finalize(self, root: PathBuf) -> WalkSummary {
        WalkSummary {
            root,
            visited: self.visited,
            total_bytes: self.config.track_sizes.then_some(self.total_bytes),
            skipped: self.skipped,
        }
    }
}

impl Visitor for SummaryCollector {
    fn visit(&mut self, entry: &Entry<'_>) -> Result<(), WalkError> {
        if self.config.track_sizes && entry.kind == EntryKind::File {
            // A fresh query rather than anything the walker already holds;
            // for a regular file this is the file's own size.
            match fs::metadata(entry.path) {
                Ok(meta) => self.total_bytes += meta.len(),
                Err(source) => match self.config.on_stat_error {
                    ErrorPolicy::Skip => self.skipped.metadata += 1,
                    ErrorPolicy::Abort => {
                        return Err(WalkError::Metadata {
                            path: entry.path.to_path_buf(),
                            source,
                        });
                    }
                },
            }
        }

        self.visited.push(entry.path.to_path_buf());
        Ok(())
    }

    fn list_failed(&mut self, _path: &Path, _err: &io::Error) {
        self.skipped.list += 1;
    }
}

/// Print the report in the default line-oriented form: the root as given,
/// each visited path below the root when listing, the entry count, and
/// the byte total (omitted when sizes were not tracked).
pub fn print_plain(summary: &WalkSummary, list_paths: bool) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    writeln!(out, "{}", summary.root.display())?;
    if list_paths {
        // The root line above is the first visited entry.
        for path in summary.visited.iter().skip(1) {
            writeln!(out, "{}", path.display())?;
        }
    }
    writeln!(out, "{}", summary.entries())?;
    if let Some(bytes) = summary.total_bytes {
        writeln!(out, "{}", bytes)?;
    }
    Ok(())
}

/// Print the report as a human-readable block with optional color.
pub fn print_human(summary: &WalkSummary, elapsed: Duration, use_color: bool) -> io::Result<()> {
    let color_choice = if use_color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    let mut stdout = StandardStream::stdout(color_choice);

    // Header
    let mut bold = ColorSpec::new();
    bold.set_bold(true);
    stdout.set_color(&bold)?;
    writeln!(stdout, "Walk Summary")?;
    stdout.reset()?;
    writeln!(stdout, "────────────")?;

    writeln!(stdout, "Root:      {}", summary.root.display())?;
    writeln!(stdout, "Entries:   {} total", format_number(summary.entries()))?;

    if let Some(bytes) = summary.total_bytes {
        let mut size_color = ColorSpec::new();
        size_color.set_fg(Some(Color::Green));

        write!(stdout, "Size:      ")?;
        stdout.set_color(&size_color)?;
        write!(stdout, "{}", format_size(bytes))?;
        stdout.reset()?;
        writeln!(stdout, " ({} bytes)", bytes)?;
    }

    if !summary.skipped.is_empty() {
        let mut warn_color = ColorSpec::new();
        warn_color.set_fg(Some(Color::Yellow));

        write!(stdout, "Skipped:   ")?;
        stdout.set_color(&warn_color)?;
        write!(stdout, "{}", summary.skipped.describe())?;
        stdout.reset()?;
        writeln!(stdout)?;
    }

    writeln!(stdout, "Elapsed:   {:.2}s", elapsed.as_secs_f64())?;
    Ok(())
}

/// Serializable mirror of the summary for `--json` output.
#[derive(Serialize)]
struct JsonReport<'a> {
    root: &'a Path,
    entries: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    total_bytes: Option<u64>,
    skipped: &'a ErrorTally,
    #[serde(skip_serializing_if = "Option::is_none")]
    paths: Option<&'a [PathBuf]>,
}

/// Print the report as pretty-printed JSON to stdout.
pub fn print_json(summary: &WalkSummary, include_paths: bool) -> io::Result<()> {
    let report = JsonReport {
        root: &summary.root,
        entries: summary.entries(),
        total_bytes: summary.total_bytes,
        skipped: &summary.skipped,
        paths: include_paths.then_some(summary.visited.as_slice()),
    };
    let json =
        serde_json::to_string_pretty(&report).map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    println!("{}", json);
    Ok(())
}

/// Format a size in bytes to human-readable form.
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1}G", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1}M", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1}K", bytes as f64 / KB as f64)
    } else {
        format!("{}B", bytes)
    }
}

/// Format a number with thousand separators.
fn format_number(n: usize) -> String {
    let s = n.to_string();
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::new();

    for (i, c) in chars.iter().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.insert(0, ',');
        }
        result.insert(0, *c);
    }

    result
}
