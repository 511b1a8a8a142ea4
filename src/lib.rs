//! Dirwalk - Recursive directory walking with entry counts and size totals

pub mod summary;
pub mod walk;

pub use summary::{
    CollectorConfig, ErrorTally, SummaryCollector, WalkSummary, print_human, print_json,
    print_plain,
};
pub use walk::{Entry, EntryKind, ErrorPolicy, Visitor, WalkConfig, WalkError, Walker};
