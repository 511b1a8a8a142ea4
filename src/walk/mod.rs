//! Directory tree walking core
//!
//! The walker drives a depth-first, deterministically ordered traversal
//! and reports each discovered entry to a [`Visitor`]; everything the run
//! accumulates lives on the visitor side. Failure handling is policy
//! driven: see [`ErrorPolicy`] and [`WalkError`].

mod config;
mod error;
mod visitor;
mod walker;

pub use config::{ErrorPolicy, WalkConfig};
pub use error::WalkError;
pub use visitor::{Entry, EntryKind, Visitor};
pub use walker::Walker;
