//! Steward - Governance Decision Review Console
//!
//! Tracks autonomous organization-management decisions, presents a
//! filterable, sortable, paginated review queue, and records an audit
//! trail of reviewer actions. The view pipeline at the core is pure: it is
//! handed an immutable snapshot of decisions plus the caller's view state
//! and derives the page to render, never mutating its input.

pub mod actions;
pub mod audit;
pub mod cli;
pub mod config;
pub mod decision;
pub mod desk;
pub mod error;
pub mod metrics;
pub mod orgtree;
pub mod source;
pub mod view;

pub use error::{Result, StewardError};
