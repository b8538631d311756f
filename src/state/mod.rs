//! State module - Manages the .quickrun/ state directory
//!
//! Provides:
//! - Persisted selections and configured items (quick_run.json)
//! - Save metadata

pub mod meta;
pub mod store;
