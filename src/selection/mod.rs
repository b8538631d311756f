//! Selection module - persisted icon choices for runnable items
//!
//! Provides:
//! - `SelectionEntry`, the portable tagged pointer stored per item
//! - Resolution of entries back to live icons, and of chosen catalog keys to entries
//! - The per-item selection map with its display-icon fallback chain

pub mod entry;
pub mod resolver;
pub mod service;
