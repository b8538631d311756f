//! Toolbar module - the shortcut bar
//!
//! Provides:
//! - Configured items and editor rows (order, overrides, enable/show flags)
//! - Run/Edit action descriptors
//! - The memoized effective action list

pub mod action;
pub mod config;
pub mod sync;
