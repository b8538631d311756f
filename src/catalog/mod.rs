//! Catalog module - Discovers every available icon
//!
//! Provides:
//! - builtin: compiled-in icon table
//! - entry: catalog entries, key grammar, snapshot merge
//! - scan: table, kind, directory and archive scanners
//! - store: fast snapshot and single-flight complete build

pub mod builtin;
pub mod entry;
pub mod scan;
pub mod store;
