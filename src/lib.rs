//! quickrun - icon catalog, icon selection and the quick-run shortcut bar
//!
//! quickrun provides:
//! - An icon catalog merged from a built-in table, kinds and plugin resources,
//!   with a fast snapshot and a single-flight complete build
//! - Portable icon selections that resolve back to live icons
//! - A memoized shortcut-bar action list over configured runnable items
//! - A CLI driving all of it against a JSON-described workspace

pub mod catalog;
pub mod cli;
pub mod commands;
pub mod core;
pub mod host;
pub mod logging;
pub mod selection;
pub mod state;
pub mod toolbar;
