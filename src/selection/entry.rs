//! Persisted, portable icon selections
//!
//! A selection describes how to re-derive an icon without any catalog in
//! memory. Serialized as `{"mode": "...", "value": "..."}`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", content = "value", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SelectionEntry {
    /// No override; never stored
    #[default]
    Default,
    /// Dotted key into the compiled-in icon table
    CatalogKey(String),
    /// Absolute path of a raster or vector image
    File(PathBuf),
    /// Id of an entry in the kind registry
    TypedRegistry(String),
    /// `<ownerId>::<resource path>` of a plugin-bundled icon
    PluginResource(String),
}

impl SelectionEntry {
    pub fn is_default(&self) -> bool {
        matches!(self, SelectionEntry::Default)
    }
}
