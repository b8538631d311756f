//! Selection resolver - maps persisted selections to live icons and catalog
//! keys back to selections
//!
//! Resolution never fails loudly: bad keys, missing files, decode errors and
//! unknown kinds all come back as `None` so the caller can apply its fallback.

use std::sync::Arc;

use crate::catalog::builtin::{IconGroup, FALLBACK_ICON_KEY};
use crate::catalog::entry::{
    split_owner_path, CHOOSE_FILE_KEY, DEFAULT_KEY, KIND_PREFIX, PLUGIN_PREFIX,
};
use crate::catalog::scan::{locate_resource, ResourceRoot};
use crate::core::error::{QuickRunError, Result};
use crate::core::icon::Icon;
use crate::host::{FileFilter, FilePicker, KindRegistry};
use crate::selection::entry::SelectionEntry;

/// Fixed reference scale for rasterizing vector files
pub const DEFAULT_SVG_SCALE: f32 = 1.0;

pub struct SelectionResolver {
    table: &'static IconGroup,
    kinds: Arc<dyn KindRegistry>,
    roots: Vec<ResourceRoot>,
    svg_scale: f32,
}

impl SelectionResolver {
    pub fn new(
        table: &'static IconGroup,
        kinds: Arc<dyn KindRegistry>,
        roots: Vec<ResourceRoot>,
    ) -> Self {
        Self {
            table,
            kinds,
            roots,
            svg_scale: DEFAULT_SVG_SCALE,
        }
    }

    pub fn with_svg_scale(mut self, scale: f32) -> Self {
        self.svg_scale = scale;
        self
    }

    /// Resolve a selection to an icon; `None` for `Default` and on any failure
    pub fn resolve(&self, entry: &SelectionEntry) -> Option<Icon> {
        match self.try_resolve(entry) {
            Ok(icon) => icon,
            Err(err) => {
                tracing::debug!(?entry, error = %err, "icon selection did not resolve");
                None
            }
        }
    }

    /// The fixed icon used when no other source yields one
    pub fn fallback_icon(&self) -> Icon {
        self.table
            .lookup(FALLBACK_ICON_KEY)
            .map(|leaf| leaf.to_icon())
            .unwrap_or_else(|| Icon::builtin(FALLBACK_ICON_KEY, None))
    }

    fn try_resolve(&self, entry: &SelectionEntry) -> Result<Option<Icon>> {
        let icon = match entry {
            SelectionEntry::Default => return Ok(None),
            SelectionEntry::CatalogKey(key) => self
                .table
                .lookup(key)
                .map(|leaf| leaf.to_icon())
                .ok_or_else(|| QuickRunError::UnknownKey(key.clone()))?,
            SelectionEntry::File(path) => Icon::load_file(path, self.svg_scale)?,
            SelectionEntry::TypedRegistry(id) => {
                let kind = self
                    .kinds
                    .find_by_id(id)
                    .ok_or_else(|| QuickRunError::UnknownKind(id.clone()))?;
                return Ok(kind.icon);
            }
            SelectionEntry::PluginResource(value) => self.resolve_plugin_resource(value)?,
        };
        Ok(Some(icon))
    }

    fn resolve_plugin_resource(&self, value: &str) -> Result<Icon> {
        let unknown = || QuickRunError::UnknownKey(format!("{}{}", PLUGIN_PREFIX, value));
        let (owner, path) = split_owner_path(value).ok_or_else(unknown)?;

        self.roots
            .iter()
            .filter(|root| root.owner_id == owner)
            .find_map(|root| locate_resource(root, path).ok())
            .ok_or_else(unknown)
    }
}

/// Turn a key chosen from a catalog snapshot into a persistable selection.
///
/// The file sentinel asks `picker` for a path; `None` means the user cancelled.
pub fn build_entry_from_chosen_key(
    chosen_key: &str,
    picker: &dyn FilePicker,
) -> Option<SelectionEntry> {
    if chosen_key == DEFAULT_KEY {
        return Some(SelectionEntry::Default);
    }
    if chosen_key == CHOOSE_FILE_KEY {
        return picker
            .pick_file(&FileFilter::icons())
            .map(SelectionEntry::File);
    }
    if let Some(rest) = chosen_key.strip_prefix(PLUGIN_PREFIX) {
        return Some(SelectionEntry::PluginResource(rest.to_string()));
    }
    if let Some(id) = chosen_key.strip_prefix(KIND_PREFIX) {
        return Some(SelectionEntry::TypedRegistry(id.to_string()));
    }
    Some(SelectionEntry::CatalogKey(chosen_key.to_string()))
}
