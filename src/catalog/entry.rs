//! Catalog entries, snapshots and the merge/dedup/sort step

use serde::Serialize;
use std::collections::HashSet;

use crate::core::icon::Icon;

/// Key of the "no override" sentinel
pub const DEFAULT_KEY: &str = "";

/// Key of the "choose custom file" sentinel
pub const CHOOSE_FILE_KEY: &str = "file:CHOOSE";

/// Prefix of plugin-resource keys: `plugin:<ownerId>::<path>`
pub const PLUGIN_PREFIX: &str = "plugin:";

/// Prefix of typed-registry keys: `rcType:<typeId>`
pub const KIND_PREFIX: &str = "rcType:";

/// Separator between owner id and resource path in plugin keys
pub const OWNER_SEPARATOR: &str = "::";

/// One discoverable icon
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogEntry {
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<Icon>,
    pub display_name: String,
}

impl CatalogEntry {
    pub fn new(key: impl Into<String>, icon: Option<Icon>, display_name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            icon,
            display_name: display_name.into(),
        }
    }

    pub fn is_sentinel(&self) -> bool {
        self.key == DEFAULT_KEY || self.key == CHOOSE_FILE_KEY
    }
}

/// Build a plugin-resource key
pub fn plugin_key(owner_id: &str, resource_path: &str) -> String {
    format!("{}{}{}{}", PLUGIN_PREFIX, owner_id, OWNER_SEPARATOR, resource_path)
}

/// Build a typed-registry key
pub fn kind_key(type_id: &str) -> String {
    format!("{}{}", KIND_PREFIX, type_id)
}

/// Split `<ownerId>::/<path>` into its parts. Resource paths always start
/// with `/`, so owner ids may themselves contain `::`.
pub fn split_owner_path(value: &str) -> Option<(&str, &str)> {
    let at = value.find("::/")?;
    let (owner, path) = (&value[..at], &value[at + OWNER_SEPARATOR.len()..]);
    if owner.is_empty() {
        return None;
    }
    Some((owner, path))
}

/// The two fixed leading entries of every snapshot
pub fn sentinels() -> [CatalogEntry; 2] {
    [
        CatalogEntry::new(DEFAULT_KEY, None, "Default icon"),
        CatalogEntry::new(CHOOSE_FILE_KEY, None, "Choose custom icon…"),
    ]
}

/// Which build produced a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Completeness {
    Fast,
    Complete,
}

/// Immutable ordered catalog: two sentinels, then entries sorted by display name
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub completeness: Completeness,
    entries: Vec<CatalogEntry>,
}

impl Snapshot {
    /// Merge scanner outputs given in preference order
    pub fn merge(
        completeness: Completeness,
        sources: impl IntoIterator<Item = Vec<CatalogEntry>>,
    ) -> Self {
        let mut seen: HashSet<(String, String)> = HashSet::new();
        let mut rest: Vec<CatalogEntry> = Vec::new();

        for entry in sources.into_iter().flatten() {
            if entry.is_sentinel() {
                continue;
            }
            if seen.insert((entry.key.clone(), entry.display_name.clone())) {
                rest.push(entry);
            }
        }

        rest.sort_by_cached_key(|e| e.display_name.to_lowercase());

        let mut entries = Vec::with_capacity(rest.len() + 2);
        entries.extend(sentinels());
        entries.extend(rest);

        Self {
            completeness,
            entries,
        }
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.key == key)
    }

    /// Entries whose display name contains `needle` (case-insensitive), sentinels kept
    pub fn filter(&self, needle: &str) -> Vec<&CatalogEntry> {
        let needle = needle.to_lowercase();
        self.entries
            .iter()
            .filter(|e| e.is_sentinel() || e.display_name.to_lowercase().contains(&needle))
            .collect()
    }
}
