//! Configured shortcut-bar items and the rows of the editing surface

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::host::RunnableItem;

/// A persisted shortcut-bar entry. Array position is the display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfiguredItem {
    /// Composite key `"<typeId>::<name>"`
    pub key: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_show_name")]
    pub show_name: bool,
}

fn default_show_name() -> bool {
    true
}

impl ConfiguredItem {
    pub fn new(key: impl Into<String>, enabled: bool) -> Self {
        Self {
            key: key.into(),
            display_name: None,
            enabled,
            show_name: true,
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = normalize_display_name(Some(display_name.into()));
        self
    }

    pub fn with_show_name(mut self, show_name: bool) -> Self {
        self.show_name = show_name;
        self
    }
}

/// Blank overrides mean "no override"
pub fn normalize_display_name(display_name: Option<String>) -> Option<String> {
    display_name
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// One row of the editing surface
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditorRow {
    pub key: String,
    pub name: String,
    pub type_id: String,
    pub display_name: Option<String>,
    pub enabled: bool,
    pub show_name: bool,
}

impl EditorRow {
    fn to_item(&self) -> ConfiguredItem {
        ConfiguredItem {
            key: self.key.clone(),
            display_name: normalize_display_name(self.display_name.clone()),
            enabled: self.enabled,
            show_name: self.show_name,
        }
    }
}

/// The ordered configured-item list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigService {
    items: Vec<ConfiguredItem>,
}

impl ConfigService {
    pub fn new(items: Vec<ConfiguredItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[ConfiguredItem] {
        &self.items
    }

    pub fn into_items(self) -> Vec<ConfiguredItem> {
        self.items
    }

    pub fn find(&self, key: &str) -> Option<&ConfiguredItem> {
        self.items.iter().find(|item| item.key == key)
    }

    /// Update an existing item in place (its `show_name` is kept) or append a
    /// new one that shows its name.
    pub fn upsert_or_append(&mut self, key: &str, display_name: Option<String>, enabled: bool) {
        let display_name = normalize_display_name(display_name);
        match self.items.iter_mut().find(|item| item.key == key) {
            Some(item) => {
                item.display_name = display_name;
                item.enabled = enabled;
            }
            None => self.items.push(ConfiguredItem {
                key: key.to_string(),
                display_name,
                enabled,
                show_name: true,
            }),
        }
    }

    /// Returns false when no item has `key`
    pub fn set_show_name(&mut self, key: &str, show_name: bool) -> bool {
        match self.items.iter_mut().find(|item| item.key == key) {
            Some(item) => {
                item.show_name = show_name;
                true
            }
            None => false,
        }
    }

    /// Wholesale replacement; no merge with the previous list
    pub fn replace_all_in_order(&mut self, items: Vec<ConfiguredItem>) {
        self.items = items;
    }

    /// Rows for the editor: saved items that still resolve, in stored order,
    /// then every live item not saved yet (disabled, no override).
    pub fn rows(&self, live: &[RunnableItem]) -> Vec<EditorRow> {
        let live: Vec<&RunnableItem> = live.iter().filter(|item| !item.is_temporary).collect();
        let by_key: HashMap<String, &RunnableItem> = live
            .iter()
            .map(|item| (item.composite_key(), *item))
            .collect();

        let mut seen = HashSet::new();
        let mut rows = Vec::new();

        for saved in &self.items {
            let Some(item) = by_key.get(&saved.key) else {
                continue;
            };
            if !seen.insert(saved.key.clone()) {
                continue;
            }
            rows.push(EditorRow {
                key: saved.key.clone(),
                name: item.name.clone(),
                type_id: item.type_id.clone(),
                display_name: saved.display_name.clone(),
                enabled: saved.enabled,
                show_name: saved.show_name,
            });
        }

        for item in live {
            let key = item.composite_key();
            if seen.insert(key.clone()) {
                rows.push(EditorRow {
                    key,
                    name: item.name.clone(),
                    type_id: item.type_id.clone(),
                    display_name: None,
                    enabled: false,
                    show_name: true,
                });
            }
        }

        rows
    }

    /// Save the editor's rows as the new item list
    pub fn apply_rows(&mut self, rows: &[EditorRow]) {
        self.replace_all_in_order(rows.iter().map(EditorRow::to_item).collect());
    }
}

/// Move the row at `from` to the drop position `to`, where `to` is an insertion
/// index into the list before removal. Returns false when either index is out
/// of range.
pub fn move_row<T>(rows: &mut Vec<T>, from: usize, to: usize) -> bool {
    if from >= rows.len() || to > rows.len() {
        return false;
    }
    let row = rows.remove(from);
    let target = if to > from { to - 1 } else { to };
    rows.insert(target, row);
    true
}
