//! Unified output record model
//!
//! Every CLI command maps its results to `Record`s before rendering.

use serde::{Deserialize, Serialize};

use crate::core::icon::Icon;

/// The kind of output record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Icon,
    Selection,
    Item,
    Action,
    Run,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    pub kind: RecordKind,

    /// Catalog key or composite key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    /// Human-readable label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Locator of the resolved icon
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl Record {
    pub fn new(kind: RecordKind) -> Self {
        Self {
            kind,
            key: None,
            name: None,
            icon: None,
            data: None,
        }
    }

    /// A catalog entry
    pub fn icon(key: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self::new(RecordKind::Icon).with_key(key).with_name(display_name)
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_icon(mut self, icon: Option<&Icon>) -> Self {
        self.icon = icon.map(Icon::locator);
        self
    }

    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }
}

/// Ordered records produced by one command
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordSet {
    pub items: Vec<Record>,
}

impl RecordSet {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn push(&mut self, item: Record) {
        self.items.push(item);
    }

    pub fn extend(&mut self, items: impl IntoIterator<Item = Record>) {
        self.items.extend(items);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromIterator<Record> for RecordSet {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}
