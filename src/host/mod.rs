//! Host module - Boundary collaborators supplied by the embedding application
//!
//! Provides:
//! - Runnable-item registry (enumerate and execute)
//! - Kind registry (typed entries with their own icons)
//! - Interactive file picker
//! - Progress reporting for background builds
//! - Persistence of selections and configured items
//!
//! `workspace` implements them on top of JSON files for the CLI; `config`
//! carries the catalog settings.

pub mod config;
pub mod workspace;

use std::path::PathBuf;

use crate::core::icon::ICON_EXTENSIONS;
use crate::state::store::QuickRunState;

/// Composite identity of a runnable item: `"<typeId>::<name>"`
pub fn composite_key(type_id: &str, name: &str) -> String {
    format!("{}::{}", type_id, name)
}

/// A runnable item as seen in the live registry
#[derive(Debug, Clone, PartialEq)]
pub struct RunnableItem {
    pub name: String,
    pub type_id: String,
    pub is_temporary: bool,
    pub own_icon: Option<crate::core::icon::Icon>,
}

impl RunnableItem {
    pub fn new(name: impl Into<String>, type_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_id: type_id.into(),
            is_temporary: false,
            own_icon: None,
        }
    }

    pub fn temporary(mut self) -> Self {
        self.is_temporary = true;
        self
    }

    pub fn with_icon(mut self, icon: crate::core::icon::Icon) -> Self {
        self.own_icon = Some(icon);
        self
    }

    pub fn composite_key(&self) -> String {
        composite_key(&self.type_id, &self.name)
    }
}

/// Live registry of runnable items
pub trait RunnableRegistry {
    fn list_all(&self) -> Vec<RunnableItem>;

    fn execute_by_name(&self, name: &str) -> anyhow::Result<()>;
}

/// A typed entry ("kind") with its own label and icon
#[derive(Debug, Clone, PartialEq)]
pub struct Kind {
    pub id: String,
    pub display_label: String,
    pub icon: Option<crate::core::icon::Icon>,
}

/// Registry of kinds. Assumed small; icons are resolved eagerly.
pub trait KindRegistry: Send + Sync {
    fn list_all(&self) -> Vec<Kind>;

    fn find_by_id(&self, id: &str) -> Option<Kind> {
        self.list_all().into_iter().find(|k| k.id == id)
    }
}

impl KindRegistry for Vec<Kind> {
    fn list_all(&self) -> Vec<Kind> {
        self.clone()
    }
}

/// Extension filter handed to the file picker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileFilter {
    pub extensions: &'static [&'static str],
}

impl FileFilter {
    pub fn icons() -> Self {
        Self {
            extensions: ICON_EXTENSIONS,
        }
    }
}

/// Interactive file chooser. `None` means the user cancelled.
pub trait FilePicker {
    fn pick_file(&self, filter: &FileFilter) -> Option<PathBuf>;
}

impl<F> FilePicker for F
where
    F: Fn(&FileFilter) -> Option<PathBuf>,
{
    fn pick_file(&self, filter: &FileFilter) -> Option<PathBuf> {
        self(filter)
    }
}

/// Receives status text from the background catalog build
pub trait ProgressSink: Send + Sync {
    fn set_text(&self, text: &str);
}

impl ProgressSink for () {
    fn set_text(&self, _text: &str) {}
}

/// Progress sink that forwards to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingProgress;

impl ProgressSink for TracingProgress {
    fn set_text(&self, text: &str) {
        tracing::info!(target: "quickrun::progress", "{}", text);
    }
}

/// Load/save of the persisted state under a fixed storage name
pub trait StateStore {
    /// Malformed or missing state loads as empty
    fn load(&self) -> QuickRunState;

    fn save(&self, state: &QuickRunState) -> anyhow::Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::icon::Icon;

    #[test]
    fn test_composite_key_format() {
        assert_eq!(composite_key("Application", "Main"), "Application::Main");
        assert_eq!(RunnableItem::new("Main", "Application").composite_key(), "Application::Main");
    }

    #[test]
    fn test_kind_registry_default_find() {
        let kinds = vec![Kind {
            id: "Application".to_string(),
            display_label: "Application".to_string(),
            icon: Some(Icon::builtin("RunConfigurations.Application", None)),
        }];
        assert!(kinds.find_by_id("Application").is_some());
        assert!(kinds.find_by_id("Gradle").is_none());
    }

    #[test]
    fn test_closure_file_picker() {
        let picker = |filter: &FileFilter| {
            assert_eq!(filter.extensions, ICON_EXTENSIONS);
            Some(PathBuf::from("/tmp/a.svg"))
        };
        assert_eq!(picker.pick_file(&FileFilter::icons()), Some(PathBuf::from("/tmp/a.svg")));
    }
}
