//! State store - read/write `.quickrun/quick_run.json`

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::core::paths::state_dir;
use crate::host::StateStore;
use crate::selection::entry::SelectionEntry;
use crate::state::meta::StateMeta;
use crate::toolbar::config::ConfiguredItem;

/// Fixed storage name of the persisted state
pub const STATE_FILE: &str = "quick_run.json";

/// Everything persisted between runs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuickRunState {
    /// Composite key -> icon selection
    pub selections: BTreeMap<String, SelectionEntry>,

    /// Shortcut-bar items in display order
    pub items: Vec<ConfiguredItem>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<StateMeta>,
}

/// Ensure the state directory exists
pub fn ensure_state_dir(root: &Path) -> Result<PathBuf> {
    let dir = state_dir(root);
    if !dir.exists() {
        fs::create_dir_all(&dir).context("Failed to create .quickrun directory")?;
    }
    Ok(dir)
}

/// JSON-file persistence rooted at a workspace
#[derive(Debug, Clone)]
pub struct JsonStateStore {
    root: PathBuf,
}

impl JsonStateStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path(&self) -> PathBuf {
        state_dir(&self.root).join(STATE_FILE)
    }

    fn read(&self) -> Result<Option<QuickRunState>> {
        let path = self.path();
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(err).with_context(|| format!("Failed to read state file: {:?}", path))
            }
        };
        let state = serde_json::from_str(&content)
            .with_context(|| format!("Malformed state file: {:?}", path))?;
        Ok(Some(state))
    }
}

impl StateStore for JsonStateStore {
    fn load(&self) -> QuickRunState {
        match self.read() {
            Ok(Some(state)) => state,
            Ok(None) => QuickRunState::default(),
            Err(err) => {
                tracing::warn!(error = %format!("{:#}", err), "ignoring unreadable state, starting empty");
                QuickRunState::default()
            }
        }
    }

    fn save(&self, state: &QuickRunState) -> Result<()> {
        ensure_state_dir(&self.root)?;
        let mut stamped = state.clone();
        stamped.selections.retain(|_, entry| !entry.is_default());
        stamped.meta = Some(StateMeta::now());

        let path = self.path();
        let json = serde_json::to_string_pretty(&stamped)?;
        fs::write(&path, json).with_context(|| format!("Failed to write state file: {:?}", path))?;
        Ok(())
    }
}
