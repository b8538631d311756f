//! Action synchronizer - memoized effective action list
//!
//! The host may ask for the action list on every repaint. Actions are rebuilt
//! only when the effective model differs by value from the previous one;
//! otherwise the exact same `Arc` is handed back.

use arc_swap::ArcSwapOption;
use std::collections::HashMap;
use std::sync::Arc;

use crate::host::RunnableItem;
use crate::toolbar::action::{BarAction, RunAction};
use crate::toolbar::config::ConfiguredItem;

/// One enabled, still-resolvable configured item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelEntry {
    pub name: String,
    pub display_name: String,
    pub show_name: bool,
}

/// Compute the ordered effective model from the live registry and the
/// configured items. Disabled and orphaned items are skipped silently.
pub fn effective_model(live: &[RunnableItem], configured: &[ConfiguredItem]) -> Vec<ModelEntry> {
    let index: HashMap<String, &RunnableItem> = live
        .iter()
        .filter(|item| !item.is_temporary)
        .map(|item| (item.composite_key(), item))
        .collect();

    configured
        .iter()
        .filter(|c| c.enabled)
        .filter_map(|c| {
            let item = index.get(&c.key)?;
            Some(ModelEntry {
                name: item.name.clone(),
                display_name: c.display_name.clone().unwrap_or_else(|| item.name.clone()),
                show_name: c.show_name,
            })
        })
        .collect()
}

struct Synced {
    model: Vec<ModelEntry>,
    actions: Arc<[BarAction]>,
}

#[derive(Default)]
pub struct ActionSynchronizer {
    synced: ArcSwapOption<Synced>,
}

impl ActionSynchronizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run actions for the effective model followed by the edit action
    pub fn effective_actions(
        &self,
        live: &[RunnableItem],
        configured: &[ConfiguredItem],
    ) -> Arc<[BarAction]> {
        let model = effective_model(live, configured);

        if let Some(prev) = self.synced.load_full() {
            if prev.model == model {
                return Arc::clone(&prev.actions);
            }
        }

        let actions: Arc<[BarAction]> = model
            .iter()
            .map(|entry| {
                BarAction::Run(RunAction {
                    actual_name: entry.name.clone(),
                    display_name: entry.display_name.clone(),
                    show_name: entry.show_name,
                })
            })
            .chain(std::iter::once(BarAction::Edit))
            .collect();

        tracing::debug!(entries = model.len(), "rebuilt shortcut bar actions");
        self.synced.store(Some(Arc::new(Synced {
            model,
            actions: Arc::clone(&actions),
        })));
        actions
    }
}
