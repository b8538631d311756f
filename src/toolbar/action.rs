//! Renderable shortcut-bar actions

use serde::Serialize;

use crate::core::error::QuickRunError;
use crate::host::{RunnableItem, RunnableRegistry};

/// Launches one runnable item by name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunAction {
    pub actual_name: String,
    pub display_name: String,
    pub show_name: bool,
}

impl RunAction {
    /// Button label; empty when the item is shown as an icon only
    pub fn text(&self) -> &str {
        if self.show_name {
            &self.display_name
        } else {
            ""
        }
    }

    pub fn description(&self) -> String {
        format!("Run \"{}\"", self.actual_name)
    }

    /// Whether `item` is the one this action runs; names match ignoring case
    pub fn targets(&self, item: &RunnableItem) -> bool {
        item.name.to_lowercase() == self.actual_name.to_lowercase()
    }

    /// Execute the targeted item
    pub fn perform(&self, registry: &dyn RunnableRegistry) -> anyhow::Result<()> {
        let item = registry
            .list_all()
            .into_iter()
            .find(|item| self.targets(item))
            .ok_or_else(|| QuickRunError::ItemNotFound(self.actual_name.clone()))?;
        tracing::debug!(name = %item.name, type_id = %item.type_id, "running item");
        registry.execute_by_name(&item.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum BarAction {
    Run(RunAction),
    /// Opens the item editor; always last
    Edit,
}

impl BarAction {
    pub const EDIT_TEXT: &'static str = "Edit Quick Run Items…";

    pub fn text(&self) -> &str {
        match self {
            BarAction::Run(run) => run.text(),
            BarAction::Edit => "",
        }
    }

    pub fn description(&self) -> String {
        match self {
            BarAction::Run(run) => run.description(),
            BarAction::Edit => Self::EDIT_TEXT.to_string(),
        }
    }

    pub fn as_run(&self) -> Option<&RunAction> {
        match self {
            BarAction::Run(run) => Some(run),
            BarAction::Edit => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recorder {
        ran: RefCell<Vec<String>>,
    }

    impl RunnableRegistry for Recorder {
        fn list_all(&self) -> Vec<RunnableItem> {
            vec![RunnableItem::new("Main App", "Application")]
        }

        fn execute_by_name(&self, name: &str) -> anyhow::Result<()> {
            self.ran.borrow_mut().push(name.to_string());
            Ok(())
        }
    }

    fn action(show_name: bool) -> RunAction {
        RunAction {
            actual_name: "main app".to_string(),
            display_name: "Main".to_string(),
            show_name,
        }
    }

    #[test]
    fn test_text_and_description() {
        assert_eq!(action(true).text(), "Main");
        assert_eq!(action(false).text(), "");
        assert_eq!(action(true).description(), "Run \"main app\"");
        assert_eq!(BarAction::Edit.description(), BarAction::EDIT_TEXT);
    }

    #[test]
    fn test_perform_matches_name_ignoring_case() {
        let registry = Recorder::default();
        action(true).perform(&registry).unwrap();
        assert_eq!(*registry.ran.borrow(), vec!["Main App".to_string()]);
    }

    #[test]
    fn test_targets_ignores_case() {
        assert!(action(true).targets(&RunnableItem::new("Main App", "Application")));
        assert!(action(true).targets(&RunnableItem::new("MAIN APP", "Shell")));
        assert!(!action(true).targets(&RunnableItem::new("Main", "Application")));
    }

    #[test]
    fn test_perform_unknown_item() {
        let registry = Recorder::default();
        let missing = RunAction {
            actual_name: "Other".to_string(),
            display_name: "Other".to_string(),
            show_name: true,
        };
        let err = missing.perform(&registry).unwrap_err();
        assert!(err.to_string().contains("Other"));
    }
}
