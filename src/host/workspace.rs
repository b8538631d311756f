//! JSON-described workspace standing in for the host IDE
//!
//! `.quickrun/workspace.json` lists the runnable items and kinds:
//!
//! ```json
//! {
//!   "items": [{"name": "Main", "type_id": "Application", "command": ["cargo", "run"]}],
//!   "kinds": [{"id": "Application", "label": "Application", "icon": "RunConfigurations.Application"}]
//! }
//! ```
//!
//! Icons are keys into the compiled-in table.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::catalog::builtin::BUILTIN_ICONS;
use crate::core::error::QuickRunError;
use crate::core::icon::Icon;
use crate::core::paths::state_dir;
use crate::host::{Kind, RunnableItem, RunnableRegistry};

pub const WORKSPACE_FILE: &str = "workspace.json";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkspaceFile {
    #[serde(default)]
    pub items: Vec<ItemSpec>,
    #[serde(default)]
    pub kinds: Vec<KindSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemSpec {
    pub name: String,
    pub type_id: String,
    #[serde(default)]
    pub temporary: bool,
    #[serde(default)]
    pub icon: Option<String>,
    /// Program and arguments; items without one cannot be run
    #[serde(default)]
    pub command: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KindSpec {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub icon: Option<String>,
}

fn table_icon(key: Option<&str>) -> Option<Icon> {
    let key = key?;
    let icon = BUILTIN_ICONS.lookup(key).map(|leaf| leaf.to_icon());
    if icon.is_none() {
        tracing::debug!(key, "workspace icon key not in table");
    }
    icon
}

#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
    file: WorkspaceFile,
}

impl Workspace {
    pub fn new(root: impl Into<PathBuf>, file: WorkspaceFile) -> Self {
        Self {
            root: root.into(),
            file,
        }
    }

    pub fn path(root: &Path) -> PathBuf {
        state_dir(root).join(WORKSPACE_FILE)
    }

    /// Load the workspace description; a missing file is an empty workspace
    pub fn load(root: &Path) -> Result<Self> {
        let path = Self::path(root);
        let file = match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content)
                .with_context(|| format!("Malformed workspace file: {:?}", path))?,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no workspace file, using an empty workspace");
                WorkspaceFile::default()
            }
            Err(err) => {
                return Err(err).with_context(|| format!("Failed to read workspace file: {:?}", path))
            }
        };
        Ok(Self::new(root, file))
    }

    /// Kinds with their icons resolved eagerly
    pub fn kinds(&self) -> Vec<Kind> {
        self.file
            .kinds
            .iter()
            .map(|k| Kind {
                id: k.id.clone(),
                display_label: k.label.clone(),
                icon: table_icon(k.icon.as_deref()),
            })
            .collect()
    }

    fn spec(&self, name: &str) -> Option<&ItemSpec> {
        self.file.items.iter().find(|item| item.name == name)
    }
}

impl RunnableRegistry for Workspace {
    fn list_all(&self) -> Vec<RunnableItem> {
        self.file
            .items
            .iter()
            .map(|spec| RunnableItem {
                name: spec.name.clone(),
                type_id: spec.type_id.clone(),
                is_temporary: spec.temporary,
                own_icon: table_icon(spec.icon.as_deref()),
            })
            .collect()
    }

    fn execute_by_name(&self, name: &str) -> Result<()> {
        let spec = self
            .spec(name)
            .ok_or_else(|| QuickRunError::ItemNotFound(name.to_string()))?;
        let (program, args) = match spec.command.as_deref() {
            Some([program, args @ ..]) => (program, args),
            _ => return Err(QuickRunError::NotExecutable(name.to_string()).into()),
        };

        let output = Command::new(program)
            .args(args)
            .current_dir(&self.root)
            .stdin(Stdio::null())
            .output()
            .with_context(|| format!("Failed to start {:?}", program))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!("{:?} exited with {}: {}", name, output.status, stderr.trim());
        }
        tracing::info!(name, status = %output.status, "runnable item finished");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write_workspace(root: &Path, json: &str) {
        fs::create_dir_all(state_dir(root)).unwrap();
        fs::write(Workspace::path(root), json).unwrap();
    }

    #[test]
    fn test_missing_workspace_is_empty() {
        let temp = tempdir().unwrap();
        let ws = Workspace::load(temp.path()).unwrap();
        assert!(ws.list_all().is_empty());
        assert!(ws.kinds().is_empty());
    }

    #[test]
    fn test_malformed_workspace_is_an_error() {
        let temp = tempdir().unwrap();
        write_workspace(temp.path(), "[");
        assert!(Workspace::load(temp.path()).is_err());
    }

    #[test]
    fn test_items_and_kinds() {
        let temp = tempdir().unwrap();
        write_workspace(
            temp.path(),
            r#"{
                "items": [
                    {"name": "Main", "type_id": "Application", "icon": "General.Settings"},
                    {"name": "Scratch", "type_id": "Application", "temporary": true}
                ],
                "kinds": [
                    {"id": "Application", "label": "Application", "icon": "RunConfigurations.Application"},
                    {"id": "Odd", "label": "Odd", "icon": "No.Such.Icon"}
                ]
            }"#,
        );
        let ws = Workspace::load(temp.path()).unwrap();

        let items = ws.list_all();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].own_icon.as_ref().map(Icon::locator).as_deref(), Some("General.Settings"));
        assert!(items[1].is_temporary);

        let kinds = ws.kinds();
        assert!(kinds[0].icon.is_some());
        assert!(kinds[1].icon.is_none());
    }

    #[test]
    fn test_execute_errors() {
        let temp = tempdir().unwrap();
        write_workspace(
            temp.path(),
            r#"{"items": [{"name": "NoCmd", "type_id": "Application"}]}"#,
        );
        let ws = Workspace::load(temp.path()).unwrap();

        let err = ws.execute_by_name("NoCmd").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<QuickRunError>(),
            Some(QuickRunError::NotExecutable(_))
        ));

        let err = ws.execute_by_name("Missing").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<QuickRunError>(),
            Some(QuickRunError::ItemNotFound(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_execute_runs_in_root() {
        let temp = tempdir().unwrap();
        write_workspace(
            temp.path(),
            r#"{"items": [
                {"name": "Touch", "type_id": "Shell", "command": ["touch", "ran.txt"]},
                {"name": "Fail", "type_id": "Shell", "command": ["false"]}
            ]}"#,
        );
        let ws = Workspace::load(temp.path()).unwrap();

        ws.execute_by_name("Touch").unwrap();
        assert!(temp.path().join("ran.txt").exists());
        assert!(ws.execute_by_name("Fail").is_err());
    }
}
