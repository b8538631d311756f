//! Command handlers - wire the core to the JSON workspace and print records

use anyhow::{bail, Context as _, Result};
use serde_json::json;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::catalog::builtin::{BUILTIN_ICONS, EDIT_ICON_KEY};
use crate::catalog::entry::{CatalogEntry, Completeness, CHOOSE_FILE_KEY};
use crate::catalog::store::IconCatalog;
use crate::core::icon::Icon;
use crate::core::model::{Record, RecordKind, RecordSet};
use crate::core::render::{RenderConfig, Renderer};
use crate::host::config::CatalogConfig;
use crate::host::workspace::Workspace;
use crate::host::{composite_key, FileFilter, KindRegistry, RunnableItem, RunnableRegistry, StateStore, TracingProgress};
use crate::selection::resolver::build_entry_from_chosen_key;
use crate::selection::service::SelectionService;
use crate::state::store::{JsonStateStore, QuickRunState};
use crate::toolbar::action::{BarAction, RunAction};
use crate::toolbar::config::{move_row, ConfigService};
use crate::toolbar::sync::ActionSynchronizer;

/// Everything a command needs, loaded from the workspace root
pub struct Context {
    pub root: PathBuf,
    pub workspace: Workspace,
    pub config: CatalogConfig,
    pub store: JsonStateStore,
    pub render: RenderConfig,
}

impl Context {
    pub fn load(root: &Path, render: RenderConfig) -> Result<Self> {
        Ok(Self {
            root: root.to_path_buf(),
            workspace: Workspace::load(root)?,
            config: CatalogConfig::load(root)?,
            store: JsonStateStore::new(root),
            render,
        })
    }

    fn kinds(&self) -> Arc<dyn KindRegistry> {
        Arc::new(self.workspace.kinds())
    }

    fn selection_service(&self, state: &QuickRunState) -> SelectionService {
        SelectionService::new(self.config.resolver(self.kinds()), state.selections.clone())
    }

    fn live(&self) -> Vec<RunnableItem> {
        self.workspace.list_all()
    }

    fn print(&self, records: &RecordSet) -> Result<()> {
        Renderer::with_config(self.render)
            .render_to(records, std::io::stdout().lock())
            .context("Failed to write output")
    }

    /// Size data for icons with decoded pixels, scaled to the display bound
    fn image_data(&self, icon: Option<&Icon>) -> serde_json::Value {
        match icon.and_then(Icon::image) {
            Some(image) => {
                let shown = image.fit_within(self.config.max_icon_size);
                json!({
                    "width": image.width(),
                    "height": image.height(),
                    "display_width": shown.width(),
                    "display_height": shown.height(),
                })
            }
            None => serde_json::Value::Null,
        }
    }
}

fn entry_record(entry: &CatalogEntry) -> Record {
    Record::icon(&entry.key, &entry.display_name).with_icon(entry.icon.as_ref())
}

/// List the fast snapshot, or build and list the complete one
pub fn run_catalog(ctx: &Context, complete: bool, filter: Option<&str>) -> Result<()> {
    let catalog = IconCatalog::new(ctx.config.sources(ctx.kinds()));
    let snapshot = if complete {
        catalog.snapshot_complete_blocking(Arc::new(TracingProgress))
    } else {
        catalog.snapshot_fast()
    };
    tracing::debug!(
        entries = snapshot.len(),
        complete = snapshot.completeness == Completeness::Complete,
        "catalog snapshot ready"
    );

    let records: RecordSet = match filter {
        Some(needle) => snapshot.filter(needle).into_iter().map(entry_record).collect(),
        None => snapshot.entries().iter().map(entry_record).collect(),
    };
    ctx.print(&records)
}

/// Picker standing in for the interactive dialog: yields `--file` if given
fn flag_picker(file: Option<PathBuf>, root: &Path) -> impl Fn(&FileFilter) -> Option<PathBuf> + '_ {
    move |_filter: &FileFilter| file.as_ref().map(|f| crate::core::paths::resolve_against(root, f))
}

/// Build a selection from a catalog key and resolve it
pub fn run_resolve(ctx: &Context, key: &str, file: Option<PathBuf>) -> Result<()> {
    let picker = flag_picker(file, &ctx.root);
    let Some(entry) = build_entry_from_chosen_key(key, &picker) else {
        bail!("{:?} needs a file: pass --file PATH", CHOOSE_FILE_KEY);
    };

    let resolver = ctx.config.resolver(ctx.kinds());
    let icon = resolver.resolve(&entry);
    let record = Record::new(RecordKind::Selection)
        .with_key(key)
        .with_icon(icon.as_ref())
        .with_data(json!({
            "selection": entry,
            "resolved": icon.is_some(),
            "image": ctx.image_data(icon.as_ref()),
        }));
    ctx.print(&RecordSet::from_iter([record]))
}

/// Store the selection for one runnable item; the default key clears it
pub fn run_select(
    ctx: &Context,
    type_id: &str,
    name: &str,
    key: &str,
    file: Option<PathBuf>,
) -> Result<()> {
    let picker = flag_picker(file, &ctx.root);
    let Some(entry) = build_entry_from_chosen_key(key, &picker) else {
        bail!("{:?} needs a file: pass --file PATH", CHOOSE_FILE_KEY);
    };

    let mut state = ctx.store.load();
    let mut service = ctx.selection_service(&state);
    let item_key = composite_key(type_id, name);
    service.set_selection(&item_key, entry);

    let record = Record::new(RecordKind::Selection)
        .with_key(&item_key)
        .with_icon(service.resolve_display_icon(&item_key).as_ref())
        .with_data(json!({ "selection": service.get_selection(&item_key) }));

    state.selections = service.into_selections();
    ctx.store.save(&state)?;
    ctx.print(&RecordSet::from_iter([record]))
}

fn item_records(ctx: &Context, state: &QuickRunState) -> RecordSet {
    let live = ctx.live();
    let service = ctx.selection_service(state);
    let config = ConfigService::new(state.items.clone());

    config
        .rows(&live)
        .into_iter()
        .map(|row| {
            let icon = live
                .iter()
                .find(|item| item.composite_key() == row.key)
                .map(|item| service.display_icon_for(item));
            Record::new(RecordKind::Item)
                .with_key(&row.key)
                .with_name(row.display_name.clone().unwrap_or_else(|| row.name.clone()))
                .with_icon(icon.as_ref())
                .with_data(json!(row))
        })
        .collect()
}

pub fn run_items_list(ctx: &Context) -> Result<()> {
    let state = ctx.store.load();
    ctx.print(&item_records(ctx, &state))
}

pub fn run_items_set(
    ctx: &Context,
    type_id: &str,
    name: &str,
    display_name: Option<String>,
    enabled: bool,
) -> Result<()> {
    let mut state = ctx.store.load();
    let mut config = ConfigService::new(std::mem::take(&mut state.items));
    config.upsert_or_append(&composite_key(type_id, name), display_name, enabled);
    state.items = config.into_items();
    ctx.store.save(&state)?;
    ctx.print(&item_records(ctx, &state))
}

pub fn run_items_show_name(ctx: &Context, type_id: &str, name: &str, show_name: bool) -> Result<()> {
    let mut state = ctx.store.load();
    let mut config = ConfigService::new(std::mem::take(&mut state.items));
    let key = composite_key(type_id, name);
    if !config.set_show_name(&key, show_name) {
        bail!("{:?} is not a configured item", key);
    }
    state.items = config.into_items();
    ctx.store.save(&state)?;
    ctx.print(&item_records(ctx, &state))
}

/// Reorder editor rows and save them as the new item list
pub fn run_items_move(ctx: &Context, from: usize, to: usize) -> Result<()> {
    let mut state = ctx.store.load();
    let mut config = ConfigService::new(std::mem::take(&mut state.items));
    let mut rows = config.rows(&ctx.live());
    if !move_row(&mut rows, from, to) {
        bail!("cannot move row {} to {}: only {} rows", from, to, rows.len());
    }
    config.apply_rows(&rows);
    state.items = config.into_items();
    ctx.store.save(&state)?;
    ctx.print(&item_records(ctx, &state))
}

/// Print the effective action list
pub fn run_bar(ctx: &Context) -> Result<()> {
    let state = ctx.store.load();
    let live = ctx.live();
    let service = ctx.selection_service(&state);
    let actions = ActionSynchronizer::new().effective_actions(&live, &state.items);

    let records: RecordSet = actions
        .iter()
        .map(|action| match action {
            BarAction::Run(run) => {
                let icon = live
                    .iter()
                    .find(|item| !item.is_temporary && run.targets(item))
                    .map(|item| service.display_icon_for(item));
                Record::new(RecordKind::Action)
                    .with_name(run.text())
                    .with_icon(icon.as_ref())
                    .with_data(json!({
                        "action": "run",
                        "actual_name": run.actual_name,
                        "display_name": run.display_name,
                        "show_name": run.show_name,
                        "description": run.description(),
                    }))
            }
            BarAction::Edit => {
                let icon = BUILTIN_ICONS.lookup(EDIT_ICON_KEY).map(|leaf| leaf.to_icon());
                Record::new(RecordKind::Action)
                    .with_name(action.text())
                    .with_icon(icon.as_ref())
                    .with_data(json!({ "action": "edit", "description": action.description() }))
            }
        })
        .collect();
    ctx.print(&records)
}

/// Execute a runnable item by name
pub fn run_item(ctx: &Context, name: &str) -> Result<()> {
    let action = RunAction {
        actual_name: name.to_string(),
        display_name: name.to_string(),
        show_name: true,
    };
    action.perform(&ctx.workspace)?;

    let record = Record::new(RecordKind::Run)
        .with_name(name)
        .with_data(json!({ "description": action.description(), "status": "ok" }));
    ctx.print(&RecordSet::from_iter([record]))
}
