//! Selection service - per-item icon overrides keyed by composite key

use std::collections::BTreeMap;

use crate::core::icon::Icon;
use crate::host::RunnableItem;
use crate::selection::entry::SelectionEntry;
use crate::selection::resolver::SelectionResolver;

/// Owns the persisted selection map and resolves display icons from it.
///
/// A `Default` entry is never kept: storing one removes the mapping.
pub struct SelectionService {
    resolver: SelectionResolver,
    selections: BTreeMap<String, SelectionEntry>,
}

impl SelectionService {
    pub fn new(resolver: SelectionResolver, mut selections: BTreeMap<String, SelectionEntry>) -> Self {
        selections.retain(|_, entry| !entry.is_default());
        Self {
            resolver,
            selections,
        }
    }

    pub fn resolver(&self) -> &SelectionResolver {
        &self.resolver
    }

    pub fn selections(&self) -> &BTreeMap<String, SelectionEntry> {
        &self.selections
    }

    pub fn into_selections(self) -> BTreeMap<String, SelectionEntry> {
        self.selections
    }

    /// Stored selection for `composite_key`, `Default` when none
    pub fn get_selection(&self, composite_key: &str) -> SelectionEntry {
        self.selections
            .get(composite_key)
            .cloned()
            .unwrap_or_default()
    }

    pub fn set_selection(&mut self, composite_key: &str, entry: SelectionEntry) {
        if entry.is_default() {
            self.selections.remove(composite_key);
        } else {
            self.selections.insert(composite_key.to_string(), entry);
        }
    }

    /// Icon for the user's selection only; `None` when there is no usable override
    pub fn resolve_display_icon(&self, composite_key: &str) -> Option<Icon> {
        self.selections
            .get(composite_key)
            .and_then(|entry| self.resolver.resolve(entry))
    }

    /// Full fallback chain: selection, the item's own icon, its kind's icon,
    /// then the fixed fallback.
    pub fn display_icon_for(&self, item: &RunnableItem) -> Icon {
        self.resolve_display_icon(&item.composite_key())
            .or_else(|| item.own_icon.clone())
            .or_else(|| {
                self.resolver
                    .resolve(&SelectionEntry::TypedRegistry(item.type_id.clone()))
            })
            .unwrap_or_else(|| self.resolver.fallback_icon())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::builtin::{BUILTIN_ICONS, FALLBACK_ICON_KEY};
    use crate::host::{Kind, KindRegistry};
    use std::sync::Arc;

    fn table_icon(key: &str) -> Icon {
        BUILTIN_ICONS.lookup(key).unwrap().to_icon()
    }

    fn service() -> SelectionService {
        let kinds: Arc<dyn KindRegistry> = Arc::new(vec![Kind {
            id: "Application".to_string(),
            display_label: "Application".to_string(),
            icon: Some(Icon::builtin("RunConfigurations.Application", None)),
        }]);
        SelectionService::new(
            SelectionResolver::new(&BUILTIN_ICONS, kinds, vec![]),
            BTreeMap::new(),
        )
    }

    #[test]
    fn test_storing_default_deletes_mapping() {
        let mut svc = service();
        svc.set_selection("Application::Main", SelectionEntry::CatalogKey("Actions.Edit".into()));
        assert!(svc.selections().contains_key("Application::Main"));

        svc.set_selection("Application::Main", SelectionEntry::Default);
        assert!(!svc.selections().contains_key("Application::Main"));
        assert_eq!(svc.get_selection("Application::Main"), SelectionEntry::Default);
    }

    #[test]
    fn test_loaded_default_entries_are_dropped() {
        let mut map = BTreeMap::new();
        map.insert("a::b".to_string(), SelectionEntry::Default);
        let svc = SelectionService::new(service().resolver, map);
        assert!(svc.selections().is_empty());
    }

    #[test]
    fn test_resolve_display_icon_only_uses_selection() {
        let mut svc = service();
        assert!(svc.resolve_display_icon("Application::Main").is_none());

        svc.set_selection("Application::Main", SelectionEntry::CatalogKey("Actions.Edit".into()));
        assert_eq!(
            svc.resolve_display_icon("Application::Main"),
            Some(table_icon("Actions.Edit"))
        );
    }

    #[test]
    fn test_display_icon_fallback_chain() {
        let mut svc = service();
        let own = table_icon("General.Settings");

        let plain = RunnableItem::new("Main", "Gradle");
        assert_eq!(svc.display_icon_for(&plain).locator(), FALLBACK_ICON_KEY);

        let typed = RunnableItem::new("Main", "Application");
        assert_eq!(
            svc.display_icon_for(&typed),
            Icon::builtin("RunConfigurations.Application", None)
        );

        let with_own = RunnableItem::new("Main", "Application").with_icon(own.clone());
        assert_eq!(svc.display_icon_for(&with_own), own);

        svc.set_selection("Application::Main", SelectionEntry::CatalogKey("Actions.Edit".into()));
        assert_eq!(svc.display_icon_for(&with_own), table_icon("Actions.Edit"));

        // unresolvable selection falls through
        svc.set_selection("Application::Main", SelectionEntry::CatalogKey("Nope.Nope".into()));
        assert_eq!(svc.display_icon_for(&with_own), own);
    }
}
