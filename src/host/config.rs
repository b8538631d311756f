//! Catalog configuration loaded from `.quickrun/config.json`

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::catalog::builtin::BUILTIN_ICONS;
use crate::catalog::scan::ResourceRoot;
use crate::catalog::store::CatalogSources;
use crate::core::paths::{resolve_against, state_dir};
use crate::host::KindRegistry;
use crate::selection::resolver::{SelectionResolver, DEFAULT_SVG_SCALE};

pub const CONFIG_FILE: &str = "config.json";

/// Owner id of this tool's own bundled resources
pub const DEFAULT_OWNER_ID: &str = "com.dilongdann.quickrun";

/// Default bound for displayed icon sides, in pixels
pub const DEFAULT_MAX_ICON_SIZE: u32 = 16;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Scanned on the fast path
    pub own_resources: ResourceRoot,

    /// Scanned only by the complete build
    pub extra_resources: Vec<ResourceRoot>,

    pub max_icon_size: u32,

    /// Rasterization scale for SVG files
    pub svg_scale: f32,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            own_resources: ResourceRoot::new(DEFAULT_OWNER_ID, "plugin"),
            extra_resources: Vec::new(),
            max_icon_size: DEFAULT_MAX_ICON_SIZE,
            svg_scale: DEFAULT_SVG_SCALE,
        }
    }
}

impl CatalogConfig {
    pub fn path(root: &Path) -> PathBuf {
        state_dir(root).join(CONFIG_FILE)
    }

    /// Load the config for `root` (defaults when absent) with every resource
    /// path resolved against `root`
    pub fn load(root: &Path) -> Result<Self> {
        let path = Self::path(root);
        let config: CatalogConfig = match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content)
                .with_context(|| format!("Malformed config file: {:?}", path))?,
            Err(err) if err.kind() == ErrorKind::NotFound => CatalogConfig::default(),
            Err(err) => {
                return Err(err).with_context(|| format!("Failed to read config file: {:?}", path))
            }
        };
        Ok(config.resolved(root))
    }

    fn resolved(mut self, root: &Path) -> Self {
        self.own_resources.path = resolve_against(root, &self.own_resources.path);
        for extra in &mut self.extra_resources {
            extra.path = resolve_against(root, &extra.path);
        }
        if self.max_icon_size == 0 {
            self.max_icon_size = DEFAULT_MAX_ICON_SIZE;
        }
        if !(self.svg_scale.is_finite() && self.svg_scale > 0.0) {
            tracing::warn!(svg_scale = self.svg_scale, "invalid svg_scale, using default");
            self.svg_scale = DEFAULT_SVG_SCALE;
        }
        self
    }

    /// Own resources first, then the extra roots
    pub fn all_roots(&self) -> Vec<ResourceRoot> {
        std::iter::once(self.own_resources.clone())
            .chain(self.extra_resources.iter().cloned())
            .collect()
    }

    pub fn sources(&self, kinds: Arc<dyn KindRegistry>) -> CatalogSources {
        CatalogSources {
            table: &BUILTIN_ICONS,
            kinds,
            own: Some(self.own_resources.clone()),
            extra: self.extra_resources.clone(),
        }
    }

    pub fn resolver(&self, kinds: Arc<dyn KindRegistry>) -> SelectionResolver {
        SelectionResolver::new(&BUILTIN_ICONS, kinds, self.all_roots()).with_svg_scale(self.svg_scale)
    }
}
