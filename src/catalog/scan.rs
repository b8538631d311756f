//! Icon scanners
//!
//! Four independent sources, each producing a flat list of catalog entries:
//! the compiled-in table, the kind registry, resource directories (walkdir)
//! and zip-format archives. A failing source contributes nothing.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use zip::ZipArchive;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::catalog::builtin::IconGroup;
use crate::catalog::entry::{kind_key, plugin_key, CatalogEntry};
use crate::core::error::{QuickRunError, Result};
use crate::core::humanize::{humanize_identifier, humanize_path};
use crate::core::icon::{is_icon_file_name, Icon};
use crate::core::paths::{has_icons_segment, make_relative, resource_to_fs_path, to_resource_path};
use crate::host::KindRegistry;

/// Sub-directory of a resource root holding bundled archives
pub const LIB_DIR: &str = "lib";

/// A plugin's resources: a directory (possibly with `lib/*.jar`) or a single archive
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRoot {
    pub owner_id: String,
    pub path: PathBuf,
}

impl ResourceRoot {
    pub fn new(owner_id: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            owner_id: owner_id.into(),
            path: path.into(),
        }
    }
}

/// Entries for every leaf of the compiled-in table
pub fn scan_builtin(table: &IconGroup) -> Vec<CatalogEntry> {
    table
        .leaves()
        .into_iter()
        .map(|leaf| {
            let display = leaf
                .resource
                .map(humanize_path)
                .unwrap_or_else(|| humanize_identifier(leaf.name));
            CatalogEntry::new(leaf.key.clone(), Some(leaf.to_icon()), display)
        })
        .collect()
}

/// Entries for every kind in the registry, keyed `rcType:<id>`
pub fn scan_kinds(kinds: &dyn KindRegistry) -> Vec<CatalogEntry> {
    kinds
        .list_all()
        .into_iter()
        .map(|kind| CatalogEntry::new(kind_key(&kind.id), kind.icon, kind.display_label))
        .collect()
}

/// Walk a directory for icon files below an `icons` directory
pub fn scan_directory(owner_id: &str, root: &Path) -> Result<Vec<CatalogEntry>> {
    if !root.is_dir() {
        return Err(QuickRunError::io(
            root,
            std::io::Error::new(std::io::ErrorKind::NotFound, "not a directory"),
        ));
    }

    let mut entries = Vec::new();

    for entry in WalkDir::new(root).follow_links(false) {
        let entry = match entry {
            Ok(e) => e,
            Err(_) => continue,
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        if !is_icon_file_name(&name) {
            continue;
        }

        let relative = match make_relative(entry.path(), root) {
            Some(r) => r,
            None => continue,
        };
        let resource_path = to_resource_path(&relative);
        if !has_icons_segment(&resource_path) {
            continue;
        }

        entries.push(resource_entry(owner_id, resource_path));
    }

    entries.sort_by(|a, b| a.key.cmp(&b.key));
    Ok(entries)
}

/// Walk the entries of a zip-format archive (zip, jar)
pub fn scan_archive(owner_id: &str, archive_path: &Path) -> Result<Vec<CatalogEntry>> {
    let file = File::open(archive_path).map_err(|e| QuickRunError::io(archive_path, e))?;
    let mut archive = ZipArchive::new(file).map_err(|e| QuickRunError::zip(archive_path, e))?;

    let mut entries = Vec::new();

    for index in 0..archive.len() {
        let Ok(entry) = archive.by_index(index) else {
            continue;
        };

        if entry.is_dir() || !is_icon_file_name(entry.name()) {
            continue;
        }

        let resource_path = to_resource_path(entry.name());
        if !has_icons_segment(&resource_path) {
            continue;
        }

        entries.push(resource_entry(owner_id, resource_path));
    }

    Ok(entries)
}

/// Archives (`*.jar`, `*.zip`) directly inside `<root>/lib`, sorted by name
pub fn library_archives(root: &Path) -> Result<Vec<PathBuf>> {
    let lib = root.join(LIB_DIR);
    if !lib.is_dir() {
        return Ok(Vec::new());
    }

    let mut archives: Vec<PathBuf> = std::fs::read_dir(&lib)
        .map_err(|e| QuickRunError::io(&lib, e))?
        .flatten()
        .map(|e| e.path())
        .filter(|p| p.is_file() && is_archive_path(p))
        .collect();
    archives.sort();
    Ok(archives)
}

/// Scan everything a resource root offers: the directory itself plus its
/// library archives, or the root as one archive. Each part fails on its own.
pub fn scan_resource_root(root: &ResourceRoot) -> Vec<CatalogEntry> {
    if !root.path.is_dir() {
        return or_empty("archive", &root.path, scan_archive(&root.owner_id, &root.path));
    }

    let mut entries = or_empty("directory", &root.path, scan_directory(&root.owner_id, &root.path));
    let archives = or_empty("library", &root.path, library_archives(&root.path));

    #[cfg(feature = "parallel")]
    let per_archive: Vec<Vec<CatalogEntry>> = archives
        .par_iter()
        .map(|a| or_empty("archive", a, scan_archive(&root.owner_id, a)))
        .collect();
    #[cfg(not(feature = "parallel"))]
    let per_archive: Vec<Vec<CatalogEntry>> = archives
        .iter()
        .map(|a| or_empty("archive", a, scan_archive(&root.owner_id, a)))
        .collect();

    entries.extend(per_archive.into_iter().flatten());
    entries
}

/// Find a resource under a root without scanning it. Produces the same icon
/// identity the scanners produce for that resource.
pub fn locate_resource(root: &ResourceRoot, resource_path: &str) -> Result<Icon> {
    let missing = || QuickRunError::UnknownKey(plugin_key(&root.owner_id, resource_path));

    if !root.path.is_dir() {
        return if archive_contains(&root.path, resource_path)? {
            Ok(Icon::resource(&root.owner_id, resource_path))
        } else {
            Err(missing())
        };
    }

    if let Some(fs_path) = resource_to_fs_path(&root.path, resource_path) {
        if fs_path.is_file() {
            return Ok(Icon::resource(&root.owner_id, resource_path));
        }
    }

    for archive in library_archives(&root.path)? {
        // One unreadable archive does not hide the others
        if archive_contains(&archive, resource_path).unwrap_or(false) {
            return Ok(Icon::resource(&root.owner_id, resource_path));
        }
    }

    Err(missing())
}

fn archive_contains(archive_path: &Path, resource_path: &str) -> Result<bool> {
    let file = File::open(archive_path).map_err(|e| QuickRunError::io(archive_path, e))?;
    let archive = ZipArchive::new(file).map_err(|e| QuickRunError::zip(archive_path, e))?;
    let relative = resource_path.trim_start_matches('/');
    let found = archive
        .file_names()
        .any(|name| name == relative || name == resource_path);
    Ok(found)
}

fn resource_entry(owner_id: &str, resource_path: String) -> CatalogEntry {
    let display = humanize_path(&resource_path);
    let icon = Icon::resource(owner_id, &resource_path);
    CatalogEntry::new(plugin_key(owner_id, &resource_path), Some(icon), display)
}

fn is_archive_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("jar") || e.eq_ignore_ascii_case("zip"))
        .unwrap_or(false)
}

fn or_empty<T: Default>(source: &str, path: &Path, result: Result<T>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(source, path = %path.display(), error = %err, "icon scan failed");
            T::default()
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::fs::{self, File};
    use std::io::Write;
    use std::path::Path;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    pub fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, b"<svg/>").unwrap();
    }

    pub fn write_zip(path: &Path, names: &[&str]) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        let mut zip = ZipWriter::new(File::create(path).unwrap());
        let options = SimpleFileOptions::default();
        for name in names {
            if name.ends_with('/') {
                zip.add_directory(name.trim_end_matches('/'), options).unwrap();
            } else {
                zip.start_file(*name, options).unwrap();
                zip.write_all(b"<svg/>").unwrap();
            }
        }
        zip.finish().unwrap();
    }
}
