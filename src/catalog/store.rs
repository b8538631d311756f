//! Icon catalog - fast snapshot plus a single-flight complete build
//!
//! The fast snapshot covers cheap sources and is computed on the caller's
//! thread. The complete snapshot adds every configured resource root, is built
//! at most once at a time on a background thread, and once published replaces
//! the fast path for every later request. Publication is a single pointer swap.

use arc_swap::ArcSwapOption;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Instant;

use crate::catalog::builtin::IconGroup;
use crate::catalog::entry::{CatalogEntry, Completeness, Snapshot};
use crate::catalog::scan::{scan_builtin, scan_kinds, scan_resource_root, ResourceRoot};
use crate::host::{KindRegistry, ProgressSink};

/// Name of the background build thread
pub const BUILD_THREAD_NAME: &str = "icon-catalog-build";

/// Everything the catalog scans
pub struct CatalogSources {
    pub table: &'static IconGroup,
    pub kinds: Arc<dyn KindRegistry>,
    /// The calling plugin's own bundled resources (fast path)
    pub own: Option<ResourceRoot>,
    /// Additional resource roots (complete build only)
    pub extra: Vec<ResourceRoot>,
}

impl CatalogSources {
    /// Scanner outputs in preference order: table, kinds, own resources
    fn scan_fast(&self) -> Vec<Vec<CatalogEntry>> {
        vec![
            scan_builtin(self.table),
            scan_kinds(self.kinds.as_ref()),
            self.own.as_ref().map(scan_resource_root).unwrap_or_default(),
        ]
    }

    fn scan_complete(&self) -> Vec<Vec<CatalogEntry>> {
        let mut sources = self.scan_fast();
        sources.extend(self.extra.iter().map(scan_resource_root));
        sources
    }
}

struct CatalogInner {
    sources: CatalogSources,
    cached: ArcSwapOption<Snapshot>,
    building: AtomicBool,
    builds_started: AtomicUsize,
}

/// Process-wide icon catalog. Cheap to clone; clones share the cache.
#[derive(Clone)]
pub struct IconCatalog {
    inner: Arc<CatalogInner>,
}

/// Clears the single-flight flag however the build ends, unwinding included
struct BuildGuard<'a>(&'a AtomicBool);

impl Drop for BuildGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl IconCatalog {
    pub fn new(sources: CatalogSources) -> Self {
        Self {
            inner: Arc::new(CatalogInner {
                sources,
                cached: ArcSwapOption::empty(),
                building: AtomicBool::new(false),
                builds_started: AtomicUsize::new(0),
            }),
        }
    }

    /// Best snapshot available without waiting: the published complete
    /// snapshot, else a freshly merged fast one.
    pub fn snapshot_fast(&self) -> Arc<Snapshot> {
        if let Some(cached) = self.inner.cached.load_full() {
            return cached;
        }
        Arc::new(Snapshot::merge(
            Completeness::Fast,
            self.inner.sources.scan_fast(),
        ))
    }

    /// Deliver the best available snapshot to `on_ready` right away, then make
    /// sure a complete build runs unless one is cached or already in flight.
    ///
    /// `on_ready` is never called again when the background build finishes;
    /// the result is simply served to the next request. Returns the build
    /// thread's handle when this call started one.
    pub fn snapshot_complete<F>(
        &self,
        progress: Arc<dyn ProgressSink>,
        on_ready: F,
    ) -> Option<JoinHandle<()>>
    where
        F: FnOnce(Arc<Snapshot>),
    {
        if let Some(cached) = self.inner.cached.load_full() {
            on_ready(cached);
            return None;
        }

        on_ready(self.snapshot_fast());

        if !self.claim_build() {
            return None;
        }

        let inner = Arc::clone(&self.inner);
        let spawned = std::thread::Builder::new()
            .name(BUILD_THREAD_NAME.to_string())
            .spawn(move || {
                let _guard = BuildGuard(&inner.building);
                inner.builds_started.fetch_add(1, Ordering::Relaxed);
                progress.set_text("Scanning plugin icons…");

                let started = Instant::now();
                let snapshot = Snapshot::merge(Completeness::Complete, inner.sources.scan_complete());
                tracing::info!(
                    entries = snapshot.len(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "complete icon catalog published"
                );
                inner.cached.store(Some(Arc::new(snapshot)));
            });

        match spawned {
            Ok(handle) => Some(handle),
            Err(err) => {
                tracing::warn!(error = %err, "failed to spawn icon catalog build");
                self.inner.building.store(false, Ordering::Release);
                None
            }
        }
    }

    /// Take the single-flight flag. Fails when a build is in flight or one
    /// published between the caller's cache check and the flag swap.
    fn claim_build(&self) -> bool {
        if self
            .inner
            .building
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!("complete icon catalog build already in flight");
            return false;
        }
        if self.inner.cached.load().is_some() {
            self.inner.building.store(false, Ordering::Release);
            return false;
        }
        true
    }

    /// Start a complete build if needed and wait for it when this call started it
    pub fn snapshot_complete_blocking(&self, progress: Arc<dyn ProgressSink>) -> Arc<Snapshot> {
        if let Some(handle) = self.snapshot_complete(progress, |_| {}) {
            if handle.join().is_err() {
                tracing::warn!("icon catalog build panicked");
            }
        }
        self.snapshot_fast()
    }

    /// The published complete snapshot, if any
    pub fn cached(&self) -> Option<Arc<Snapshot>> {
        self.inner.cached.load_full()
    }

    pub fn is_building(&self) -> bool {
        self.inner.building.load(Ordering::Acquire)
    }

    /// Number of complete builds started over the catalog's lifetime
    pub fn builds_started(&self) -> usize {
        self.inner.builds_started.load(Ordering::Relaxed)
    }
}
