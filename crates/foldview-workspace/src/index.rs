//! Cached workspace-member index.
//!
//! Owns the resolved member list for one project session, keyed by the
//! manifest's modification stamp. Queries never raise: a missing or
//! unreadable manifest reads as "workspace disabled". The stamp check
//! and rebuild run under one lock so concurrent readers either see the
//! previous complete list or the new one, never a partial rebuild.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::SystemTime;

use camino::{Utf8Path, Utf8PathBuf};
use rustc_hash::FxHashSet;

use crate::fs::FileSystem;
use crate::manifest::parse_use_directives;
use crate::resolve::resolve_member;

/// Name of the workspace manifest at the project root.
pub const MANIFEST_FILE_NAME: &str = "go.work";

struct CacheEntry {
    stamp: SystemTime,
    members: Arc<[Utf8PathBuf]>,
}

/// Resolves and caches the member directories of a workspace manifest.
pub struct WorkspaceIndex {
    project_root: Utf8PathBuf,
    fs: Arc<dyn FileSystem>,
    cache: Mutex<Option<CacheEntry>>,
}

impl WorkspaceIndex {
    #[must_use]
    pub fn new(project_root: Utf8PathBuf, fs: Arc<dyn FileSystem>) -> Self {
        Self {
            project_root,
            fs,
            cache: Mutex::new(None),
        }
    }

    /// True iff a manifest exists at the project root and resolves to at
    /// least one member directory.
    #[must_use]
    pub fn is_workspace_enabled(&self) -> bool {
        self.fs.exists(&self.manifest_path()) && !self.workspace_module_dirs().is_empty()
    }

    /// The resolved member directories, deduplicated by normalized path
    /// (first occurrence wins), in manifest order.
    ///
    /// Reparses only when the manifest's modification stamp differs from
    /// the cached one; otherwise this is a stamp probe plus an `Arc`
    /// clone.
    #[must_use]
    pub fn workspace_module_dirs(&self) -> Arc<[Utf8PathBuf]> {
        let manifest = self.manifest_path();
        let Some(stamp) = self.fs.modified(&manifest) else {
            return Arc::from(Vec::new());
        };

        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(entry) = cache.as_ref() {
            if entry.stamp == stamp {
                return Arc::clone(&entry.members);
            }
        }

        tracing::debug!("workspace manifest changed, reparsing: {manifest}");
        let members: Arc<[Utf8PathBuf]> = Arc::from(self.rebuild(&manifest));
        *cache = Some(CacheEntry {
            stamp,
            members: Arc::clone(&members),
        });
        members
    }

    /// True iff `dir` is one of the resolved member directories.
    ///
    /// Comparison is case-insensitive on Windows, matching the host
    /// filesystem's casing rules.
    #[must_use]
    pub fn is_workspace_module_dir(&self, dir: &Utf8Path) -> bool {
        let ignore_case = cfg!(windows);
        self.workspace_module_dirs()
            .iter()
            .any(|member| paths_equal(member, dir, ignore_case))
    }

    /// The most specific member directory containing `file`: among all
    /// members that are ancestors of (or equal to) `file`, the one with
    /// the longest path. On equal lengths the first member in cached
    /// order is kept.
    #[must_use]
    pub fn find_workspace_root_for(&self, file: &Utf8Path) -> Option<Utf8PathBuf> {
        let dirs = self.workspace_module_dirs();
        let mut best: Option<&Utf8PathBuf> = None;

        for dir in dirs.iter() {
            if !file.starts_with(dir) {
                continue;
            }
            if best.map_or(true, |current| dir.as_str().len() > current.as_str().len()) {
                best = Some(dir);
            }
        }

        best.cloned()
    }

    fn manifest_path(&self) -> Utf8PathBuf {
        self.project_root.join(MANIFEST_FILE_NAME)
    }

    fn rebuild(&self, manifest: &Utf8Path) -> Vec<Utf8PathBuf> {
        let Ok(text) = self.fs.read_to_string(manifest) else {
            tracing::warn!("failed to read workspace manifest: {manifest}");
            return Vec::new();
        };
        let base = manifest.parent().unwrap_or(&self.project_root);

        let mut seen: FxHashSet<Utf8PathBuf> = FxHashSet::default();
        let mut members = Vec::new();

        for token in parse_use_directives(&text) {
            let Some(dir) = resolve_member(&token, base, self.fs.as_ref()) else {
                continue;
            };
            if seen.insert(dir.clone()) {
                members.push(dir);
            }
        }

        members
    }
}

/// Path equality with optional Unicode case folding, for case-insensitive
/// host filesystems.
fn paths_equal(a: &Utf8Path, b: &Utf8Path, ignore_case: bool) -> bool {
    if ignore_case {
        a.as_str().to_lowercase() == b.as_str().to_lowercase()
    } else {
        a == b
    }
}
