//! The path set: the ordered, mutable collection of source roots.

pub mod infer;

use crate::util;
use indexmap::IndexSet;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tokio::sync::OnceCell;

/// Manual roots in registration order plus inferred roots in discovery
/// order, deduplicated across the concatenation.
///
/// The inferred list is computed at most once per path set and never
/// refreshed: if packages are installed or removed after the first
/// resolution, this set keeps answering from the stale list for its whole
/// lifetime. Callers rely on that stability during a session.
pub struct SourcePaths {
    cwd: PathBuf,
    manual: Mutex<IndexSet<PathBuf>>,
    inferred: OnceCell<Vec<PathBuf>>,
}

impl SourcePaths {
    /// A fresh path set whose only manual root is `cwd`.
    pub fn new(cwd: PathBuf) -> Self {
        let mut manual = IndexSet::new();
        manual.insert(cwd.clone());
        Self {
            cwd,
            manual: Mutex::new(manual),
            inferred: OnceCell::new(),
        }
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Normalizes and inserts into the manual roots, preserving first-seen
    /// order; idempotent for roots already present.
    pub fn add<I, P>(&self, paths: I)
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut manual = self.manual.lock().unwrap();
        for path in paths {
            manual.insert(util::normalize_path(path.as_ref(), &self.cwd));
        }
    }

    /// Removes from the manual roots only; inferred roots are untouched.
    /// Returns whether a root was actually removed.
    pub fn remove(&self, path: &Path) -> bool {
        let normalized = util::normalize_path(path, &self.cwd);
        self.manual.lock().unwrap().shift_remove(&normalized)
    }

    /// The effective search order. The first call triggers classpath
    /// inference; concurrent first callers all await the same single
    /// computation.
    pub async fn effective_roots(&self) -> Vec<PathBuf> {
        let manual: IndexSet<PathBuf> = self.manual.lock().unwrap().clone();
        let inferred = self
            .inferred
            .get_or_init(|| infer::classpath_libs(&self.cwd))
            .await;

        let mut roots = manual;
        for path in inferred {
            roots.insert(path.clone());
        }
        roots.into_iter().collect()
    }

    /// Same list as [`effective_roots`](Self::effective_roots), exposed
    /// for introspection.
    pub async fn list(&self) -> Vec<PathBuf> {
        self.effective_roots().await
    }
}
