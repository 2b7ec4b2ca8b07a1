//! Resource resolver: the entry point every external caller goes through.
//!
//! A `Loadpath` owns the path set and the bundle accessor and composes
//! them into the uniform "find resource by name" operations: the bundle
//! is the fast path, then the effective roots are probed in order, with
//! the archive reader handling archive roots and direct file I/O handling
//! directory roots.

pub mod probe;

use crate::archive::Archive;
use crate::bundle::Bundle;
use crate::classpath::SourcePaths;
use crate::error::{LoadpathError, Result};
use crate::model::{DataReader, Resource, Source, SourceRoot};
use std::path::{Path, PathBuf};
use tracing::debug;

/// The per-root dependency manifest, aggregated across all roots.
const DEPS_MANIFEST: &str = "deps.cljs";

/// Reader-registration files, tried in this order within each root.
const DATA_READER_FILES: [&str; 2] = ["data_readers.cljs", "data_readers.cljc"];

pub struct Loadpath {
    paths: SourcePaths,
    bundle: Bundle,
}

impl Loadpath {
    /// A resolver rooted at the process working directory.
    pub fn new(bundle: Bundle) -> Self {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::with_cwd(bundle, cwd)
    }

    /// A resolver rooted at an explicit working directory.
    pub fn with_cwd(bundle: Bundle, cwd: PathBuf) -> Self {
        Self {
            paths: SourcePaths::new(cwd),
            bundle,
        }
    }

    pub fn bundle(&self) -> &Bundle {
        &self.bundle
    }

    pub fn add_source_paths<I, P>(&self, paths: I)
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        self.paths.add(paths);
    }

    pub fn remove_source_path(&self, path: &Path) -> bool {
        self.paths.remove(path)
    }

    pub async fn source_paths(&self) -> Vec<PathBuf> {
        self.paths.list().await
    }

    /// Bundle fast path only: resources the build baked into the binary
    /// (or their dev-mode mirror). No source root is ever consulted.
    pub async fn load(&self, name: &str) -> Option<String> {
        match self.bundle.read(name).await {
            Ok(found) => found,
            Err(e) => {
                debug!("bundle read of {name} failed: {e}");
                None
            }
        }
    }

    /// Where `name` lives: the bundle if it has it, otherwise the first
    /// root in effective order that does. Existence is checked without
    /// reading content.
    pub async fn resource(&self, name: &str) -> Option<Resource> {
        if self.bundle.contains(name).await {
            return Some(Resource::Bundled {
                name: name.to_string(),
            });
        }

        let roots = self.paths.effective_roots().await;
        probe::first_hit(roots, |root| self.probe_resource(root, name)).await
    }

    /// Content of `name` from the first root where the read succeeds;
    /// every per-candidate failure is swallowed and the scan continues.
    // TODO: memoize which archives are known to contain a given entry,
    // so repeated lookups stop re-reading the whole archive file.
    pub async fn read_source(&self, name: &str) -> Option<Source> {
        let roots = self.paths.effective_roots().await;
        probe::first_hit(roots, |root| self.probe_source(root, name)).await
    }

    /// Direct read of a caller-resolved path; no root search.
    pub async fn read_file(&self, path: &Path) -> Option<Source> {
        Source::read(path).await.ok()
    }

    /// Every root's dependency manifest, one entry per root that has one,
    /// in root order.
    pub async fn upstream_js_libs(&self) -> Vec<String> {
        let roots = self.paths.effective_roots().await;
        probe::collect_hits(roots, |root| async move {
            Ok(match self.probe_source(root, DEPS_MANIFEST).await? {
                Some(source) => vec![source.content],
                None => vec![],
            })
        })
        .await
    }

    /// Every reader-registration file across every root. Both well-known
    /// filenames are tried per root; each hit contributes, and a failure
    /// on one filename does not discard the other's hit.
    pub async fn upstream_data_readers(&self) -> Vec<DataReader> {
        let roots = self.paths.effective_roots().await;
        probe::collect_hits(roots, |root| async move {
            let mut readers = Vec::new();
            for filename in DATA_READER_FILES {
                match self.probe_source(root.clone(), filename).await {
                    Ok(Some(source)) => readers.push(DataReader {
                        url: root.join(filename),
                        source: source.content,
                    }),
                    Ok(None) => {}
                    Err(e) => debug!("skipping {filename} in {}: {e}", root.display()),
                }
            }
            Ok(readers)
        })
        .await
    }

    /// Direct single-archive read; the caller already knows the containing
    /// archive (typically from a prior [`resource`](Self::resource)).
    pub async fn read_source_from_jar(&self, archive: &Path, entry: &str) -> Result<String> {
        let mut jar = Archive::open(archive).await?;
        match jar.entry(entry)? {
            Some((content, _)) => Ok(content),
            None => Err(LoadpathError::EntryNotFound {
                archive: archive.to_path_buf(),
                entry: entry.to_string(),
            }),
        }
    }

    /// All entry names in one archive whose path begins with `prefix`.
    pub async fn read_dir_from_jar(&self, archive: &Path, prefix: &str) -> Result<Vec<String>> {
        let jar = Archive::open(archive).await?;
        Ok(jar.entry_names_with_prefix(prefix))
    }

    async fn probe_resource(&self, root: PathBuf, name: &str) -> Result<Option<Resource>> {
        match SourceRoot::classify(root) {
            SourceRoot::Archive(path) => {
                let mut archive = Archive::open(&path).await?;
                Ok(archive
                    .entry_modified(name)?
                    .map(|modified_ms| Resource::Archive {
                        archive: path.clone(),
                        entry: name.to_string(),
                        modified_ms,
                    }))
            }
            SourceRoot::Directory(path) => {
                let candidate = path.join(name);
                match tokio::fs::metadata(&candidate).await {
                    Ok(meta) if meta.is_file() => Ok(Some(Resource::File { path: candidate })),
                    Ok(_) => Ok(None),
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
                    Err(e) => Err(e.into()),
                }
            }
        }
    }

    async fn probe_source(&self, root: PathBuf, name: &str) -> Result<Option<Source>> {
        match SourceRoot::classify(root) {
            SourceRoot::Archive(path) => {
                let mut archive = Archive::open(&path).await?;
                Ok(archive
                    .entry(name)?
                    .map(|(content, modified_ms)| Source {
                        content,
                        modified_ms,
                    }))
            }
            SourceRoot::Directory(path) => {
                match Source::read(&path.join(name)).await {
                    Ok(source) => Ok(Some(source)),
                    Err(LoadpathError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                        Ok(None)
                    }
                    Err(e) => Err(e),
                }
            }
        }
    }
}
