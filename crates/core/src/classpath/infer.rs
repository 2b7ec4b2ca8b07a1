//! Classpath inference.
//!
//! Discovers extra classpath directories contributed by installed
//! dependencies, without an explicit build manifest: walk the
//! `node_modules` chain for the working directory, and for every package
//! that declares `directories.lib` in its metadata, take that directory
//! as a source root. Every failure along the way is non-fatal; a package
//! that cannot be read simply contributes nothing.

use crate::util;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// The one extra level of recursion allowed for scoped (`@`-prefixed)
/// package directories.
const SCOPED_DEPTH: u8 = 1;

/// The subset of package metadata inference cares about.
#[derive(Debug, Deserialize)]
struct PackageJson {
    directories: Option<Directories>,
}

#[derive(Debug, Deserialize)]
struct Directories {
    lib: Option<String>,
}

/// The ordered module-resolution directory chain for `cwd`: every
/// ancestor not itself named `node_modules`, nearest first, joined with
/// `node_modules`.
pub fn module_dirs(cwd: &Path) -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    let mut current = Some(cwd);
    while let Some(dir) = current {
        if dir.file_name().is_none_or(|name| name != "node_modules") {
            dirs.push(dir.join("node_modules"));
        }
        current = dir.parent();
    }
    dirs
}

/// All classpath directories contributed by packages installed under the
/// module-resolution chain of `cwd`, in visit order (module dirs nearest
/// first, packages in name order, parents before their scoped children).
/// Never fails; may be empty.
pub async fn classpath_libs(cwd: &Path) -> Vec<PathBuf> {
    let mut libs = Vec::new();

    for node_dir in module_dirs(cwd) {
        for name in package_entries(&node_dir).await {
            if name.starts_with('.') {
                continue;
            }
            libs.extend(scan_package(&node_dir, &name, SCOPED_DEPTH).await);
        }
    }

    info!(
        "classpath inference discovered {} root(s) under {}",
        libs.len(),
        cwd.display()
    );
    libs
}

/// Immediate entry names of one module directory, sorted for a stable
/// visit order; empty when the directory is missing or unreadable.
async fn package_entries(dir: &Path) -> Vec<String> {
    let Ok(mut entries) = tokio::fs::read_dir(dir).await else {
        return Vec::new();
    };

    let mut names = Vec::new();
    while let Ok(Some(entry)) = entries.next_entry().await {
        if let Ok(name) = entry.file_name().into_string() {
            names.push(name);
        }
    }
    names.sort();
    names
}

/// Scans one package entry.
///
/// Parsed metadata decides alone: a declared `directories.lib` resolves
/// against the package directory and is the package's contribution; parsed
/// metadata without it contributes nothing. Only when the metadata is
/// missing or unparsable and the entry is a scope (`@`-prefixed) does the
/// scan descend, exactly `depth` more levels, treating each child as its
/// own package entry.
async fn scan_package(node_dir: &Path, name: &str, depth: u8) -> Vec<PathBuf> {
    let package_dir = node_dir.join(name);

    match package_json(&package_dir).await {
        Some(pkg) => pkg
            .directories
            .and_then(|d| d.lib)
            .map(|lib| vec![util::normalize_path(Path::new(&lib), &package_dir)])
            .unwrap_or_default(),
        None if name.starts_with('@') && depth > 0 => {
            let mut libs = Vec::new();
            for child in package_entries(&package_dir).await {
                libs.extend(Box::pin(scan_package(&package_dir, &child, depth - 1)).await);
            }
            libs
        }
        None => Vec::new(),
    }
}

/// Parsed package metadata, or `None` on any failure (missing file,
/// non-directory entry, malformed JSON).
async fn package_json(package_dir: &Path) -> Option<PackageJson> {
    let raw = tokio::fs::read_to_string(package_dir.join("package.json"))
        .await
        .ok()?;

    match serde_json::from_str(&raw) {
        Ok(pkg) => Some(pkg),
        Err(e) => {
            debug!(
                "ignoring malformed package.json in {}: {e}",
                package_dir.display()
            );
            None
        }
    }
}
