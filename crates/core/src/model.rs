//! Shared data model for the resolution engine.

use serde::Serialize;
use std::path::{Path, PathBuf};

/// A single search location: a plain directory or a compressed archive.
///
/// Identity is the normalized absolute path; classification is by file
/// extension alone (no filesystem probe), so a missing archive still
/// classifies as an archive root and fails at open time instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceRoot {
    Directory(PathBuf),
    Archive(PathBuf),
}

impl SourceRoot {
    pub fn classify(path: PathBuf) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("jar") | Some("zip") => SourceRoot::Archive(path),
            _ => SourceRoot::Directory(path),
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            SourceRoot::Directory(p) | SourceRoot::Archive(p) => p,
        }
    }
}

/// Where a resolved resource lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Resource {
    /// Served by the embedded bundle (or its mirrored dev layout).
    Bundled { name: String },
    /// A loose file under a directory root; `path` is absolute.
    File { path: PathBuf },
    /// An entry inside an archive root.
    Archive {
        archive: PathBuf,
        entry: String,
        modified_ms: u64,
    },
}

/// Content plus its modification time in Unix milliseconds.
///
/// `modified_ms` comes from the filesystem mtime for loose files and from
/// the entry's stored timestamp for archive members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Source {
    pub content: String,
    pub modified_ms: u64,
}

impl Source {
    /// Reads a loose file as UTF-8 text together with its mtime.
    pub async fn read(path: &Path) -> crate::error::Result<Self> {
        let content = tokio::fs::read_to_string(path).await?;
        let metadata = tokio::fs::metadata(path).await?;
        Ok(Self {
            content,
            modified_ms: crate::util::mtime_millis(&metadata),
        })
    }
}

/// One data-reader registration file collected from a root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataReader {
    pub url: PathBuf,
    pub source: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_by_extension() {
        assert_eq!(
            SourceRoot::classify(PathBuf::from("/deps/core.jar")),
            SourceRoot::Archive(PathBuf::from("/deps/core.jar"))
        );
        assert_eq!(
            SourceRoot::classify(PathBuf::from("/deps/core.zip")),
            SourceRoot::Archive(PathBuf::from("/deps/core.zip"))
        );
        assert_eq!(
            SourceRoot::classify(PathBuf::from("/deps/src")),
            SourceRoot::Directory(PathBuf::from("/deps/src"))
        );
        // Classification never probes the filesystem
        assert_eq!(
            SourceRoot::classify(PathBuf::from("/deps/jarlike.txt")),
            SourceRoot::Directory(PathBuf::from("/deps/jarlike.txt"))
        );
    }
}
