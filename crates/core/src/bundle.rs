//! Embedded bundle accessor.
//!
//! Production builds bake their resources into the binary as a table
//! mapping relative paths to base64-encoded, zlib-compressed bytes.
//! Development builds mirror the same layout as loose files under a
//! build-output root. Both live behind the one `Bundle` type so the
//! resolver's fast path does not care which mode it is in.

use crate::error::Result;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use flate2::read::ZlibDecoder;
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use std::io::Read;
use std::path::{MAIN_SEPARATOR, Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

/// Dev-mode bundle root; read once per process.
static DEV_ROOT: Lazy<PathBuf> = Lazy::new(|| {
    std::env::var("LOADPATH_DEV_ROOT")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("target/bundle"))
});

/// The compiled-in resource table: normalized relative path (host
/// separator convention) to base64-encoded zlib-compressed bytes.
#[derive(Debug, Clone, Default)]
pub struct ResourceTable {
    entries: IndexMap<String, String>,
}

impl ResourceTable {
    pub fn from_json(json: &str) -> Result<Self> {
        let entries: IndexMap<String, String> = serde_json::from_str(json)?;
        Ok(Self { entries })
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }
}

pub enum Bundle {
    /// Loose files mirrored under a build-output root.
    Dev { root: PathBuf },
    /// The compiled-in resource table.
    Embedded { table: ResourceTable },
}

impl Bundle {
    pub fn dev(root: PathBuf) -> Self {
        Bundle::Dev { root }
    }

    /// Dev bundle at the default root (`target/bundle`, overridable via
    /// `LOADPATH_DEV_ROOT`).
    pub fn dev_default() -> Self {
        Bundle::Dev {
            root: DEV_ROOT.clone(),
        }
    }

    pub fn embedded(table: ResourceTable) -> Self {
        Bundle::Embedded { table }
    }

    /// Existence check only; reads no content. Embedded mode never
    /// touches the filesystem.
    pub async fn contains(&self, name: &str) -> bool {
        match self {
            Bundle::Dev { root } => tokio::fs::metadata(root.join(name))
                .await
                .map(|m| m.is_file())
                .unwrap_or(false),
            Bundle::Embedded { table } => table.contains(&normalize_key(name)),
        }
    }

    /// Resource content as text; `Ok(None)` when the bundle has no such
    /// resource. Embedded values are base64-decoded and inflated.
    pub async fn read(&self, name: &str) -> Result<Option<String>> {
        match self {
            Bundle::Dev { root } => match tokio::fs::read_to_string(root.join(name)).await {
                Ok(text) => Ok(Some(text)),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
                Err(e) => Err(e.into()),
            },
            Bundle::Embedded { table } => match table.get(&normalize_key(name)) {
                Some(encoded) => {
                    let compressed = BASE64.decode(encoded)?;
                    let mut decoder = ZlibDecoder::new(&compressed[..]);
                    let mut bytes = Vec::new();
                    decoder.read_to_end(&mut bytes)?;
                    Ok(Some(String::from_utf8(bytes)?))
                }
                None => Ok(None),
            },
        }
    }

    /// Every resource name in the bundle: table keys in embedded mode, a
    /// relative walk of the root in dev mode.
    pub fn keys(&self) -> Vec<String> {
        match self {
            Bundle::Dev { root } => WalkDir::new(root)
                .sort_by_file_name()
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file())
                .filter_map(|e| {
                    e.path()
                        .strip_prefix(root)
                        .ok()
                        .map(|p| p.to_string_lossy().into_owned())
                })
                .collect(),
            Bundle::Embedded { table } => table.keys(),
        }
    }

    /// Writes every bundled resource under `outdir`, creating intermediate
    /// directories. Resources that fail to read or write are skipped.
    pub async fn dump(&self, outdir: &Path) -> Result<()> {
        for key in self.keys() {
            let content = match self.read(&key).await {
                Ok(Some(content)) => content,
                Ok(None) => continue,
                Err(e) => {
                    warn!("failed to read bundled resource {key}: {e}");
                    continue;
                }
            };

            let target = outdir.join(key_as_path(&key));
            if let Some(parent) = target.parent() {
                tokio::fs::create_dir_all(parent).await?;
            }
            if let Err(e) = tokio::fs::write(&target, content).await {
                warn!("failed to dump {}: {e}", target.display());
            }
        }
        Ok(())
    }
}

/// Embedded keys use the host path-separator convention; lookups arrive
/// with forward slashes.
fn normalize_key(name: &str) -> String {
    if MAIN_SEPARATOR == '/' {
        name.to_string()
    } else {
        name.replace('/', &MAIN_SEPARATOR.to_string())
    }
}

fn key_as_path(key: &str) -> PathBuf {
    key.split(MAIN_SEPARATOR).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::Compression;
    use flate2::write::ZlibEncoder;
    use std::io::Write;
    use tempfile::tempdir;

    fn encode_resource(text: &str) -> String {
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(text.as_bytes()).unwrap();
        BASE64.encode(encoder.finish().unwrap())
    }

    fn embedded_fixture() -> Bundle {
        let json = serde_json::json!({
            "lumo/core.cljs": encode_resource("(ns lumo.core)"),
            "lumo/repl.cljs": encode_resource("(ns lumo.repl)"),
        })
        .to_string();
        Bundle::embedded(ResourceTable::from_json(&json).unwrap())
    }

    #[tokio::test]
    async fn test_embedded_read_decodes_and_inflates() {
        let bundle = embedded_fixture();
        assert_eq!(
            bundle.read("lumo/core.cljs").await.unwrap(),
            Some("(ns lumo.core)".to_string())
        );
        assert_eq!(bundle.read("lumo/missing.cljs").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_embedded_contains_and_keys() {
        let bundle = embedded_fixture();
        assert!(bundle.contains("lumo/core.cljs").await);
        assert!(!bundle.contains("lumo/missing.cljs").await);
        assert_eq!(bundle.keys(), vec!["lumo/core.cljs", "lumo/repl.cljs"]);
    }

    #[tokio::test]
    async fn test_dev_bundle_reads_loose_files() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("bundle");
        std::fs::create_dir_all(root.join("lumo")).unwrap();
        std::fs::write(root.join("lumo/core.cljs"), "(ns lumo.core)").unwrap();

        let bundle = Bundle::dev(root);
        assert!(bundle.contains("lumo/core.cljs").await);
        assert!(!bundle.contains("lumo/missing.cljs").await);
        assert_eq!(
            bundle.read("lumo/core.cljs").await.unwrap(),
            Some("(ns lumo.core)".to_string())
        );
        assert_eq!(bundle.keys(), vec!["lumo/core.cljs".to_string()]);
    }

    #[tokio::test]
    async fn test_dump_recreates_layout() {
        let bundle = embedded_fixture();
        let dir = tempdir().unwrap();
        let out = dir.path().join("sdk");

        bundle.dump(&out).await.unwrap();

        assert_eq!(
            std::fs::read_to_string(out.join("lumo/core.cljs")).unwrap(),
            "(ns lumo.core)"
        );
        assert_eq!(
            std::fs::read_to_string(out.join("lumo/repl.cljs")).unwrap(),
            "(ns lumo.repl)"
        );
    }
}
