//! Cache I/O: direct reads and writes of derived artifacts.
//!
//! No root search, no archive awareness. Reads are fail-safe (`None` on
//! any failure, including a missing file); a failed write comes back as a
//! value for the caller to inspect, never as a panic. Parent directories
//! are not created.

use crate::error::Result;
use crate::model::Source;
use std::path::Path;

pub async fn read_cache(path: &Path) -> Option<Source> {
    Source::read(path).await.ok()
}

pub async fn write_cache(path: &Path, content: &str) -> Result<()> {
    tokio::fs::write(path, content).await?;
    Ok(())
}
