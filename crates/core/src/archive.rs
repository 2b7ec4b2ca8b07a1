//! Archive reader: queries a `.jar`/`.zip` source root by entry name.
//!
//! The whole archive file is read into memory and parsed once per open;
//! entry lookups go through the central directory. Opening a missing or
//! corrupt archive is an error for the caller to map (multi-root scans
//! treat it the same as "entry not found").

use crate::error::Result;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};
use zip::ZipArchive;
use zip::result::ZipError;

pub struct Archive {
    path: PathBuf,
    zip: ZipArchive<Cursor<Vec<u8>>>,
}

impl Archive {
    pub async fn open(path: &Path) -> Result<Self> {
        let data = tokio::fs::read(path).await?;
        let zip = ZipArchive::new(Cursor::new(data))?;
        Ok(Self {
            path: path.to_path_buf(),
            zip,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Looks up a single entry: `Ok(Some((text, modified_ms)))` when
    /// present, `Ok(None)` when the archive has no such entry.
    pub fn entry(&mut self, name: &str) -> Result<Option<(String, u64)>> {
        let mut file = match self.zip.by_name(name) {
            Ok(file) => file,
            Err(ZipError::FileNotFound) => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let modified_ms = file
            .last_modified()
            .map(datetime_to_unix_millis)
            .unwrap_or(0);

        let mut text = String::new();
        file.read_to_string(&mut text)?;
        Ok(Some((text, modified_ms)))
    }

    /// Existence probe that skips the content read: the entry's stored
    /// modification time in Unix ms, or `Ok(None)` when absent.
    pub fn entry_modified(&mut self, name: &str) -> Result<Option<u64>> {
        match self.zip.by_name(name) {
            Ok(file) => Ok(Some(
                file.last_modified()
                    .map(datetime_to_unix_millis)
                    .unwrap_or(0),
            )),
            Err(ZipError::FileNotFound) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// All entry names starting with `prefix`, sorted for determinism.
    pub fn entry_names_with_prefix(&self, prefix: &str) -> Vec<String> {
        let mut names: Vec<String> = self
            .zip
            .file_names()
            .filter(|name| name.starts_with(prefix))
            .map(str::to_string)
            .collect();
        names.sort();
        names
    }
}

/// Converts a zip entry's stored DOS timestamp to Unix milliseconds.
/// The stored time carries no zone; it is interpreted as UTC.
fn datetime_to_unix_millis(dt: zip::DateTime) -> u64 {
    let days = days_from_civil(dt.year() as i64, dt.month() as u32, dt.day() as u32);
    let secs = days * 86_400
        + dt.hour() as i64 * 3_600
        + dt.minute() as i64 * 60
        + dt.second() as i64;
    secs.max(0) as u64 * 1_000
}

// Howard Hinnant's days_from_civil: days since 1970-01-01 for a proleptic
// Gregorian calendar date.
fn days_from_civil(year: i64, month: u32, day: u32) -> i64 {
    let y = if month <= 2 { year - 1 } else { year };
    let era = if y >= 0 { y } else { y - 399 } / 400;
    let yoe = y - era * 400;
    let mp = if month > 2 { month - 3 } else { month + 9 } as i64;
    let doy = (153 * mp + 2) / 5 + day as i64 - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}
