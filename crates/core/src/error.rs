use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadpathError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("archive error: {0}")]
    Archive(#[from] zip::result::ZipError),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("base64 decode error: {0}")]
    Decode(#[from] base64::DecodeError),
    #[error("invalid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("entry {entry} not found in {}", archive.display())]
    EntryNotFound { archive: PathBuf, entry: String },
}

pub type Result<T> = std::result::Result<T, LoadpathError>;
