//! Filesystem read primitives
//!
//! A missing file is an expected outcome for optional metadata, so reads
//! return an explicit three-way result instead of burying ENOENT inside an
//! error. Only "file not found" maps to [`FileReadResult::Absent`]; every
//! other I/O failure is fatal to the assembly run.

use std::io::ErrorKind;
use std::path::Path;

use serde_json::Value;

use crate::error::{MetaError, Result};

/// Outcome of reading a file that may legitimately not exist.
#[derive(Debug)]
pub enum FileReadResult {
    /// File exists and was read completely.
    Found(String),
    /// File does not exist.
    Absent,
    /// Any other I/O failure.
    IoFailure(std::io::Error),
}

/// Read a file to a string, distinguishing absence from failure.
pub async fn read_file(path: &Path) -> FileReadResult {
    match tokio::fs::read_to_string(path).await {
        Ok(text) => FileReadResult::Found(text),
        Err(err) if err.kind() == ErrorKind::NotFound => FileReadResult::Absent,
        Err(err) => FileReadResult::IoFailure(err),
    }
}

/// Read and parse a JSON file.
///
/// Returns `Ok(None)` when the file does not exist. A file that exists but
/// does not parse is [`MetaError::MalformedMetadata`].
pub async fn read_json_file(path: &Path) -> Result<Option<Value>> {
    match read_file(path).await {
        FileReadResult::Found(text) => match serde_json::from_str(&text) {
            Ok(value) => Ok(Some(value)),
            Err(_) => Err(MetaError::MalformedMetadata {
                file: path.to_path_buf(),
            }),
        },
        FileReadResult::Absent => Ok(None),
        FileReadResult::IoFailure(source) => Err(MetaError::Io {
            file: path.to_path_buf(),
            source,
        }),
    }
}

/// Check whether a path exists and is a directory.
///
/// A missing path is `Ok(false)`, not an error.
pub async fn is_directory(path: &Path) -> Result<bool> {
    match tokio::fs::metadata(path).await {
        Ok(meta) => Ok(meta.is_dir()),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
        Err(source) => Err(MetaError::Io {
            file: path.to_path_buf(),
            source,
        }),
    }
}
