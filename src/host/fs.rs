//! Filesystem operations.
//!
//! Thin async wrappers over `tokio::fs`. Every error carries the path it
//! happened on.

use std::path::Path;
use std::time::SystemTime;

use crate::error::{HostError, HostResult};

/// Narrow projection of file metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStat {
    /// Last access time.
    pub atime: SystemTime,
    pub is_dir: bool,
}

impl FileStat {
    /// Access time as milliseconds since the Unix epoch.
    pub fn atime_ms(&self) -> u128 {
        self.atime
            .duration_since(SystemTime::UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0)
    }
}

pub async fn read_binary(path: &Path) -> HostResult<Vec<u8>> {
    tokio::fs::read(path)
        .await
        .map_err(|err| HostError::io(path, err))
}

pub async fn write_binary(path: &Path, data: &[u8]) -> HostResult<bool> {
    tokio::fs::write(path, data)
        .await
        .map_err(|err| HostError::io(path, err))?;
    Ok(true)
}

/// Read a file as UTF-8. Invalid UTF-8 is reported as malformed data.
pub async fn read_utf8(path: &Path) -> HostResult<String> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|err| HostError::io(path, err))
}

pub async fn write_utf8(path: &Path, text: &str) -> HostResult<bool> {
    write_binary(path, text.as_bytes()).await
}

/// List entry names of a directory, sorted.
pub async fn read_dir(path: &Path) -> HostResult<Vec<String>> {
    let mut entries = tokio::fs::read_dir(path)
        .await
        .map_err(|err| HostError::io(path, err))?;

    let mut names = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|err| HostError::io(path, err))?
    {
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    names.sort_unstable();
    Ok(names)
}

/// Stat a path. A missing path is `Ok(None)`, not an error.
pub async fn stat(path: &Path) -> HostResult<Option<FileStat>> {
    let meta = match tokio::fs::metadata(path).await {
        Ok(meta) => meta,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(HostError::io(path, err)),
    };

    // Some filesystems do not track access time; fall back to mtime
    let atime = meta
        .accessed()
        .or_else(|_| meta.modified())
        .unwrap_or(SystemTime::UNIX_EPOCH);

    Ok(Some(FileStat {
        atime,
        is_dir: meta.is_dir(),
    }))
}
