mod error;
mod log_file;

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use authlog_core::{NormalizedEvent, ProgressMarker};
use fs2::FileExt;
use tracing::{debug, info};

pub use error::{Result, StoreError};

/// Locations of the files owned by a [`LogStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorePaths {
    pub log_path: PathBuf,
    pub progress_path: PathBuf,
    pub lock_path: PathBuf,
}

/// What a commit wrote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitSummary {
    pub events_written: usize,
    pub log_bytes: u64,
    pub marker_written: bool,
}

/// Single-writer handle over the event log and its progress marker.
///
/// Holding a `LogStore` holds an exclusive advisory lock on
/// [`StorePaths::lock_path`]; the lock is released when the store is dropped.
pub struct LogStore {
    paths: StorePaths,
    _lock_file: File,
}

impl LogStore {
    pub fn open(paths: StorePaths) -> Result<Self> {
        for path in [&paths.log_path, &paths.progress_path, &paths.lock_path] {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                fs::create_dir_all(parent)?;
            }
        }
        let lock_file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&paths.lock_path)?;
        if let Err(err) = lock_file.try_lock_exclusive() {
            return Err(lock_error(&paths.lock_path, err));
        }
        debug!(lock = %paths.lock_path.display(), "acquired store lock");
        Ok(Self {
            paths,
            _lock_file: lock_file,
        })
    }

    /// Returns `None` for a missing or empty marker file.
    pub fn read_progress(&self) -> Result<Option<ProgressMarker>> {
        let Some(contents) = read_optional(&self.paths.progress_path)? else {
            return Ok(None);
        };
        if contents.trim().is_empty() {
            return Ok(None);
        }
        serde_json::from_str(&contents)
            .map(Some)
            .map_err(|source| StoreError::CorruptProgress {
                path: self.paths.progress_path.clone(),
                source,
            })
    }

    pub fn read_log(&self) -> Result<Vec<NormalizedEvent>> {
        let Some(contents) = read_optional(&self.paths.log_path)? else {
            return Ok(Vec::new());
        };
        log_file::decode_log(&contents).map_err(|source| StoreError::CorruptLog {
            path: self.paths.log_path.clone(),
            source,
        })
    }

    /// Replaces the log and, when given, the progress marker.
    ///
    /// Both files are staged next to their targets and fsynced before either
    /// is renamed into place. The log is renamed first: a crash between the
    /// two renames leaves a newer log under an older marker, which the next
    /// sync repairs by re-fetching.
    pub fn commit(
        &mut self,
        events: &[NormalizedEvent],
        marker: Option<&ProgressMarker>,
    ) -> Result<CommitSummary> {
        let log_bytes = log_file::encode_log(events)?;
        let marker_bytes = marker.map(serde_json::to_vec_pretty).transpose()?;
        let staged_log = stage(&self.paths.log_path, &log_bytes)?;
        let staged_marker = match marker_bytes {
            Some(bytes) => {
                match stage(&self.paths.progress_path, &bytes) {
                    Ok(path) => Some(path),
                    Err(err) => {
                        discard_staged([&staged_log]);
                        return Err(err);
                    }
                }
            }
            None => None,
        };

        if let Err(err) = fs::rename(&staged_log, &self.paths.log_path) {
            discard_staged(std::iter::once(&staged_log).chain(&staged_marker));
            return Err(err.into());
        }
        if let Some(staged_marker) = &staged_marker
            && let Err(err) = fs::rename(staged_marker, &self.paths.progress_path)
        {
            discard_staged([staged_marker]);
            return Err(err.into());
        }
        sync_parent(&self.paths.log_path)?;
        if staged_marker.is_some() {
            sync_parent(&self.paths.progress_path)?;
        }

        let summary = CommitSummary {
            events_written: events.len(),
            log_bytes: log_bytes.len() as u64,
            marker_written: staged_marker.is_some(),
        };
        info!(
            events = summary.events_written,
            bytes = summary.log_bytes,
            marker = summary.marker_written,
            "committed event log"
        );
        Ok(summary)
    }
}

fn lock_error(path: &Path, err: io::Error) -> StoreError {
    if err.raw_os_error() == fs2::lock_contended_error().raw_os_error() {
        StoreError::Locked {
            path: path.to_path_buf(),
        }
    } else {
        StoreError::Io(err)
    }
}

fn discard_staged<'a>(staged: impl IntoIterator<Item = &'a PathBuf>) {
    for path in staged {
        let _ = fs::remove_file(path);
    }
}

fn read_optional(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(Some(contents)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err.into()),
    }
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|name| name.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

fn stage(path: &Path, bytes: &[u8]) -> Result<PathBuf> {
    let temp_path = staging_path(path);
    let mut file = File::create(&temp_path)?;
    file.write_all(bytes)?;
    file.sync_all()?;
    Ok(temp_path)
}

fn sync_parent(path: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            File::open(parent)?.sync_all()?;
        }
    }
    #[cfg(not(unix))]
    {
        let _ = path;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staging_path_appends_suffix() {
        let path = Path::new("/data/Logs.json");
        assert_eq!(staging_path(path), PathBuf::from("/data/Logs.json.tmp"));
    }

    #[test]
    fn only_contention_maps_to_locked() {
        let path = Path::new("/data/.authlog.lock");
        assert!(matches!(
            lock_error(path, fs2::lock_contended_error()),
            StoreError::Locked { .. }
        ));
        assert!(matches!(
            lock_error(path, io::Error::other("unsupported filesystem")),
            StoreError::Io(_)
        ));
    }
}
