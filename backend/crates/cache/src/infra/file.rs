//! File-Backed Cache Store
//!
//! One pretty-printed JSON file per entry, named `<key>.json`, inside the
//! cache directory. The directory carries an `.htaccess` marker so a web
//! server sharing the document root refuses to serve it.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::fs;

use crate::domain::entities::CacheEntry;
use crate::domain::repository::CacheStore;
use crate::domain::value_objects::CacheKey;
use crate::error::CacheResult;

/// Access-deny marker kept in the cache directory
pub const ACCESS_MARKER: &str = ".htaccess";

const ACCESS_MARKER_CONTENTS: &str = "deny from all\n";

/// Store writing entries under a single directory
#[derive(Debug)]
pub struct FileCacheStore {
    dir: PathBuf,
    write_seq: AtomicU64,
}

impl FileCacheStore {
    /// Store rooted at `dir`; the directory is created on first write
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            write_seq: AtomicU64::new(0),
        }
    }

    /// Store rooted at `dir`, creating the directory and its marker now
    pub async fn open(dir: impl Into<PathBuf>) -> CacheResult<Self> {
        let store = Self::new(dir);
        store.ensure_dir().await?;
        Ok(store)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, key: &CacheKey) -> PathBuf {
        self.dir.join(key.file_name())
    }

    async fn ensure_dir(&self) -> CacheResult<()> {
        fs::create_dir_all(&self.dir).await?;

        let marker = self.dir.join(ACCESS_MARKER);
        if fs::metadata(&marker).await.is_err() {
            fs::write(&marker, ACCESS_MARKER_CONTENTS).await?;
            tracing::debug!(dir = %self.dir.display(), "Cache directory initialized");
        }
        Ok(())
    }

    fn temp_path(&self, key: &CacheKey) -> PathBuf {
        let seq = self.write_seq.fetch_add(1, Ordering::Relaxed);
        self.dir
            .join(format!(".{}.{}.{}.tmp", key, std::process::id(), seq))
    }
}

/// Regular files in `dir` that are entries, skipping the marker and temp files
async fn entry_files(dir: &Path) -> CacheResult<Vec<(PathBuf, u64)>> {
    let mut read_dir = match fs::read_dir(dir).await {
        Ok(read_dir) => read_dir,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    let mut files = Vec::new();
    while let Some(dir_entry) = read_dir.next_entry().await? {
        let name = dir_entry.file_name();
        if name.to_string_lossy().starts_with('.') {
            continue;
        }
        let metadata = dir_entry.metadata().await?;
        if metadata.is_file() {
            files.push((dir_entry.path(), metadata.len()));
        }
    }
    Ok(files)
}

impl CacheStore for FileCacheStore {
    async fn get(&self, key: &CacheKey) -> CacheResult<Option<CacheEntry>> {
        let bytes = match fs::read(self.entry_path(key)).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_slice(&bytes) {
            Ok(entry) => Ok(Some(entry)),
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Corrupt cache entry ignored");
                Ok(None)
            }
        }
    }

    async fn put(&self, key: &CacheKey, entry: &CacheEntry) -> CacheResult<()> {
        self.ensure_dir().await?;

        let bytes = serde_json::to_vec_pretty(entry)?;
        let temp = self.temp_path(key);
        fs::write(&temp, &bytes).await?;

        if let Err(e) = fs::rename(&temp, self.entry_path(key)).await {
            let _ = fs::remove_file(&temp).await;
            return Err(e.into());
        }
        Ok(())
    }

    async fn purge_all(&self) -> CacheResult<u64> {
        let mut deleted = 0;
        for (path, _) in entry_files(&self.dir).await? {
            match fs::remove_file(&path).await {
                Ok(()) => deleted += 1,
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(deleted)
    }

    async fn usage(&self) -> CacheResult<(u64, u64)> {
        let files = entry_files(&self.dir).await?;
        let total_bytes = files.iter().map(|(_, len)| len).sum();
        Ok((files.len() as u64, total_bytes))
    }
}
