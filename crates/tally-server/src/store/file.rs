//! Single-file backend.
//!
//! The record lives in a JSON object (`{"visitor-count": 42}`). An increment
//! holds the store mutex across read, bump, write-temp, fsync and rename, so
//! the file itself is the only copy of the count and an interrupted write
//! leaves the previous value in place.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tally_core::error::{Result, TallyError};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use super::CounterStore;

type Rows = BTreeMap<String, u64>;

#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    tmp: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Open (or prepare) the record file. The file is created lazily on the
    /// first increment; an existing file must parse.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let mut tmp = path.clone().into_os_string();
        tmp.push(".tmp");

        let store = Self {
            tmp: PathBuf::from(tmp),
            path,
            write_lock: Mutex::new(()),
        };
        let rows = store.read_rows().await?;
        tracing::info!(path = %store.path.display(), rows = rows.len(), "file store opened");
        Ok(store)
    }

    async fn read_rows(&self) -> Result<Rows> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(Rows::new()),
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                TallyError::UpstreamUnavailable(format!(
                    "counter file {} is corrupt: {e}",
                    self.path.display()
                ))
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Rows::new()),
            Err(e) => Err(unavailable("read", &self.path, e)),
        }
    }

    async fn write_rows(&self, rows: &Rows) -> Result<()> {
        let body = serde_json::to_vec_pretty(rows)
            .map_err(|e| TallyError::Internal(format!("encode counter file: {e}")))?;
        let mut tmp = tokio::fs::File::create(&self.tmp)
            .await
            .map_err(|e| unavailable("create", &self.tmp, e))?;
        tmp.write_all(&body)
            .await
            .map_err(|e| unavailable("write", &self.tmp, e))?;
        tmp.sync_all()
            .await
            .map_err(|e| unavailable("sync", &self.tmp, e))?;
        drop(tmp);
        tokio::fs::rename(&self.tmp, &self.path)
            .await
            .map_err(|e| unavailable("rename", &self.path, e))
    }
}

fn unavailable(op: &str, path: &Path, e: std::io::Error) -> TallyError {
    TallyError::UpstreamUnavailable(format!("{op} {} failed: {e}", path.display()))
}

#[async_trait]
impl CounterStore for FileStore {
    fn backend(&self) -> &'static str {
        "file"
    }

    async fn increment(&self, key: &str) -> Result<u64> {
        let _guard = self.write_lock.lock().await;

        let mut rows = self.read_rows().await?;
        let next = rows
            .get(key)
            .copied()
            .unwrap_or(0)
            .checked_add(1)
            .ok_or_else(|| TallyError::Internal(format!("counter {key} overflowed")))?;
        rows.insert(key.to_string(), next);

        self.write_rows(&rows).await?;
        Ok(next)
    }
}
