//! JSON-file-backed store.
//!
//! The whole store is rewritten after every insert: serialized into a
//! temporary file in the same directory, then renamed over the target so a
//! crash never leaves a half-written snapshot behind.

use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::StoreResult;
use crate::record::{Attempt, QuizRecord};
use crate::snapshot::Snapshot;
use crate::QuizStore;

/// A store persisted to a single JSON file.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    inner: RwLock<Snapshot>,
}

impl FileStore {
    /// Open the store at `path`, loading an existing snapshot if there is one.
    pub async fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        let snapshot = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Snapshot::default(),
            Err(e) => return Err(e.into()),
        };
        tracing::info!(
            path = %path.display(),
            quizzes = snapshot.quizzes.len(),
            attempts = snapshot.attempts.len(),
            "opened file store"
        );
        Ok(Self {
            path,
            inner: RwLock::new(snapshot),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Apply `change` and persist. The in-memory state is only updated once
    /// the snapshot is on disk.
    async fn commit(&self, change: impl FnOnce(&mut Snapshot)) -> StoreResult<()> {
        let mut guard = self.inner.write().await;
        let mut next = guard.clone();
        change(&mut next);

        let bytes = serde_json::to_vec_pretty(&next)?;
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || write_atomic(&path, &bytes)).await??;

        *guard = next;
        Ok(())
    }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir)?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[async_trait]
impl QuizStore for FileStore {
    async fn insert_quiz(&self, record: QuizRecord) -> StoreResult<QuizRecord> {
        let stored = record.clone();
        self.commit(move |s| s.quizzes.push(stored)).await?;
        Ok(record)
    }

    async fn get_quiz(&self, id: Uuid) -> StoreResult<Option<QuizRecord>> {
        Ok(self.inner.read().await.quiz(id))
    }

    async fn list_quizzes(&self) -> StoreResult<Vec<QuizRecord>> {
        Ok(self.inner.read().await.quizzes_newest_first())
    }

    async fn insert_attempt(&self, attempt: Attempt) -> StoreResult<Attempt> {
        let stored = attempt.clone();
        self.commit(move |s| s.attempts.push(stored)).await?;
        Ok(attempt)
    }

    async fn list_attempts(&self) -> StoreResult<Vec<Attempt>> {
        Ok(self.inner.read().await.attempts_newest_first())
    }
}
