//! In-memory store.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::StoreResult;
use crate::record::{Attempt, QuizRecord};
use crate::snapshot::Snapshot;
use crate::QuizStore;

/// A store that lives and dies with the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Snapshot>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl QuizStore for MemoryStore {
    async fn insert_quiz(&self, record: QuizRecord) -> StoreResult<QuizRecord> {
        self.inner.write().await.quizzes.push(record.clone());
        Ok(record)
    }

    async fn get_quiz(&self, id: Uuid) -> StoreResult<Option<QuizRecord>> {
        Ok(self.inner.read().await.quiz(id))
    }

    async fn list_quizzes(&self) -> StoreResult<Vec<QuizRecord>> {
        Ok(self.inner.read().await.quizzes_newest_first())
    }

    async fn insert_attempt(&self, attempt: Attempt) -> StoreResult<Attempt> {
        self.inner.write().await.attempts.push(attempt.clone());
        Ok(attempt)
    }

    async fn list_attempts(&self) -> StoreResult<Vec<Attempt>> {
        Ok(self.inner.read().await.attempts_newest_first())
    }
}
