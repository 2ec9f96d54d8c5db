//! quizforge-store: Quiz and attempt persistence.
//!
//! [`QuizStore`] is the interface the HTTP layer talks to. Two
//! implementations ship: [`MemoryStore`] for tests and throwaway servers, and
//! [`FileStore`], which keeps a JSON snapshot on disk.

pub mod error;
pub mod file;
pub mod memory;
pub mod record;
mod snapshot;

use async_trait::async_trait;
use uuid::Uuid;

pub use error::{StoreError, StoreResult};
pub use file::FileStore;
pub use memory::MemoryStore;
pub use record::{Attempt, AttemptView, QuizRecord};

/// Storage for quizzes and attempts.
#[async_trait]
pub trait QuizStore: Send + Sync {
    async fn insert_quiz(&self, record: QuizRecord) -> StoreResult<QuizRecord>;

    async fn get_quiz(&self, id: Uuid) -> StoreResult<Option<QuizRecord>>;

    /// All quizzes, newest first.
    async fn list_quizzes(&self) -> StoreResult<Vec<QuizRecord>>;

    async fn insert_attempt(&self, attempt: Attempt) -> StoreResult<Attempt>;

    /// All attempts, newest first.
    async fn list_attempts(&self) -> StoreResult<Vec<Attempt>>;

    /// Resolve an attempt's quiz.
    async fn attempt_view(&self, attempt: Attempt) -> StoreResult<AttemptView> {
        let quiz = self.get_quiz(attempt.quiz_id).await?;
        Ok(AttemptView { attempt, quiz })
    }

    /// All attempts with their quizzes resolved, newest first.
    async fn list_attempt_views(&self) -> StoreResult<Vec<AttemptView>> {
        let attempts = self.list_attempts().await?;
        let mut views = Vec::with_capacity(attempts.len());
        for attempt in attempts {
            views.push(self.attempt_view(attempt).await?);
        }
        Ok(views)
    }
}
