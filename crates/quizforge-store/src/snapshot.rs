use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::record::{Attempt, QuizRecord};

/// The full contents of a store, in insertion order.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub(crate) struct Snapshot {
    #[serde(default)]
    pub quizzes: Vec<QuizRecord>,
    #[serde(default)]
    pub attempts: Vec<Attempt>,
}

impl Snapshot {
    pub fn quiz(&self, id: Uuid) -> Option<QuizRecord> {
        self.quizzes.iter().find(|q| q.id == id).cloned()
    }

    pub fn quizzes_newest_first(&self) -> Vec<QuizRecord> {
        let mut quizzes: Vec<_> = self.quizzes.iter().rev().cloned().collect();
        quizzes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        quizzes
    }

    pub fn attempts_newest_first(&self) -> Vec<Attempt> {
        let mut attempts: Vec<_> = self.attempts.iter().rev().cloned().collect();
        attempts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        attempts
    }
}
