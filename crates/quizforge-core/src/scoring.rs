//! Attempt scoring.
//!
//! Exact, case-sensitive string comparison against the stored answer key.
//! No partial credit.

use serde::{Deserialize, Serialize};

use crate::model::Quiz;

/// Count the answers in `user_answers` that exactly match the quiz's key.
///
/// Entries beyond the number of questions are ignored; missing or `None`
/// entries count as wrong. The result never exceeds `quiz.questions.len()`.
pub fn score(quiz: &Quiz, user_answers: &[Option<String>]) -> usize {
    quiz.questions
        .iter()
        .zip(user_answers)
        .filter(|(q, given)| given.as_deref() == Some(q.answer.as_str()))
        .count()
}

/// Per-question outcome of a graded attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradedAnswer {
    pub question: String,
    pub expected: String,
    pub given: Option<String>,
    pub correct: bool,
}

/// A fully graded attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grade {
    pub score: usize,
    pub total: usize,
    pub answers: Vec<GradedAnswer>,
}

/// Grade every question, keeping the per-question detail.
pub fn grade(quiz: &Quiz, user_answers: &[Option<String>]) -> Grade {
    let answers: Vec<GradedAnswer> = quiz
        .questions
        .iter()
        .enumerate()
        .map(|(i, q)| {
            let given = user_answers.get(i).cloned().flatten();
            GradedAnswer {
                question: q.question.clone(),
                expected: q.answer.clone(),
                correct: given.as_deref() == Some(q.answer.as_str()),
                given,
            }
        })
        .collect();

    Grade {
        score: answers.iter().filter(|a| a.correct).count(),
        total: quiz.questions.len(),
        answers,
    }
}
