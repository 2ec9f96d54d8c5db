//! Repair and validation of parsed provider output.
//!
//! The provider is untrusted: questions may be numbered, options duplicated
//! or missing, and the answer may not match any option. [`normalize_quiz`]
//! turns whatever parsed into a [`Quiz`] that satisfies every model
//! invariant, or refuses.

use serde_json::{Map, Value};

use crate::error::NormalizeError;
use crate::model::{Difficulty, Question, Quiz, MAX_OPTIONS, MIN_OPTIONS};
use crate::sanitize::{sanitize, sanitize_value};

/// Normalize a parsed candidate into a quiz with exactly `count` questions.
///
/// Only the first `count` candidate questions are considered. If fewer than
/// `count` usable questions remain the whole candidate is rejected; partial
/// quizzes are never returned.
pub fn normalize_quiz(
    candidate: &Map<String, Value>,
    topic: &str,
    count: usize,
    difficulty: Difficulty,
) -> Result<Quiz, NormalizeError> {
    let raw_questions = candidate
        .get("questions")
        .and_then(Value::as_array)
        .ok_or(NormalizeError::MissingQuestions)?;

    let questions: Vec<Question> = raw_questions
        .iter()
        .take(count)
        .filter_map(Value::as_object)
        .enumerate()
        .map(|(i, raw)| normalize_question(raw, topic, i + 1))
        .collect();

    if questions.len() != count {
        return Err(NormalizeError::QuestionCount {
            expected: count,
            actual: questions.len(),
        });
    }

    let title = match candidate.get("title").and_then(Value::as_str) {
        Some(t) if !sanitize(t).is_empty() => sanitize(t),
        _ => format!("Quiz: {topic}"),
    };

    Ok(Quiz {
        title,
        num_questions: count as u32,
        difficulty,
        questions,
    })
}

/// Normalize one candidate question. `position` is 1-based and only used
/// for the placeholder text of an empty question.
pub fn normalize_question(raw: &Map<String, Value>, topic: &str, position: usize) -> Question {
    let mut question = sanitize_value(raw.get("question"));
    if question.is_empty() {
        question = format!("Question {position} about {topic}");
    }

    let mut options: Vec<String> = Vec::new();
    if let Some(raw_options) = raw.get("options").and_then(Value::as_array) {
        for opt in raw_options {
            let opt = sanitize_value(Some(opt));
            if !opt.is_empty() && !options.contains(&opt) {
                options.push(opt);
            }
        }
    }

    let answer = sanitize_value(raw.get("answer"));

    let mut k = 1;
    while options.len() < MIN_OPTIONS {
        let placeholder = format!("Option {k}");
        if !options.contains(&placeholder) {
            options.push(placeholder);
        }
        k += 1;
    }

    if !answer.is_empty() && !options.contains(&answer) {
        options.insert(0, answer.clone());
    }

    options.truncate(MAX_OPTIONS);

    let answer = if options.contains(&answer) {
        answer
    } else {
        options[0].clone()
    };

    Question {
        question,
        options,
        answer,
    }
}
