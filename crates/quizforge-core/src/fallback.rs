//! Deterministic offline quiz generation.
//!
//! Used when no provider is configured or when provider output could not be
//! normalized. Output depends only on the inputs: no randomness, no clock,
//! no I/O.

use crate::model::{Difficulty, Question, Quiz};

/// Topic used when the caller passes a blank one.
pub const DEFAULT_TOPIC: &str = "General Knowledge";

struct Template {
    question: &'static str,
    correct: &'static str,
    distractors: [&'static str; 3],
}

const TEMPLATES: &[Template] = &[
    Template {
        question: "What is the main topic of this quiz?",
        correct: "{topic}",
        distractors: ["Mathematics", "History", "Science"],
    },
    Template {
        question: "Which statement best describes {topic}?",
        correct: "A core idea of {topic}",
        distractors: [
            "An unrelated idea",
            "A common misconception about {topic}",
            "None of the above",
        ],
    },
    Template {
        question: "Which of these is most closely related to {topic}?",
        correct: "A key term in {topic}",
        distractors: [
            "A term from cooking",
            "A term from astronomy",
            "A term from music",
        ],
    },
    Template {
        question: "Why do people study {topic}?",
        correct: "To understand how {topic} works",
        distractors: [
            "It is never studied",
            "Only for entertainment",
            "Because it is required by law",
        ],
    },
    Template {
        question: "Which is a good first step when learning {topic}?",
        correct: "Learning the fundamentals of {topic}",
        distractors: [
            "Skipping the basics",
            "Memorizing random facts",
            "Avoiding practice",
        ],
    },
];

/// Build a quiz of exactly `count` questions about `topic`.
///
/// Every question has four unique options. The correct option rotates
/// through positions 0..4 with the question index so an answer key is never
/// "always A".
pub fn fallback_quiz(topic: &str, count: usize, difficulty: Difficulty) -> Quiz {
    let topic = match topic.trim() {
        "" => DEFAULT_TOPIC,
        t => t,
    };

    let questions = (0..count).map(|i| fallback_question(topic, i)).collect();

    Quiz {
        title: format!("Quick Quiz: {topic}"),
        num_questions: count as u32,
        difficulty,
        questions,
    }
}

fn fallback_question(topic: &str, index: usize) -> Question {
    let template = &TEMPLATES[index % TEMPLATES.len()];
    let round = index / TEMPLATES.len();

    let fill = |s: &str| s.replace("{topic}", topic);

    let mut question = fill(template.question);
    if round > 0 {
        question = format!("{question} (round {})", round + 1);
    }

    let answer = fill(template.correct);

    // A topic can collide with a fixed distractor ("History"); the
    // distractor is the one that gets disambiguated.
    let mut options: Vec<String> = Vec::with_capacity(4);
    for (i, distractor) in template.distractors.iter().enumerate() {
        let mut distractor = fill(distractor);
        if distractor == answer || options.contains(&distractor) {
            distractor = format!("{distractor} ({})", i + 1);
        }
        options.push(distractor);
    }
    options.insert(index % 4, answer.clone());

    Question {
        question,
        options,
        answer,
    }
}
