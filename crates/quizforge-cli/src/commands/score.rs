//! The `quizforge score` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use quizforge_core::scoring::{grade, Grade};
use quizforge_core::Quiz;

pub fn execute(quiz_path: PathBuf, answers_path: PathBuf) -> Result<()> {
    let content = std::fs::read_to_string(&quiz_path)
        .with_context(|| format!("failed to read quiz: {}", quiz_path.display()))?;
    let quiz: Quiz = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse quiz: {}", quiz_path.display()))?;

    let content = std::fs::read_to_string(&answers_path)
        .with_context(|| format!("failed to read answers: {}", answers_path.display()))?;
    let answers: Vec<Option<String>> = serde_json::from_str(&content).with_context(|| {
        format!(
            "answers must be a JSON array of strings or nulls: {}",
            answers_path.display()
        )
    })?;

    let result = grade(&quiz, &answers);
    println!("Score: {}/{}", result.score, result.total);
    print_grade(&result);
    Ok(())
}

fn print_grade(result: &Grade) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec!["#", "Question", "Your answer", "Correct answer", "Result"]);

    for (i, answer) in result.answers.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&answer.question),
            Cell::new(answer.given.as_deref().unwrap_or("-")),
            Cell::new(&answer.expected),
            Cell::new(if answer.correct { "correct" } else { "wrong" }),
        ]);
    }

    println!("{table}");
}
