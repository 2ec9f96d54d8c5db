//! The `quizforge generate` command.

use std::path::PathBuf;

use anyhow::Result;

use quizforge_core::validate::validate_request;
use quizforge_core::Quiz;
use quizforge_providers::build_generator;

use crate::OutputFormat;

pub async fn execute(
    topic: String,
    num_questions: Option<i64>,
    difficulty: Option<String>,
    format: OutputFormat,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let request = validate_request(Some(&topic), num_questions, difficulty.as_deref())?;

    let config = quizforge_providers::config::load_config_from(config_path.as_deref())?;
    let generator = build_generator(&config)?;

    let generated = generator
        .generate_detailed(&request.topic, &request.options)
        .await;
    eprintln!("Source: {}", generated.source);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&generated.quiz)?),
        OutputFormat::Table => print_quiz(&generated.quiz),
    }
    Ok(())
}

fn print_quiz(quiz: &Quiz) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec!["#", "Question", "Options", "Answer"]);

    for (i, q) in quiz.questions.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&q.question),
            Cell::new(q.options.join("\n")),
            Cell::new(&q.answer),
        ]);
    }

    println!("{} ({}, {} questions)", quiz.title, quiz.difficulty, quiz.num_questions);
    println!("{table}");
}
