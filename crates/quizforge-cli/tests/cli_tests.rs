//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// The binary, run in `dir` with no provider credentials so generation is
/// deterministic.
fn quizforge(dir: &TempDir) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("quizforge").unwrap();
    cmd.current_dir(dir.path())
        .env("HOME", dir.path())
        .env_remove("GEMINI_API_KEY")
        .env_remove("LLM_API_KEY")
        .env_remove("GEMINI_API_URL")
        .env_remove("RUST_LOG");
    cmd
}

fn generate_quiz_json(dir: &TempDir, topic: &str, n: u32) -> serde_json::Value {
    let output = quizforge(dir)
        .args(["generate", "--topic", topic, "--num-questions", &n.to_string()])
        .output()
        .unwrap();
    assert!(output.status.success());
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn generate_offline_prints_fallback_json() {
    let dir = TempDir::new().unwrap();

    quizforge(&dir)
        .args([
            "generate",
            "--topic",
            "Oceans",
            "--num-questions",
            "4",
            "--difficulty",
            "hard",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"title\": \"Quick Quiz: Oceans\""))
        .stdout(predicate::str::contains("\"numQuestions\": 4"))
        .stdout(predicate::str::contains("\"difficulty\": \"hard\""))
        .stderr(predicate::str::contains("Source: fallback"));
}

#[test]
fn generate_is_deterministic_offline() {
    let dir = TempDir::new().unwrap();
    let first = generate_quiz_json(&dir, "Rivers", 5);
    let second = generate_quiz_json(&dir, "Rivers", 5);
    assert_eq!(first, second);
    assert_eq!(first["questions"].as_array().unwrap().len(), 5);
}

#[test]
fn generate_table_format() {
    let dir = TempDir::new().unwrap();

    quizforge(&dir)
        .args(["generate", "--topic", "Oceans", "--format", "table"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Quick Quiz: Oceans (medium, 3 questions)"))
        .stdout(predicate::str::contains("Question"))
        .stdout(predicate::str::contains("Answer"));
}

#[test]
fn generate_rejects_invalid_input() {
    let dir = TempDir::new().unwrap();

    quizforge(&dir)
        .args(["generate", "--topic", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: Missing or invalid 'topic'"));

    quizforge(&dir)
        .args(["generate", "--topic", "Oceans", "--num-questions", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("between 1 and 50"));

    quizforge(&dir)
        .args(["generate", "--topic", "Oceans", "--difficulty", "brutal"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("'difficulty'"));
}

#[test]
fn score_perfect_and_partial_attempts() {
    let dir = TempDir::new().unwrap();
    let quiz = generate_quiz_json(&dir, "Oceans", 4);
    std::fs::write(dir.path().join("quiz.json"), quiz.to_string()).unwrap();

    let key: Vec<serde_json::Value> = quiz["questions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|q| q["answer"].clone())
        .collect();
    std::fs::write(
        dir.path().join("perfect.json"),
        serde_json::Value::Array(key.clone()).to_string(),
    )
    .unwrap();

    quizforge(&dir)
        .args(["score", "--quiz", "quiz.json", "--answers", "perfect.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Score: 4/4"));

    let partial = serde_json::json!([key[0], null, "nope"]);
    std::fs::write(dir.path().join("partial.json"), partial.to_string()).unwrap();

    quizforge(&dir)
        .args(["score", "--quiz", "quiz.json", "--answers", "partial.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Score: 1/4"))
        .stdout(predicate::str::contains("wrong"));
}

#[test]
fn score_missing_file() {
    let dir = TempDir::new().unwrap();

    quizforge(&dir)
        .args(["score", "--quiz", "missing.json", "--answers", "also-missing.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: failed to read quiz"));
}

#[test]
fn init_creates_config() {
    let dir = TempDir::new().unwrap();

    quizforge(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created quizforge.toml"));

    assert!(dir.path().join("quizforge.toml").exists());
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    quizforge(&dir).arg("init").assert().success();

    quizforge(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn generated_config_without_key_falls_back() {
    let dir = TempDir::new().unwrap();
    quizforge(&dir).arg("init").assert().success();

    quizforge(&dir)
        .args(["generate", "--topic", "Oceans"])
        .assert()
        .success()
        .stderr(predicate::str::contains("fallback (no provider configured)"));
}

#[test]
fn list_models_from_config() {
    let dir = TempDir::new().unwrap();
    quizforge(&dir).arg("init").assert().success();

    quizforge(&dir)
        .args(["list-models", "--provider", "gemini"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Provider: gemini (default)"))
        .stdout(predicate::str::contains("gemini-2.0-flash"))
        .stdout(predicate::str::contains("gpt-4.1").not());
}

#[test]
fn list_models_without_config() {
    let dir = TempDir::new().unwrap();

    quizforge(&dir)
        .arg("list-models")
        .assert()
        .success()
        .stdout(predicate::str::contains("No providers configured"));
}

#[test]
fn missing_config_path_is_an_error() {
    let dir = TempDir::new().unwrap();

    quizforge(&dir)
        .args(["generate", "--topic", "Oceans", "--config", "nope.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file not found"));
}

#[test]
fn help_output() {
    let dir = TempDir::new().unwrap();

    quizforge(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Generate, store and score multiple-choice quizzes",
        ));
}

#[test]
fn version_output() {
    let dir = TempDir::new().unwrap();

    quizforge(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("quizforge"));
}
