//! The `quizforge init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("quizforge.toml").exists() {
        println!("quizforge.toml already exists, skipping.");
        return Ok(());
    }

    std::fs::write("quizforge.toml", SAMPLE_CONFIG)?;
    println!("Created quizforge.toml");

    println!("\nNext steps:");
    println!("  1. Export GEMINI_API_KEY (or put it in .env)");
    println!("  2. Run: quizforge generate --topic \"Oceans\" --format table");
    println!("  3. Run: quizforge serve");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizforge configuration

default_provider = "gemini"
default_model = "gemini-2.0-flash"
temperature = 0.7
max_tokens = 2048
request_timeout_secs = 30
bind_addr = "127.0.0.1:4000"
# data_file = "quizforge-data.json"

[providers.gemini]
type = "gemini"
api_key = "${GEMINI_API_KEY}"

[providers.openai]
type = "openai"
api_key = "${OPENAI_API_KEY}"
"#;
