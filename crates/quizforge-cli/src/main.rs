//! quizforge CLI: serve the quiz API, or generate and score quizzes locally.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(
    name = "quizforge",
    version,
    about = "Generate, store and score multiple-choice quizzes"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Address to listen on (overrides config)
        #[arg(long)]
        bind: Option<String>,

        /// Persist quizzes and attempts to this JSON file (overrides config)
        #[arg(long)]
        data_file: Option<PathBuf>,
    },

    /// Generate a quiz and print it
    Generate {
        /// Quiz topic
        #[arg(long)]
        topic: String,

        /// Number of questions (1-50)
        #[arg(long, allow_negative_numbers = true)]
        num_questions: Option<i64>,

        /// Difficulty: easy, medium or hard
        #[arg(long)]
        difficulty: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value = "json")]
        format: OutputFormat,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Score answers against a quiz file
    Score {
        /// Quiz JSON file (as printed by `generate` or returned by the API)
        #[arg(long)]
        quiz: PathBuf,

        /// JSON array of answers, `null` for unanswered
        #[arg(long)]
        answers: PathBuf,
    },

    /// List models of the configured providers
    ListModels {
        /// Filter to specific provider
        #[arg(long)]
        provider: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create a starter quizforge.toml
    Init,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("quizforge=info,tower_http=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve {
            config,
            bind,
            data_file,
        } => commands::serve::execute(config, bind, data_file).await,
        Commands::Generate {
            topic,
            num_questions,
            difficulty,
            format,
            config,
        } => commands::generate::execute(topic, num_questions, difficulty, format, config).await,
        Commands::Score { quiz, answers } => commands::score::execute(quiz, answers),
        Commands::ListModels { provider, config } => {
            commands::list_models::execute(provider, config)
        }
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
