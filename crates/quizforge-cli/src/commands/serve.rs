//! The `quizforge serve` command.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::net::TcpListener;

use quizforge_providers::build_generator;
use quizforge_server::{serve, shutdown_signal, AppState};
use quizforge_store::{FileStore, MemoryStore, QuizStore};

pub async fn execute(
    config_path: Option<PathBuf>,
    bind: Option<String>,
    data_file: Option<PathBuf>,
) -> Result<()> {
    let mut config = quizforge_providers::config::load_config_from(config_path.as_deref())?;
    if let Some(bind) = bind {
        config.bind_addr = bind;
    }
    if let Some(data_file) = data_file {
        config.data_file = Some(data_file);
    }

    let generator = build_generator(&config)?;

    let store: Arc<dyn QuizStore> = match &config.data_file {
        Some(path) => Arc::new(
            FileStore::open(path)
                .await
                .with_context(|| format!("failed to open data file: {}", path.display()))?,
        ),
        None => {
            tracing::info!("no data file configured, quizzes are kept in memory");
            Arc::new(MemoryStore::new())
        }
    };

    let listener = TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    let state = AppState {
        generator: Arc::new(generator),
        store,
    };
    serve(listener, state, shutdown_signal()).await
}
