//! quizforge-server: HTTP API for generating, storing and scoring quizzes.
//!
//! Routes:
//! - `GET /` health check
//! - `POST /api/quizzes`, `GET /api/quizzes`, `GET /api/quizzes/{id}`
//! - `POST /api/attempts`, `GET /api/attempts`

pub mod dto;
pub mod error;
pub mod handlers;
mod router;

use std::future::Future;
use std::sync::Arc;

use tokio::net::TcpListener;

use quizforge_core::QuizGenerator;
use quizforge_store::QuizStore;

pub use error::{ApiError, ApiResult};
pub use router::router;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<QuizGenerator>,
    pub store: Arc<dyn QuizStore>,
}

impl AppState {
    pub fn new(generator: QuizGenerator, store: impl QuizStore + 'static) -> Self {
        Self {
            generator: Arc::new(generator),
            store: Arc::new(store),
        }
    }
}

/// Serve the API on `listener` until `shutdown` resolves.
pub async fn serve(
    listener: TcpListener,
    state: AppState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> anyhow::Result<()> {
    let addr = listener.local_addr()?;
    tracing::info!(
        %addr,
        provider = state.generator.provider_name().unwrap_or("none"),
        "listening"
    );

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
