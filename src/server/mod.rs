pub mod handlers;
pub mod types;

use crate::{Result, config::Config, pipeline::ArtifactPipeline, views::Views};
use axum::{Router, routing::get};
use handlers::AppState;
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::info;

pub fn build_router(state: AppState, debug: bool) -> Router {
    let router = Router::new()
        .route("/", get(handlers::index))
        .route(
            "/predictdata",
            get(handlers::home).post(handlers::predict_datapoint),
        )
        .with_state(state);

    if debug {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}

pub async fn run(mut config: Config) -> Result<()> {
    if let Ok(path) = std::env::var("MODEL_PATH") {
        config.pipeline.model_path = PathBuf::from(path);
    }
    if let Ok(path) = std::env::var("PREPROCESSOR_PATH") {
        config.pipeline.preprocessor_path = PathBuf::from(path);
    }
    info!(
        "Using model {} with preprocessor {}",
        config.pipeline.model_path.display(),
        config.pipeline.preprocessor_path.display()
    );

    let pipeline = ArtifactPipeline::new(config.pipeline.clone());
    let views = Views::new()?;
    let app_state = AppState::new(Arc::new(pipeline), views);

    let app = build_router(app_state, config.server.debug);

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting server on {} (debug: {})", addr, config.server.debug);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
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

    info!("Shutdown signal received");
}
