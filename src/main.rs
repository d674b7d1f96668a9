use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use audio_mediator::infrastructure::PipelineFactory;
use audio_mediator::infrastructure::observability::{TracingConfig, init_tracing, sanitize_url};
use audio_mediator::presentation::{AppState, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = Settings::load()?;
    init_tracing(&TracingConfig::from_settings(&settings))?;

    tracing::info!(
        port = settings.port,
        audio_list_url = %sanitize_url(&settings.audio_list_url),
        inference_url = %sanitize_url(&settings.inference_url),
        result_url = %sanitize_url(&settings.result_url),
        download_dir = %settings.download_dir,
        processed_file = %settings.processed_file,
        persist_downloads = settings.persist_downloads,
        max_concurrent_artifacts = settings.max_concurrent_artifacts,
        run_deadline_secs = ?settings.run_deadline_secs,
        "Configuration loaded"
    );

    let pipeline = Arc::new(PipelineFactory::create(&settings).await?);
    let router = create_router(AppState { pipeline });

    let addr = SocketAddr::from(([0, 0, 0, 0], settings.port));
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
