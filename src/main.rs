use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::sync::watch;

use webshot::application::ports::JobRepository;
use webshot::application::services::{Dispatcher, RendererPool, RetentionSweeper, WorkQueue};
use webshot::infrastructure::observability::{TracingConfig, init_tracing};
use webshot::infrastructure::persistence::InMemoryJobRepository;
use webshot::infrastructure::renderer::RendererFactory;
use webshot::infrastructure::storage::ArtifactStoreFactory;
use webshot::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("Failed to load settings")?;

    init_tracing(&TracingConfig::from_settings(environment, &settings.logging));

    let job_repository: Arc<dyn JobRepository> = Arc::new(InMemoryJobRepository::new());
    let artifact_store = ArtifactStoreFactory::create(&settings.storage)
        .context("Failed to initialize artifact store")?;
    let renderer = RendererFactory::create(&settings.renderer);

    let queue = WorkQueue::new(settings.pool.max_queue_depth);
    let dispatcher = Arc::new(Dispatcher::new(
        Arc::clone(&job_repository),
        Arc::clone(&artifact_store),
        queue.clone(),
    ));

    let pool = RendererPool::new(
        queue,
        Arc::clone(&job_repository),
        renderer,
        Arc::clone(&artifact_store),
        settings.pool_config(),
    )
    .start();

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let sweeper = RetentionSweeper::new(
        Arc::clone(&job_repository),
        Arc::clone(&artifact_store),
        settings.sweep_interval(),
        settings.max_job_age(),
    );
    let sweeper_task = tokio::spawn(sweeper.run(shutdown_rx));

    let router = create_router(AppState::new(dispatcher));

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("Invalid server address")?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!(%addr, environment = %environment, "Listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped, draining workers");
    shutdown_tx.send_replace(true);
    pool.shutdown().await;
    if let Err(e) = sweeper_task.await {
        tracing::warn!(error = %e, "Retention sweeper task failed");
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
