use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;

use quizzybee::application::services::SessionSweeper;
use quizzybee::infrastructure::observability::{TracingConfig, init_tracing};
use quizzybee::presentation::{
    AppState, Environment, ScaffoldConfig, Settings, build_controller, create_router,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("Failed to load settings")?;

    init_tracing(&TracingConfig::new(
        environment.as_str(),
        settings.logging.level.clone(),
        settings.logging.json,
    ));

    let scaffold = ScaffoldConfig::from_env();
    let controller = build_controller(&settings, &scaffold)?;

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("Invalid server.host / server.port")?;

    tokio::spawn(
        SessionSweeper::new(
            controller.clone(),
            Duration::from_secs(settings.sessions.idle_ttl_secs),
            Duration::from_secs(settings.sessions.sweep_interval_secs),
        )
        .run(),
    );

    let router = create_router(AppState::new(controller, settings));

    tracing::info!(%addr, environment = %environment, "Listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
