use std::{net::SocketAddr, sync::Arc};
use tip_calendar::{router, weather::OpenMeteoArchive, AppState, Config};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env();
    let weather = Arc::new(OpenMeteoArchive::new(&config)?);
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

    let state = AppState::new(config, weather);
    state.store.prepare().await?;
    info!("records stored in {}", state.store.path().display());

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("listening on http://{addr}");
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutting down");
}
