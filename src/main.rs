mod config;
mod error;
mod probe;
mod routes;

use config::HostConfig;
use error::HostError;

#[tokio::main]
async fn main() -> Result<(), HostError> {
    // Optional .env for local development.
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let config = HostConfig::from_env();

    // Upstream probe is non-fatal: the UI degrades on its own when the
    // backend is down.
    probe::check_upstream(&config.registry).await;

    let app = routes::app()?;
    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| HostError::Bind { addr: addr.clone(), source })?;

    tracing::info!(port = config.port, upstream = %config.registry.api_base_url, "smartface listening");
    axum::serve(listener, app).await.map_err(HostError::Serve)
}
