//! litrelay server entry point.
//!
//! Run with: cargo run -p litrelay-web

use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = litrelay_web::config::Config::from_env()?;
    let addr = config.bind_addr;

    let state = litrelay_web::state::AppState::new(config);
    let app = litrelay_web::router::build_router(state);

    info!("litrelay listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
