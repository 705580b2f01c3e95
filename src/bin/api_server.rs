// Dashboard server entry point
//
// Usage: cargo run --bin api_server
// Environment: PORT (default 3000), GUIDE_IMAGE_DIR (default images),
// plus the document settings read by DocumentConfig::load for /guide.

use neoderm_guide::{create_router, AppState, DocumentConfig, ServerConfig};
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing (structured logging)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "neoderm_guide=info,tower_http=debug,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting study guide server...");

    let server = ServerConfig::from_env();
    let document = DocumentConfig::load()?;

    tracing::info!("Configuration:");
    tracing::info!("  PORT: {}", server.port);
    tracing::info!("  IMAGE_DIR: {}", server.image_dir.display());

    let state = AppState::new(&server, document)?;
    tracing::info!("Application state initialized successfully");

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], server.port));
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
