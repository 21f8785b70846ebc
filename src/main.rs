use std::sync::Arc;

use opsdesk_api::{config, handlers, store};

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up PORT, JWT_SECRET, SEED_*, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = config::config();
    tracing::info!("Starting Opsdesk API in {:?} mode", config.environment);

    let stores = store::Stores::empty();
    if let Err(e) = store::seed::seed(&stores, &config.seed) {
        tracing::error!("seed generation failed: {}", e);
        std::process::exit(1);
    }

    let state: store::AppState = Arc::new(stores);
    let app = handlers::app(state);

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("Opsdesk API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}
