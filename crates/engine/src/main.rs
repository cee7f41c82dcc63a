//! Promotions Engine - Main entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use promo_engine::api;
use promo_engine::app::App;
use promo_engine::infrastructure::{
    config::{load_dotenv_from_repo_root, EngineConfig},
    persistence::SqlitePromotionRepo,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv_from_repo_root();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "promo_engine=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Promotions Engine");

    let config = EngineConfig::from_env();

    tracing::info!(
        database_url = %config.database_url,
        max_connections = config.database_max_connections,
        "Opening promotion store"
    );
    let promotion_repo =
        SqlitePromotionRepo::connect(&config.database_url, config.database_max_connections)
            .await?;

    let app = Arc::new(App::new(Arc::new(promotion_repo)));

    let mut router = api::http::routes()
        .with_state(app)
        .layer(TraceLayer::new_for_http());

    if let Some(cors) = api::build_cors_layer(config.cors_allowed_origins.as_deref()) {
        tracing::info!(origins = ?config.cors_allowed_origins, "CORS enabled");
        router = router.layer(cors);
    }

    let addr: SocketAddr = config.bind_addr().parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
