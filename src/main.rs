use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use truco_venezolano::api;
use truco_venezolano::application::game::{EvictFinishedGames, EvictFinishedGamesInput};
use truco_venezolano::infrastructure::app_state::AppState;
use truco_venezolano::infrastructure::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "truco_venezolano=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env();
    let port = config.port;
    let state = Arc::new(AppState::new(config));

    // Sweep finished games every minute
    let sweeper = EvictFinishedGames::new(state.game_repo.clone());
    let ttl = chrono::Duration::seconds(state.config.finished_game_ttl_secs as i64);
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(60));
        loop {
            interval.tick().await;
            let cutoff = chrono::Utc::now() - ttl;
            if let Err(e) = sweeper.execute(EvictFinishedGamesInput { cutoff }).await {
                tracing::warn!("Finished game sweep failed: {}", e);
            }
        }
    });

    // Build router
    let app = Router::new()
        .nest("/api", api::routes::create_api_router(state.clone()))
        .route("/health", axum::routing::get(api::routes::health::health_handler))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(Duration::from_secs(10)))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Starting Truco server on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
