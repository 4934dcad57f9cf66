pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod seed;

use std::sync::{Arc, Mutex};

use axum::{
    routing::{get, post, put},
    Router,
};
use flashdeck_core::{Clock, SystemClock};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::db::Database;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub clock: Arc<dyn Clock>,
    /// Random source for session shuffles
    pub rng: Arc<Mutex<ChaCha8Rng>>,
}

impl AppState {
    pub fn new(db: Arc<Database>, clock: Arc<dyn Clock>, rng: ChaCha8Rng) -> Self {
        Self {
            db,
            clock,
            rng: Arc::new(Mutex::new(rng)),
        }
    }
}

/// Build the router with every API route.
pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        // Deck routes
        .route("/decks", get(routes::decks::list).post(routes::decks::create))
        .route(
            "/decks/:id",
            put(routes::decks::update).delete(routes::decks::delete),
        )
        .route("/decks/:id/stats", get(routes::decks::stats))
        .route(
            "/decks/:id/cards",
            get(routes::cards::list).post(routes::cards::create),
        )
        // Card routes
        .route(
            "/cards/:id",
            put(routes::cards::update).delete(routes::cards::delete),
        )
        .route("/cards/:id/reviews", get(routes::cards::reviews))
        // Study routes
        .route("/study/next", get(routes::study::next))
        .route("/study/review", post(routes::study::review))
        // Stats routes
        .route("/stats", get(routes::stats::overview));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn run() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.log_filter))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Opening database...");
    let db = Database::connect(&config.database_url).await?;

    tracing::info!("Running migrations...");
    db.run_migrations().await?;

    let clock: Arc<dyn Clock> = match config.study_offset {
        Some(offset) => Arc::new(SystemClock::new(offset)),
        None => Arc::new(SystemClock::local()),
    };

    if config.seed_sample_decks {
        seed::seed_sample_decks(&db, clock.as_ref()).await?;
    }

    let rng = match config.shuffle_seed {
        Some(seed) => {
            tracing::info!(seed, "Using fixed shuffle seed");
            ChaCha8Rng::seed_from_u64(seed)
        }
        None => ChaCha8Rng::from_entropy(),
    };

    let state = AppState::new(Arc::new(db), clock, rng);
    let app = build_router(state);

    tracing::info!("Starting server on {}", config.bind_address);

    let listener = tokio::net::TcpListener::bind(config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
