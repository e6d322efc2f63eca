mod config;
mod controllers;
mod models;
mod prelude;
mod random;
mod result;
mod sessions;

pub use crate::result::Result;

use std::{net::SocketAddr, sync::Arc};

use axum::{error_handling::HandleErrorLayer, http::StatusCode, Router};
use config::Config;
use random::{RandomNumberSource, SeededRandom, ThreadRandom};
use sessions::GameStore;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, services::ServeDir, timeout::TimeoutLayer, trace::TraceLayer,
};
use tower_sessions::{cookie::SameSite, Expiry, SessionManagerLayer};
use tracing_subscriber::EnvFilter;

#[derive(Clone)]
pub struct AppState {
    cfg: Arc<Config>,
    games: GameStore,
}

impl AppState {
    pub fn new(cfg: Config, random: Arc<dyn RandomNumberSource>) -> Self {
        let games = GameStore::new(random, cfg.session_capacity, cfg.session_idle);

        return Self {
            cfg: Arc::new(cfg),
            games,
        };
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,guess_it=debug"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    return run().await.map_err(|e| e.0);
}

async fn run() -> Result {
    let cfg = config::build()?;

    let random: Arc<dyn RandomNumberSource> = match cfg.random_seed {
        Some(seed) => {
            tracing::warn!(seed, "using seeded random numbers");
            Arc::new(SeededRandom::new(seed))
        }
        None => Arc::new(ThreadRandom),
    };

    let state = AppState::new(cfg, random);
    let addr = SocketAddr::from(([0, 0, 0, 0], state.cfg.server_port));

    tracing::info!(
        %addr,
        uri = %state.cfg.server_host_uri,
        alias = %state.cfg.app_alias,
        "starting server"
    );

    axum::Server::bind(&addr)
        .serve(app(state).into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    return Ok(());
}

/// The whole routing table. Built once from config; nothing registers routes
/// after this.
fn app(state: AppState) -> Router {
    let cfg = state.cfg.clone();

    let session_service = ServiceBuilder::new()
        .layer(HandleErrorLayer::new(|_| async {
            return StatusCode::BAD_REQUEST;
        }))
        .layer(
            SessionManagerLayer::new(sessions::store::build(&cfg))
                .with_domain(cfg.server_domain.to_string())
                .with_expiry(Expiry::OnSessionEnd)
                .with_secure(cfg.production_mode)
                .with_same_site(SameSite::Lax),
        );

    // dynamic paths
    let game = controllers::add_routes(Router::new());
    let router = if cfg.app_alias == "/" {
        Router::new().merge(game)
    } else {
        Router::new().nest(&cfg.app_alias, game)
    };

    // static assets
    let router = router.nest_service("/assets", ServeDir::new(&cfg.static_dir));

    return router
        .with_state(state)
        .layer(session_service)
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(cfg.request_timeout))
        .layer(TraceLayer::new_for_http());
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        return;
    }

    tracing::info!("shutting down");
}
