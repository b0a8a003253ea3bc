use std::{net::SocketAddr, str::FromStr, sync::Arc};

use axum::{Extension, Router, routing::get};
use tracing::info;

use crate::{
    Res, api,
    config::Config,
    management::{CacheStore, SessionManager},
    search::SearchService,
};

/// State shared by all handlers. Each request reads its own session token
/// from `sessions` and passes it down explicitly.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub service: SearchService,
    pub sessions: SessionManager,
}

impl AppState {
    pub fn new(config: Config, store: CacheStore) -> Self {
        let service = SearchService::from_config(&config, store);
        Self {
            config: Arc::new(config),
            service,
            sessions: SessionManager::new(),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(api::index))
        .route("/search", get(api::search_get).post(api::search_post))
        .route("/health", get(api::health))
        .layer(Extension(state))
}

pub async fn start_api_server(state: AppState) -> Res<()> {
    let addr = SocketAddr::from_str(&state.config.server_address)?;
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutting down");
}
