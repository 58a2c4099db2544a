//! JSON HTTP API server
//!
//! Routes are organized into modules:
//! - routes::transactions: filtered transaction list, pagination
//! - routes::filters: filter query normalization
//! - routes::quick_filters: configured presets
//! - routes::posts: related posts
//! - routes::accounts: account and category lookups

pub mod error;
pub mod routes;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use ballast_config::Config;
use ballast_core::filters::presets_from_config;
use ballast_core::{QuickFilter, TransactionStore};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;

pub use error::{ApiError, ApiResult};

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<TransactionStore>>,
    pub config: Arc<Config>,
    pub quick_filters: Arc<Vec<QuickFilter>>,
}

impl AppState {
    pub fn new(config: Config, store: Arc<RwLock<TransactionStore>>) -> Self {
        let quick_filters = presets_from_config(&config.filters.quick_filters);
        Self {
            store,
            config: Arc::new(config),
            quick_filters: Arc::new(quick_filters),
        }
    }
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    use routes::accounts::{api_accounts, api_categories};
    use routes::filters::api_filters;
    use routes::posts::api_related_posts;
    use routes::quick_filters::{api_apply_quick_filter, api_quick_filters};
    use routes::transactions::api_transactions;

    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/transactions", get(api_transactions))
        .route("/api/filters", get(api_filters))
        .route("/api/quick-filters", get(api_quick_filters))
        .route("/api/quick-filters/:name", get(api_apply_quick_filter))
        .route("/api/accounts", get(api_accounts))
        .route("/api/categories", get(api_categories))
        .route("/api/posts/:slug/related", get(api_related_posts))
        .route("/api/reload", post(api_reload))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Re-read the data file
async fn api_reload(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    let mut store = state.store.write().await;
    store.reload().await?;
    Ok(Json(json!({
        "success": true,
        "transactions": store.transactions_count(),
    })))
}

/// Bind and serve until the server stops
pub async fn start_server(config: Config, store: Arc<RwLock<TransactionStore>>) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::new(config, store);
    log::info!("Loaded {} quick filters", state.quick_filters.len());

    let router = create_router(state);
    let listener = TcpListener::bind(&addr).await?;
    log::info!("Starting Ballast server on http://{}", addr);
    log::info!("Available routes: /api/transactions, /api/filters, /api/quick-filters, /api/posts/:slug/related");

    axum::serve(listener, router).await?;
    log::info!("Server stopped");
    Ok(())
}
