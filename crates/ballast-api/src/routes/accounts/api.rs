//! Accounts and categories API endpoints

use crate::AppState;
use axum::extract::State;
use axum::Json;
use ballast_core::{Account, Category};

/// List accounts (JSON API)
pub async fn api_accounts(State(state): State<AppState>) -> Json<Vec<Account>> {
    let store = state.store.read().await;
    Json(store.accounts().to_vec())
}

/// List categories (JSON API)
pub async fn api_categories(State(state): State<AppState>) -> Json<Vec<Category>> {
    let store = state.store.read().await;
    Json(store.categories().to_vec())
}
