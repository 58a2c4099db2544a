//! Related posts endpoint

use crate::error::{ApiError, ApiResult};
use crate::routes::query_params;
use crate::AppState;
use axum::extract::{Path, RawQuery, State};
use axum::Json;
use ballast_core::Post;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedPostsResponse {
    pub slug: String,
    pub related: Vec<Post>,
}

/// Related posts for a slug (JSON API)
pub async fn api_related_posts(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    RawQuery(raw): RawQuery,
) -> ApiResult<Json<RelatedPostsResponse>> {
    let params = query_params(raw);
    let limit = match params.get("limit") {
        None => state.config.related.limit,
        Some(raw) => raw
            .trim()
            .parse::<usize>()
            .map_err(|_| ApiError::bad_request(format!("limit must be a non-negative integer, got {:?}", raw)))?,
    };

    let store = state.store.read().await;
    let related = store
        .related_posts(&slug, limit)?
        .into_iter()
        .cloned()
        .collect();

    Ok(Json(RelatedPostsResponse { slug, related }))
}
