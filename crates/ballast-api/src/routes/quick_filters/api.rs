//! Quick filter endpoints

use crate::error::{ApiError, ApiResult};
use crate::routes::query_params;
use crate::AppState;
use axum::extract::{Path, RawQuery, State};
use axum::Json;
use ballast_core::filters::{
    build_url_params, deserialize_filters, reduce_with_report, serialize_filters, FilterAction, SerializedFilters,
};
use ballast_core::{FilterError, QuickFilter};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickFilterApplied {
    pub name: String,
    /// Query string to navigate to
    pub query: String,
    pub filters: SerializedFilters,
    pub rejected: Vec<FilterError>,
}

/// List configured presets (JSON API)
pub async fn api_quick_filters(State(state): State<AppState>) -> Json<Vec<QuickFilter>> {
    Json(state.quick_filters.as_ref().clone())
}

/// Merge a preset into the filters of the current query (JSON API)
pub async fn api_apply_quick_filter(
    State(state): State<AppState>,
    Path(name): Path<String>,
    RawQuery(raw): RawQuery,
) -> ApiResult<Json<QuickFilterApplied>> {
    let preset = state
        .quick_filters
        .iter()
        .find(|preset| preset.name == name)
        .ok_or_else(|| ApiError::not_found(format!("quick filter '{}'", name)))?;

    let params = query_params(raw);
    let current = deserialize_filters(&params);
    let outcome = reduce_with_report(&current, FilterAction::Patch(preset.patch.clone()));
    for error in &outcome.rejected {
        log::warn!("Quick filter '{}' dropped a value: {}", preset.name, error);
    }

    Ok(Json(QuickFilterApplied {
        name: preset.name.clone(),
        query: build_url_params(&outcome.filters, Some(&params)).to_string(),
        filters: serialize_filters(&outcome.filters),
        rejected: outcome.rejected,
    }))
}
