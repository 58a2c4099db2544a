//! Filter normalization endpoint

use crate::routes::query_params;
use crate::AppState;
use axum::extract::{RawQuery, State};
use axum::Json;
use ballast_core::filters::{
    active_filter_labels, build_url_params, count_active_filters, deserialize_filters, serialize_filters,
    validate_filter_value, FilterKey, FilterLabel, SerializedFilters,
};
use ballast_core::FilterError;
use ballast_utils::QueryParams;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FiltersResponse {
    /// Query string with filter keys rewritten and `page` removed
    pub query: String,
    pub filters: SerializedFilters,
    pub active_filters: usize,
    pub labels: Vec<FilterLabel>,
    /// Values present in the URL that were dropped
    pub rejected: Vec<FilterError>,
}

/// Filter values in `params` that fail validation
pub(crate) fn rejected_values(params: &QueryParams) -> Vec<FilterError> {
    FilterKey::ALL
        .into_iter()
        .filter_map(|key| {
            let value = params.get(key.param_name())?;
            if validate_filter_value(key, value) {
                return None;
            }
            Some(FilterError::InvalidValue {
                key,
                value: value.to_string(),
            })
        })
        .collect()
}

/// Normalize filter parameters (JSON API)
pub async fn api_filters(State(state): State<AppState>, RawQuery(raw): RawQuery) -> Json<FiltersResponse> {
    let params = query_params(raw);
    let filters = deserialize_filters(&params);
    let rejected = rejected_values(&params);
    for error in &rejected {
        log::warn!("Dropping filter value: {}", error);
    }

    let store = state.store.read().await;
    let labels = active_filter_labels(&filters, &store.display_options());

    Json(FiltersResponse {
        query: build_url_params(&filters, Some(&params)).to_string(),
        filters: serialize_filters(&filters),
        active_filters: count_active_filters(&filters),
        labels,
        rejected,
    })
}
