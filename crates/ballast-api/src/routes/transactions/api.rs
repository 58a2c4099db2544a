//! Transactions API endpoints

use crate::error::{ApiError, ApiResult};
use crate::routes::query_params;
use crate::AppState;
use axum::extract::{RawQuery, State};
use axum::Json;
use ballast_core::filters::{
    active_filter_labels, build_url_params, count_active_filters, deserialize_filters, page_from_params,
    serialize_filters, FilterLabel, SerializedFilters,
};
use ballast_core::TransactionPage;
use ballast_utils::QueryParams;
use serde::{Deserialize, Serialize};

/// Name of the page-size parameter
pub const LIMIT_PARAM: &str = "limit";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionsResponse {
    #[serde(flatten)]
    pub page: TransactionPage,
    pub filters: SerializedFilters,
    pub active_filters: usize,
    pub labels: Vec<FilterLabel>,
    /// Canonical query string for these filters, without `page`
    pub query: String,
}

/// Page size from `limit`, falling back to the configured default and
/// capped at the configured maximum
pub(crate) fn page_size(params: &QueryParams, default: usize, max: usize) -> ApiResult<usize> {
    match params.get(LIMIT_PARAM).map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(default.min(max)),
        Some(raw) => match raw.parse::<usize>() {
            Ok(0) | Err(_) => Err(ApiError::bad_request(format!(
                "limit must be a positive integer, got {:?}",
                raw
            ))),
            Ok(limit) => Ok(limit.min(max)),
        },
    }
}

/// Get transactions matching the URL filters (JSON API)
pub async fn api_transactions(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
) -> ApiResult<Json<TransactionsResponse>> {
    let params = query_params(raw);
    let filters = deserialize_filters(&params);
    let page = page_from_params(&params);
    let limit = page_size(
        &params,
        state.config.filters.page_size,
        state.config.filters.max_page_size,
    )?;

    let store = state.store.read().await;
    let result = store.query(&filters, page, limit);
    let labels = active_filter_labels(&filters, &store.display_options());

    log::debug!(
        "Transactions query matched {} rows (page {}, limit {})",
        result.total_count,
        page,
        limit
    );

    Ok(Json(TransactionsResponse {
        page: result,
        filters: serialize_filters(&filters),
        active_filters: count_active_filters(&filters),
        labels,
        query: build_url_params(&filters, None).to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_size() {
        assert_eq!(page_size(&QueryParams::new(), 50, 200).unwrap(), 50);
        assert_eq!(page_size(&QueryParams::parse("limit=10"), 50, 200).unwrap(), 10);
        assert_eq!(page_size(&QueryParams::parse("limit=999"), 50, 200).unwrap(), 200);
        assert!(page_size(&QueryParams::parse("limit=0"), 50, 200).is_err());
        assert!(page_size(&QueryParams::parse("limit=ten"), 50, 200).is_err());
    }
}
