//! Route modules for the API server
//!
//! - transactions: filtered, paginated transaction list
//! - filters: normalization of filter query strings
//! - quick_filters: configured presets
//! - posts: related posts
//! - accounts: account and category lookups
//!
//! Each module keeps its handlers in api.rs.

pub mod accounts;
pub mod filters;
pub mod posts;
pub mod quick_filters;
pub mod transactions;

use ballast_utils::QueryParams;

/// Parse the raw query string of a request; a missing query is empty
pub(crate) fn query_params(raw: Option<String>) -> QueryParams {
    raw.as_deref().map(QueryParams::parse).unwrap_or_default()
}
