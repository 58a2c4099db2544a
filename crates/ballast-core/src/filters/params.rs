//! Conversion between [`TransactionFilters`] and URL query parameters
//!
//! All functions here are pure. Reading is lenient: absent, empty, `"all"`
//! or unparseable values become `None`. Writing never emits empty values
//! and always drops `page`, so any filter change lands on the first page.

use super::model::{FilterKey, TransactionFilters, TransactionStatus, TransactionType};
use ballast_utils::QueryParams;
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

/// Pagination parameter, reset on every filter change
pub const PAGE_PARAM: &str = "page";

/// Value meaning "no filter" in select inputs
pub const ALL_VALUE: &str = "all";

/// The URL projection of [`TransactionFilters`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializedFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub transaction_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uncategorized: Option<String>,
}

impl SerializedFilters {
    pub fn get(&self, key: FilterKey) -> Option<&str> {
        let value = match key {
            FilterKey::Search => &self.search,
            FilterKey::AccountId => &self.account,
            FilterKey::CategoryId => &self.category,
            FilterKey::Status => &self.status,
            FilterKey::Type => &self.transaction_type,
            FilterKey::StartDate => &self.start_date,
            FilterKey::EndDate => &self.end_date,
            FilterKey::Uncategorized => &self.uncategorized,
        };
        value.as_deref()
    }

    /// Present values in URL order
    pub fn entries(&self) -> Vec<(FilterKey, &str)> {
        FilterKey::ALL
            .into_iter()
            .filter_map(|key| self.get(key).map(|value| (key, value)))
            .collect()
    }
}

/// Empty, whitespace-only and `"all"` values mean "no filter"
pub fn is_blank_value(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty() || trimmed == ALL_VALUE
}

/// Parse an ISO-8601 date (`2024-01-31`) or timestamp (`2024-01-31T10:00:00Z`)
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()))
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Map each present field to its string form
pub fn serialize_filters(filters: &TransactionFilters) -> SerializedFilters {
    SerializedFilters {
        search: filters.search.clone(),
        account: filters.account_id.clone(),
        category: filters.category_id.clone(),
        status: filters.status.map(|s| s.as_str().to_string()),
        transaction_type: filters.transaction_type.map(|t| t.as_str().to_string()),
        start_date: filters.start_date.map(format_date),
        end_date: filters.end_date.map(format_date),
        uncategorized: match filters.uncategorized {
            Some(true) => Some("true".to_string()),
            _ => None,
        },
    }
}

/// Read filters from URL parameters; anything unusable is treated as absent
pub fn deserialize_filters(params: &QueryParams) -> TransactionFilters {
    let text = |key: FilterKey| {
        params
            .get(key.param_name())
            .filter(|value| !is_blank_value(value))
    };

    TransactionFilters {
        search: text(FilterKey::Search).map(str::to_string),
        account_id: text(FilterKey::AccountId).map(str::to_string),
        category_id: text(FilterKey::CategoryId).map(str::to_string),
        status: text(FilterKey::Status).and_then(|value| {
            value
                .parse::<TransactionStatus>()
                .map_err(|e| log::debug!("Ignoring status from URL: {}", e))
                .ok()
        }),
        transaction_type: text(FilterKey::Type).and_then(|value| {
            value
                .parse::<TransactionType>()
                .map_err(|e| log::debug!("Ignoring type from URL: {}", e))
                .ok()
        }),
        start_date: text(FilterKey::StartDate).and_then(|value| read_date(FilterKey::StartDate, value)),
        end_date: text(FilterKey::EndDate).and_then(|value| read_date(FilterKey::EndDate, value)),
        uncategorized: text(FilterKey::Uncategorized).and_then(|value| (value == "true").then_some(true)),
    }
}

fn read_date(key: FilterKey, value: &str) -> Option<NaiveDate> {
    let date = parse_date(value);
    if date.is_none() {
        log::debug!("Ignoring unparseable {} from URL: {:?}", key, value);
    }
    date
}

/// Write `filters` over `current`, keeping unrelated parameters and dropping `page`
pub fn build_url_params(filters: &TransactionFilters, current: Option<&QueryParams>) -> QueryParams {
    let mut params = current.cloned().unwrap_or_default();

    for key in FilterKey::ALL {
        params.delete(key.param_name());
    }

    for (key, value) in serialize_filters(filters).entries() {
        if !is_blank_value(value) {
            params.append(key.param_name(), value);
        }
    }

    params.delete(PAGE_PARAM);
    params
}

/// Check a raw value before it is allowed into the filter state.
/// Blank values are valid: they clear the field.
pub fn validate_filter_value(key: FilterKey, value: &str) -> bool {
    if is_blank_value(value) {
        return true;
    }
    match key {
        FilterKey::Search | FilterKey::AccountId | FilterKey::CategoryId => true,
        FilterKey::Status => value.parse::<TransactionStatus>().is_ok(),
        FilterKey::Type => value.parse::<TransactionType>().is_ok(),
        FilterKey::StartDate | FilterKey::EndDate => parse_date(value).is_some(),
        FilterKey::Uncategorized => matches!(value, "true" | "false"),
    }
}

/// Number of fields carrying an actual filter
pub fn count_active_filters(filters: &TransactionFilters) -> usize {
    let text_active = |value: &Option<String>| {
        value.as_deref().map_or(false, |v| !v.trim().is_empty())
    };

    [
        text_active(&filters.search),
        text_active(&filters.account_id),
        text_active(&filters.category_id),
        filters.status.is_some(),
        filters.transaction_type.is_some(),
        filters.start_date.is_some(),
        filters.end_date.is_some(),
        filters.uncategorized == Some(true),
    ]
    .into_iter()
    .filter(|active| *active)
    .count()
}

/// 1-based page number from the URL, defaulting to the first page
pub fn page_from_params(params: &QueryParams) -> usize {
    params
        .get(PAGE_PARAM)
        .and_then(|value| value.trim().parse::<usize>().ok())
        .filter(|page| *page > 0)
        .unwrap_or(1)
}
