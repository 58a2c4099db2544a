//! Human-readable rendering of filter values

use super::model::{FilterKey, TransactionFilters, TransactionStatus, TransactionType};
use super::params::{is_blank_value, parse_date, serialize_filters};
use serde::{Deserialize, Serialize};

/// An id/name pair used to resolve account and category ids
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupOption {
    pub id: String,
    pub name: String,
}

impl LookupOption {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Lookup lists for [`get_filter_display_value`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayOptions {
    pub accounts: Vec<LookupOption>,
    pub categories: Vec<LookupOption>,
}

/// A rendered active filter, e.g. for removable chips above the list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterLabel {
    pub key: FilterKey,
    pub value: String,
    pub label: String,
}

/// Render a raw filter value for display. Unknown ids and values that do
/// not parse fall back to the raw value.
pub fn get_filter_display_value(key: FilterKey, value: &str, options: &DisplayOptions) -> String {
    let resolve = |list: &[LookupOption]| {
        list.iter()
            .find(|option| option.id == value)
            .map(|option| option.name.clone())
    };

    let rendered = match key {
        FilterKey::AccountId => resolve(&options.accounts),
        FilterKey::CategoryId => resolve(&options.categories),
        FilterKey::Status => value
            .parse::<TransactionStatus>()
            .ok()
            .map(|status| status.label().to_string()),
        FilterKey::Type => value
            .parse::<TransactionType>()
            .ok()
            .map(|kind| kind.label().to_string()),
        FilterKey::StartDate | FilterKey::EndDate => {
            parse_date(value).map(|date| date.format("%b %-d, %Y").to_string())
        }
        FilterKey::Uncategorized => (value == "true").then(|| "Uncategorized".to_string()),
        FilterKey::Search => Some(format!("\"{}\"", value)),
    };

    rendered.unwrap_or_else(|| value.to_string())
}

/// Labels for every active filter, in URL order
pub fn active_filter_labels(filters: &TransactionFilters, options: &DisplayOptions) -> Vec<FilterLabel> {
    serialize_filters(filters)
        .entries()
        .into_iter()
        .filter(|(_, value)| !is_blank_value(value))
        .map(|(key, value)| FilterLabel {
            key,
            value: value.to_string(),
            label: get_filter_display_value(key, value, options),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> DisplayOptions {
        DisplayOptions {
            accounts: vec![LookupOption::new("acc_1", "Everyday Checking")],
            categories: vec![LookupOption::new("cat_1", "Groceries")],
        }
    }

    #[test]
    fn test_resolves_lookup_lists() {
        let options = options();
        assert_eq!(
            get_filter_display_value(FilterKey::AccountId, "acc_1", &options),
            "Everyday Checking"
        );
        assert_eq!(
            get_filter_display_value(FilterKey::CategoryId, "cat_1", &options),
            "Groceries"
        );
    }

    #[test]
    fn test_falls_back_to_raw_value() {
        let options = options();
        assert_eq!(
            get_filter_display_value(FilterKey::AccountId, "acc_missing", &options),
            "acc_missing"
        );
        assert_eq!(get_filter_display_value(FilterKey::Status, "BOGUS", &options), "BOGUS");
        assert_eq!(get_filter_display_value(FilterKey::StartDate, "soon", &options), "soon");
    }

    #[test]
    fn test_enum_and_date_labels() {
        let options = DisplayOptions::default();
        assert_eq!(
            get_filter_display_value(FilterKey::Status, "NEEDS_REVIEW", &options),
            "Needs review"
        );
        assert_eq!(get_filter_display_value(FilterKey::Type, "INCOME", &options), "Income");
        assert_eq!(
            get_filter_display_value(FilterKey::EndDate, "2024-01-05", &options),
            "Jan 5, 2024"
        );
        assert_eq!(
            get_filter_display_value(FilterKey::Uncategorized, "true", &options),
            "Uncategorized"
        );
    }

    #[test]
    fn test_active_filter_labels() {
        let filters = TransactionFilters {
            search: Some("rent".to_string()),
            category_id: Some("cat_1".to_string()),
            ..Default::default()
        };
        let labels = active_filter_labels(&filters, &options());
        assert_eq!(labels.len(), 2);
        assert_eq!(labels[0].key, FilterKey::Search);
        assert_eq!(labels[0].label, "\"rent\"");
        assert_eq!(labels[1].label, "Groceries");
    }
}
