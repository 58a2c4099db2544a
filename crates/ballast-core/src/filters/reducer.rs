//! Pure state transitions for the filter model
//!
//! `reduce` is the only way the controller changes filters, which keeps
//! merge and validation rules testable without a navigator.

use super::model::{FilterKey, TransactionFilters, TransactionStatus, TransactionType};
use super::params::{is_blank_value, parse_date, validate_filter_value};
use crate::error::FilterError;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// An ordered set of field changes. `None` clears a field.
///
/// Serializes as a map of URL parameter names to values, the same shape
/// as `params` in quick filter configuration; cleared fields are `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterPatch {
    changes: Vec<(FilterKey, Option<String>)>,
}

impl Serialize for FilterPatch {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.changes.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key.param_name(), &value)?;
        }
        map.end()
    }
}

impl FilterPatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key`, replacing an earlier change to the same key
    pub fn set(mut self, key: FilterKey, value: impl Into<String>) -> Self {
        self.put(key, Some(value.into()));
        self
    }

    pub fn clear(mut self, key: FilterKey) -> Self {
        self.put(key, None);
        self
    }

    fn put(&mut self, key: FilterKey, value: Option<String>) {
        match self.changes.iter_mut().find(|(k, _)| *k == key) {
            Some(existing) => existing.1 = value,
            None => self.changes.push((key, value)),
        }
    }

    /// Build a patch from URL-style `(param, value)` pairs
    pub fn from_params<'a, I>(pairs: I) -> Result<Self, FilterError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut patch = FilterPatch::new();
        for (name, value) in pairs {
            let key = FilterKey::from_param(name).ok_or_else(|| FilterError::UnknownKey {
                key: name.to_string(),
            })?;
            patch.put(key, Some(value.to_string()));
        }
        Ok(patch)
    }

    pub fn iter(&self) -> impl Iterator<Item = (FilterKey, Option<&str>)> {
        self.changes.iter().map(|(k, v)| (*k, v.as_deref()))
    }

    pub fn keys(&self) -> Vec<FilterKey> {
        self.changes.iter().map(|(k, _)| *k).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }
}

/// A change requested by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterAction {
    Set(FilterKey, Option<String>),
    Patch(FilterPatch),
    Clear,
}

/// Result of a reduction: the new filters plus what was applied or dropped
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReduceOutcome {
    pub filters: TransactionFilters,
    pub applied: Vec<FilterKey>,
    pub rejected: Vec<FilterError>,
}

/// Apply `action` to `current`; invalid values are dropped
pub fn reduce(current: &TransactionFilters, action: FilterAction) -> TransactionFilters {
    reduce_with_report(current, action).filters
}

/// Like [`reduce`], also reporting applied keys and rejected values.
/// Batches apply partially: one bad field does not block the others.
pub fn reduce_with_report(current: &TransactionFilters, action: FilterAction) -> ReduceOutcome {
    let mut outcome = ReduceOutcome {
        filters: current.clone(),
        ..Default::default()
    };

    let changes: Vec<(FilterKey, Option<String>)> = match action {
        FilterAction::Clear => {
            outcome.filters = TransactionFilters::default();
            outcome.applied = FilterKey::ALL.to_vec();
            return outcome;
        }
        FilterAction::Set(key, value) => vec![(key, value)],
        FilterAction::Patch(patch) => patch.changes,
    };

    for (key, value) in changes {
        match apply_value(&mut outcome.filters, key, value.as_deref()) {
            Ok(()) => outcome.applied.push(key),
            Err(error) => outcome.rejected.push(error),
        }
    }

    outcome
}

/// Validate and write one raw value into `filters`.
/// `None`, blank values and `uncategorized=false` clear the field.
pub fn apply_value(
    filters: &mut TransactionFilters,
    key: FilterKey,
    value: Option<&str>,
) -> Result<(), FilterError> {
    let value = match value {
        Some(value) if !is_blank_value(value) => value,
        _ => {
            filters.clear(key);
            return Ok(());
        }
    };

    if !validate_filter_value(key, value) {
        return Err(FilterError::InvalidValue {
            key,
            value: value.to_string(),
        });
    }

    let invalid = || FilterError::InvalidValue {
        key,
        value: value.to_string(),
    };

    match key {
        FilterKey::Search => filters.search = Some(value.to_string()),
        FilterKey::AccountId => filters.account_id = Some(value.to_string()),
        FilterKey::CategoryId => filters.category_id = Some(value.to_string()),
        FilterKey::Status => {
            filters.status = Some(value.parse::<TransactionStatus>().map_err(|_| invalid())?)
        }
        FilterKey::Type => {
            filters.transaction_type = Some(value.parse::<TransactionType>().map_err(|_| invalid())?)
        }
        FilterKey::StartDate => filters.start_date = Some(parse_date(value).ok_or_else(invalid)?),
        FilterKey::EndDate => filters.end_date = Some(parse_date(value).ok_or_else(invalid)?),
        FilterKey::Uncategorized => filters.uncategorized = (value == "true").then_some(true),
    }

    Ok(())
}
