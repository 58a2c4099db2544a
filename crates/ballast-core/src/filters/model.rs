//! Typed transaction query model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Review status of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    Reconciled,
    NeedsCategorization,
    NeedsReview,
    InProgress,
}

impl TransactionStatus {
    pub const ALL: [TransactionStatus; 4] = [
        TransactionStatus::Reconciled,
        TransactionStatus::NeedsCategorization,
        TransactionStatus::NeedsReview,
        TransactionStatus::InProgress,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Reconciled => "RECONCILED",
            TransactionStatus::NeedsCategorization => "NEEDS_CATEGORIZATION",
            TransactionStatus::NeedsReview => "NEEDS_REVIEW",
            TransactionStatus::InProgress => "IN_PROGRESS",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            TransactionStatus::Reconciled => "Reconciled",
            TransactionStatus::NeedsCategorization => "Needs categorization",
            TransactionStatus::NeedsReview => "Needs review",
            TransactionStatus::InProgress => "In progress",
        }
    }
}

impl std::str::FromStr for TransactionStatus {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TransactionStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("Invalid transaction status: {}", s))
    }
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Income,
    Expense,
    Transfer,
}

impl TransactionType {
    pub const ALL: [TransactionType; 3] = [
        TransactionType::Income,
        TransactionType::Expense,
        TransactionType::Transfer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "INCOME",
            TransactionType::Expense => "EXPENSE",
            TransactionType::Transfer => "TRANSFER",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TransactionType::Income => "Income",
            TransactionType::Expense => "Expense",
            TransactionType::Transfer => "Transfer",
        }
    }
}

impl std::str::FromStr for TransactionType {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TransactionType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("Invalid transaction type: {}", s))
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One field of [`TransactionFilters`], named by its URL parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FilterKey {
    #[serde(rename = "search")]
    Search,
    #[serde(rename = "account")]
    AccountId,
    #[serde(rename = "category")]
    CategoryId,
    #[serde(rename = "status")]
    Status,
    #[serde(rename = "type")]
    Type,
    #[serde(rename = "startDate")]
    StartDate,
    #[serde(rename = "endDate")]
    EndDate,
    #[serde(rename = "uncategorized")]
    Uncategorized,
}

impl FilterKey {
    /// Every key, in the order parameters are written to the URL
    pub const ALL: [FilterKey; 8] = [
        FilterKey::Search,
        FilterKey::AccountId,
        FilterKey::CategoryId,
        FilterKey::Status,
        FilterKey::Type,
        FilterKey::StartDate,
        FilterKey::EndDate,
        FilterKey::Uncategorized,
    ];

    pub fn param_name(&self) -> &'static str {
        match self {
            FilterKey::Search => "search",
            FilterKey::AccountId => "account",
            FilterKey::CategoryId => "category",
            FilterKey::Status => "status",
            FilterKey::Type => "type",
            FilterKey::StartDate => "startDate",
            FilterKey::EndDate => "endDate",
            FilterKey::Uncategorized => "uncategorized",
        }
    }

    pub fn from_param(name: &str) -> Option<FilterKey> {
        FilterKey::ALL.into_iter().find(|key| key.param_name() == name)
    }

    pub fn label(&self) -> &'static str {
        match self {
            FilterKey::Search => "Search",
            FilterKey::AccountId => "Account",
            FilterKey::CategoryId => "Category",
            FilterKey::Status => "Status",
            FilterKey::Type => "Type",
            FilterKey::StartDate => "From",
            FilterKey::EndDate => "To",
            FilterKey::Uncategorized => "Uncategorized",
        }
    }
}

impl std::fmt::Display for FilterKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.param_name())
    }
}

/// The structured form of a transaction list query.
///
/// Every field is independently optional; `TransactionFilters::default()`
/// means "no filters".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TransactionStatus>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub transaction_type: Option<TransactionType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uncategorized: Option<bool>,
}

impl TransactionFilters {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no field is set
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// String form of a single field, as it would appear in the URL
    pub fn get(&self, key: FilterKey) -> Option<String> {
        match key {
            FilterKey::Search => self.search.clone(),
            FilterKey::AccountId => self.account_id.clone(),
            FilterKey::CategoryId => self.category_id.clone(),
            FilterKey::Status => self.status.map(|s| s.as_str().to_string()),
            FilterKey::Type => self.transaction_type.map(|t| t.as_str().to_string()),
            FilterKey::StartDate => self.start_date.map(|d| d.format("%Y-%m-%d").to_string()),
            FilterKey::EndDate => self.end_date.map(|d| d.format("%Y-%m-%d").to_string()),
            FilterKey::Uncategorized => self.uncategorized.map(|u| u.to_string()),
        }
    }

    pub fn clear(&mut self, key: FilterKey) {
        match key {
            FilterKey::Search => self.search = None,
            FilterKey::AccountId => self.account_id = None,
            FilterKey::CategoryId => self.category_id = None,
            FilterKey::Status => self.status = None,
            FilterKey::Type => self.transaction_type = None,
            FilterKey::StartDate => self.start_date = None,
            FilterKey::EndDate => self.end_date = None,
            FilterKey::Uncategorized => self.uncategorized = None,
        }
    }

    /// Both bounds set and `start_date` after `end_date`
    pub fn has_inverted_range(&self) -> bool {
        matches!((self.start_date, self.end_date), (Some(start), Some(end)) if start > end)
    }
}
