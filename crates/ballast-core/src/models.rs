//! Data models for accounts, categories, transactions and posts

use crate::filters::{TransactionFilters, TransactionStatus, TransactionType};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A bank account linked through a data provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub name: String,
    /// Institution name as reported by the provider
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub institution: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub date: NaiveDate,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant: Option<String>,
    /// Signed amount; negative for money leaving the account
    pub amount: Decimal,
    pub account_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    pub status: TransactionStatus,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
}

impl Transaction {
    pub fn is_categorized(&self) -> bool {
        self.category_id.as_deref().map_or(false, |id| !id.is_empty())
    }

    /// Case-insensitive substring match on description and merchant
    pub fn matches_search(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        self.description.to_lowercase().contains(&query)
            || self
                .merchant
                .as_deref()
                .map_or(false, |merchant| merchant.to_lowercase().contains(&query))
    }

    /// Whether this transaction passes every set field of `filters`.
    /// Date bounds are inclusive; an inverted range matches nothing.
    pub fn matches(&self, filters: &TransactionFilters) -> bool {
        if let Some(search) = &filters.search {
            if !self.matches_search(search) {
                return false;
            }
        }
        if let Some(account_id) = &filters.account_id {
            if self.account_id != *account_id {
                return false;
            }
        }
        if let Some(category_id) = &filters.category_id {
            if self.category_id.as_deref() != Some(category_id.as_str()) {
                return false;
            }
        }
        if filters.status.map_or(false, |status| status != self.status) {
            return false;
        }
        if filters
            .transaction_type
            .map_or(false, |kind| kind != self.transaction_type)
        {
            return false;
        }
        if filters.start_date.map_or(false, |start| self.date < start) {
            return false;
        }
        if filters.end_date.map_or(false, |end| self.date > end) {
            return false;
        }
        if filters.uncategorized == Some(true) && self.is_categorized() {
            return false;
        }
        true
    }
}

/// A blog or help article
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub slug: String,
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub published_at: NaiveDate,
    /// Manually curated related slugs, in display order
    #[serde(default)]
    pub related: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

/// Everything loaded from the data file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreData {
    #[serde(default)]
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub posts: Vec<Post>,
}
