//! In-memory transaction store
//!
//! Data is read once through a [`TransactionSource`] and queried with
//! [`TransactionFilters`]. `reload` re-reads the same source.

use crate::error::{CoreError, CoreResult};
use crate::filters::{DisplayOptions, LookupOption, TransactionFilters};
use crate::models::{Account, Category, Post, StoreData, Transaction};
use crate::related::related_posts;
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

/// Where store data comes from
#[async_trait]
pub trait TransactionSource: Send + Sync {
    async fn load(&self) -> CoreResult<StoreData>;

    /// Short description for logs
    fn describe(&self) -> String;
}

pub type SourceRef = Arc<dyn TransactionSource>;

/// JSON data file
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl TransactionSource for JsonFileSource {
    async fn load(&self) -> CoreResult<StoreData> {
        if !tokio::fs::try_exists(&self.path).await.unwrap_or(false) {
            return Err(CoreError::FileNotFound {
                path: self.path.display().to_string(),
            });
        }
        let content = tokio::fs::read_to_string(&self.path).await?;
        serde_json::from_str(&content).map_err(|e| CoreError::InvalidData {
            message: format!("{}: {}", self.path.display(), e),
        })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// One page of a filtered query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPage {
    pub transactions: Vec<Transaction>,
    pub total_count: usize,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    /// Sum of amounts over every matching transaction, not just this page
    pub total_amount: Decimal,
}

pub struct TransactionStore {
    data: StoreData,
    source: Option<SourceRef>,
}

impl TransactionStore {
    /// Store over fixed data, with nothing to reload from
    pub fn new(data: StoreData) -> Self {
        Self { data, source: None }
    }

    pub async fn load(source: SourceRef) -> CoreResult<Self> {
        let data = source.load().await?;
        log::info!(
            "Loaded {} transactions, {} accounts, {} posts from {}",
            data.transactions.len(),
            data.accounts.len(),
            data.posts.len(),
            source.describe()
        );
        Ok(Self {
            data,
            source: Some(source),
        })
    }

    /// Load from a JSON data file
    pub async fn open(path: impl Into<PathBuf>) -> CoreResult<Self> {
        Self::load(Arc::new(JsonFileSource::new(path))).await
    }

    /// Re-read the source. On failure the current data is kept.
    pub async fn reload(&mut self) -> CoreResult<()> {
        let Some(source) = self.source.clone() else {
            return Ok(());
        };
        match source.load().await {
            Ok(data) => {
                self.data = data;
                log::info!("Reloaded data from {}", source.describe());
                Ok(())
            }
            Err(e) => {
                e.log("reload");
                Err(e)
            }
        }
    }

    pub fn accounts(&self) -> &[Account] {
        &self.data.accounts
    }

    pub fn categories(&self) -> &[Category] {
        &self.data.categories
    }

    pub fn post(&self, slug: &str) -> Option<&Post> {
        self.data.posts.iter().find(|post| post.slug == slug)
    }

    pub fn transactions_count(&self) -> usize {
        self.data.transactions.len()
    }

    /// Lookup lists for rendering account and category filters
    pub fn display_options(&self) -> DisplayOptions {
        DisplayOptions {
            accounts: self
                .data
                .accounts
                .iter()
                .map(|a| LookupOption::new(a.id.clone(), a.name.clone()))
                .collect(),
            categories: self
                .data
                .categories
                .iter()
                .map(|c| LookupOption::new(c.id.clone(), c.name.clone()))
                .collect(),
        }
    }

    /// Matching transactions, newest first. `page` is 1-based; a page
    /// past the end is empty.
    pub fn query(&self, filters: &TransactionFilters, page: usize, page_size: usize) -> TransactionPage {
        let page = page.max(1);
        let page_size = page_size.max(1);

        if filters.has_inverted_range() {
            log::debug!("Inverted date range in filters; result is empty");
        }

        let mut matching: Vec<&Transaction> = self
            .data
            .transactions
            .iter()
            .filter(|t| t.matches(filters))
            .collect();

        matching.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.id.cmp(&a.id)));

        let total_count = matching.len();
        let total_amount = matching.iter().map(|t| t.amount).sum();
        // An offset that overflows is past the end of any result
        let transactions = match (page - 1).checked_mul(page_size) {
            Some(offset) => matching
                .into_iter()
                .skip(offset)
                .take(page_size)
                .cloned()
                .collect(),
            None => Vec::new(),
        };

        TransactionPage {
            transactions,
            total_count,
            page,
            page_size,
            total_pages: total_count.div_ceil(page_size),
            total_amount,
        }
    }

    /// Related posts for `slug`
    pub fn related_posts(&self, slug: &str, limit: usize) -> CoreResult<Vec<&Post>> {
        let target = self.post(slug).ok_or_else(|| CoreError::PostNotFound {
            slug: slug.to_string(),
        })?;
        Ok(related_posts(target, &self.data.posts, limit))
    }
}
