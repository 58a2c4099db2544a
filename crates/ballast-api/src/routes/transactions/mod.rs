//! Transaction routes - filtered list with pagination
//!
//! Filters are read from the same URL parameters the dashboard uses
//! (`search`, `account`, `category`, `status`, `type`, `startDate`,
//! `endDate`, `uncategorized`, `page`), plus `limit` for page size.

pub mod api;

pub use api::{api_transactions, TransactionsResponse};
