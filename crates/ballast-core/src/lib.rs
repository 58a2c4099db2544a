//! Core filter state and data logic
//!
//! - filters: typed filter model, URL serialization, reducer, controller
//! - debounce: clock-driven debounced values
//! - store: in-memory transaction store and filtered queries
//! - related: related-post ranking

pub mod debounce;
pub mod error;
pub mod filters;
pub mod models;
pub mod related;
pub mod store;

pub use debounce::{Clock, Debounced, ManualClock, SystemClock};
pub use error::{CoreError, CoreResult, ErrorCode, ErrorDetails, ErrorSeverity, FilterError};
pub use filters::{
    FilterController, FilterKey, FilterPatch, QuickFilter, TransactionFilters, TransactionStatus, TransactionType,
};
pub use models::{Account, Category, Post, StoreData, Transaction};
pub use related::related_posts;
pub use store::{JsonFileSource, SourceRef, TransactionPage, TransactionSource, TransactionStore};
