//! Account and category lookups used to label filter values

pub mod api;

pub use api::{api_accounts, api_categories};
