//! Quick filter routes - list presets and apply one to the current URL

pub mod api;

pub use api::{api_apply_quick_filter, api_quick_filters, QuickFilterApplied};
