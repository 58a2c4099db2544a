//! Filter routes - normalize a filter query string the way the
//! dashboard writes it back to the URL

pub mod api;

pub use api::{api_filters, FiltersResponse};
