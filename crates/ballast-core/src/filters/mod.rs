//! Transaction filters
//!
//! Structure:
//! - model.rs: typed filter model
//! - params.rs: URL serialization, validation, counting
//! - display.rs: human-readable values
//! - reducer.rs: pure state transitions
//! - quick.rs: named presets
//! - controller.rs: URL-backed controller with debounced search

pub mod controller;
pub mod display;
pub mod model;
pub mod params;
pub mod quick;
pub mod reducer;

pub use controller::{BatchOutcome, FilterController, MemoryNavigator, NavigationState, Navigator, SEARCH_DEBOUNCE};
pub use display::{active_filter_labels, get_filter_display_value, DisplayOptions, FilterLabel, LookupOption};
pub use model::{FilterKey, TransactionFilters, TransactionStatus, TransactionType};
pub use params::{
    build_url_params, count_active_filters, deserialize_filters, page_from_params, serialize_filters,
    validate_filter_value, SerializedFilters, PAGE_PARAM,
};
pub use quick::{presets_from_config, QuickFilter};
pub use reducer::{reduce, reduce_with_report, FilterAction, FilterPatch, ReduceOutcome};
