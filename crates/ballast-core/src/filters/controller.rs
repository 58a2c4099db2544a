//! Filter controller: URL-backed filter state for a transaction list view
//!
//! The URL is the source of truth. The controller reads it through a
//! [`Navigator`], merges validated updates with [`reduce_with_report`],
//! and pushes the rebuilt URL. Consumers read [`FilterController::filters`],
//! where `search` lags behind the URL by the debounce window so typing
//! does not refetch on every keystroke.
//!
//! Navigation is `Idle -> Navigating -> Idle`. Each push gets a new
//! generation; only completion of the latest generation returns to `Idle`.

use super::model::{FilterKey, TransactionFilters};
use super::params::{build_url_params, deserialize_filters, serialize_filters, SerializedFilters};
use super::quick::QuickFilter;
use super::reducer::{apply_value, reduce_with_report, FilterAction, FilterPatch};
use crate::debounce::{Clock, Debounced, SystemClock};
use crate::error::FilterError;
use ballast_config::FiltersConfig;
use ballast_utils::{join_path_query, QueryParams};
use std::time::Duration;

/// Default delay before search input is applied
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Client-side navigation primitive and current-location reader
pub trait Navigator {
    /// Push a new URL (path plus optional query) without a full reload
    fn push(&mut self, url: &str);
    /// Path of the current location, without the query
    fn current_path(&self) -> String;
    /// Query parameters of the current location
    fn current_params(&self) -> QueryParams;
}

/// In-memory location and history
#[derive(Debug, Clone, Default)]
pub struct MemoryNavigator {
    path: String,
    params: QueryParams,
    history: Vec<String>,
}

impl MemoryNavigator {
    /// Start at `url`, e.g. `/transactions?status=NEEDS_REVIEW`
    pub fn new(url: &str) -> Self {
        let mut navigator = Self::default();
        navigator.set_location(url);
        navigator
    }

    fn set_location(&mut self, url: &str) {
        let (path, query) = url.split_once('?').unwrap_or((url, ""));
        self.path = path.to_string();
        self.params = QueryParams::parse(query);
    }

    /// Full URL of the current location
    pub fn current_url(&self) -> String {
        join_path_query(&self.path, &self.params)
    }

    /// URLs pushed so far, oldest first
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Simulate back/forward or a typed URL: change location without a push
    pub fn replace(&mut self, url: &str) {
        self.set_location(url);
    }
}

impl Navigator for MemoryNavigator {
    fn push(&mut self, url: &str) {
        self.history.push(url.to_string());
        self.set_location(url);
    }

    fn current_path(&self) -> String {
        self.path.clone()
    }

    fn current_params(&self) -> QueryParams {
        self.params.clone()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationState {
    Idle,
    Navigating { generation: u64 },
}

/// Result of a batch update
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    pub applied: Vec<FilterKey>,
    pub rejected: Vec<FilterError>,
    /// Generation of the navigation started, if any
    pub navigation: Option<u64>,
}

pub struct FilterController<N: Navigator, C: Clock = SystemClock> {
    navigator: N,
    clock: C,
    search: Debounced<Option<String>>,
    state: NavigationState,
    generation: u64,
}

impl<N: Navigator> FilterController<N, SystemClock> {
    pub fn new(navigator: N) -> Self {
        Self::with_clock(navigator, SystemClock, SEARCH_DEBOUNCE)
    }

    /// Use the configured search debounce window
    pub fn from_config(navigator: N, config: &FiltersConfig) -> Self {
        Self::with_clock(navigator, SystemClock, config.search_debounce())
    }
}

impl<N: Navigator, C: Clock> FilterController<N, C> {
    /// The search seen at mount is applied at once; only later input is debounced
    pub fn with_clock(navigator: N, clock: C, debounce: Duration) -> Self {
        let initial_search = deserialize_filters(&navigator.current_params()).search;
        Self {
            navigator,
            clock,
            search: Debounced::new(initial_search, debounce),
            state: NavigationState::Idle,
            generation: 0,
        }
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn navigator_mut(&mut self) -> &mut N {
        &mut self.navigator
    }

    pub fn state(&self) -> NavigationState {
        self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, NavigationState::Navigating { .. })
    }

    /// Filters as currently written in the URL, without debouncing
    pub fn url_filters(&self) -> TransactionFilters {
        deserialize_filters(&self.navigator.current_params())
    }

    /// Effective filters for the list: URL state with debounced search
    pub fn filters(&self) -> TransactionFilters {
        let mut filters = self.url_filters();
        filters.search = self.search.value_at(self.clock.now()).clone();
        filters
    }

    /// True while typed search has not reached [`filters`](Self::filters) yet
    pub fn is_search_pending(&self) -> bool {
        self.search.is_pending_at(self.clock.now())
    }

    /// Set or clear one field. Invalid values leave state and URL untouched.
    pub fn update_filter(&mut self, key: FilterKey, value: Option<&str>) -> Result<u64, FilterError> {
        let mut next = self.url_filters();
        if let Err(error) = apply_value(&mut next, key, value) {
            log::warn!("Rejected filter update: {}", error);
            return Err(error);
        }
        Ok(self.navigate_to(&next))
    }

    /// Apply a batch; invalid fields are dropped and the rest still apply
    pub fn update_filters(&mut self, patch: &FilterPatch) -> BatchOutcome {
        let outcome = reduce_with_report(&self.url_filters(), FilterAction::Patch(patch.clone()));
        for error in &outcome.rejected {
            log::warn!("Dropped filter from batch: {}", error);
        }

        let navigation = if outcome.applied.is_empty() {
            None
        } else {
            Some(self.navigate_to(&outcome.filters))
        };

        BatchOutcome {
            applied: outcome.applied,
            rejected: outcome.rejected,
            navigation,
        }
    }

    /// Navigate to the bare path with no query parameters
    pub fn clear_filters(&mut self) -> u64 {
        let path = self.navigator.current_path();
        self.search.reset(None);
        self.push(&path)
    }

    pub fn apply_quick_filter(&mut self, preset: &QuickFilter) -> BatchOutcome {
        log::debug!("Applying quick filter '{}'", preset.name);
        self.update_filters(&preset.patch)
    }

    pub fn get_filter_value(&self, key: FilterKey) -> Option<String> {
        self.filters().get(key)
    }

    pub fn is_filter_active(&self, key: FilterKey) -> bool {
        self.get_filter_value(key)
            .map_or(false, |value| !value.trim().is_empty() && value != "false")
    }

    /// Serialized form of the effective filters
    pub fn serialize_filters(&self) -> SerializedFilters {
        serialize_filters(&self.filters())
    }

    /// Query string for sharing the current view
    pub fn share_query(&self) -> String {
        build_url_params(&self.filters(), None).to_string()
    }

    /// Mark navigation `generation` as rendered. Superseded generations
    /// are ignored and return false.
    pub fn complete_navigation(&mut self, generation: u64) -> bool {
        match self.state {
            NavigationState::Navigating { generation: current } if current == generation => {
                self.state = NavigationState::Idle;
                self.sync_from_location();
                true
            }
            _ => {
                log::debug!("Ignoring completion of superseded navigation {}", generation);
                false
            }
        }
    }

    /// Pick up a location change made outside the controller
    pub fn sync_from_location(&mut self) {
        let url_search = self.url_filters().search;
        if url_search != *self.search.latest() {
            self.search.set(url_search, self.clock.now());
        }
    }

    fn navigate_to(&mut self, filters: &TransactionFilters) -> u64 {
        let params = build_url_params(filters, Some(&self.navigator.current_params()));
        let url = join_path_query(&self.navigator.current_path(), &params);
        if filters.search != *self.search.latest() {
            self.search.set(filters.search.clone(), self.clock.now());
        }
        self.push(&url)
    }

    fn push(&mut self, url: &str) -> u64 {
        self.generation += 1;
        self.state = NavigationState::Navigating {
            generation: self.generation,
        };
        log::debug!("Navigating to {} (generation {})", url, self.generation);
        self.navigator.push(url);
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debounce::ManualClock;
    use crate::filters::{TransactionStatus, TransactionType};

    fn controller(url: &str) -> (FilterController<MemoryNavigator, ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        let controller =
            FilterController::with_clock(MemoryNavigator::new(url), clock.clone(), SEARCH_DEBOUNCE);
        (controller, clock)
    }

    #[test]
    fn test_from_config_uses_configured_window() {
        let config = FiltersConfig {
            search_debounce_ms: 0,
            ..Default::default()
        };
        let mut controller = FilterController::from_config(MemoryNavigator::new("/transactions"), &config);
        controller.update_filter(FilterKey::Search, Some("rent")).unwrap();
        assert_eq!(controller.filters().search.as_deref(), Some("rent"));
    }

    #[test]
    fn test_search_scenario() {
        let (mut controller, clock) =
            controller("/transactions?status=NEEDS_REVIEW&type=EXPENSE&page=3");

        controller.update_filter(FilterKey::Search, Some("coffee")).unwrap();

        assert_eq!(
            controller.navigator().current_url(),
            "/transactions?search=coffee&status=NEEDS_REVIEW&type=EXPENSE"
        );
        assert!(controller.is_loading());
        assert_eq!(controller.filters().search, None);
        assert_eq!(controller.filters().status, Some(TransactionStatus::NeedsReview));

        clock.advance(Duration::from_millis(299));
        assert_eq!(controller.filters().search, None);

        clock.advance(Duration::from_millis(1));
        let filters = controller.filters();
        assert_eq!(filters.search.as_deref(), Some("coffee"));
        assert_eq!(filters.transaction_type, Some(TransactionType::Expense));
    }

    #[test]
    fn test_invalid_value_is_rejected() {
        let (mut controller, _) = controller("/transactions?type=INCOME");
        let before = controller.filters();

        let err = controller.update_filter(FilterKey::Status, Some("BOGUS")).unwrap_err();
        assert_eq!(
            err,
            FilterError::InvalidValue {
                key: FilterKey::Status,
                value: "BOGUS".to_string()
            }
        );
        assert_eq!(controller.filters(), before);
        assert!(controller.navigator().history().is_empty());
        assert!(!controller.is_loading());
    }

    #[test]
    fn test_non_search_fields_apply_immediately() {
        let (mut controller, _) = controller("/transactions");
        controller.update_filter(FilterKey::Type, Some("TRANSFER")).unwrap();
        assert_eq!(controller.filters().transaction_type, Some(TransactionType::Transfer));
        assert!(controller.is_filter_active(FilterKey::Type));
        assert_eq!(controller.get_filter_value(FilterKey::Type).as_deref(), Some("TRANSFER"));
    }

    #[test]
    fn test_clearing_a_field() {
        let (mut controller, _) = controller("/transactions?account=acc_1&status=RECONCILED");
        controller.update_filter(FilterKey::AccountId, None).unwrap();
        assert_eq!(controller.navigator().current_url(), "/transactions?status=RECONCILED");

        controller.update_filter(FilterKey::Status, Some("all")).unwrap();
        assert_eq!(controller.navigator().current_url(), "/transactions");
    }

    #[test]
    fn test_batch_partial_application() {
        let (mut controller, _) = controller("/transactions?page=2");
        let patch = FilterPatch::new()
            .set(FilterKey::Status, "NEEDS_REVIEW")
            .set(FilterKey::StartDate, "not-a-date")
            .set(FilterKey::EndDate, "2024-06-30");

        let outcome = controller.update_filters(&patch);
        assert_eq!(outcome.applied, vec![FilterKey::Status, FilterKey::EndDate]);
        assert_eq!(outcome.rejected.len(), 1);
        assert!(outcome.navigation.is_some());
        assert_eq!(
            controller.navigator().current_url(),
            "/transactions?status=NEEDS_REVIEW&endDate=2024-06-30"
        );
    }

    #[test]
    fn test_batch_with_nothing_valid_does_not_navigate() {
        let (mut controller, _) = controller("/transactions?page=2");
        let outcome = controller.update_filters(&FilterPatch::new().set(FilterKey::Type, "REFUND"));
        assert!(outcome.navigation.is_none());
        assert!(controller.navigator().history().is_empty());
        assert_eq!(controller.navigator().current_url(), "/transactions?page=2");
    }

    #[test]
    fn test_clear_filters_goes_to_bare_path() {
        let (mut controller, _) =
            controller("/transactions?search=rent&status=RECONCILED&view=compact&page=2");
        controller.clear_filters();
        assert_eq!(controller.navigator().current_url(), "/transactions");
        assert!(controller.filters().is_empty());
    }

    #[test]
    fn test_quick_filter_merges() {
        let (mut controller, _) = controller("/transactions?type=EXPENSE");
        let preset = QuickFilter::new(
            "needs-review",
            "Needs review",
            FilterPatch::new().set(FilterKey::Status, "NEEDS_REVIEW"),
        );
        controller.apply_quick_filter(&preset);
        assert_eq!(
            controller.navigator().current_url(),
            "/transactions?status=NEEDS_REVIEW&type=EXPENSE"
        );
    }

    #[test]
    fn test_last_navigation_wins() {
        let (mut controller, _) = controller("/transactions");
        let first = controller.update_filter(FilterKey::Type, Some("INCOME")).unwrap();
        let second = controller.update_filter(FilterKey::Status, Some("IN_PROGRESS")).unwrap();
        assert!(second > first);

        assert!(!controller.complete_navigation(first));
        assert!(controller.is_loading());

        assert!(controller.complete_navigation(second));
        assert_eq!(controller.state(), NavigationState::Idle);

        let filters = controller.filters();
        assert_eq!(filters.transaction_type, Some(TransactionType::Income));
        assert_eq!(filters.status, Some(TransactionStatus::InProgress));
    }

    #[test]
    fn test_typing_keeps_pending_search_in_url() {
        let (mut controller, clock) = controller("/transactions");
        controller.update_filter(FilterKey::Search, Some("cof")).unwrap();
        clock.advance(Duration::from_millis(100));
        controller.update_filter(FilterKey::Search, Some("coffee")).unwrap();
        clock.advance(Duration::from_millis(100));
        controller.update_filter(FilterKey::Type, Some("EXPENSE")).unwrap();

        assert_eq!(
            controller.navigator().current_url(),
            "/transactions?search=coffee&type=EXPENSE"
        );
        assert!(controller.is_search_pending());
        assert_eq!(controller.filters().search, None);

        clock.advance(Duration::from_millis(200));
        assert_eq!(controller.filters().search.as_deref(), Some("coffee"));
    }

    #[test]
    fn test_initial_search_is_not_delayed() {
        let (controller, _) = controller("/transactions?search=rent");
        assert_eq!(controller.filters().search.as_deref(), Some("rent"));
        assert_eq!(controller.share_query(), "search=rent");
        assert_eq!(controller.serialize_filters().search.as_deref(), Some("rent"));
    }

    #[test]
    fn test_sync_from_external_location() {
        let (mut controller, clock) = controller("/transactions?search=rent");
        controller.navigator_mut().replace("/transactions?search=groceries");
        controller.sync_from_location();

        assert_eq!(controller.filters().search.as_deref(), Some("rent"));
        clock.advance(SEARCH_DEBOUNCE);
        assert_eq!(controller.filters().search.as_deref(), Some("groceries"));
    }
}
