//! Utility functions and helpers
//!
//! - query: ordered URL query-string parameters

pub mod query;

pub use query::QueryParams;

/// Join a path and a query string, omitting the `?` when the query is empty
pub fn join_path_query(path: &str, query: &QueryParams) -> String {
    if query.is_empty() {
        path.to_string()
    } else {
        format!("{}?{}", path, query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_path_query() {
        let empty = QueryParams::new();
        assert_eq!(join_path_query("/transactions", &empty), "/transactions");

        let params = QueryParams::parse("status=NEEDS_REVIEW");
        assert_eq!(
            join_path_query("/transactions", &params),
            "/transactions?status=NEEDS_REVIEW"
        );
    }
}
