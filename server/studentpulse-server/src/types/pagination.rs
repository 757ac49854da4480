//! Lenient pagination query parameters
//!
//! `page` and `limit` arrive as raw strings so that a malformed value
//! falls back to the default instead of failing the request.

use serde::Deserialize;
use utoipa::IntoParams;

/// Pagination query parameters accepted by list endpoints
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationParams {
    /// 1-based page number (defaults to 1)
    pub page: Option<String>,
    /// Page size (defaults to the server's configured page size)
    pub limit: Option<String>,
}

impl PaginationParams {
    /// Resolved page number, at least 1
    pub fn page(&self) -> u32 {
        self.page
            .as_deref()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(1)
            .max(1)
    }

    /// Resolved page size, at least 1
    pub fn limit(&self, default: u32) -> u32 {
        self.limit
            .as_deref()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(default)
            .max(1)
    }

    /// Row offset for the resolved page
    pub fn offset(&self, default_limit: u32) -> u64 {
        u64::from(self.page() - 1) * u64::from(self.limit(default_limit))
    }
}

/// Number of pages needed to show `total` rows at `limit` rows per page
///
/// An empty result set has zero pages.
pub fn total_pages(total: i64, limit: u32) -> u32 {
    if total <= 0 || limit == 0 {
        return 0;
    }
    let limit = i64::from(limit);
    u32::try_from((total + limit - 1) / limit).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(page: Option<&str>, limit: Option<&str>) -> PaginationParams {
        PaginationParams {
            page: page.map(String::from),
            limit: limit.map(String::from),
        }
    }

    #[test]
    fn test_defaults_when_absent() {
        let p = params(None, None);
        assert_eq!(p.page(), 1);
        assert_eq!(p.limit(20), 20);
        assert_eq!(p.offset(20), 0);
    }

    #[test]
    fn test_non_numeric_falls_back() {
        let p = params(Some("abc"), Some("-5"));
        assert_eq!(p.page(), 1);
        assert_eq!(p.limit(20), 20);
    }

    #[test]
    fn test_zero_page_clamps_to_one() {
        let p = params(Some("0"), Some("10"));
        assert_eq!(p.page(), 1);
        assert_eq!(p.offset(20), 0);
    }

    #[test]
    fn test_offset_for_later_page() {
        let p = params(Some("3"), Some("25"));
        assert_eq!(p.offset(20), 50);
    }

    #[test]
    fn test_total_pages_rounds_up() {
        assert_eq!(total_pages(0, 20), 0);
        assert_eq!(total_pages(1, 20), 1);
        assert_eq!(total_pages(20, 20), 1);
        assert_eq!(total_pages(21, 20), 2);
    }
}
