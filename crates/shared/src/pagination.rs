//! Offset pagination types shared by list endpoints.

use serde::{Deserialize, Serialize};

const DEFAULT_PER_PAGE: i32 = 50;
const MAX_PER_PAGE: i32 = 100;

/// Query parameters accepted by paginated list endpoints.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct PageQuery {
    pub page: Option<i32>,
    pub per_page: Option<i32>,
}

impl PageQuery {
    /// Normalized page number (1-based).
    pub fn page(&self) -> i32 {
        self.page.unwrap_or(1).max(1)
    }

    /// Normalized page size, clamped to [1, 100].
    pub fn per_page(&self) -> i32 {
        self.per_page.unwrap_or(DEFAULT_PER_PAGE).clamp(1, MAX_PER_PAGE)
    }

    /// SQL OFFSET for the normalized page.
    pub fn offset(&self) -> i64 {
        ((self.page() - 1) * self.per_page()) as i64
    }
}

/// Pagination block included in list responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageInfo {
    pub page: i32,
    pub per_page: i32,
    pub total: i64,
    pub total_pages: i32,
}

impl PageInfo {
    /// Builds a PageInfo from a normalized query and a total row count.
    pub fn new(query: &PageQuery, total: i64) -> Self {
        let per_page = query.per_page();
        let total_pages = ((total as f64) / (per_page as f64)).ceil() as i32;
        Self {
            page: query.page(),
            per_page,
            total,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_query_defaults() {
        let q = PageQuery::default();
        assert_eq!(q.page(), 1);
        assert_eq!(q.per_page(), 50);
        assert_eq!(q.offset(), 0);
    }

    #[test]
    fn test_page_query_clamps() {
        let q = PageQuery {
            page: Some(0),
            per_page: Some(1000),
        };
        assert_eq!(q.page(), 1);
        assert_eq!(q.per_page(), 100);
    }

    #[test]
    fn test_page_query_offset() {
        let q = PageQuery {
            page: Some(3),
            per_page: Some(20),
        };
        assert_eq!(q.offset(), 40);
    }

    #[test]
    fn test_page_info_total_pages() {
        let q = PageQuery {
            page: Some(1),
            per_page: Some(10),
        };
        assert_eq!(PageInfo::new(&q, 0).total_pages, 0);
        assert_eq!(PageInfo::new(&q, 10).total_pages, 1);
        assert_eq!(PageInfo::new(&q, 11).total_pages, 2);
    }
}
