//! Pagination
//!
//! `?page=&limit=` query parameters and the paginated payload shape.

use serde::{Deserialize, Serialize};

pub const DEFAULT_LIMIT: u32 = 10;
pub const MAX_LIMIT: u32 = 100;

/// Query parameters for paginated listings (1-based pages)
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl PageQuery {
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: Some(page),
            limit: Some(limit),
        }
    }

    pub fn page(&self) -> u32 {
        self.page.filter(|p| *p > 0).unwrap_or(1)
    }

    pub fn limit(&self) -> u32 {
        self.limit
            .filter(|l| *l > 0)
            .map(|l| l.min(MAX_LIMIT))
            .unwrap_or(DEFAULT_LIMIT)
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.page() - 1) * i64::from(self.limit())
    }
}

/// One page of results
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: i64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: i64, query: &PageQuery) -> Self {
        let limit = query.limit();
        let total_pages = if total <= 0 {
            0
        } else {
            (total + i64::from(limit) - 1) / i64::from(limit)
        };
        Self {
            items,
            total,
            page: query.page(),
            limit,
            total_pages,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            limit: self.limit,
            total_pages: self.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_and_clamping() {
        let q = PageQuery::default();
        assert_eq!(q.page(), 1);
        assert_eq!(q.limit(), DEFAULT_LIMIT);
        assert_eq!(q.offset(), 0);

        let q = PageQuery::new(0, 10_000);
        assert_eq!(q.page(), 1);
        assert_eq!(q.limit(), MAX_LIMIT);
    }

    #[test]
    fn test_offset() {
        assert_eq!(PageQuery::new(3, 20).offset(), 40);
    }

    #[test]
    fn test_total_pages_rounds_up() {
        let q = PageQuery::new(1, 10);
        assert_eq!(Page::new(Vec::<u8>::new(), 0, &q).total_pages, 0);
        assert_eq!(Page::new(Vec::<u8>::new(), 10, &q).total_pages, 1);
        assert_eq!(Page::new(Vec::<u8>::new(), 11, &q).total_pages, 2);
    }
}
