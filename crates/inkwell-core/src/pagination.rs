//! Page arithmetic for post listings.

use serde::{Deserialize, Serialize};

/// Resolves a requested page number against a known item count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    per_page: u64,
    count: u64,
}

impl Paginator {
    /// `per_page` of zero is treated as one.
    pub fn new(count: u64, per_page: u64) -> Self {
        Self {
            per_page: per_page.max(1),
            count,
        }
    }

    /// Always at least one page, even when there are no items.
    pub fn num_pages(&self) -> u64 {
        self.count.div_ceil(self.per_page).max(1)
    }

    /// Turn the raw `?page=` value into a valid page number.
    ///
    /// Missing or non-numeric input yields the first page; numbers past
    /// either end are clamped to the last page.
    pub fn resolve(&self, raw: Option<&str>) -> u64 {
        match raw.map(str::trim).and_then(|s| s.parse::<i64>().ok()) {
            None => 1,
            Some(n) if n < 1 => self.num_pages(),
            Some(n) => (n as u64).min(self.num_pages()),
        }
    }

    /// `(offset, limit)` of the given 1-based page.
    pub fn window(&self, page: u64) -> (u64, u64) {
        let page = page.clamp(1, self.num_pages());
        ((page - 1) * self.per_page, self.per_page)
    }

    pub fn page<T>(&self, number: u64, items: Vec<T>) -> Page<T> {
        let number = number.clamp(1, self.num_pages());
        Page {
            items,
            number,
            num_pages: self.num_pages(),
            total: self.count,
            has_previous: number > 1,
            has_next: number < self.num_pages(),
        }
    }
}

/// One page of results with navigation metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub number: u64,
    pub num_pages: u64,
    pub total: u64,
    pub has_previous: bool,
    pub has_next: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_num_pages() {
        assert_eq!(Paginator::new(0, 3).num_pages(), 1);
        assert_eq!(Paginator::new(3, 3).num_pages(), 1);
        assert_eq!(Paginator::new(7, 3).num_pages(), 3);
    }

    #[test]
    fn test_resolve_falls_back() {
        let paginator = Paginator::new(7, 3);
        assert_eq!(paginator.resolve(None), 1);
        assert_eq!(paginator.resolve(Some("abc")), 1);
        assert_eq!(paginator.resolve(Some("2")), 2);
        assert_eq!(paginator.resolve(Some("99")), 3);
        assert_eq!(paginator.resolve(Some("0")), 3);
    }

    #[test]
    fn test_window_and_page_flags() {
        let paginator = Paginator::new(7, 3);
        assert_eq!(paginator.window(3), (6, 3));

        let page = paginator.page(2, vec!["d", "e", "f"]);
        assert!(page.has_previous);
        assert!(page.has_next);
        assert_eq!(page.total, 7);
    }
}
