// Paged query result

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One page of rows plus the unpaged total
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: i64, limit: i64, offset: i64) -> Self {
        Self {
            items,
            total,
            limit,
            offset,
        }
    }

    /// Whether rows exist beyond this page
    pub fn has_more(&self) -> bool {
        self.offset + (self.items.len() as i64) < self.total
    }

    /// Pagination metadata for API responses
    pub fn pagination(&self) -> Pagination {
        Pagination {
            total: self.total,
            limit: self.limit,
            offset: self.offset,
            has_more: self.has_more(),
        }
    }
}

/// Pagination block returned next to list data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Pagination {
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
    pub has_more: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_more() {
        let page = Page::new(vec![1, 2], 5, 2, 0);
        assert!(page.has_more());

        let last = Page::new(vec![5], 5, 2, 4);
        assert!(!last.has_more());

        let past_end: Page<i32> = Page::new(vec![], 5, 2, 10);
        assert!(!past_end.has_more());
    }
}
