//! In-memory pagination over an already fetched list

/// Maximum items per page
const MAX_PER_PAGE: u32 = 100;

/// Default items per page
const DEFAULT_PER_PAGE: u32 = 10;

/// Pagination parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Page number (1-indexed)
    pub page: u32,
    /// Items per page (max 100)
    pub per_page: u32,
}

impl Pagination {
    /// Create pagination with validation.
    ///
    /// - Page is clamped to minimum of 1
    /// - Per page is clamped to 1..=100
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.clamp(1, MAX_PER_PAGE),
        }
    }

    /// Index of the first item on this page.
    pub fn offset(&self) -> usize {
        ((self.page - 1) as usize) * self.per_page as usize
    }

    /// Cut this page out of the full list.
    pub fn apply<T>(&self, items: Vec<T>) -> Paginated<T> {
        let total = items.len();
        let page_items = items
            .into_iter()
            .skip(self.offset())
            .take(self.per_page as usize)
            .collect();

        Paginated {
            items: page_items,
            total,
            page: self.page,
            per_page: self.per_page,
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

/// One page of a list plus the totals needed to render a pager
#[derive(Debug, Clone)]
pub struct Paginated<T> {
    /// Items for current page
    pub items: Vec<T>,
    /// Total count across all pages
    pub total: usize,
    /// Current page number
    pub page: u32,
    /// Items per page
    pub per_page: u32,
}

impl<T> Paginated<T> {
    /// Calculate total number of pages.
    pub fn total_pages(&self) -> u32 {
        let pages = self.total.div_ceil(self.per_page as usize).max(1);
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    /// Check if there's a next page.
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    /// Check if there's a previous page.
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_calculation() {
        assert_eq!(Pagination::new(1, 10).offset(), 0);
        assert_eq!(Pagination::new(2, 10).offset(), 10);
        assert_eq!(Pagination::new(3, 25).offset(), 50);
    }

    #[test]
    fn clamps_page_and_per_page() {
        assert_eq!(Pagination::new(0, 10).page, 1);
        assert_eq!(Pagination::new(1, 0).per_page, 1);
        assert_eq!(Pagination::new(1, 999).per_page, 100);
    }

    #[test]
    fn slices_requested_page() {
        let page = Pagination::new(2, 2).apply(vec![1, 2, 3, 4, 5]);
        assert_eq!(page.items, vec![3, 4]);
        assert_eq!(page.total, 5);
        assert_eq!(page.total_pages(), 3);
        assert!(page.has_next());
        assert!(page.has_prev());
    }

    #[test]
    fn page_past_the_end_is_empty() {
        let page = Pagination::new(9, 2).apply(vec![1, 2, 3]);
        assert!(page.items.is_empty());
        assert_eq!(page.total, 3);
        assert!(!page.has_next());
    }

    #[test]
    fn page_count_saturates_instead_of_wrapping() {
        let page: Paginated<u8> = Paginated {
            items: Vec::new(),
            total: usize::MAX,
            page: 1,
            per_page: 1,
        };
        assert_eq!(page.total_pages(), u32::MAX);
        assert!(page.has_next());
    }

    #[test]
    fn empty_list_has_one_page() {
        let page = Pagination::default().apply(Vec::<u8>::new());
        assert_eq!(page.total_pages(), 1);
        assert!(!page.has_next());
        assert!(!page.has_prev());
    }
}
