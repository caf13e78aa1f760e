//! Client-side pagination over an already-loaded sequence
//!
//! Pure slicing: no network, no side effects. Requested pages are clamped
//! into `[1, max(1, total_pages)]`.

/// One page of an in-memory sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    /// 1-based, after clamping
    pub current_page: usize,
    pub total_pages: usize,
    pub has_next_page: bool,
    pub has_prev_page: bool,
    /// Index of the first item on the page
    pub start_index: usize,
    /// One past the last item on the page
    pub end_index: usize,
    pub total_items: usize,
}

/// Number of pages for `total_items`; zero items means zero pages.
pub fn total_pages(total_items: usize, items_per_page: usize) -> usize {
    total_items.div_ceil(items_per_page.max(1))
}

/// Clamp a requested page into the valid range.
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// Slice `data` for `page` (1-based).
pub fn paginate<T>(data: &[T], items_per_page: usize, page: usize) -> Page<'_, T> {
    let per_page = items_per_page.max(1);
    let total_items = data.len();
    let total_pages = total_pages(total_items, per_page);
    let current_page = clamp_page(page, total_pages);

    let start_index = ((current_page - 1) * per_page).min(total_items);
    let end_index = (start_index + per_page).min(total_items);

    Page {
        items: &data[start_index..end_index],
        current_page,
        total_pages,
        has_next_page: current_page < total_pages,
        has_prev_page: current_page > 1,
        start_index,
        end_index,
        total_items,
    }
}

/// Pagination state for one table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    current_page: usize,
    items_per_page: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(10)
    }
}

impl Pagination {
    pub fn new(items_per_page: usize) -> Self {
        Self {
            current_page: 1,
            items_per_page: items_per_page.max(1),
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    /// Slice `data` at the current page. The stored page is not changed;
    /// callers holding a page past the end see the last page.
    pub fn page<'a, T>(&self, data: &'a [T]) -> Page<'a, T> {
        paginate(data, self.items_per_page, self.current_page)
    }

    /// Jump to `page`, clamped against `total_items`.
    pub fn go_to_page(&mut self, page: usize, total_items: usize) -> usize {
        let total = total_pages(total_items, self.items_per_page);
        self.current_page = clamp_page(page, total);
        self.current_page
    }

    pub fn next_page(&mut self, total_items: usize) -> usize {
        self.go_to_page(self.current_page.saturating_add(1), total_items)
    }

    pub fn prev_page(&mut self, total_items: usize) -> usize {
        self.go_to_page(self.current_page.saturating_sub(1), total_items)
    }

    /// Change the page size and go back to the first page.
    pub fn set_items_per_page(&mut self, items_per_page: usize) {
        self.items_per_page = items_per_page.max(1);
        self.current_page = 1;
    }
}
