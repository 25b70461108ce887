use std::ops::Range;

/// Default number of cards per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Items on one page plus their 1-based inclusive ordinals for display.
#[derive(Debug, PartialEq, Eq)]
pub struct PageSlice<'a, T> {
    pub items: &'a [T],
    /// Index of the first item in the display order.
    pub offset: usize,
    /// 1-based ordinal of the first item; 0 when the page is empty.
    pub start_ordinal: usize,
    /// 1-based ordinal of the last item; 0 when the page is empty.
    pub end_ordinal: usize,
}

/// Fixed-size page state over the display order.
///
/// The page contents are never stored; they are derived from
/// `(current_page, page_size, total_items)` on demand.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Paginator {
    page_size: usize,
    current_page: usize,
    total_items: usize,
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Paginator {
    /// Page size is clamped to at least one item.
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            current_page: 0,
            total_items: 0,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn total_items(&self) -> usize {
        self.total_items
    }

    pub fn total_pages(&self) -> usize {
        self.total_items.div_ceil(self.page_size)
    }

    /// Start over at page 0 for a freshly loaded display order.
    pub fn reset(&mut self, total_items: usize) {
        self.total_items = total_items;
        self.current_page = 0;
    }

    pub fn has_next(&self) -> bool {
        self.current_page + 1 < self.total_pages()
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 0
    }

    /// Advance one page; returns `false` without moving on the last page.
    pub fn next_page(&mut self) -> bool {
        if !self.has_next() {
            return false;
        }
        self.current_page += 1;
        true
    }

    /// Go back one page; returns `false` without moving on the first page.
    pub fn previous_page(&mut self) -> bool {
        if !self.has_previous() {
            return false;
        }
        self.current_page -= 1;
        true
    }

    /// Jump to a page; out-of-range targets and the current page are rejected.
    pub fn go_to_page(&mut self, page: usize) -> bool {
        if page >= self.total_pages() || page == self.current_page {
            return false;
        }
        self.current_page = page;
        true
    }

    /// Index range of the current page, always within `[0, total_items]`.
    pub fn bounds(&self) -> Range<usize> {
        let start = (self.current_page * self.page_size).min(self.total_items);
        let end = (start + self.page_size).min(self.total_items);
        start..end
    }

    /// Slice the current page out of the display order.
    pub fn page_slice<'a, T>(&self, order: &'a [T]) -> PageSlice<'a, T> {
        page_slice(order, self.current_page, self.page_size)
    }
}

/// Slice page `page` (0-based) of `order` with `page_size` items per page.
pub fn page_slice<T>(order: &[T], page: usize, page_size: usize) -> PageSlice<'_, T> {
    let page_size = page_size.max(1);
    let start = page.saturating_mul(page_size).min(order.len());
    let end = start.saturating_add(page_size).min(order.len());
    let items = &order[start..end];
    let (start_ordinal, end_ordinal) = if items.is_empty() {
        (0, 0)
    } else {
        (start + 1, end)
    };
    PageSlice {
        items,
        offset: start,
        start_ordinal,
        end_ordinal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paginator(total: usize) -> Paginator {
        let mut paginator = Paginator::new(10);
        paginator.reset(total);
        paginator
    }

    #[test]
    fn ninety_five_items_make_ten_pages() {
        let items: Vec<usize> = (0..95).collect();
        let mut paginator = paginator(items.len());
        assert_eq!(paginator.total_pages(), 10);

        let first = paginator.page_slice(&items);
        assert_eq!((first.start_ordinal, first.end_ordinal), (1, 10));
        assert_eq!(first.items.len(), 10);

        assert!(paginator.go_to_page(9));
        let last = paginator.page_slice(&items);
        assert_eq!((last.start_ordinal, last.end_ordinal), (91, 95));
        assert_eq!(last.items, &items[90..95]);
    }

    #[test]
    fn next_on_last_page_is_rejected() {
        let mut paginator = paginator(95);
        while paginator.next_page() {}
        assert_eq!(paginator.current_page(), 9);
        assert!(!paginator.next_page());
        assert_eq!(paginator.current_page(), 9);
    }

    #[test]
    fn previous_on_first_page_is_rejected() {
        let mut paginator = paginator(95);
        assert!(!paginator.previous_page());
        assert_eq!(paginator.current_page(), 0);
    }

    #[test]
    fn empty_order_has_no_pages() {
        let items: Vec<usize> = Vec::new();
        let mut paginator = paginator(0);
        assert_eq!(paginator.total_pages(), 0);
        assert!(!paginator.next_page());
        assert!(!paginator.go_to_page(0));
        let slice = paginator.page_slice(&items);
        assert!(slice.items.is_empty());
        assert_eq!((slice.start_ordinal, slice.end_ordinal), (0, 0));
        assert_eq!(paginator.bounds(), 0..0);
    }

    #[test]
    fn out_of_range_page_slice_is_empty() {
        let items: Vec<usize> = (0..5).collect();
        let slice = page_slice(&items, 3, 10);
        assert!(slice.items.is_empty());
        assert_eq!(slice.offset, 5);
    }

    #[test]
    fn reset_returns_to_first_page() {
        let mut paginator = paginator(40);
        paginator.go_to_page(3);
        paginator.reset(12);
        assert_eq!(paginator.current_page(), 0);
        assert_eq!(paginator.total_pages(), 2);
    }

    #[test]
    fn zero_page_size_is_clamped() {
        assert_eq!(Paginator::new(0).page_size(), 1);
    }
}
