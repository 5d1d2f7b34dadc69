//! Pagination state and the page-link window (pure).
//!
//! The window shows at most [`MAX_PAGE_NUMBERS`] consecutive page links
//! centred on the current page, re-anchored against the last page, with the
//! first and last pages pinned (plus ellipses) when they fall outside it.

use std::num::NonZeroUsize;
use std::ops::Range;

/// Number of consecutive page links in the window.
pub const MAX_PAGE_NUMBERS: usize = 5;

/// Default page size when none is configured.
pub const DEFAULT_PAGE_SIZE: NonZeroUsize = match NonZeroUsize::new(10) {
    Some(n) => n,
    None => unreachable!(),
};

/// Current page and page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
    page_index: usize,
    page_size: NonZeroUsize,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl PaginationState {
    /// Start on the first page.
    pub fn new(page_size: NonZeroUsize) -> Self {
        Self {
            page_index: 0,
            page_size,
        }
    }

    /// Zero-based current page.
    pub fn page_index(&self) -> usize {
        self.page_index
    }

    /// Rows per page.
    pub fn page_size(&self) -> NonZeroUsize {
        self.page_size
    }

    /// Step back one page. No-op on the first page.
    pub fn previous_page(&mut self) {
        self.page_index = self.page_index.saturating_sub(1);
    }

    /// Step forward one page. No-op on the last page.
    pub fn next_page(&mut self, total_pages: usize) {
        if self.page_index + 1 < total_pages {
            self.page_index += 1;
        }
    }

    /// Jump to `index`, clamped to `[0, total_pages - 1]`.
    pub fn set_page_index(&mut self, index: usize, total_pages: usize) {
        self.page_index = index.min(total_pages.saturating_sub(1));
    }

    /// Re-clamp after the row count changed.
    pub fn clamp(&mut self, total_pages: usize) {
        self.set_page_index(self.page_index, total_pages);
    }

    /// Back to the first page.
    pub fn reset(&mut self) {
        self.page_index = 0;
    }

    /// Whether a previous page exists.
    pub fn can_previous_page(&self) -> bool {
        self.page_index > 0
    }

    /// Whether a next page exists.
    pub fn can_next_page(&self, total_pages: usize) -> bool {
        self.page_index + 1 < total_pages
    }

    /// Row range of the current page within `total_rows`.
    pub fn page_range(&self, total_rows: usize) -> Range<usize> {
        let start = self
            .page_index
            .saturating_mul(self.page_size.get())
            .min(total_rows);
        let end = start.saturating_add(self.page_size.get()).min(total_rows);
        start..end
    }
}

/// `ceil(total_rows / page_size)`, zero when there are no rows.
pub fn total_pages(total_rows: usize, page_size: NonZeroUsize) -> usize {
    total_rows.div_ceil(page_size.get())
}

/// One entry of the rendered pagination bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    /// Previous-page affordance.
    Previous {
        /// Whether a previous page exists.
        enabled: bool,
    },
    /// Link to a 0-indexed page.
    Page {
        /// 0-indexed page number.
        index: usize,
        /// Whether this is the current page.
        active: bool,
    },
    /// Gap marker between pinned and windowed links.
    Ellipsis,
    /// Next-page affordance.
    Next {
        /// Whether a next page exists.
        enabled: bool,
    },
}

impl PageItem {
    /// Label shown to the user (pages are 1-indexed on screen).
    pub fn label(&self) -> String {
        match self {
            PageItem::Previous { .. } => "‹".to_string(),
            PageItem::Page { index, .. } => (index + 1).to_string(),
            PageItem::Ellipsis => "...".to_string(),
            PageItem::Next { .. } => "›".to_string(),
        }
    }
}

/// The computed page-link window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLinks {
    /// Consecutive window pages, 0-indexed.
    pub window: Vec<usize>,
    /// Full bar, including pinned pages, ellipses and prev/next.
    pub items: Vec<PageItem>,
}

/// Compute the page-link window for `page_index` out of `total_pages`.
pub fn page_links(page_index: usize, total_pages: usize) -> PageLinks {
    let max = MAX_PAGE_NUMBERS as isize;
    let half = max / 2;
    let total = total_pages as isize;
    let current = page_index as isize;

    let mut start = (current - half).max(0);
    let end = (start + max - 1).min(total - 1);
    if end - start < max - 1 {
        start = (end - max + 1).max(0);
    }

    let window: Vec<usize> = (start..=end).map(|i| i as usize).collect();

    let mut items = Vec::with_capacity(window.len() + 6);
    items.push(PageItem::Previous {
        enabled: total > 0 && current > 0,
    });
    if start > 0 {
        items.push(PageItem::Page {
            index: 0,
            active: current == 0,
        });
        if start > 1 {
            items.push(PageItem::Ellipsis);
        }
    }
    for &index in &window {
        items.push(PageItem::Page {
            index,
            active: index == page_index,
        });
    }
    if end < total - 1 {
        if end < total - 2 {
            items.push(PageItem::Ellipsis);
        }
        items.push(PageItem::Page {
            index: total_pages - 1,
            active: current == total - 1,
        });
    }
    items.push(PageItem::Next {
        enabled: total > 0 && current < total - 1,
    });

    PageLinks { window, items }
}

/// "Showing X to Y of Z results" bounds, 1-indexed. `(0, 0)` when empty.
pub fn showing_bounds(state: &PaginationState, total_rows: usize) -> (usize, usize) {
    if total_rows == 0 {
        return (0, 0);
    }
    let size = state.page_size().get();
    let start = state.page_index() * size + 1;
    let end = ((state.page_index() + 1) * size).min(total_rows);
    (start, end)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    fn labels(links: &PageLinks) -> Vec<String> {
        links.items.iter().map(PageItem::label).collect()
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(25, size(10)), 3);
        assert_eq!(total_pages(20, size(10)), 2);
        assert_eq!(total_pages(0, size(10)), 0);
        assert_eq!(total_pages(1, size(10)), 1);
    }

    #[test]
    fn navigation_is_bounded() {
        let mut state = PaginationState::new(size(10));
        let pages = total_pages(25, state.page_size());
        state.previous_page();
        assert_eq!(state.page_index(), 0);
        state.next_page(pages);
        state.next_page(pages);
        assert_eq!(state.page_index(), 2);
        state.next_page(pages);
        assert_eq!(state.page_index(), 2);
        state.set_page_index(99, pages);
        assert_eq!(state.page_index(), 2);
        state.set_page_index(1, pages);
        assert_eq!(state.page_index(), 1);
    }

    #[test]
    fn set_page_index_with_zero_pages_is_zero() {
        let mut state = PaginationState::new(size(10));
        state.set_page_index(4, 0);
        assert_eq!(state.page_index(), 0);
        assert!(!state.can_next_page(0));
        assert!(!state.can_previous_page());
    }

    #[test]
    fn page_range_slices_last_partial_page() {
        let mut state = PaginationState::new(size(10));
        state.set_page_index(2, 3);
        assert_eq!(state.page_range(25), 20..25);
    }

    #[test]
    fn window_at_start() {
        let links = page_links(0, 20);
        assert_eq!(links.window, vec![0, 1, 2, 3, 4]);
        assert_eq!(labels(&links), vec!["‹", "1", "2", "3", "4", "5", "...", "20", "›"]);
        assert_eq!(links.items[0], PageItem::Previous { enabled: false });
    }

    #[test]
    fn window_in_middle_pins_both_ends() {
        let links = page_links(9, 20);
        assert_eq!(links.window, vec![7, 8, 9, 10, 11]);
        assert_eq!(
            labels(&links),
            vec!["‹", "1", "...", "8", "9", "10", "11", "12", "...", "20", "›"]
        );
    }

    #[test]
    fn window_near_end_is_reanchored() {
        let links = page_links(19, 20);
        assert_eq!(links.window, vec![15, 16, 17, 18, 19]);
        assert_eq!(labels(&links), vec!["‹", "1", "...", "16", "17", "18", "19", "20", "›"]);
        assert_eq!(links.items.last(), Some(&PageItem::Next { enabled: false }));
    }

    #[test]
    fn no_ellipsis_when_adjacent_to_pinned_page() {
        let links = page_links(3, 7);
        assert_eq!(links.window, vec![1, 2, 3, 4, 5]);
        assert_eq!(labels(&links), vec!["‹", "1", "2", "3", "4", "5", "6", "7", "›"]);
    }

    #[test]
    fn few_pages_show_all() {
        let links = page_links(1, 3);
        assert_eq!(links.window, vec![0, 1, 2]);
        assert_eq!(labels(&links), vec!["‹", "1", "2", "3", "›"]);
        assert!(links
            .items
            .contains(&PageItem::Page { index: 1, active: true }));
    }

    #[test]
    fn zero_pages_disable_both_affordances() {
        let links = page_links(0, 0);
        assert!(links.window.is_empty());
        assert_eq!(
            links.items,
            vec![
                PageItem::Previous { enabled: false },
                PageItem::Next { enabled: false }
            ]
        );
    }

    #[test]
    fn showing_bounds_for_pages() {
        let mut state = PaginationState::new(size(10));
        assert_eq!(showing_bounds(&state, 25), (1, 10));
        state.set_page_index(2, 3);
        assert_eq!(showing_bounds(&state, 25), (21, 25));
        assert_eq!(showing_bounds(&PaginationState::new(size(10)), 0), (0, 0));
    }
}
