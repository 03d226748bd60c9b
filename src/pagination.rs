//! Page navigation derived from a total row count.

use serde::Serialize;

use crate::domain::types::{PageNumber, PageSize};

/// Pages always shown at each end of the window.
const EDGE_PAGES: usize = 2;
/// Pages shown before the current one.
const PAGES_BEFORE_CURRENT: usize = 2;
/// Pages shown after the current one.
const PAGES_AFTER_CURRENT: usize = 4;

/// Number of pages needed to show `total` rows.
pub fn total_pages(total: u64, size: PageSize) -> usize {
    let size = size.get() as u64;
    usize::try_from(total.div_ceil(size)).unwrap_or(usize::MAX)
}

/// Navigation state of a listing, ready to render.
///
/// `pages` holds the page links around the current page, with `None` where a
/// run of pages is elided. For 20 pages with page 10 current that is
/// `1 2 … 8 9 10 11 12 13 14 … 19 20`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageLinks {
    pub page: usize,
    pub total_pages: usize,
    pub pages: Vec<Option<usize>>,
}

impl PageLinks {
    pub fn new(current: PageNumber, size: PageSize, total: u64) -> Self {
        let mut links = Self {
            page: current.get(),
            total_pages: total_pages(total, size),
            pages: Vec::new(),
        };

        let mut pages = Vec::new();
        let mut previous = 0;
        for page in (1..=links.total_pages).filter(|&page| links.is_linked(page)) {
            if previous > 0 && page > previous + 1 {
                pages.push(None);
            }
            pages.push(Some(page));
            previous = page;
        }

        links.pages = pages;
        links
    }

    /// Whether `page` gets its own link: it sits at either end of the listing
    /// or close to the current page.
    fn is_linked(&self, page: usize) -> bool {
        let near_start = page <= EDGE_PAGES;
        let near_end = page > self.total_pages.saturating_sub(EDGE_PAGES);
        let near_current = page + PAGES_BEFORE_CURRENT >= self.page
            && page <= self.page.saturating_add(PAGES_AFTER_CURRENT);
        near_start || near_end || near_current
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn links(current: usize, total_pages: u64) -> Vec<Option<usize>> {
        PageLinks::new(
            PageNumber::new(current).unwrap(),
            PageSize::new(10).unwrap(),
            total_pages * 10,
        )
        .pages
    }

    #[test]
    fn counts_pages() {
        let size = PageSize::new(20).unwrap();
        assert_eq!(total_pages(0, size), 0);
        assert_eq!(total_pages(20, size), 1);
        assert_eq!(total_pages(57, size), 3);
    }

    #[test]
    fn short_listing_has_no_gaps() {
        assert_eq!(links(2, 3), vec![Some(1), Some(2), Some(3)]);
        assert!(links(1, 0).is_empty());
    }

    #[test]
    fn long_listing_elides_both_sides() {
        assert_eq!(
            links(10, 20),
            vec![
                Some(1),
                Some(2),
                None,
                Some(8),
                Some(9),
                Some(10),
                Some(11),
                Some(12),
                Some(13),
                Some(14),
                None,
                Some(19),
                Some(20),
            ]
        );
    }

    #[test]
    fn window_near_the_edges() {
        assert_eq!(
            links(1, 20),
            vec![
                Some(1),
                Some(2),
                Some(3),
                Some(4),
                Some(5),
                None,
                Some(19),
                Some(20),
            ]
        );
        assert_eq!(
            links(20, 20),
            vec![Some(1), Some(2), None, Some(18), Some(19), Some(20)]
        );
    }

    #[test]
    fn single_hidden_page_is_still_elided() {
        assert_eq!(
            links(13, 20),
            vec![
                Some(1),
                Some(2),
                None,
                Some(11),
                Some(12),
                Some(13),
                Some(14),
                Some(15),
                Some(16),
                Some(17),
                None,
                Some(19),
                Some(20),
            ]
        );
    }

    #[test]
    fn current_page_past_the_end_keeps_edges() {
        assert_eq!(links(5, 3), vec![Some(1), Some(2), Some(3)]);
    }

    #[test]
    fn links_report_neighbours() {
        let links = PageLinks::new(
            PageNumber::new(3).unwrap(),
            PageSize::new(20).unwrap(),
            57,
        );
        assert_eq!(links.total_pages, 3);
        assert!(links.has_previous());
        assert!(!links.has_next());
    }
}
