//! Fixed-size pages over a filtered view.

use serde::Serialize;

/// Pagination metadata for one page of a filtered view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    /// Effective 1-based page after clamping.
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub total_items: usize,
    /// 1-based position of the first item on this page, 0 when empty.
    pub first_item: usize,
    /// 1-based position of the last item on this page, 0 when empty.
    pub last_item: usize,
    pub has_previous: bool,
    pub has_next: bool,
}

#[derive(Debug)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub info: PageInfo,
}

/// Number of pages needed for `total_items`; never less than one.
pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    total_items.div_ceil(page_size.max(1)).max(1)
}

/// Slice `items` into the page `requested`, clamped into `1..=total_pages`.
///
/// A `page_size` of zero is treated as one; [`crate::Table::new`] rejects
/// such specs up front.
pub fn paginate<T>(items: &[T], page_size: usize, requested: usize) -> Page<'_, T> {
    let page_size = page_size.max(1);
    let total_items = items.len();
    let total_pages = total_pages(total_items, page_size);
    let page = requested.clamp(1, total_pages);

    let start = ((page - 1) * page_size).min(total_items);
    let end = (start + page_size).min(total_items);
    let slice = &items[start..end];

    let (first_item, last_item) = if slice.is_empty() { (0, 0) } else { (start + 1, end) };

    Page {
        items: slice,
        info: PageInfo {
            page,
            page_size,
            total_pages,
            total_items,
            first_item,
            last_item,
            has_previous: page > 1,
            has_next: page < total_pages,
        },
    }
}

/// Read a `page` query value. Missing, non-numeric and non-positive input
/// all mean page 1; the upper bound is clamped later by [`paginate`].
pub fn parse_page(raw: Option<&str>) -> usize {
    raw.and_then(|s| s.trim().parse::<usize>().ok())
        .filter(|p| *p > 0)
        .unwrap_or(1)
}
