//! Client-side pagination over an already-fetched collection.
//!
//! Page numbers are 1-based. A page number of zero, or one past the last
//! page, yields an empty slice; there is no wraparound.

/// Page size used by most list screens.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Page size used by the attendance/progress screen.
pub const ATTENDANCE_PAGE_SIZE: usize = 5;

/// Return the `page_number`-th window of `items`.
///
/// Equivalent to `items[(page_number - 1) * page_size .. page_number * page_size]`
/// clamped to the collection bounds.
pub fn page<T>(items: &[T], page_number: usize, page_size: usize) -> &[T] {
    if page_number == 0 || page_size == 0 {
        return &[];
    }
    let start = (page_number - 1).saturating_mul(page_size);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

/// Number of pages needed to show `len` items, i.e. `ceil(len / page_size)`.
pub fn total_pages(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    len.div_ceil(page_size)
}

/// The 1-based page numbers to render in a pager control.
pub fn page_numbers(len: usize, page_size: usize) -> std::ops::RangeInclusive<usize> {
    1..=total_pages(len, page_size)
}
