//! Page math and slicing.

use serde::Deserialize;
use serde::Serialize;

/// Who owns the page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaginationMode {
    /// No pagination: every row is shown.
    #[default]
    Disabled,
    /// The table slices the sorted rows into pages.
    Client,
    /// The caller already fetched exactly one page; rows pass through.
    Server,
}

impl PaginationMode {
    /// Select the rows to display for this mode.
    pub fn window<T>(self, sorted: &[T], current_page: usize, rows_per_page: usize) -> &[T] {
        match self {
            PaginationMode::Client => paginate(sorted, current_page, rows_per_page),
            PaginationMode::Disabled | PaginationMode::Server => sorted,
        }
    }
}

/// Number of pages needed for `row_count` rows, never less than 1.
///
/// A zero page size degenerates to a single page.
pub fn number_of_pages(row_count: usize, rows_per_page: usize) -> usize {
    if rows_per_page == 0 {
        return 1;
    }
    row_count.div_ceil(rows_per_page).max(1)
}

/// Return the half-open window `[(page - 1) * size, page * size)`.
///
/// Pages past the end, page 0 and a zero page size yield an empty slice.
pub fn paginate<T>(sorted: &[T], current_page: usize, rows_per_page: usize) -> &[T] {
    if current_page == 0 || rows_per_page == 0 {
        return &[];
    }
    let start = (current_page - 1).saturating_mul(rows_per_page);
    if start >= sorted.len() {
        return &[];
    }
    let end = start.saturating_add(rows_per_page).min(sorted.len());
    &sorted[start..end]
}

/// Page to show after the page size changes.
///
/// Keeps the current page when it still exists, otherwise moves to the last
/// page. The result is always within `1..=number_of_pages`.
pub fn recalculate_page(current_page: usize, total_rows: usize, new_rows_per_page: usize) -> usize {
    current_page.clamp(1, number_of_pages(total_rows, new_rows_per_page))
}
