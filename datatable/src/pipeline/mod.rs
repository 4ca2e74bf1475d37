//! Data pipeline: column decoration, sorting and pagination.
//!
//! Every function here is pure. The table recomputes derived views by
//! running `sort` and then the page window over the current state.

mod column;
mod page;
mod sort;

pub use column::{Accessor, AccessorFn, Column, ColumnDef, ColumnId, Comparator, decorate_columns};
pub use page::{PaginationMode, number_of_pages, paginate, recalculate_page};
pub use sort::{compare_cells, compare_values, sort, sort_indices};
