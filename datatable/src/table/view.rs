//! Render-ready view of a table.

use std::collections::BTreeSet;

use crate::config::TableConfig;
use crate::model::{TableRow, Value};
use crate::pipeline::{Column, ColumnId};
use crate::state::{SortDirection, TableState};

/// What the table body should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Body {
    /// Data is loading.
    Progress,
    /// There is no data; show the empty-state component.
    Empty,
    /// Show [`TableView::rows`].
    Rows,
}

/// Inputs for a pagination widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationView {
    pub current_page: usize,
    pub rows_per_page: usize,
    /// Total rows across all pages (server total when provided).
    pub row_count: usize,
    pub page_count: usize,
    pub rows_per_page_options: Vec<usize>,
}

/// Everything a rendering layer needs for one frame.
///
/// Built by [`DataTable::view`](super::DataTable::view). Borrowing keeps the
/// view in sync with the table it came from.
#[derive(Debug)]
pub struct TableView<'a, R: TableRow> {
    pub columns: &'a [Column<R>],
    /// Rows to render, already sorted and paged.
    pub rows: Vec<&'a R>,
    pub body: Body,
    /// Present only when pagination is enabled, not pending, and there is data.
    pub pagination: Option<PaginationView>,
    pub selectable: bool,
    pub expandable: bool,
    pub(super) state: &'a TableState<R>,
    pub(super) expanded: &'a BTreeSet<R::Key>,
    pub(super) config: &'a TableConfig,
}

impl<R: TableRow> TableView<'_, R> {
    /// Header checkbox state.
    pub fn all_selected(&self) -> bool {
        self.state.all_selected()
    }

    /// Header checkbox shows a partial mark.
    pub fn indeterminate(&self) -> bool {
        self.state.is_indeterminate()
    }

    pub fn selected_count(&self) -> usize {
        self.state.selected_count()
    }

    pub fn sort_column(&self) -> Option<&ColumnId> {
        self.state.sort_column()
    }

    pub fn sort_direction(&self) -> SortDirection {
        self.state.sort_direction()
    }

    pub fn is_row_selected(&self, row: &R) -> bool {
        self.state.is_selected(row)
    }

    pub fn is_row_expanded(&self, row: &R) -> bool {
        self.expanded.contains(&row.key())
    }

    /// Whether a row's expander is disabled by `expandable_disabled_field`.
    pub fn is_row_expand_disabled(&self, row: &R) -> bool {
        row_flag(self.config.expandable_disabled_field.as_deref(), row)
    }

    /// Rendering key for a row: the `key_field` value when it is a usable
    /// scalar, otherwise the row's position in [`TableView::rows`].
    pub fn row_key_hint(&self, row: &R, index: usize) -> String {
        self.config
            .key_field
            .as_deref()
            .and_then(|field| scalar_key(&row.field(field)))
            .unwrap_or_else(|| index.to_string())
    }
}

/// Evaluate an optional row field for truthiness.
pub(super) fn row_flag<R: TableRow>(field: Option<&str>, row: &R) -> bool {
    field.is_some_and(|path| row.field(path).is_truthy())
}

fn scalar_key(value: &Value) -> Option<String> {
    if !value.is_truthy() {
        return None;
    }
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Int(i) => Some(i.to_string()),
        Value::Float(f) => Some(f.to_string()),
        Value::Decimal(d) => Some(d.to_string()),
        Value::Guid(g) => Some(g.to_string()),
        Value::DateTime(dt) => Some(dt.to_rfc3339()),
        _ => None,
    }
}
