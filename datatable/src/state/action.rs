//! Actions accepted by the state engine.

use std::str::FromStr;

use crate::error::TableError;
use crate::model::TableRow;
use crate::pipeline::ColumnId;

use super::{ClearToken, SortDirection};

/// A state transition request.
///
/// Actions borrow the dataset snapshot they need, so dispatching never
/// copies the data. The set is closed: [`transition`](super::transition)
/// handles every variant.
#[derive(Debug)]
pub enum Action<'a, R: TableRow> {
    /// Toggle "all rows selected" against the given dataset.
    SelectAll { data: &'a [R] },
    /// Toggle selection of a single row.
    RowSelected { data: &'a [R], row: &'a R },
    /// Replace the sort column and direction verbatim.
    SortChange {
        column: Option<ColumnId>,
        direction: SortDirection,
    },
    /// Replace the current page.
    ChangePage { page: usize },
    /// Replace the page size together with an already clamped page.
    ChangeRowsPerPage { rows_per_page: usize, page: usize },
    /// Drop the selection and remember the new clear token.
    ClearSelectedRows { flag: ClearToken },
}

impl<R: TableRow> Action<'_, R> {
    /// Returns the tag of this action.
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::SelectAll { .. } => ActionKind::SelectAll,
            Action::RowSelected { .. } => ActionKind::RowSelected,
            Action::SortChange { .. } => ActionKind::SortChange,
            Action::ChangePage { .. } => ActionKind::ChangePage,
            Action::ChangeRowsPerPage { .. } => ActionKind::ChangeRowsPerPage,
            Action::ClearSelectedRows { .. } => ActionKind::ClearSelectedRows,
        }
    }
}

/// Action tags, as used in logs and by event bridges that name actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    SelectAll,
    RowSelected,
    SortChange,
    ChangePage,
    ChangeRowsPerPage,
    ClearSelectedRows,
}

impl ActionKind {
    /// All tags, in declaration order.
    pub const ALL: [ActionKind; 6] = [
        ActionKind::SelectAll,
        ActionKind::RowSelected,
        ActionKind::SortChange,
        ActionKind::ChangePage,
        ActionKind::ChangeRowsPerPage,
        ActionKind::ClearSelectedRows,
    ];

    /// Returns the tag string.
    pub fn as_str(self) -> &'static str {
        match self {
            ActionKind::SelectAll => "SELECT_ALL",
            ActionKind::RowSelected => "ROW_SELECTED",
            ActionKind::SortChange => "SORT_CHANGE",
            ActionKind::ChangePage => "CHANGE_PAGE",
            ActionKind::ChangeRowsPerPage => "CHANGE_ROWS_PER_PAGE",
            ActionKind::ClearSelectedRows => "CLEAR_SELECTED_ROWS",
        }
    }

    /// Whether this action may change the selection.
    pub fn touches_selection(self) -> bool {
        matches!(
            self,
            ActionKind::SelectAll | ActionKind::RowSelected | ActionKind::ClearSelectedRows
        )
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionKind {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActionKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| TableError::UnknownAction(s.to_string()))
    }
}
