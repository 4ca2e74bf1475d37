//! Table state engine.
//!
//! [`TableState`] is the single source of truth for selection, sort and page
//! position. It only changes through [`transition`] (or its in-place twin
//! [`TableState::apply`]), which is pure and total over [`Action`].

mod action;
mod selection;
mod types;

use log::debug;

pub use action::{Action, ActionKind};
pub use selection::Selection;
pub use types::{ClearToken, SortDirection};

use crate::config::TableConfig;
use crate::model::TableRow;
use crate::pipeline::ColumnId;

/// Engine-owned view state of one table instance.
///
/// `selected_count` always equals the number of selected rows, and both only
/// change through `SelectAll`, `RowSelected` and `ClearSelectedRows`.
#[derive(Debug, Clone, PartialEq)]
pub struct TableState<R: TableRow> {
    all_selected: bool,
    selected_count: usize,
    selected_rows: Selection<R::Key, R>,
    sort_column: Option<ColumnId>,
    sort_direction: SortDirection,
    selected_rows_flag: ClearToken,
    current_page: usize,
    rows_per_page: usize,
}

impl<R: TableRow> TableState<R> {
    /// Create a state with an empty selection.
    pub fn new(
        sort_column: Option<ColumnId>,
        sort_direction: SortDirection,
        current_page: usize,
        rows_per_page: usize,
    ) -> Self {
        Self {
            all_selected: false,
            selected_count: 0,
            selected_rows: Selection::new(),
            sort_column,
            sort_direction,
            selected_rows_flag: ClearToken::default(),
            current_page,
            rows_per_page,
        }
    }

    /// Seed a state from a configuration snapshot.
    pub fn from_config(config: &TableConfig) -> Self {
        Self::new(
            config.default_sort_field.clone().map(ColumnId::from),
            SortDirection::from_asc(config.default_sort_asc),
            config.pagination_default_page,
            config.pagination_per_page,
        )
        .with_clear_token(config.clear_selected_rows)
    }

    /// Set the last-seen clear token.
    pub fn with_clear_token(mut self, flag: ClearToken) -> Self {
        self.selected_rows_flag = flag;
        self
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn all_selected(&self) -> bool {
        self.all_selected
    }

    pub fn selected_count(&self) -> usize {
        self.selected_count
    }

    /// The selected rows, in key order.
    pub fn selected_rows(&self) -> impl Iterator<Item = &R> {
        self.selected_rows.rows()
    }

    pub fn selection(&self) -> &Selection<R::Key, R> {
        &self.selected_rows
    }

    /// Check whether a row is selected (by key).
    pub fn is_selected(&self, row: &R) -> bool {
        self.selected_rows.contains(&row.key())
    }

    /// Some rows selected, but not all of them.
    pub fn is_indeterminate(&self) -> bool {
        self.selected_count > 0 && !self.all_selected
    }

    pub fn sort_column(&self) -> Option<&ColumnId> {
        self.sort_column.as_ref()
    }

    pub fn sort_direction(&self) -> SortDirection {
        self.sort_direction
    }

    pub fn selected_rows_flag(&self) -> ClearToken {
        self.selected_rows_flag
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn rows_per_page(&self) -> usize {
        self.rows_per_page
    }

    // -------------------------------------------------------------------------
    // Transitions
    // -------------------------------------------------------------------------

    /// Apply an action in place.
    pub fn apply(&mut self, action: Action<'_, R>) {
        debug!("table action {}", action.kind());

        match action {
            Action::SelectAll { data } => {
                self.all_selected = !self.all_selected;
                self.selected_rows = if self.all_selected {
                    data.iter().map(|row| (row.key(), row.clone())).collect()
                } else {
                    Selection::new()
                };
            }

            Action::RowSelected { data, row } => {
                let key = row.key();
                if self.selected_rows.remove(&key).is_some() {
                    self.all_selected = false;
                } else {
                    self.selected_rows.insert(key, row.clone());
                    self.all_selected = !data.is_empty()
                        && data
                            .iter()
                            .all(|r| self.selected_rows.contains(&r.key()));
                }
            }

            Action::SortChange { column, direction } => {
                self.sort_column = column;
                self.sort_direction = direction;
            }

            Action::ChangePage { page } => {
                self.current_page = page;
            }

            Action::ChangeRowsPerPage {
                rows_per_page,
                page,
            } => {
                self.rows_per_page = rows_per_page;
                self.current_page = page;
            }

            Action::ClearSelectedRows { flag } => {
                self.all_selected = false;
                self.selected_rows.clear();
                self.selected_rows_flag = flag;
            }
        }

        self.selected_count = self.selected_rows.len();
    }
}

/// Compute the next state for an action, leaving the input untouched.
///
/// # Example
///
/// ```
/// use datatable::model::Record;
/// use datatable::state::{transition, Action, SortDirection, TableState};
///
/// let data = vec![Record::new("1"), Record::new("2")];
/// let state = TableState::<Record>::new(None, SortDirection::Asc, 1, 10);
///
/// let next = transition(&state, Action::SelectAll { data: &data });
/// assert!(next.all_selected());
/// assert_eq!(next.selected_count(), 2);
/// assert_eq!(state.selected_count(), 0);
/// ```
pub fn transition<R: TableRow>(state: &TableState<R>, action: Action<'_, R>) -> TableState<R> {
    let mut next = state.clone();
    next.apply(action);
    next
}
