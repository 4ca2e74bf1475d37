//! Table controller.
//!
//! [`DataTable`] owns one table instance: its configuration, columns, data,
//! [`TableState`] and listeners. User interactions come in as method calls,
//! each applying at most one state transition, and go out as
//! [`TableEvent`]s.

mod events;
mod view;

use std::collections::BTreeSet;
use std::sync::Arc;

use log::debug;

pub use events::{ChannelListener, TableEvent, TableListener, TableUpdate};
pub use view::{Body, PaginationView, TableView};

use crate::config::TableConfig;
use crate::model::TableRow;
use crate::pipeline::{
    Column, ColumnDef, ColumnId, Comparator, PaginationMode, decorate_columns, number_of_pages,
    recalculate_page, sort_indices,
};
use crate::state::{Action, ClearToken, TableState, transition};

use view::row_flag;

/// A table instance: state engine, data pipeline and event notification.
///
/// # Example
///
/// ```
/// use datatable::config::TableConfig;
/// use datatable::model::Record;
/// use datatable::pipeline::{ColumnDef, ColumnId};
/// use datatable::table::DataTable;
///
/// let data = vec![
///     Record::new("1").set("name", "Bravo"),
///     Record::new("2").set("name", "Alpha"),
/// ];
/// let mut table = DataTable::new(
///     vec![ColumnDef::field("Name", "name").sortable()],
///     data,
///     TableConfig::default(),
/// );
///
/// table.sort_by(&ColumnId::from("name"));
/// let view = table.view();
/// assert_eq!(view.rows[0].key(), "2");
/// ```
pub struct DataTable<R: TableRow> {
    config: TableConfig,
    columns: Vec<Column<R>>,
    data: Vec<R>,
    state: TableState<R>,
    /// Display order of `data`, recomputed when data, columns or sort change.
    order: Vec<usize>,
    sort_function: Option<Comparator<R>>,
    expanded: BTreeSet<R::Key>,
    listeners: Vec<Box<dyn TableListener<R>>>,
    /// A transition changed the notifiable state; a `TableUpdated` is owed.
    update_pending: bool,
    dirty: bool,
}

impl<R: TableRow> DataTable<R> {
    /// Create a table from raw columns, data and a configuration snapshot.
    pub fn new(columns: Vec<ColumnDef<R>>, data: Vec<R>, config: TableConfig) -> Self {
        let state = TableState::from_config(&config);
        let expanded = if config.expandable_rows {
            data.iter()
                .filter(|row| row_flag(config.default_expanded_field.as_deref(), *row))
                .map(TableRow::key)
                .collect()
        } else {
            BTreeSet::new()
        };

        let mut table = Self {
            config,
            columns: decorate_columns(&columns),
            data,
            state,
            order: Vec::new(),
            sort_function: None,
            expanded,
            listeners: Vec::new(),
            update_pending: false,
            dirty: true,
        };
        table.resort();
        table
    }

    /// Override comparison for every column with one ascending comparator.
    pub fn with_sort_function(
        mut self,
        cmp: impl Fn(&R, &R) -> std::cmp::Ordering + Send + Sync + 'static,
    ) -> Self {
        self.sort_function = Some(Arc::new(cmp));
        self.resort();
        self
    }

    /// Register a listener for table events.
    pub fn subscribe(&mut self, listener: impl TableListener<R> + 'static) {
        self.listeners.push(Box::new(listener));
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn columns(&self) -> &[Column<R>] {
        &self.columns
    }

    pub fn data(&self) -> &[R] {
        &self.data
    }

    pub fn state(&self) -> &TableState<R> {
        &self.state
    }

    /// Total rows for page math: server total when set, else the data length.
    pub fn row_count(&self) -> usize {
        self.config.row_count(self.data.len())
    }

    pub fn page_count(&self) -> usize {
        number_of_pages(self.row_count(), self.state.rows_per_page())
    }

    pub fn pagination_mode(&self) -> PaginationMode {
        match (self.config.pagination, self.config.pagination_server) {
            (false, _) => PaginationMode::Disabled,
            (true, false) => PaginationMode::Client,
            (true, true) => PaginationMode::Server,
        }
    }

    pub fn is_row_selected(&self, row: &R) -> bool {
        self.state.is_selected(row)
    }

    pub fn is_row_expanded(&self, row: &R) -> bool {
        self.expanded.contains(&row.key())
    }

    /// Check if the state changed since the last [`clear_dirty`](Self::clear_dirty).
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clear the dirty flag
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    /// All rows in display order, before paging.
    pub fn sorted_rows(&self) -> impl Iterator<Item = &R> {
        self.order.iter().map(|&i| &self.data[i])
    }

    // -------------------------------------------------------------------------
    // Inputs
    // -------------------------------------------------------------------------

    /// Replace the dataset.
    ///
    /// Selection does not survive a dataset replacement: a non-empty
    /// selection is cleared (without changing the clear token). Expansion is
    /// kept for rows whose key is still present; rows seen for the first
    /// time start expanded when their default-expanded field is truthy.
    pub fn set_data(&mut self, data: Vec<R>) {
        if self.config.expandable_rows {
            let previous: BTreeSet<R::Key> = self.data.iter().map(TableRow::key).collect();
            let default_field = self.config.default_expanded_field.as_deref();
            let expanded = data
                .iter()
                .filter(|row| {
                    let key = row.key();
                    if previous.contains(&key) {
                        self.expanded.contains(&key)
                    } else {
                        row_flag(default_field, *row)
                    }
                })
                .map(TableRow::key)
                .collect();
            self.expanded = expanded;
        }

        self.data = data;
        debug!("table data replaced: {} rows", self.data.len());

        if !self.state.selection().is_empty() {
            let flag = self.state.selected_rows_flag();
            self.commit(transition(&self.state, Action::ClearSelectedRows { flag }));
        }
        self.resort();
        self.dirty = true;
        self.settle();
    }

    /// Replace the column definitions.
    pub fn set_columns(&mut self, columns: Vec<ColumnDef<R>>) {
        self.columns = decorate_columns(&columns);
        self.resort();
        self.dirty = true;
    }

    /// Set the server-reported total row count.
    pub fn set_total_rows(&mut self, total: Option<usize>) {
        self.config.pagination_total_rows = total;
        self.dirty = true;
    }

    /// Toggle the loading indicator.
    pub fn set_progress_pending(&mut self, pending: bool) {
        self.config.progress_pending = pending;
        self.dirty = true;
    }

    // -------------------------------------------------------------------------
    // Interactions
    // -------------------------------------------------------------------------

    /// Header checkbox: select every row, or deselect all.
    pub fn select_all(&mut self) {
        let next = transition(&self.state, Action::SelectAll { data: &self.data });
        self.commit(next);
        self.settle();
    }

    /// Row checkbox: toggle one row.
    ///
    /// Rows whose key is not in the current dataset are ignored.
    pub fn toggle_row_selected(&mut self, row: &R) {
        let key = row.key();
        if !self.data.iter().any(|r| r.key() == key) {
            debug!("row {:?} not in dataset; selection unchanged", key);
            return;
        }

        let next = transition(
            &self.state,
            Action::RowSelected {
                data: &self.data,
                row,
            },
        );
        self.commit(next);
        self.settle();
    }

    /// Report a click on a row.
    pub fn row_clicked(&mut self, row: &R) {
        self.emit(TableEvent::RowClicked { row: row.clone() });
    }

    /// Column header click.
    ///
    /// Non-sortable and unknown columns are ignored. Clicking the active
    /// column flips the direction; clicking another column keeps it.
    /// Returns whether the sort changed.
    pub fn sort_by(&mut self, column_id: &ColumnId) -> bool {
        let sortable = self
            .columns
            .iter()
            .any(|c| &c.id == column_id && c.sortable);
        if !sortable {
            debug!("sort on '{}' ignored: not a sortable column", column_id);
            return false;
        }

        let current = self.state.sort_direction();
        let direction = if self.state.sort_column() == Some(column_id) {
            current.toggled()
        } else {
            current
        };

        self.commit(transition(
            &self.state,
            Action::SortChange {
                column: Some(column_id.clone()),
                direction,
            },
        ));
        self.resort();
        self.emit(TableEvent::SortChanged {
            column: column_id.clone(),
            direction,
        });
        self.settle();
        true
    }

    /// Move to a page. The page is not validated.
    pub fn change_page(&mut self, page: usize) {
        self.commit(transition(&self.state, Action::ChangePage { page }));
        let total_rows = self.row_count();
        self.emit(TableEvent::PageChanged { page, total_rows });
        self.settle();
    }

    /// Change the page size.
    ///
    /// With client-side pagination the current page is clamped to the new
    /// page count and a `PageChanged` is raised. With server-side pagination
    /// the page is clamped against the server total when one is known and
    /// left alone otherwise; the server learns the page to fetch from
    /// `RowsPerPageChanged`. Returns the page shown afterwards.
    pub fn change_rows_per_page(&mut self, rows_per_page: usize) -> usize {
        let client = !self.config.pagination_server;
        let server_total = self.config.pagination_total_rows.filter(|&total| total > 0);
        let page = if client || server_total.is_some() {
            recalculate_page(self.state.current_page(), self.row_count(), rows_per_page)
        } else {
            self.state.current_page()
        };

        self.commit(transition(
            &self.state,
            Action::ChangeRowsPerPage {
                rows_per_page,
                page,
            },
        ));

        if client {
            let total_rows = self.row_count();
            self.emit(TableEvent::PageChanged { page, total_rows });
        }
        self.emit(TableEvent::RowsPerPageChanged {
            rows_per_page,
            page,
        });
        self.settle();
        page
    }

    /// Feed the externally owned clear token.
    ///
    /// Clears the selection when `token` differs from the last token seen,
    /// at most once per distinct token. Calling again with the same token
    /// does nothing. Returns whether a clear happened.
    pub fn sync_clear_token(&mut self, token: ClearToken) -> bool {
        if token == self.state.selected_rows_flag() {
            return false;
        }
        self.commit(transition(
            &self.state,
            Action::ClearSelectedRows { flag: token },
        ));
        self.settle();
        true
    }

    /// Clear the selection now. The stored clear token is kept.
    pub fn clear_selection(&mut self) {
        let flag = self.state.selected_rows_flag();
        self.commit(transition(&self.state, Action::ClearSelectedRows { flag }));
        self.settle();
    }

    /// Expand or collapse a row.
    ///
    /// Returns the new expanded state, or `None` when expansion is off for
    /// the table or disabled for this row.
    pub fn toggle_row_expanded(&mut self, row: &R) -> Option<bool> {
        if !self.config.expandable_rows
            || row_flag(self.config.expandable_disabled_field.as_deref(), row)
        {
            return None;
        }

        let key = row.key();
        let expanded = if self.expanded.remove(&key) {
            false
        } else {
            self.expanded.insert(key.clone());
            true
        };
        self.dirty = true;
        self.emit(TableEvent::RowExpandToggled { key, expanded });
        Some(expanded)
    }

    // -------------------------------------------------------------------------
    // Output
    // -------------------------------------------------------------------------

    /// Build the render view for the current state.
    pub fn view(&self) -> TableView<'_, R> {
        let body = if self.config.progress_pending {
            Body::Progress
        } else if self.data.is_empty() {
            Body::Empty
        } else {
            Body::Rows
        };

        let rows = if body == Body::Rows {
            let sorted: Vec<&R> = self.sorted_rows().collect();
            self.pagination_mode()
                .window(
                    &sorted,
                    self.state.current_page(),
                    self.state.rows_per_page(),
                )
                .to_vec()
        } else {
            Vec::new()
        };

        let pagination = (self.config.pagination && body == Body::Rows).then(|| PaginationView {
            current_page: self.state.current_page(),
            rows_per_page: self.state.rows_per_page(),
            row_count: self.row_count(),
            page_count: self.page_count(),
            rows_per_page_options: self.config.pagination_rows_per_page_options.clone(),
        });

        TableView {
            columns: &self.columns,
            rows,
            body,
            pagination,
            selectable: self.config.selectable_rows,
            expandable: self.config.expandable_rows,
            state: &self.state,
            expanded: &self.expanded,
            config: &self.config,
        }
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    fn commit(&mut self, next: TableState<R>) {
        if TableUpdate::changed(&self.state, &next) {
            self.update_pending = true;
        }
        self.state = next;
        self.dirty = true;
    }

    /// Emit the owed `TableUpdated`, if any.
    fn settle(&mut self) {
        if std::mem::take(&mut self.update_pending) {
            let update = TableUpdate::from_state(&self.state);
            self.emit(TableEvent::TableUpdated(update));
        }
    }

    fn emit(&mut self, event: TableEvent<R>) {
        debug!("table event {}", event.name());
        for listener in &mut self.listeners {
            listener.on_event(&event);
        }
    }

    fn resort(&mut self) {
        self.order = sort_indices(
            &self.data,
            &self.columns,
            self.state.sort_column(),
            self.state.sort_direction(),
            self.sort_function.as_ref(),
        );
    }
}

impl<R: TableRow> std::fmt::Debug for DataTable<R>
where
    R: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataTable")
            .field("config", &self.config)
            .field("columns", &self.columns)
            .field("rows", &self.data.len())
            .field("state", &self.state)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
