//! Events raised by a table and the listeners that receive them.

use log::debug;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

use crate::model::TableRow;
use crate::pipeline::ColumnId;
use crate::state::{ClearToken, SortDirection, TableState};

/// Consolidated selection/sort snapshot sent after a state change settles.
#[derive(Debug, Clone, PartialEq)]
pub struct TableUpdate<R: TableRow> {
    pub all_selected: bool,
    pub selected_count: usize,
    /// Selected rows in key order.
    pub selected_rows: Vec<R>,
    pub sort_column: Option<ColumnId>,
    pub sort_direction: SortDirection,
    pub clear_selected_rows: ClearToken,
}

impl<R: TableRow> TableUpdate<R> {
    /// Snapshot the notifiable part of a state.
    pub fn from_state(state: &TableState<R>) -> Self {
        Self {
            all_selected: state.all_selected(),
            selected_count: state.selected_count(),
            selected_rows: state.selected_rows().cloned().collect(),
            sort_column: state.sort_column().cloned(),
            sort_direction: state.sort_direction(),
            clear_selected_rows: state.selected_rows_flag(),
        }
    }

    /// Whether the notifiable part differs between two states.
    pub(crate) fn changed(before: &TableState<R>, after: &TableState<R>) -> bool {
        before.all_selected() != after.all_selected()
            || before.selected_count() != after.selected_count()
            || !before.selection().keys().eq(after.selection().keys())
            || before.sort_column() != after.sort_column()
            || before.sort_direction() != after.sort_direction()
            || before.selected_rows_flag() != after.selected_rows_flag()
    }
}

/// Something that happened to a table, in the order it happened.
#[derive(Debug, Clone, PartialEq)]
pub enum TableEvent<R: TableRow> {
    /// A row was clicked.
    RowClicked { row: R },
    /// The sort column or direction changed.
    SortChanged {
        column: ColumnId,
        direction: SortDirection,
    },
    /// The current page changed.
    PageChanged { page: usize, total_rows: usize },
    /// The page size changed; `page` is the page shown afterwards.
    RowsPerPageChanged { rows_per_page: usize, page: usize },
    /// A row was expanded or collapsed.
    RowExpandToggled { key: R::Key, expanded: bool },
    /// Selection or sort state settled to new values.
    TableUpdated(TableUpdate<R>),
}

impl<R: TableRow> TableEvent<R> {
    /// Short event name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            TableEvent::RowClicked { .. } => "row_clicked",
            TableEvent::SortChanged { .. } => "sort_changed",
            TableEvent::PageChanged { .. } => "page_changed",
            TableEvent::RowsPerPageChanged { .. } => "rows_per_page_changed",
            TableEvent::RowExpandToggled { .. } => "row_expand_toggled",
            TableEvent::TableUpdated(_) => "table_updated",
        }
    }
}

/// Receiver of table events.
///
/// Listeners are called synchronously from the operation that raised the
/// event. They must not block; hand work off instead (see
/// [`ChannelListener`]).
pub trait TableListener<R: TableRow> {
    fn on_event(&mut self, event: &TableEvent<R>);
}

impl<R: TableRow, F> TableListener<R> for F
where
    F: FnMut(&TableEvent<R>),
{
    fn on_event(&mut self, event: &TableEvent<R>) {
        self(event)
    }
}

/// Forwards events into an unbounded tokio channel.
///
/// Sending never waits, so async consumers can react to events (for example
/// by fetching the next server page) without stalling the table.
///
/// # Example
///
/// ```
/// use datatable::model::Record;
/// use datatable::table::ChannelListener;
///
/// let (listener, mut events) = ChannelListener::<Record>::channel();
/// drop(listener);
/// assert!(events.try_recv().is_err());
/// ```
#[derive(Debug)]
pub struct ChannelListener<R: TableRow> {
    sender: UnboundedSender<TableEvent<R>>,
}

impl<R: TableRow> ChannelListener<R> {
    /// Wrap an existing sender.
    pub fn new(sender: UnboundedSender<TableEvent<R>>) -> Self {
        Self { sender }
    }

    /// Create a listener together with the receiving end.
    pub fn channel() -> (Self, UnboundedReceiver<TableEvent<R>>) {
        let (sender, receiver) = unbounded_channel();
        (Self::new(sender), receiver)
    }
}

impl<R: TableRow> TableListener<R> for ChannelListener<R> {
    fn on_event(&mut self, event: &TableEvent<R>) {
        if self.sender.send(event.clone()).is_err() {
            debug!("table event '{}' dropped: receiver closed", event.name());
        }
    }
}
