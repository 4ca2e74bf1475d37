//! Common imports for working with tables.

pub use crate::config::TableConfig;
pub use crate::error::{Result, TableError};
pub use crate::model::{Record, TableRow, Value};
pub use crate::pipeline::{ColumnDef, ColumnId};
pub use crate::state::{Action, ClearToken, SortDirection, TableState, transition};
pub use crate::table::{Body, ChannelListener, DataTable, TableEvent, TableListener, TableView};
