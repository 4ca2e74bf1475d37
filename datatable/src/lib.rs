//! Table state engine
//!
//! Selection, sorting, pagination and row expansion for tabular data,
//! independent of how the table is drawn.
//!
//! - [`state`]: the pure reducer over [`TableState`](state::TableState)
//! - [`pipeline`]: column decoration, stable sorting and page slicing
//! - [`table`]: the [`DataTable`](table::DataTable) controller that wires
//!   user interactions to the reducer and raises events
//!
//! ```
//! use datatable::prelude::*;
//!
//! let data = (1..=5)
//!     .map(|i| Record::new(i.to_string()).set("n", i))
//!     .collect::<Vec<_>>();
//! let config = TableConfig::default().with_pagination(true).with_per_page(2);
//! let mut table = DataTable::new(vec![ColumnDef::field("N", "n").sortable()], data, config);
//!
//! table.change_page(3);
//! assert_eq!(table.view().rows.len(), 1);
//!
//! let page = table.change_rows_per_page(3);
//! assert_eq!(page, 2);
//! ```

pub mod config;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod prelude;
pub mod state;
pub mod table;

pub use error::{Result, TableError};
