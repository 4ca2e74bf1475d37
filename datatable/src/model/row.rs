//! TableRow trait

use std::fmt::Debug;

use super::Value;

/// Trait for rows that can be held by a [`DataTable`](crate::table::DataTable).
///
/// Every row must expose an explicit identity. Selection and expansion are
/// keyed by [`TableRow::key`], never by structural equality of the row, so
/// a dataset refreshed with new instances of the same logical rows keeps
/// matching selections.
///
/// # Example
///
/// ```
/// use datatable::model::{TableRow, Value};
///
/// #[derive(Clone)]
/// struct User {
///     id: u32,
///     name: String,
/// }
///
/// impl TableRow for User {
///     type Key = u32;
///
///     fn key(&self) -> u32 {
///         self.id
///     }
///
///     fn field(&self, path: &str) -> Value {
///         match path {
///             "name" => Value::from(self.name.as_str()),
///             "id" => Value::from(self.id),
///             _ => Value::Null,
///         }
///     }
/// }
/// ```
pub trait TableRow: Clone {
    /// The key type used to identify this row.
    type Key: Clone + Ord + Debug;

    /// Return a unique key for this row.
    fn key(&self) -> Self::Key;

    /// Resolve a field path to a cell value.
    ///
    /// Used by field-path column accessors and by the row flags in
    /// [`TableConfig`](crate::config::TableConfig). Rows that only use
    /// function accessors can rely on the default.
    fn field(&self, _path: &str) -> Value {
        Value::Null
    }
}
