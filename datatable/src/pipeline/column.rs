//! Column definitions and decoration.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;

use crate::model::{TableRow, Value};

/// Stable identifier of a decorated column.
///
/// Sort state refers to columns by id, so the id of a logical column must not
/// change when the column list is decorated again.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnId(String);

impl ColumnId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ColumnId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ColumnId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ColumnId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Row comparator defining ascending order.
pub type Comparator<R> = Arc<dyn Fn(&R, &R) -> Ordering + Send + Sync>;

/// Function accessor resolving a cell value from a row.
pub type AccessorFn<R> = Arc<dyn Fn(&R) -> Value + Send + Sync>;

/// How a column reads its value from a row.
pub enum Accessor<R> {
    /// A `.`-delimited field path resolved through [`TableRow::field`].
    Field(String),
    /// An arbitrary function of the row.
    Func(AccessorFn<R>),
}

impl<R: TableRow> Accessor<R> {
    /// Resolve the cell value for a row.
    pub fn resolve(&self, row: &R) -> Value {
        match self {
            Accessor::Field(path) => row.field(path),
            Accessor::Func(f) => f(row),
        }
    }
}

impl<R> Accessor<R> {
    /// The field path, for field accessors.
    pub fn path(&self) -> Option<&str> {
        match self {
            Accessor::Field(path) => Some(path),
            Accessor::Func(_) => None,
        }
    }
}

impl<R> Clone for Accessor<R> {
    fn clone(&self) -> Self {
        match self {
            Accessor::Field(path) => Accessor::Field(path.clone()),
            Accessor::Func(f) => Accessor::Func(Arc::clone(f)),
        }
    }
}

impl<R> std::fmt::Debug for Accessor<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Accessor::Field(path) => f.debug_tuple("Field").field(path).finish(),
            Accessor::Func(_) => f.write_str("Func(..)"),
        }
    }
}

/// Raw column configuration, as supplied by the caller.
///
/// # Examples
///
/// ```
/// use datatable::model::{Record, Value};
/// use datatable::pipeline::ColumnDef;
///
/// let columns: Vec<ColumnDef<Record>> = vec![
///     ColumnDef::field("Name", "name").sortable(),
///     ColumnDef::field("City", "address.city").sortable(),
///     ColumnDef::func("Initial", |r: &Record| {
///         let initial = r.get_path("name").as_str().and_then(|s| s.chars().next());
///         Value::from(initial.map(String::from))
///     })
///     .id("initial"),
/// ];
/// assert_eq!(columns.len(), 3);
/// ```
pub struct ColumnDef<R> {
    id: Option<String>,
    name: String,
    accessor: Accessor<R>,
    sortable: bool,
    comparator: Option<Comparator<R>>,
}

impl<R> ColumnDef<R> {
    /// A column reading a field path.
    pub fn field(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            accessor: Accessor::Field(path.into()),
            sortable: false,
            comparator: None,
        }
    }

    /// A column computed by a function of the row.
    pub fn func(name: impl Into<String>, f: impl Fn(&R) -> Value + Send + Sync + 'static) -> Self {
        Self {
            id: None,
            name: name.into(),
            accessor: Accessor::Func(Arc::new(f)),
            sortable: false,
            comparator: None,
        }
    }

    /// Set an explicit id.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Make the column sortable.
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Use a custom comparator (ascending order) when sorting by this column.
    pub fn comparator(mut self, cmp: impl Fn(&R, &R) -> Ordering + Send + Sync + 'static) -> Self {
        self.comparator = Some(Arc::new(cmp));
        self
    }
}

impl<R> Clone for ColumnDef<R> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            name: self.name.clone(),
            accessor: self.accessor.clone(),
            sortable: self.sortable,
            comparator: self.comparator.clone(),
        }
    }
}

/// A decorated column: stable id plus a uniform accessor.
pub struct Column<R> {
    pub id: ColumnId,
    pub name: String,
    pub accessor: Accessor<R>,
    pub sortable: bool,
    pub comparator: Option<Comparator<R>>,
}

impl<R: TableRow> Column<R> {
    /// Resolve this column's value for a row.
    pub fn value(&self, row: &R) -> Value {
        self.accessor.resolve(row)
    }
}

impl<R> Clone for Column<R> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            name: self.name.clone(),
            accessor: self.accessor.clone(),
            sortable: self.sortable,
            comparator: self.comparator.clone(),
        }
    }
}

impl<R> std::fmt::Debug for Column<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Column")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("accessor", &self.accessor)
            .field("sortable", &self.sortable)
            .field("comparator", &self.comparator.as_ref().map(|_| ".."))
            .finish()
    }
}

/// Decorate raw column definitions with stable ids.
///
/// The id is the explicit id when given, otherwise the field path, otherwise
/// `col-{position}` (1-based). A repeated id gets `#{position}` appended.
/// Identical input always yields identical ids.
pub fn decorate_columns<R>(defs: &[ColumnDef<R>]) -> Vec<Column<R>> {
    let mut seen = HashSet::new();

    defs.iter()
        .enumerate()
        .map(|(index, def)| {
            let position = index + 1;
            let base = def
                .id
                .clone()
                .or_else(|| def.accessor.path().map(str::to_string))
                .unwrap_or_else(|| format!("col-{}", position));
            let id = if seen.contains(&base) {
                format!("{}#{}", base, position)
            } else {
                base
            };
            seen.insert(id.clone());

            Column {
                id: ColumnId(id),
                name: def.name.clone(),
                accessor: def.accessor.clone(),
                sortable: def.sortable,
                comparator: def.comparator.clone(),
            }
        })
        .collect()
}
