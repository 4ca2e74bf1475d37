//! Stable, type-aware row sorting.

use std::cmp::Ordering;

use log::{trace, warn};
use rust_decimal::Decimal;

use crate::model::{TableRow, Value};
use crate::state::SortDirection;

use super::{Column, ColumnId, Comparator};

/// Ordering of value categories when two cells have different runtime types.
fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Bool(_) => 0,
        Value::Int(_) | Value::Float(_) | Value::Decimal(_) => 1,
        Value::String(_) => 2,
        Value::DateTime(_) => 3,
        Value::Guid(_) => 4,
        Value::List(_) => 5,
        Value::Map(_) => 6,
        Value::Null => 7,
    }
}

/// Position of a number on one shared scale.
///
/// Everything that fits a `Decimal` compares exactly. Floats outside that
/// range sit below or above it, and NaN sorts after every other number.
#[derive(PartialEq, PartialOrd)]
enum NumberKey {
    Below(f64),
    Exact(Decimal),
    Above(f64),
    NaN,
}

fn number_key(value: &Value) -> NumberKey {
    match value {
        Value::Int(i) => NumberKey::Exact(Decimal::from(*i)),
        Value::Decimal(d) => NumberKey::Exact(*d),
        Value::Float(f) if f.is_nan() => NumberKey::NaN,
        Value::Float(f) => match Decimal::from_f64_retain(*f) {
            Some(d) => NumberKey::Exact(d),
            None if *f < 0.0 => NumberKey::Below(*f),
            None => NumberKey::Above(*f),
        },
        _ => NumberKey::NaN,
    }
}

fn compare_numbers(a: &Value, b: &Value) -> Ordering {
    number_key(a)
        .partial_cmp(&number_key(b))
        .unwrap_or(Ordering::Equal)
}

/// Default ascending comparison of two cell values.
///
/// Numbers compare numerically across `Int`, `Float` and `Decimal`, strings
/// lexicographically, lists and maps element by element. Values of different
/// categories are ordered bool < number < string < datetime < guid < list <
/// map < null.
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    let (rank_a, rank_b) = (type_rank(a), type_rank(b));
    if rank_a != rank_b {
        return rank_a.cmp(&rank_b);
    }

    match (a, b) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::DateTime(x), Value::DateTime(y)) => x.cmp(y),
        (Value::Guid(x), Value::Guid(y)) => x.cmp(y),
        (Value::List(x), Value::List(y)) => x
            .iter()
            .zip(y.iter())
            .map(|(l, r)| compare_values(l, r))
            .find(|ord| ord.is_ne())
            .unwrap_or_else(|| x.len().cmp(&y.len())),
        (Value::Map(x), Value::Map(y)) => x
            .iter()
            .zip(y.iter())
            .map(|((lk, lv), (rk, rv))| lk.cmp(rk).then_with(|| compare_values(lv, rv)))
            .find(|ord| ord.is_ne())
            .unwrap_or_else(|| x.len().cmp(&y.len())),
        _ => compare_numbers(a, b),
    }
}

/// Compare two cells for a given direction, keeping nulls last either way.
pub fn compare_cells(a: &Value, b: &Value, direction: SortDirection) -> Ordering {
    match (a.is_null(), b.is_null()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => apply_direction(compare_values(a, b), direction),
    }
}

fn apply_direction(ordering: Ordering, direction: SortDirection) -> Ordering {
    match direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    }
}

/// Sort rows by the active sort column.
///
/// The sort is stable. With no sort column the input order is returned.
///
/// Comparator precedence is `custom`, then the column's own comparator, then
/// [`compare_cells`] on the resolved values. Comparators always describe
/// ascending order; this function applies `direction` by reversing them.
/// Only the default comparison pins nulls to the end.
pub fn sort<'a, R: TableRow>(
    data: &'a [R],
    columns: &[Column<R>],
    sort_column: Option<&ColumnId>,
    direction: SortDirection,
    custom: Option<&Comparator<R>>,
) -> Vec<&'a R> {
    sort_indices(data, columns, sort_column, direction, custom)
        .into_iter()
        .map(|i| &data[i])
        .collect()
}

/// Same as [`sort`], returning positions into `data` instead of references.
pub fn sort_indices<R: TableRow>(
    data: &[R],
    columns: &[Column<R>],
    sort_column: Option<&ColumnId>,
    direction: SortDirection,
    custom: Option<&Comparator<R>>,
) -> Vec<usize> {
    let mut order: Vec<usize> = (0..data.len()).collect();

    let Some(sort_id) = sort_column else {
        return order;
    };
    let column = columns.iter().find(|c| &c.id == sort_id);

    let comparator = custom.or_else(|| column.and_then(|c| c.comparator.as_ref()));
    if let Some(cmp) = comparator {
        trace!(
            "sorting {} rows by '{}' {} (comparator)",
            data.len(),
            sort_id,
            direction
        );
        order.sort_by(|&a, &b| apply_direction(cmp(&data[a], &data[b]), direction));
        return order;
    }

    let Some(column) = column else {
        warn!(
            "sort column '{}' does not match any column; keeping input order",
            sort_id
        );
        return order;
    };

    trace!("sorting {} rows by '{}' {}", data.len(), sort_id, direction);
    let mut keyed: Vec<(Value, usize)> = order
        .into_iter()
        .map(|i| (column.value(&data[i]), i))
        .collect();
    keyed.sort_by(|(a, _), (b, _)| compare_cells(a, b, direction));
    keyed.into_iter().map(|(_, i)| i).collect()
}
