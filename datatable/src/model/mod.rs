//! Row model: dynamic values, records and the row identity trait.

mod record;
mod row;
mod value;

pub use record::Record;
pub use row::TableRow;
pub use value::Value;
