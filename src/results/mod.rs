//! Result shaping: rows as ordered column-name → value mappings.

mod row;

pub use row::{Columns, Row};
