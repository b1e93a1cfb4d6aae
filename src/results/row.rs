use std::collections::HashMap;
use std::sync::Arc;

use crate::types::DbValue;

/// The column table of one result set, shared by all of its rows.
///
/// Names are stored once, in driver order, with an index map for by-name
/// lookup.
#[derive(Debug)]
pub struct Columns {
    names: Vec<String>,
    index: HashMap<String, usize>,
}

impl Columns {
    #[must_use]
    pub fn new(names: Vec<String>) -> Self {
        let index = names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();
        Self { names, index }
    }

    /// Column names in driver order.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Position of a column by name, or `None` if not part of this result set.
    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// A row from a query result: an ordered mapping from column name to value.
///
/// ```rust
/// # use std::sync::Arc;
/// # use mysql_session::{Columns, DbValue, Row};
/// # let row = Row::new(
/// #     Arc::new(Columns::new(vec!["id".into(), "name".into()])),
/// #     vec![DbValue::Int(1), DbValue::Text("alice".into())],
/// # );
/// assert_eq!(row.get("name").and_then(DbValue::as_text), Some("alice"));
/// assert_eq!(row.get_at(0), Some(&DbValue::Int(1)));
/// ```
#[derive(Debug, Clone)]
pub struct Row {
    columns: Arc<Columns>,
    values: Vec<DbValue>,
}

impl Row {
    #[must_use]
    pub fn new(columns: Arc<Columns>, values: Vec<DbValue>) -> Self {
        Self { columns, values }
    }

    /// Value of the named column, or `None` if the column does not exist.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&DbValue> {
        self.values.get(self.columns.position(column)?)
    }

    /// Value at a column position.
    #[must_use]
    pub fn get_at(&self, index: usize) -> Option<&DbValue> {
        self.values.get(index)
    }

    /// The column table shared by this row's result set.
    #[must_use]
    pub fn columns(&self) -> &Columns {
        &self.columns
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate `(column name, value)` pairs in driver order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DbValue)> {
        self.columns
            .names()
            .iter()
            .map(String::as_str)
            .zip(self.values.iter())
    }

    /// Consume the row, keeping only the values in driver order.
    #[must_use]
    pub fn into_values(self) -> Vec<DbValue> {
        self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Row {
        Row::new(
            Arc::new(Columns::new(vec!["id".into(), "name".into()])),
            vec![DbValue::Int(12), DbValue::Text("Smith".into())],
        )
    }

    #[test]
    fn lookup_by_name_and_index() {
        let row = sample();
        assert_eq!(row.get("id"), Some(&DbValue::Int(12)));
        assert_eq!(row.get("name"), Some(&DbValue::Text("Smith".into())));
        assert_eq!(row.get("missing"), None);
        assert_eq!(row.get_at(1), Some(&DbValue::Text("Smith".into())));
        assert_eq!(row.get_at(2), None);
    }

    #[test]
    fn iteration_preserves_driver_order() {
        let row = sample();
        let pairs: Vec<_> = row.iter().map(|(name, _)| name.to_string()).collect();
        assert_eq!(pairs, vec!["id", "name"]);
    }

    #[test]
    fn shared_column_table() {
        let columns = Arc::new(Columns::new(vec!["a".into()]));
        let first = Row::new(Arc::clone(&columns), vec![DbValue::Int(1)]);
        let second = Row::new(Arc::clone(&columns), vec![DbValue::Int(2)]);
        assert_eq!(first.columns().position("a"), Some(0));
        assert_eq!(second.columns().position("a"), Some(0));
    }
}
