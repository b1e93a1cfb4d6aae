//! Query execution entry points.
//!
//! All entry points share one pattern: encode the template with its
//! arguments, execute the resolved text, shape the rows. Execution failures
//! become [`SessionError::Query`] carrying the *unresolved* template as
//! context; the resolved text is only visible at `trace` level.

use std::ops::ControlFlow;
use std::sync::Arc;

use mysql::prelude::Queryable;
use tracing::{debug, trace};

use crate::conversion::decode_cell;
use crate::encode::encode;
use crate::error::SessionError;
use crate::results::{Columns, Row};
use crate::types::{DbValue, Param};

use super::Session;

impl Session {
    /// Run a result-producing query and return the first column of the first
    /// row, or `None` if no row matched.
    ///
    /// # Errors
    ///
    /// [`SessionError::Encoding`] on argument mismatch, [`SessionError::Query`]
    /// on execution failure.
    pub fn query_single(
        &mut self,
        template: &str,
        args: &[Param],
    ) -> Result<Option<DbValue>, SessionError> {
        self.with_rows(template, args, |rows| {
            let Some(row) = rows.next().transpose()? else {
                return Ok(None);
            };
            let columns = row.columns();
            let value = row
                .unwrap()
                .into_iter()
                .next()
                .and_then(|cell| columns.first().map(|col| decode_cell(cell, col)));
            Ok(value)
        })
    }

    /// Run a result-producing query and return the first row, or `None` if no
    /// row matched.
    ///
    /// # Errors
    ///
    /// [`SessionError::Encoding`] on argument mismatch, [`SessionError::Query`]
    /// on execution failure.
    pub fn query_row(
        &mut self,
        template: &str,
        args: &[Param],
    ) -> Result<Option<Row>, SessionError> {
        self.with_rows(template, args, |rows| {
            let mut columns = None;
            rows.next()
                .transpose()
                .map(|row| row.map(|row| decode_row(row, &mut columns)))
        })
    }

    /// Run a result-producing query and return all rows in driver order
    /// (empty vector if no row matched).
    ///
    /// # Errors
    ///
    /// [`SessionError::Encoding`] on argument mismatch, [`SessionError::Query`]
    /// on execution failure.
    pub fn query_all(&mut self, template: &str, args: &[Param]) -> Result<Vec<Row>, SessionError> {
        self.with_rows(template, args, |rows| {
            let mut columns = None;
            let mut out = Vec::new();
            for row in rows {
                out.push(decode_row(row?, &mut columns));
            }
            Ok(out)
        })
    }

    /// Run a result-producing query, invoking `callback` once per row in
    /// driver order, synchronously on the calling thread.
    ///
    /// `ControlFlow::Break(())` from the callback stops the iteration;
    /// remaining rows are only drained as far as the wire protocol requires.
    ///
    /// # Errors
    ///
    /// [`SessionError::Encoding`] on argument mismatch, [`SessionError::Query`]
    /// on execution failure.
    pub fn query_each<F>(
        &mut self,
        template: &str,
        args: &[Param],
        mut callback: F,
    ) -> Result<(), SessionError>
    where
        F: FnMut(Row) -> ControlFlow<()>,
    {
        self.with_rows(template, args, |rows| {
            let mut columns = None;
            for row in rows {
                let row = decode_row(row?, &mut columns);
                if let ControlFlow::Break(()) = callback(row) {
                    break;
                }
            }
            Ok(())
        })
    }

    /// Execute a statement without a result set (insert/update/delete/...).
    ///
    /// # Errors
    ///
    /// [`SessionError::Encoding`] on argument mismatch, [`SessionError::Query`]
    /// on execution failure.
    pub fn execute(&mut self, template: &str, args: &[Param]) -> Result<(), SessionError> {
        self.execute_counted(template, args).map(|_| ())
    }

    /// Execute a statement and return the number of rows it affected.
    ///
    /// # Errors
    ///
    /// [`SessionError::Encoding`] on argument mismatch, [`SessionError::Query`]
    /// on execution failure.
    pub fn execute_counted(&mut self, template: &str, args: &[Param]) -> Result<u64, SessionError> {
        let sql = encode(template, args)?;
        trace!(resolved = %sql, "resolved statement");
        let conn = self.handle(template)?;
        debug!(template = %template, "executing statement");
        let result = conn
            .query_iter(sql.as_ref())
            .map_err(|e| SessionError::query(&e, template))?;
        let affected = result.affected_rows();
        let insert_id = result.last_insert_id();
        drop(result);
        self.record_statement_state(affected, insert_id);
        Ok(affected)
    }

    /// Shared primitive: encode, execute, then hand the row stream to a
    /// shaping closure. Driver errors from the closure are wrapped with the
    /// template context here, once.
    fn with_rows<T, F>(&mut self, template: &str, args: &[Param], shape: F) -> Result<T, SessionError>
    where
        F: FnOnce(
            &mut dyn Iterator<Item = Result<mysql::Row, mysql::Error>>,
        ) -> Result<T, mysql::Error>,
    {
        let sql = encode(template, args)?;
        trace!(resolved = %sql, "resolved query");
        let conn = self.handle(template)?;
        debug!(template = %template, "executing query");
        let mut result = conn
            .query_iter(sql.as_ref())
            .map_err(|e| SessionError::query(&e, template))?;
        let shaped = match result.iter() {
            Some(mut rows) => shape(&mut rows),
            // Statement produced no result set; shape over nothing.
            None => shape(&mut std::iter::empty::<Result<mysql::Row, mysql::Error>>()),
        }
        .map_err(|e| SessionError::query(&e, template))?;
        let affected = result.affected_rows();
        let insert_id = result.last_insert_id();
        // Dropping the result drains whatever the protocol still requires.
        drop(result);
        self.record_statement_state(affected, insert_id);
        Ok(shaped)
    }
}

/// Decode one driver row, building the shared column table on first use.
fn decode_row(row: mysql::Row, columns: &mut Option<Arc<Columns>>) -> Row {
    let table = Arc::clone(columns.get_or_insert_with(|| {
        Arc::new(Columns::new(
            row.columns_ref()
                .iter()
                .map(|col| col.name_str().into_owned())
                .collect(),
        ))
    }));
    let driver_columns = row.columns();
    let values = row
        .unwrap()
        .into_iter()
        .zip(driver_columns.iter())
        .map(|(cell, col)| decode_cell(cell, col))
        .collect();
    Row::new(table, values)
}
