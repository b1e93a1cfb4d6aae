//! The [`Session`]: one live connection, its lifecycle, and the query entry
//! points (in [`query`](self::query)).

use mysql::prelude::Queryable;
use tracing::{debug, warn};

use crate::config::SessionOpts;
use crate::error::{CR_SERVER_GONE_ERROR, SessionError};

mod query;

/// One live MySQL connection.
///
/// The session exclusively owns the connection handle for its lifetime and
/// releases it exactly once: explicitly via [`close`](Session::close), or as
/// a Drop backstop (where failures can only be logged). Operations block the
/// calling thread; callers sharing a session across threads must serialize
/// access to it.
pub struct Session {
    conn: Option<mysql::Conn>,
    last_affected: u64,
    last_insert: u64,
}

impl Session {
    /// Open one connection to a MySQL server.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Connection`] with the driver's connect-time
    /// code and message if the connection cannot be established.
    pub fn connect(opts: &SessionOpts) -> Result<Self, SessionError> {
        let conn =
            mysql::Conn::new(opts.to_driver_opts()).map_err(|e| SessionError::connect(&e))?;
        debug!(host = %opts.host, database = %opts.database, "session connected");
        Ok(Self {
            conn: Some(conn),
            last_affected: 0,
            last_insert: 0,
        })
    }

    /// Terminate the session deterministically.
    ///
    /// Two sequential cleanup steps: (a) kill the server-side thread backing
    /// this connection, (b) close the client handle. Step (b) runs even when
    /// step (a) fails.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Cleanup`] if the server refuses the kill, or
    /// if the session was already closed.
    pub fn close(&mut self) -> Result<(), SessionError> {
        let Some(mut conn) = self.conn.take() else {
            return Err(SessionError::Cleanup {
                code: CR_SERVER_GONE_ERROR,
                message: "session already closed".to_string(),
                context: "close",
            });
        };
        let killed = kill_server_thread(&mut conn);
        // Dropping the handle sends the client-side quit regardless of the
        // kill outcome.
        drop(conn);
        debug!("session closed");
        killed
    }

    /// Rows affected by the most recent statement on this session.
    ///
    /// Session-level state, not per-query: do not interleave statements and
    /// expect isolated results.
    #[must_use]
    pub fn affected_rows(&self) -> u64 {
        self.last_affected
    }

    /// ID generated by the most recent statement on this session (0 when the
    /// statement generated none).
    #[must_use]
    pub fn last_insert_id(&self) -> u64 {
        self.last_insert
    }

    pub(crate) fn handle(&mut self, template: &str) -> Result<&mut mysql::Conn, SessionError> {
        self.conn.as_mut().ok_or_else(|| SessionError::closed(template))
    }

    pub(crate) fn record_statement_state(&mut self, affected: u64, insert_id: Option<u64>) {
        self.last_affected = affected;
        self.last_insert = insert_id.unwrap_or(0);
    }
}

fn kill_server_thread(conn: &mut mysql::Conn) -> Result<(), SessionError> {
    let id = conn.connection_id();
    match conn.query_drop(format!("KILL {id}")) {
        Ok(()) => Ok(()),
        Err(err @ mysql::Error::MySqlError(_)) => Err(SessionError::cleanup(&err, "kill")),
        // The server tears the link down while answering; losing the
        // connection here is the expected outcome of a successful kill.
        Err(_) => Ok(()),
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if self.conn.is_some()
            && let Err(err) = self.close()
        {
            warn!(error = %err, "session teardown failed");
        }
    }
}
