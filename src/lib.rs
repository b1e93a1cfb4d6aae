//! Lightweight blocking convenience wrapper around one MySQL connection.
//!
//! One [`Session`] owns one live connection and offers:
//!
//! - positional `?` template encoding with MySQL-literal escaping (a list
//!   argument expands for `IN (...)` clauses),
//! - shaped results: single value, single row, all rows, or a per-row
//!   callback with early stop,
//! - typed errors carrying the driver's code, message, and the failing
//!   query template.
//!
//! ```no_run
//! use std::ops::ControlFlow;
//! use mysql_session::prelude::*;
//!
//! fn demo() -> Result<(), SessionError> {
//!     let opts = SessionOpts::new("127.0.0.1", "app", "secret", "appdb");
//!     let mut session = Session::connect(&opts)?;
//!
//!     let count = session.query_single(
//!         "select count(*) from users where id > ?",
//!         &args![12],
//!     )?;
//!
//!     session.query_each("select id, name from users", &args![], |row| {
//!         if row.get("name").and_then(DbValue::as_text) == Some("stop here") {
//!             return ControlFlow::Break(());
//!         }
//!         ControlFlow::Continue(())
//!     })?;
//!
//!     session.execute(
//!         "update users set active = ? where id in (?)",
//!         &args![1, [2, 5, 9]],
//!     )?;
//!
//!     # let _ = count;
//!     session.close()
//! }
//! ```
//!
//! Substitution is textual (escaped, quoted literals), deliberately not
//! driver-native parameter binding; this is not a query builder or ORM.
//! Everything blocks the calling thread, and a `Session` must not be shared
//! across threads without external synchronization.

pub mod config;
pub mod encode;
pub mod error;
pub mod prelude;
pub mod results;
pub mod session;
pub mod types;

mod conversion;

pub use config::SessionOpts;
pub use error::SessionError;
pub use results::{Columns, Row};
pub use session::Session;
pub use types::{DbValue, Param};
