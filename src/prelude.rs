//! Convenient imports for common functionality.
//!
//! ```rust
//! use mysql_session::prelude::*;
//! ```

pub use crate::args;
pub use crate::config::SessionOpts;
pub use crate::error::SessionError;
pub use crate::results::{Columns, Row};
pub use crate::session::Session;
pub use crate::types::{DbValue, Param};
