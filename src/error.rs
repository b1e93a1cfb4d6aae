use thiserror::Error;

/// Client-side "server has gone away" code, used for operations on a session
/// whose connection is already terminated.
pub(crate) const CR_SERVER_GONE_ERROR: u16 = 2006;

/// Every failure this crate can surface.
///
/// Each variant carries the driver-native error code and message plus a
/// context: the fixed stage for lifecycle failures, or the query template for
/// execution failures. Query errors hold the *unresolved* template, never the
/// resolved string, so interpolated values do not leak into logs.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Connect-time failure. Fatal to [`Session::connect`](crate::Session::connect).
    #[error("connection failed with code {code}: {message} [[connect]]")]
    Connection { code: u16, message: String },

    /// Failure while tearing the session down (`kill` or `close` stage).
    #[error("cleanup failed with code {code}: {message} [[{context}]]")]
    Cleanup {
        code: u16,
        message: String,
        context: &'static str,
    },

    /// Query execution failure.
    #[error("query failed with code {code}: {message} [[{query}]]")]
    Query {
        code: u16,
        message: String,
        query: String,
    },

    /// Placeholder/argument count mismatch found while encoding a template.
    #[error("encoding failed: {placeholders} placeholder(s), {arguments} argument(s) [[{query}]]")]
    Encoding {
        placeholders: usize,
        arguments: usize,
        query: String,
    },
}

impl SessionError {
    pub(crate) fn connect(err: &mysql::Error) -> Self {
        SessionError::Connection {
            code: driver_code(err),
            message: driver_message(err),
        }
    }

    pub(crate) fn cleanup(err: &mysql::Error, context: &'static str) -> Self {
        SessionError::Cleanup {
            code: driver_code(err),
            message: driver_message(err),
            context,
        }
    }

    pub(crate) fn query(err: &mysql::Error, template: &str) -> Self {
        SessionError::Query {
            code: driver_code(err),
            message: driver_message(err),
            query: template.to_string(),
        }
    }

    /// Error for an entry point invoked after `close`.
    pub(crate) fn closed(template: &str) -> Self {
        SessionError::Query {
            code: CR_SERVER_GONE_ERROR,
            message: "session already closed".to_string(),
            query: template.to_string(),
        }
    }

    /// The driver-native error code, or 0 when the failure never reached the
    /// server (encoding errors, client-side I/O).
    #[must_use]
    pub fn code(&self) -> u16 {
        match self {
            SessionError::Connection { code, .. }
            | SessionError::Cleanup { code, .. }
            | SessionError::Query { code, .. } => *code,
            SessionError::Encoding { .. } => 0,
        }
    }

    /// The driver-native error message, if the failure carries one.
    #[must_use]
    pub fn driver_message(&self) -> Option<&str> {
        match self {
            SessionError::Connection { message, .. }
            | SessionError::Cleanup { message, .. }
            | SessionError::Query { message, .. } => Some(message),
            SessionError::Encoding { .. } => None,
        }
    }

    /// The failure context: `"connect"`, a teardown stage, or the query
    /// template the failure belongs to.
    #[must_use]
    pub fn context(&self) -> &str {
        match self {
            SessionError::Connection { .. } => "connect",
            SessionError::Cleanup { context, .. } => context,
            SessionError::Query { query, .. } | SessionError::Encoding { query, .. } => query,
        }
    }
}

fn driver_code(err: &mysql::Error) -> u16 {
    match err {
        mysql::Error::MySqlError(server) => server.code,
        _ => 0,
    }
}

fn driver_message(err: &mysql::Error) -> String {
    match err {
        mysql::Error::MySqlError(server) => server.message.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_error_display_includes_code_message_and_template() {
        let err = SessionError::Query {
            code: 1064,
            message: "You have an error in your SQL syntax".to_string(),
            query: "selec 1".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("1064"));
        assert!(text.contains("SQL syntax"));
        assert!(text.contains("[[selec 1]]"));
    }

    #[test]
    fn accessors_expose_code_and_context() {
        let err = SessionError::Cleanup {
            code: 1094,
            message: "Unknown thread id".to_string(),
            context: "kill",
        };
        assert_eq!(err.code(), 1094);
        assert_eq!(err.context(), "kill");
        assert_eq!(err.driver_message(), Some("Unknown thread id"));
    }

    #[test]
    fn encoding_error_has_no_driver_code() {
        let err = SessionError::Encoding {
            placeholders: 2,
            arguments: 1,
            query: "select ?, ?".to_string(),
        };
        assert_eq!(err.code(), 0);
        assert_eq!(err.driver_message(), None);
        assert_eq!(err.context(), "select ?, ?");
    }
}
