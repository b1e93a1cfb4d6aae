use mysql::{Opts, OptsBuilder};

/// Options for opening a [`Session`](crate::Session).
///
/// All fields pass straight through to the driver's connect call; nothing is
/// validated here.
#[derive(Debug, Clone)]
pub struct SessionOpts {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
}

impl SessionOpts {
    /// Options for `host:3306` with the given credentials and database.
    #[must_use]
    pub fn new(
        host: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        database: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port: 3306,
            username: username.into(),
            password: password.into(),
            database: database.into(),
        }
    }

    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub(crate) fn to_driver_opts(&self) -> Opts {
        Opts::from(
            OptsBuilder::new()
                .ip_or_hostname(Some(self.host.clone()))
                .tcp_port(self.port)
                .user(Some(self.username.clone()))
                .pass(Some(self.password.clone()))
                .db_name(Some(self.database.clone())),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_standard_port() {
        let opts = SessionOpts::new("db.example", "app", "secret", "appdb");
        assert_eq!(opts.port, 3306);
        assert_eq!(opts.host, "db.example");
    }

    #[test]
    fn port_override() {
        let opts = SessionOpts::new("h", "u", "p", "d").with_port(3307);
        assert_eq!(opts.port, 3307);
    }
}
