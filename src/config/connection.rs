//! Connection settings read from the panel's own config file.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::Result;

use super::format::PLAIN_FORMAT;
use super::registry::{ConfigSchema, LoadStatus, ParamRegistry};
use super::schema::ParamType;

/// Port used when connecting over TCP.
pub const DEFAULT_PORT: u16 = 3306;

struct ConnectionSchema {
    database: String,
}

impl ConfigSchema for ConnectionSchema {
    fn declare(&self, params: &mut ParamRegistry) {
        params
            .declare("Name", ParamType::Str, Some(self.database.as_str().into()))
            .declare("Host", ParamType::Str, Some("localhost".into()))
            .declare("User", ParamType::Str, Some("root".into()))
            .declare("Password", ParamType::Str, None)
            .declare("Socket", ParamType::Str, None);
    }
}

/// Database connection parameters of the panel.
///
/// Always uses the plain-text format, since the file belongs to the panel.
/// `Name` defaults to the panel's manager name.
#[derive(Debug)]
pub struct ConnectionConfig {
    params: ParamRegistry,
}

impl ConnectionConfig {
    pub fn new(path: impl Into<PathBuf>, database: &str) -> Self {
        let schema = ConnectionSchema {
            database: database.to_string(),
        };
        Self {
            params: ParamRegistry::new(path, PLAIN_FORMAT, schema),
        }
    }

    pub fn params(&self) -> &ParamRegistry {
        &self.params
    }

    pub fn params_mut(&mut self) -> &mut ParamRegistry {
        &mut self.params
    }

    pub fn load(&mut self) -> Result<bool> {
        self.params.load()
    }

    pub fn load_status(&mut self) -> Result<LoadStatus> {
        self.params.load_status()
    }

    /// Where and how to connect.
    ///
    /// A `Socket` that exists on disk wins; otherwise connect to `Host` on
    /// [`DEFAULT_PORT`].
    pub fn descriptor(&self) -> ConnectionDescriptor {
        let socket = self
            .params
            .get_string("Socket")
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .filter(|p| p.exists());

        let endpoint = match socket {
            Some(path) => Endpoint::Socket(path),
            None => Endpoint::Tcp {
                host: self.params.get_string("Host").unwrap_or_default(),
                port: DEFAULT_PORT,
            },
        };

        ConnectionDescriptor {
            endpoint,
            database: self.params.get_string("Name").unwrap_or_default(),
            user: self.params.get_string("User"),
            password: self.params.get_string("Password"),
        }
    }
}

/// Transport to reach the database server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    Socket(PathBuf),
    Tcp { host: String, port: u16 },
}

/// Everything a client needs to open a connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionDescriptor {
    pub endpoint: Endpoint,
    pub database: String,
    pub user: Option<String>,
    pub password: Option<String>,
}

impl ConnectionDescriptor {
    /// Data source name, e.g. `mysql:host=localhost;port=3306;dbname=ispmgr`.
    pub fn dsn(&self) -> String {
        self.to_string()
    }

    pub fn socket_path(&self) -> Option<&Path> {
        match &self.endpoint {
            Endpoint::Socket(path) => Some(path),
            Endpoint::Tcp { .. } => None,
        }
    }
}

impl fmt::Display for ConnectionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.endpoint {
            Endpoint::Socket(path) => write!(
                f,
                "mysql:unix_socket={};dbname={}",
                path.display(),
                self.database
            ),
            Endpoint::Tcp { host, port } => {
                write!(f, "mysql:host={};port={};dbname={}", host, port, self.database)
            }
        }
    }
}
