//! Server configuration read from command line flags and environment variables.

use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    path::{Path, PathBuf},
};

use clap::Parser;

/// The value of `--database-url` that selects a throwaway in-memory database.
pub const IN_MEMORY_DATABASE: &str = ":memory:";

/// The REST API server for cashbook.
///
/// Every flag can also be set with the environment variable named in its help
/// text, or in a `.env` file in the working directory.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Directory holding the SQLite database file, or ":memory:" for a
    /// database that is lost when the server stops.
    #[arg(long, env = "DATABASE_URL", default_value = ".")]
    pub database_url: String,

    /// Name of the database, used as the file stem of the SQLite file.
    #[arg(long, env = "DATABASE_NAME", default_value = "cashbook")]
    pub database_name: String,

    /// The address to serve the API from.
    #[arg(long, env = "HOST", default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    pub host: IpAddr,

    /// The port to serve the API from.
    #[arg(short, long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// The only origin allowed to call the API from a browser.
    #[arg(long, env = "CORS_ORIGIN", default_value = "http://localhost:4200")]
    pub cors_origin: String,

    /// Also write debug level logs to this file.
    #[arg(long, env = "LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

/// Where the server keeps its data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseLocation {
    /// A database that only lives as long as the process.
    InMemory,
    /// A SQLite file on disk.
    File(PathBuf),
}

impl Config {
    /// The socket address the server should listen on.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Resolve the database URL and name to a SQLite location.
    pub fn database_location(&self) -> DatabaseLocation {
        if self.database_url == IN_MEMORY_DATABASE {
            DatabaseLocation::InMemory
        } else {
            DatabaseLocation::File(
                PathBuf::from(&self.database_url).join(format!("{}.sqlite3", self.database_name)),
            )
        }
    }
}

/// Load environment variables from a `.env` file in the working directory or
/// its parents.
///
/// # Errors
/// Returns an error if a `.env` file exists but cannot be read or parsed.
/// A missing file is not an error.
pub fn load_env_file() -> Result<(), dotenvy::Error> {
    ignore_missing(dotenvy::dotenv().map(|_| ()))
}

/// Load environment variables from the `.env` file at `path`.
///
/// # Errors
/// Same as [load_env_file].
pub fn load_env_file_from(path: &Path) -> Result<(), dotenvy::Error> {
    ignore_missing(dotenvy::from_path(path))
}

fn ignore_missing(result: Result<(), dotenvy::Error>) -> Result<(), dotenvy::Error> {
    match result {
        Err(error) if error.not_found() => Ok(()),
        result => result,
    }
}

#[cfg(test)]
mod tests {
    use std::{env, fs, net::SocketAddr, path::PathBuf};

    use clap::Parser;

    use super::{Config, DatabaseLocation, load_env_file_from};

    #[test]
    fn resolves_database_file() {
        let config = Config::try_parse_from([
            "server",
            "--database-url",
            "/var/lib/cashbook",
            "--database-name",
            "finances",
        ])
        .unwrap();

        assert_eq!(
            config.database_location(),
            DatabaseLocation::File(PathBuf::from("/var/lib/cashbook/finances.sqlite3"))
        );
    }

    #[test]
    fn supports_in_memory_database() {
        let config = Config::try_parse_from(["server", "--database-url", ":memory:"]).unwrap();

        assert_eq!(config.database_location(), DatabaseLocation::InMemory);
    }

    #[test]
    fn builds_socket_address() {
        let config =
            Config::try_parse_from(["server", "--host", "0.0.0.0", "--port", "8080"]).unwrap();

        assert_eq!(
            config.socket_addr(),
            "0.0.0.0:8080".parse::<SocketAddr>().unwrap()
        );
    }

    #[test]
    fn rejects_invalid_port() {
        assert!(Config::try_parse_from(["server", "--port", "not-a-port"]).is_err());
    }

    #[test]
    fn missing_env_file_is_ignored() {
        let path = env::temp_dir().join("cashbook-no-such-dir/.env");

        assert!(load_env_file_from(&path).is_ok());
    }

    #[test]
    fn malformed_env_file_is_an_error() {
        let path = env::temp_dir().join(format!("cashbook-malformed-{}.env", std::process::id()));
        fs::write(&path, "CASHBOOK_MALFORMED=\"unterminated\n").unwrap();

        let result = load_env_file_from(&path);
        fs::remove_file(&path).unwrap();

        assert!(result.is_err());
    }
}
