//! Server bind configuration loaded from TOML and merged with CLI overrides.

use std::{
    net::{IpAddr, SocketAddr},
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

/// Port used when neither the file nor the command line sets one.
pub const DEFAULT_PORT: u16 = 8080;
/// Address used when the file leaves it empty.
pub const DEFAULT_ADDRESS: &str = "0.0.0.0";

/// Errors produced while loading or resolving configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("could not read config file {path}: {source}")]
    Read {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The config file is not valid TOML for [`ServerConfig`].
    #[error("could not parse config file {path}: {source}")]
    Parse {
        /// Path that failed.
        path: PathBuf,
        /// Underlying TOML error.
        #[source]
        source: toml::de::Error,
    },
    /// A leading `~` was used but no home directory is known.
    #[error("could not expand {0}: no home directory")]
    NoHome(String),
    /// No non-zero port was supplied.
    #[error("port is required")]
    MissingPort,
    /// The bind address is not an IP address.
    #[error("invalid address [{address}]: {source}")]
    InvalidAddress {
        /// Offending address text.
        address: String,
        /// Underlying parse error.
        #[source]
        source: std::net::AddrParseError,
    },
}

/// On-disk server settings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// IP address to bind.
    pub address: String,
    /// TCP port to bind.
    pub port: u16,
}

impl ServerConfig {
    /// Reads `path` (after `~` expansion) and fills in defaults for unset fields.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = expand_home(path.as_ref())?;
        let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let config: Self =
            toml::from_str(&content).map_err(|source| ConfigError::Parse { path, source })?;
        Ok(config.with_defaults())
    }

    /// Replaces a zero port and an empty address with the defaults.
    pub fn with_defaults(mut self) -> Self {
        if self.port == 0 {
            self.port = DEFAULT_PORT;
        }
        if self.address.is_empty() {
            self.address = DEFAULT_ADDRESS.to_string();
        }
        self
    }

    /// Merges command-line overrides and validates the result into a bind address.
    ///
    /// A `Some` address or a non-zero port from the command line wins over the file.
    pub fn resolve(
        &self,
        address: Option<&str>,
        port: Option<u16>,
    ) -> Result<SocketAddr, ConfigError> {
        let port = port.filter(|p| *p != 0).unwrap_or(self.port);
        if port == 0 {
            return Err(ConfigError::MissingPort);
        }

        let address = address
            .filter(|a| !a.is_empty())
            .unwrap_or(self.address.as_str());
        let ip: IpAddr = address.parse().map_err(|source| ConfigError::InvalidAddress {
            address: address.to_string(),
            source,
        })?;
        Ok(SocketAddr::new(ip, port))
    }
}

/// Expands a leading `~` to the user's home directory.
pub fn expand_home(path: &Path) -> Result<PathBuf, ConfigError> {
    let Ok(rest) = path.strip_prefix("~") else {
        return Ok(path.to_path_buf());
    };
    let home = dirs::home_dir().ok_or_else(|| ConfigError::NoHome(path.display().to_string()))?;
    Ok(home.join(rest))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_config(body: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        file.write_all(body.as_bytes()).expect("write");
        file
    }

    #[test]
    fn load_applies_defaults_for_missing_fields() {
        let file = write_config("");
        let cfg = ServerConfig::load(file.path()).expect("load");
        assert_eq!(cfg.port, DEFAULT_PORT);
        assert_eq!(cfg.address, DEFAULT_ADDRESS);
    }

    #[test]
    fn load_reads_explicit_values() {
        let file = write_config("address = \"127.0.0.1\"\nport = 9001\n");
        let cfg = ServerConfig::load(file.path()).expect("load");
        assert_eq!(
            cfg,
            ServerConfig {
                address: "127.0.0.1".to_string(),
                port: 9001,
            }
        );
    }

    #[test]
    fn load_reports_missing_and_malformed_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let missing = dir.path().join("absent.toml");
        assert!(matches!(
            ServerConfig::load(&missing),
            Err(ConfigError::Read { .. })
        ));

        let file = write_config("port = \"not a number\"");
        assert!(matches!(
            ServerConfig::load(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn resolve_prefers_cli_overrides() {
        let cfg = ServerConfig {
            address: "127.0.0.1".to_string(),
            port: 9001,
        };
        assert_eq!(
            cfg.resolve(None, None).expect("resolve"),
            "127.0.0.1:9001".parse::<SocketAddr>().expect("addr")
        );
        assert_eq!(
            cfg.resolve(Some("::1"), Some(7000)).expect("resolve"),
            "[::1]:7000".parse::<SocketAddr>().expect("addr")
        );
        assert_eq!(
            cfg.resolve(Some(""), Some(0)).expect("resolve"),
            "127.0.0.1:9001".parse::<SocketAddr>().expect("addr")
        );
    }

    #[test]
    fn resolve_rejects_bad_address_and_missing_port() {
        let cfg = ServerConfig {
            address: "localhost".to_string(),
            port: 0,
        };
        assert!(matches!(cfg.resolve(None, None), Err(ConfigError::MissingPort)));
        assert!(matches!(
            cfg.resolve(None, Some(80)),
            Err(ConfigError::InvalidAddress { .. })
        ));
    }

    #[test]
    fn expand_home_leaves_plain_paths_alone() {
        let path = Path::new("./contactbook.toml");
        assert_eq!(expand_home(path).expect("expand"), path.to_path_buf());
    }
}
