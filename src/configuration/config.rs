use super::types::ListenerConfig;
use crate::error_handling::types::ConfigError;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Ports the decoy binds by default, chosen to cover the services most
/// commonly probed by scanners (FTP, SSH, Telnet, SMTP, HTTP, POP3, IMAP,
/// HTTPS, MySQL, RDP, PostgreSQL, Tomcat).
pub const DEFAULT_PORTS: [u16; 12] = [21, 22, 23, 25, 80, 110, 143, 443, 3306, 3389, 5432, 8080];

/// Runtime configuration.
///
/// Loaded from an optional TOML file; every field has a default so the
/// binary runs with no arguments at all. The port list is fixed for the
/// lifetime of the process.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// TCP ports to bind decoy listeners on.
    pub ports: Vec<u16>,

    /// Serve the read-only dashboard and JSON API.
    pub dashboard_enabled: bool,

    /// Port for the dashboard web server.
    pub dashboard_port: u16,

    /// Directory the attack log file is created in.
    pub log_dir: PathBuf,

    /// Ceiling on concurrently running connection handlers across all
    /// listeners. Connections accepted past the ceiling are dropped.
    pub max_connections: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ports: DEFAULT_PORTS.to_vec(),
            dashboard_enabled: true,
            dashboard_port: 5000,
            log_dir: PathBuf::from("."),
            max_connections: 512,
        }
    }
}

impl Config {
    /// Reads and validates a configuration file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: Config =
            toml::from_str(&content).map_err(|e| ConfigError::TomlError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// One listener registration per configured port, all TCP.
    pub fn listeners(&self) -> Vec<ListenerConfig> {
        self.ports.iter().map(|p| ListenerConfig::tcp(*p)).collect()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.ports.is_empty() {
            return Err(ConfigError::NoPorts(
                "at least one decoy port is required".to_string(),
            ));
        }
        if self.dashboard_enabled && self.ports.contains(&self.dashboard_port) {
            return Err(ConfigError::PortConflict(format!(
                "dashboard port {} is also a decoy port",
                self.dashboard_port
            )));
        }
        Ok(())
    }
}
