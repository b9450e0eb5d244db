use std::fmt;

#[derive(Debug)]
pub enum ConfigError {
    IoError(std::io::Error),
    TomlError(String),
    NoPorts(String),
    PortConflict(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::TomlError(e) => write!(f, "TOML parsing error: {}", e),
            ConfigError::NoPorts(e) => write!(f, "Port list error: {}", e),
            ConfigError::PortConflict(e) => write!(f, "Port conflict: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::IoError(err)
    }
}

#[derive(Debug)]
pub enum NetworkError {
    SockError(std::io::Error),
    BindError(u16, std::io::Error),
    AcceptError(std::io::Error),
    IoError(std::io::Error),
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkError::SockError(e) => write!(f, "Socket error: {}", e),
            NetworkError::BindError(port, e) => write!(f, "Bind error on port {}: {}", port, e),
            NetworkError::AcceptError(e) => write!(f, "Accept error: {}", e),
            NetworkError::IoError(e) => write!(f, "Connection IO error: {}", e),
        }
    }
}

impl std::error::Error for NetworkError {}

impl From<std::io::Error> for NetworkError {
    fn from(err: std::io::Error) -> Self {
        NetworkError::IoError(err)
    }
}

#[derive(Debug)]
pub enum LogError {
    CreateFailed(std::io::Error),
    WriteFailed(std::io::Error),
}

impl fmt::Display for LogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogError::CreateFailed(e) => write!(f, "Log file creation failed: {}", e),
            LogError::WriteFailed(e) => write!(f, "Log write failed: {}", e),
        }
    }
}

impl std::error::Error for LogError {}

#[derive(Debug)]
pub enum DispatchError {
    Config(ConfigError),
    Network(NetworkError),
    Log(LogError),
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchError::Config(e) => write!(f, "Configuration error: {}", e),
            DispatchError::Network(e) => write!(f, "Network error: {}", e),
            DispatchError::Log(e) => write!(f, "Log sink error: {}", e),
        }
    }
}

impl std::error::Error for DispatchError {}

impl From<ConfigError> for DispatchError {
    fn from(err: ConfigError) -> Self {
        DispatchError::Config(err)
    }
}

impl From<NetworkError> for DispatchError {
    fn from(err: NetworkError) -> Self {
        DispatchError::Network(err)
    }
}

impl From<LogError> for DispatchError {
    fn from(err: LogError) -> Self {
        DispatchError::Log(err)
    }
}
