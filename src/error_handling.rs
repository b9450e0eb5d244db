pub mod types;

pub use types::{ConfigError, DispatchError, LogError, NetworkError};
