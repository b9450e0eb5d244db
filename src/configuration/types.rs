use serde::{Deserialize, Serialize};
use std::fmt;

/// Transport protocol of a decoy listener. Only TCP is bound today; UDP is
/// reserved for a future datagram capture path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Protocol {
    TCP,
    UDP,
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Protocol::TCP => write!(f, "TCP"),
            Protocol::UDP => write!(f, "UDP"),
        }
    }
}

/// One decoy port registration. Created at startup, never added or removed
/// at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListenerConfig {
    pub port: u16,
    pub protocol: Protocol,
}

impl ListenerConfig {
    pub fn tcp(port: u16) -> Self {
        Self {
            port,
            protocol: Protocol::TCP,
        }
    }
}
