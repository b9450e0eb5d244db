use serde::{Deserialize, Serialize};
use std::fmt;

/// Category assigned to a captured payload by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttackType {
    SqlInjection,
    Xss,
    DirectoryTraversal,
    CredentialStuffing,
    SshScan,
    MysqlAttack,
    RdpAttack,
    HttpRecon,
    PortScan,
}

impl fmt::Display for AttackType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AttackType::SqlInjection => "SQL Injection",
            AttackType::Xss => "XSS",
            AttackType::DirectoryTraversal => "Directory Traversal",
            AttackType::CredentialStuffing => "Credential Stuffing",
            AttackType::SshScan => "SSH Scan",
            AttackType::MysqlAttack => "MySQL Attack",
            AttackType::RdpAttack => "RDP Attack",
            AttackType::HttpRecon => "HTTP Reconnaissance",
            AttackType::PortScan => "Port Scanning",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Low => write!(f, "LOW"),
            Severity::Medium => write!(f, "MEDIUM"),
            Severity::High => write!(f, "HIGH"),
        }
    }
}
