use crate::analysis::types::{AttackType, Severity};
use crate::configuration::types::Protocol;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// One classified connection, as recorded by the aggregator.
///
/// Events are immutable once the owning connection handler finishes with
/// them; the only post-insertion write is the handler's own follow-up
/// payload append, addressed by `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttackEvent {
    pub id: Uuid,
    pub source_addr: String,
    pub port: u16,
    pub protocol: Protocol,
    /// Captured bytes, hex-encoded. A follow-up chunk is appended
    /// newline-joined.
    pub payload_hex: String,
    pub attack_type: AttackType,
    pub severity: Severity,
    /// Local wall clock at creation, formatted for display.
    pub timestamp: String,
}

impl AttackEvent {
    pub fn new(
        source_addr: String,
        port: u16,
        protocol: Protocol,
        payload: &[u8],
        attack_type: AttackType,
        severity: Severity,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            source_addr,
            port,
            protocol,
            payload_hex: hex::encode(payload),
            attack_type,
            severity,
            timestamp: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

/// Point-in-time view over the aggregator's counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub total_attempts: u64,
    /// Cardinality of the distinct-source set, not the set itself.
    pub unique_sources: usize,
    pub port_hits: HashMap<u16, u64>,
    pub protocol_hits: HashMap<String, u64>,
}
