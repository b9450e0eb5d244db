//! Process-wide attack statistics.
//!
//! The aggregator is the only state mutated concurrently by many
//! connection handlers. A single mutex guards the recent-events buffer and
//! every counter so that a reader can never observe a half-applied
//! `record` call.

use super::types::{AttackEvent, StatsSnapshot};
use std::cmp::Reverse;
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Mutex;
use uuid::Uuid;

/// Bound on the recent-events buffer. Counters are never bounded or
/// expired; only the event buffer evicts.
pub const RECENT_EVENTS_CAP: usize = 100;

#[derive(Default)]
struct AggregatorState {
    recent: VecDeque<AttackEvent>,
    total_attempts: u64,
    unique_sources: HashSet<String>,
    port_hits: HashMap<u16, u64>,
    protocol_hits: HashMap<String, u64>,
}

/// Shared, injectable event store. Created once at startup and handed as
/// an `Arc` to every listener and handler.
#[derive(Default)]
pub struct Aggregator {
    state: Mutex<AggregatorState>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one attack event: buffer insertion (newest first, oldest
    /// evicted past the cap) and all counter updates happen in a single
    /// critical section.
    pub fn record(&self, event: AttackEvent) -> Uuid {
        let id = event.id;
        let mut state = self.state.lock().unwrap();

        state.unique_sources.insert(event.source_addr.clone());
        *state.port_hits.entry(event.port).or_insert(0) += 1;
        *state
            .protocol_hits
            .entry(event.protocol.to_string())
            .or_insert(0) += 1;
        state.total_attempts += 1;

        state.recent.push_front(event);
        state.recent.truncate(RECENT_EVENTS_CAP);

        id
    }

    /// Appends a follow-up payload chunk (hex, newline-joined) to an
    /// already-recorded event. No-op when the event has been evicted.
    pub fn append_payload(&self, id: Uuid, extra_hex: &str) {
        let mut state = self.state.lock().unwrap();
        if let Some(event) = state.recent.iter_mut().find(|e| e.id == id) {
            event.payload_hex.push('\n');
            event.payload_hex.push_str(extra_hex);
        }
    }

    /// Consistent point-in-time counter view.
    pub fn snapshot(&self) -> StatsSnapshot {
        let state = self.state.lock().unwrap();
        StatsSnapshot {
            total_attempts: state.total_attempts,
            unique_sources: state.unique_sources.len(),
            port_hits: state.port_hits.clone(),
            protocol_hits: state.protocol_hits.clone(),
        }
    }

    /// The `limit` most recent events, newest first. Returned by value;
    /// readers never hold references into the buffer.
    pub fn recent_attacks(&self, limit: usize) -> Vec<AttackEvent> {
        let state = self.state.lock().unwrap();
        state.recent.iter().take(limit).cloned().collect()
    }

    /// Newest event, for liveness polling.
    pub fn latest(&self) -> Option<AttackEvent> {
        let state = self.state.lock().unwrap();
        state.recent.front().cloned()
    }

    /// Top `n` ports by hit count, descending; ties break on the lower
    /// port number so the order is deterministic.
    pub fn top_ports(&self, n: usize) -> Vec<(u16, u64)> {
        let state = self.state.lock().unwrap();
        let mut ports: Vec<(u16, u64)> = state.port_hits.iter().map(|(p, c)| (*p, *c)).collect();
        ports.sort_by_key(|(port, count)| (Reverse(*count), *port));
        ports.truncate(n);
        ports
    }
}
