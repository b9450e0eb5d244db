//! Nectar: a multi-port network decoy.
//!
//! Binds listeners on commonly-attacked service ports, captures the first
//! bytes from each connecting peer, classifies them into an attack
//! category, answers with a plausible service banner, and keeps
//! deduplicated in-memory statistics exposed through a log file and a
//! small HTTP dashboard.

pub mod aggregation;
pub mod analysis;
pub mod configuration;
pub mod error_handling;
pub mod network;
pub mod reporting;
