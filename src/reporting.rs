//! Reporting surfaces fed by the aggregator.
//!
//! - `log_sink`: append-only text log, one block per recorded attack.
//! - `web_server`: warp dashboard and JSON API, read-only.

pub mod log_sink;
pub mod web_server;

pub use log_sink::AttackLog;
pub use web_server::WebServer;
