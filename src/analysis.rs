//! Pure, stateless analysis of captured traffic.
//!
//! Components:
//! - `classifier`: ordered heuristic mapping (payload, port) to an attack
//!   category and severity.
//! - `responder`: static port-to-banner lookup.
//! - `origin`: loopback/self address filter.

pub mod classifier;
pub mod origin;
pub mod responder;
pub mod types;

pub use classifier::classify;
pub use origin::is_local;
pub use responder::banner_for;
pub use types::{AttackType, Severity};
