pub mod aggregator;
pub mod types;

pub use aggregator::Aggregator;
pub use types::{AttackEvent, StatsSnapshot};
