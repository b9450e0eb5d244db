//! Connection intake.
//!
//! The dispatcher starts one [`listener::PortListener`] per configured
//! port; each accepted connection runs an independent
//! [`handler::handle_connection`] task feeding the shared aggregator.

pub mod dispatcher;
pub mod handler;
pub mod listener;

pub use dispatcher::Dispatcher;
pub use handler::HandlerContext;
pub use listener::PortListener;
