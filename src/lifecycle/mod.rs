//! Startup, wiring and shutdown of the order system.

pub mod config;
pub mod order_system;
pub mod tracing;

pub use config::SystemConfig;
pub use order_system::OrderSystem;
pub use self::tracing::setup_tracing;
