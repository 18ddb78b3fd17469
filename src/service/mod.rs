//! The public face of the order core.
//!
//! [`OrderService`] is what a transport calls; [`CoreOutput`] is what it
//! sends back.

pub mod gate;
pub mod order_service;
pub mod output;

pub use gate::Operation;
pub use order_service::OrderService;
pub use output::CoreOutput;
