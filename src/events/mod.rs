//! Real-time order notifications.
//!
//! - [`EventBus`] - injected pub/sub registry, one broadcast channel per topic
//! - [`Topic`] / [`OrderEvent`] - where events go and what they carry
//! - [`Subscription`] - a live `Stream` of events for one subscriber

pub mod bus;
pub mod subscription;
pub mod topic;

pub use bus::EventBus;
pub use subscription::Subscription;
pub use topic::{OrderEvent, Topic};
