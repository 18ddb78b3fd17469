//! # Order Actor
//!
//! The order store and the order state machine.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](crate::framework::ActorEntity) implementation for [`Order`]
//! - [`actions`] - [`OrderAction`], the guarded updates the store accepts
//! - [`transitions`] - the edge table and who may drive each edge
//! - [`error`] - [`OrderError`] and its [`ErrorKind`] classification
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Usage
//!
//! ```rust,ignore
//! let (actor, orders) = order_dispatch::order_actor::new(32);
//! tokio::spawn(actor.run(()));
//!
//! let order = orders.insert(params).await?;
//! orders.transition(order.id, OrderStatus::Pending, OrderStatus::Cooking).await?;
//! ```

pub mod actions;
pub mod entity;
pub mod error;
pub mod transitions;

pub use actions::*;
pub use error::*;

use crate::clients::OrderClient;
use crate::framework::ResourceActor;
use crate::model::Order;

/// Creates a new Order actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Order>, OrderClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, OrderClient::new(generic_client))
}
