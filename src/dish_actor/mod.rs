//! # Dish Actor
//!
//! In-process stand-in for the menu collaborator. The order core only reads
//! dishes; creation and price updates exist so the system can be seeded and
//! so tests can change a menu after an order was placed.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](crate::framework::ActorEntity) implementation for [`Dish`]
//! - [`actions`] - [`DishAction`]
//! - [`error`] - [`DishError`] type for type-safe error handling
//! - [`new()`] - Factory function that creates the actor and client

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::DishClient;
use crate::framework::ResourceActor;
use crate::model::Dish;

/// Creates a new Dish actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Dish>, DishClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, DishClient::new(generic_client))
}
