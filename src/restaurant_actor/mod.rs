//! # Restaurant Actor
//!
//! In-process stand-in for the restaurant collaborator: who owns which
//! restaurant. Restaurants have no custom actions.

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::RestaurantClient;
use crate::framework::ResourceActor;
use crate::model::Restaurant;

/// Creates a new Restaurant actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Restaurant>, RestaurantClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, RestaurantClient::new(generic_client))
}
