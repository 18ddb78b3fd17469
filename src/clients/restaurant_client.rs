//! # Restaurant Client
//!
//! The actor-backed [`RestaurantDirectory`].
use crate::clients::actor_client::ActorClient;
use crate::clients::traits::RestaurantDirectory;
use crate::framework::{FrameworkError, Query, ResourceClient};
use crate::model::{Restaurant, RestaurantCreate, RestaurantId, UserId};
use crate::restaurant_actor::RestaurantError;
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Restaurant actor.
#[derive(Clone)]
pub struct RestaurantClient {
    inner: ResourceClient<Restaurant>,
}

impl RestaurantClient {
    pub fn new(inner: ResourceClient<Restaurant>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, params), fields(name = %params.name, owner_id = %params.owner_id))]
    pub async fn create_restaurant(&self, params: RestaurantCreate) -> Result<Restaurant, RestaurantError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }
}

#[async_trait]
impl ActorClient<Restaurant> for RestaurantClient {
    type Error = RestaurantError;

    fn inner(&self) -> &ResourceClient<Restaurant> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.downcast_entity::<RestaurantError>() {
            Ok(restaurant_error) => restaurant_error,
            Err(other) => RestaurantError::ActorCommunicationError(other.to_string()),
        }
    }
}

#[async_trait]
impl RestaurantDirectory for RestaurantClient {
    async fn restaurant(&self, id: RestaurantId) -> Result<Option<Restaurant>, RestaurantError> {
        self.get(id).await
    }

    #[instrument(skip(self))]
    async fn owned_by(&self, owner: UserId) -> Result<Vec<RestaurantId>, RestaurantError> {
        let owned = self
            .inner
            .list(Query::new(move |restaurant: &Restaurant| restaurant.owner_id == owner))
            .await
            .map_err(Self::map_error)?;
        Ok(owned.into_iter().map(|restaurant| restaurant.id).collect())
    }
}
