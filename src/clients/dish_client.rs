//! # Dish Client
//!
//! The actor-backed [`MenuCatalog`].
use crate::clients::actor_client::ActorClient;
use crate::clients::traits::MenuCatalog;
use crate::dish_actor::{DishAction, DishError};
use crate::framework::{FrameworkError, ResourceClient};
use crate::model::{Dish, DishCreate, DishId};
use async_trait::async_trait;
use rust_decimal::Decimal;
use tracing::{debug, instrument};

/// Client for interacting with the Dish actor.
#[derive(Clone)]
pub struct DishClient {
    inner: ResourceClient<Dish>,
}

impl DishClient {
    pub fn new(inner: ResourceClient<Dish>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, params), fields(name = %params.name))]
    pub async fn create_dish(&self, params: DishCreate) -> Result<Dish, DishError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// Changes a dish's base price.
    #[instrument(skip(self))]
    pub async fn update_price(&self, id: DishId, price: Decimal) -> Result<Dish, DishError> {
        debug!("Sending request");
        self.inner
            .perform_action(id, DishAction::UpdatePrice(price))
            .await
            .map_err(|e| match e {
                FrameworkError::NotFound(_) => DishError::NotFound(id),
                other => Self::map_error(other),
            })
    }
}

#[async_trait]
impl ActorClient<Dish> for DishClient {
    type Error = DishError;

    fn inner(&self) -> &ResourceClient<Dish> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.downcast_entity::<DishError>() {
            Ok(dish_error) => dish_error,
            Err(other) => DishError::ActorCommunicationError(other.to_string()),
        }
    }
}

#[async_trait]
impl MenuCatalog for DishClient {
    async fn dish(&self, id: DishId) -> Result<Option<Dish>, DishError> {
        self.get(id).await
    }
}
