//! # Order Client
//!
//! The actor-backed [`OrderRepository`]. Wraps a `ResourceClient<Order>` and
//! turns framework failures back into [`OrderError`]s.
use crate::clients::actor_client::ActorClient;
use crate::clients::traits::{OrderQuery, OrderRepository};
use crate::framework::{FrameworkError, Query, ResourceClient};
use crate::model::{Order, OrderCreate, OrderId, OrderStatus, UserId};
use crate::order_actor::{OrderAction, OrderError};
use async_trait::async_trait;
use tracing::{debug, info, instrument};

/// Client for interacting with the Order actor.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self { inner }
    }

    async fn perform(&self, id: OrderId, action: OrderAction) -> Result<Order, OrderError> {
        self.inner
            .perform_action(id, action)
            .await
            .map_err(|e| match e {
                FrameworkError::NotFound(_) => OrderError::OrderNotFound(id),
                other => Self::map_error(other),
            })
    }
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    /// Entity errors come back as the [`OrderError`] the actor raised;
    /// everything else means the store itself is unreachable.
    fn map_error(e: FrameworkError) -> Self::Error {
        match e.downcast_entity::<OrderError>() {
            Ok(order_error) => order_error,
            Err(other) => OrderError::StoreUnavailable(other.to_string()),
        }
    }
}

#[async_trait]
impl OrderRepository for OrderClient {
    #[instrument(skip(self, params), fields(customer_id = %params.customer_id, lines = params.items.len()))]
    async fn insert(&self, params: OrderCreate) -> Result<Order, OrderError> {
        debug!(?params, "insert called");
        let order = self.inner.create(params).await.map_err(Self::map_error)?;
        info!(order_id = %order.id, total = %order.total, "Order stored");
        Ok(order)
    }

    async fn find(&self, id: OrderId) -> Result<Option<Order>, OrderError> {
        self.get(id).await
    }

    #[instrument(skip(self))]
    async fn list(&self, query: OrderQuery) -> Result<Vec<Order>, OrderError> {
        self.inner
            .list(Query::new(move |order: &Order| query.matches(order)))
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    async fn transition(
        &self,
        id: OrderId,
        expected: OrderStatus,
        next: OrderStatus,
    ) -> Result<Order, OrderError> {
        self.perform(id, OrderAction::Transition { expected, next }).await
    }

    #[instrument(skip(self))]
    async fn assign_driver(&self, id: OrderId, driver: UserId) -> Result<Order, OrderError> {
        self.perform(id, OrderAction::AssignDriver { driver }).await
    }

    #[instrument(skip(self))]
    async fn claim_and_pick_up(&self, id: OrderId, driver: UserId) -> Result<Order, OrderError> {
        self.perform(id, OrderAction::ClaimAndPickUp { driver }).await
    }
}
