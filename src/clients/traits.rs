//! The seams between the order service and the things it talks to.
//!
//! The service only ever holds these traits, so the actor-backed clients can
//! be swapped for a database-backed repository or a remote menu service
//! without touching the orchestration code.

use crate::dish_actor::DishError;
use crate::model::{
    Dish, DishId, Order, OrderCreate, OrderId, OrderStatus, Restaurant, RestaurantId, UserId,
};
use crate::order_actor::OrderError;
use crate::restaurant_actor::RestaurantError;
use async_trait::async_trait;

/// Which orders to list.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderQuery {
    ByCustomer {
        customer: UserId,
        status: Option<OrderStatus>,
    },
    ByDriver {
        driver: UserId,
        status: Option<OrderStatus>,
    },
    ByRestaurants {
        restaurants: Vec<RestaurantId>,
        status: Option<OrderStatus>,
    },
}

impl OrderQuery {
    pub fn matches(&self, order: &Order) -> bool {
        let (owned, status) = match self {
            OrderQuery::ByCustomer { customer, status } => (order.customer_id == *customer, status),
            OrderQuery::ByDriver { driver, status } => (order.driver_id == Some(*driver), status),
            OrderQuery::ByRestaurants {
                restaurants,
                status,
            } => (restaurants.contains(&order.restaurant_id), status),
        };
        owned && status.map_or(true, |wanted| wanted == order.status)
    }
}

/// Persistence boundary for orders.
///
/// Every mutating method is a single conditional write: the precondition is
/// checked against the stored row in the same step that changes it, and a
/// failed precondition is reported as [`OrderError::Conflict`] with the row
/// left untouched.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Inserts the order together with its lines.
    async fn insert(&self, params: OrderCreate) -> Result<Order, OrderError>;

    async fn find(&self, id: OrderId) -> Result<Option<Order>, OrderError>;

    /// Matching orders in creation order.
    async fn list(&self, query: OrderQuery) -> Result<Vec<Order>, OrderError>;

    /// `SET status = next WHERE status = expected`.
    async fn transition(
        &self,
        id: OrderId,
        expected: OrderStatus,
        next: OrderStatus,
    ) -> Result<Order, OrderError>;

    /// `SET driver = ? WHERE driver IS NULL`.
    async fn assign_driver(&self, id: OrderId, driver: UserId) -> Result<Order, OrderError>;

    /// `SET driver = ?, status = PickedUp WHERE status = Cooked AND driver IN (NULL, ?)`.
    async fn claim_and_pick_up(&self, id: OrderId, driver: UserId) -> Result<Order, OrderError>;
}

/// Read access to menus.
#[async_trait]
pub trait MenuCatalog: Send + Sync {
    async fn dish(&self, id: DishId) -> Result<Option<Dish>, DishError>;
}

/// Read access to restaurants and their owners.
#[async_trait]
pub trait RestaurantDirectory: Send + Sync {
    async fn restaurant(&self, id: RestaurantId) -> Result<Option<Restaurant>, RestaurantError>;

    /// Ids of every restaurant `owner` owns.
    async fn owned_by(&self, owner: UserId) -> Result<Vec<RestaurantId>, RestaurantError>;
}
