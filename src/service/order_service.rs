//! # Order Service
//!
//! Orchestrates every public order operation:
//!
//! ```text
//! request ─▶ role gate ─▶ lookups ─▶ pricing (create) ─▶ repository write ─▶ publish
//! ```
//!
//! Writes go through the [`OrderRepository`]'s conditional updates, so two
//! callers racing on one order are decided by the store, not here. Events
//! are published only after the write has returned, and a publish that
//! reaches nobody is not an error.

use crate::clients::{MenuCatalog, OrderQuery, OrderRepository, RestaurantDirectory};
use crate::events::{EventBus, OrderEvent, Subscription, Topic};
use crate::model::{
    AuthenticatedUser, Dish, DishId, Order, OrderCreate, OrderId, OrderItemInput, OrderLine,
    OrderStatus, RestaurantId, UserRole,
};
use crate::order_actor::transitions::{self, Authority};
use crate::order_actor::OrderError;
use crate::policy::VisibilityPolicy;
use crate::pricing::price_line;
use crate::service::gate::{require_role, Operation};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, instrument};

#[derive(Clone)]
pub struct OrderService {
    orders: Arc<dyn OrderRepository>,
    menu: Arc<dyn MenuCatalog>,
    restaurants: Arc<dyn RestaurantDirectory>,
    events: EventBus,
    policy: VisibilityPolicy,
}

impl OrderService {
    pub fn new(
        orders: impl OrderRepository + 'static,
        menu: impl MenuCatalog + 'static,
        restaurants: impl RestaurantDirectory + 'static,
        events: EventBus,
    ) -> Self {
        Self {
            orders: Arc::new(orders),
            menu: Arc::new(menu),
            restaurants: Arc::new(restaurants),
            events,
            policy: VisibilityPolicy::default(),
        }
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Places an order and announces it to the restaurant's owner.
    ///
    /// Every reference is resolved and every line priced before anything is
    /// written, so a bad dish id leaves no trace.
    #[instrument(skip(self, customer, items), fields(customer_id = %customer.id, items = items.len()))]
    pub async fn create_order(
        &self,
        customer: &AuthenticatedUser,
        restaurant_id: RestaurantId,
        items: Vec<OrderItemInput>,
    ) -> Result<OrderId, OrderError> {
        require_role(customer, Operation::CreateOrder)?;
        validate_items(&items)?;

        let restaurant = self
            .restaurants
            .restaurant(restaurant_id)
            .await?
            .ok_or(OrderError::RestaurantNotFound(restaurant_id))?;

        let mut dishes: HashMap<DishId, Dish> = HashMap::new();
        let mut lines: Vec<OrderLine> = Vec::with_capacity(items.len());
        for item in &items {
            if !dishes.contains_key(&item.dish_id) {
                let dish = self
                    .menu
                    .dish(item.dish_id)
                    .await?
                    .ok_or(OrderError::DishNotFound(item.dish_id))?;
                if dish.restaurant_id != restaurant.id {
                    return Err(OrderError::ValidationFailure(format!(
                        "{} is not on the menu of {}.",
                        dish.id, restaurant.id
                    )));
                }
                dishes.insert(item.dish_id, dish);
            }
            if let Some(dish) = dishes.get(&item.dish_id) {
                lines.push(price_line(dish, &item.options));
            }
        }

        let order = self
            .orders
            .insert(OrderCreate {
                customer_id: customer.id,
                restaurant_id: restaurant.id,
                restaurant_owner_id: restaurant.owner_id,
                items: lines,
            })
            .await?;
        info!(order_id = %order.id, total = %order.total, "Order created");

        let receivers = self.events.publish(OrderEvent::Pending {
            owner_id: restaurant.owner_id,
            order: order.clone(),
        });
        debug!(order_id = %order.id, receivers, "Pending order announced");

        Ok(order.id)
    }

    /// Reads one order the caller is allowed to see.
    ///
    /// A missing order is `OrderNotFound`; an existing order the caller may
    /// not see is `Forbidden`.
    #[instrument(skip(self, user), fields(user_id = %user.id, role = %user.role))]
    pub async fn get_order(&self, user: &AuthenticatedUser, id: OrderId) -> Result<Order, OrderError> {
        require_role(user, Operation::GetOrder)?;
        let order = self.load(id).await?;
        if !self.policy.can_view(user, &order) {
            return Err(forbidden());
        }
        Ok(order)
    }

    /// The caller's orders: placed by a client, assigned to a driver, or
    /// received by any restaurant an owner owns.
    #[instrument(skip(self, user), fields(user_id = %user.id, role = %user.role))]
    pub async fn get_orders(
        &self,
        user: &AuthenticatedUser,
        status: Option<OrderStatus>,
    ) -> Result<Vec<Order>, OrderError> {
        require_role(user, Operation::GetOrders)?;
        let query = match user.role {
            UserRole::Client => OrderQuery::ByCustomer {
                customer: user.id,
                status,
            },
            UserRole::Delivery => OrderQuery::ByDriver {
                driver: user.id,
                status,
            },
            UserRole::Owner => {
                let restaurants = self.restaurants.owned_by(user.id).await?;
                if restaurants.is_empty() {
                    return Ok(Vec::new());
                }
                OrderQuery::ByRestaurants {
                    restaurants,
                    status,
                }
            }
        };
        self.orders.list(query).await
    }

    /// Moves an order one edge along the state machine.
    ///
    /// The caller must be able to see the order or hold an edge out of its
    /// current status (a driver picking up an unclaimed cooked order).
    #[instrument(skip(self, user), fields(user_id = %user.id, role = %user.role))]
    pub async fn edit_order(
        &self,
        user: &AuthenticatedUser,
        id: OrderId,
        next: OrderStatus,
    ) -> Result<Order, OrderError> {
        require_role(user, Operation::EditOrder)?;
        self.apply_transition(user, id, next).await
    }

    /// Claims an order for the calling driver. Status is left as it is.
    #[instrument(skip(self, driver), fields(driver_id = %driver.id))]
    pub async fn take_order(&self, driver: &AuthenticatedUser, id: OrderId) -> Result<Order, OrderError> {
        require_role(driver, Operation::TakeOrder)?;
        let order = self.load(id).await?;
        if order.status.is_terminal() {
            return Err(OrderError::InvalidTransition(format!(
                "{} is {} and can no longer be taken.",
                order.id, order.status
            )));
        }
        if order.driver_id.is_some() {
            return Err(OrderError::Conflict("This order already has a driver.".to_string()));
        }

        let updated = self.orders.assign_driver(id, driver.id).await?;
        info!(order_id = %updated.id, status = %updated.status, "Order taken");
        // A take never enters Cooked, whatever the status was when read.
        self.publish_update(&updated);
        Ok(updated)
    }

    /// Cancels a pending order on behalf of the customer who placed it.
    #[instrument(skip(self, customer), fields(customer_id = %customer.id))]
    pub async fn cancel_order(&self, customer: &AuthenticatedUser, id: OrderId) -> Result<Order, OrderError> {
        require_role(customer, Operation::CancelOrder)?;
        self.apply_transition(customer, id, OrderStatus::Cancelled).await
    }

    /// New orders for the calling owner's restaurants.
    pub fn subscribe_pending_orders(&self, owner: &AuthenticatedUser) -> Result<Subscription, OrderError> {
        require_role(owner, Operation::SubscribePendingOrders)?;
        Ok(self.events.subscribe_pending(owner.id))
    }

    /// Orders that become ready for pickup.
    pub fn subscribe_cooked_orders(&self, driver: &AuthenticatedUser) -> Result<Subscription, OrderError> {
        require_role(driver, Operation::SubscribeCookedOrders)?;
        Ok(self.events.subscribe(Topic::CookedOrders))
    }

    /// Changes to one order. Access is checked now, with the same rules as
    /// [`get_order`](Self::get_order).
    #[instrument(skip(self, user), fields(user_id = %user.id, role = %user.role))]
    pub async fn subscribe_order_updates(
        &self,
        user: &AuthenticatedUser,
        id: OrderId,
    ) -> Result<Subscription, OrderError> {
        require_role(user, Operation::SubscribeOrderUpdates)?;
        self.get_order(user, id).await?;
        Ok(self.events.subscribe(Topic::OrderUpdates(id)))
    }

    async fn load(&self, id: OrderId) -> Result<Order, OrderError> {
        self.orders.find(id).await?.ok_or(OrderError::OrderNotFound(id))
    }

    async fn apply_transition(
        &self,
        user: &AuthenticatedUser,
        id: OrderId,
        next: OrderStatus,
    ) -> Result<Order, OrderError> {
        let order = self.load(id).await?;
        if !self.policy.can_view(user, &order) && !self.policy.can_mutate_status(user, &order) {
            return Err(forbidden());
        }
        let edge = transitions::authorize(user, &order, next)?;

        let updated = match edge.authority {
            Authority::ClaimingDriver => self.orders.claim_and_pick_up(id, user.id).await?,
            _ => self.orders.transition(id, order.status, next).await?,
        };
        info!(order_id = %updated.id, from = %order.status, status = %updated.status, "Order status changed");
        self.announce(order.status, &updated);
        Ok(updated)
    }

    /// Publishes a committed change: always to the order's own topic, and to
    /// the driver pool when it just became cooked.
    fn announce(&self, previous: OrderStatus, order: &Order) {
        if order.status == OrderStatus::Cooked && previous != OrderStatus::Cooked {
            let receivers = self.events.publish(OrderEvent::Cooked {
                order: order.clone(),
            });
            debug!(order_id = %order.id, receivers, "Cooked order announced");
        }
        self.publish_update(order);
    }

    fn publish_update(&self, order: &Order) {
        let receivers = self.events.publish(OrderEvent::Updated {
            order: order.clone(),
        });
        debug!(order_id = %order.id, receivers, "Order update published");
    }
}

fn forbidden() -> OrderError {
    OrderError::Forbidden("You cannot see that.".to_string())
}

fn validate_items(items: &[OrderItemInput]) -> Result<(), OrderError> {
    if items.is_empty() {
        return Err(OrderError::ValidationFailure(
            "An order needs at least one item.".to_string(),
        ));
    }
    let blank_option = items
        .iter()
        .flat_map(|item| &item.options)
        .any(|option| option.name.trim().is_empty());
    if blank_option {
        return Err(OrderError::ValidationFailure(
            "Option names must not be blank.".to_string(),
        ));
    }
    Ok(())
}
