//! [`ActorEntity`] implementation for [`Order`].
//!
//! The guards here are the store's half of every status change: the service
//! decides whether a caller may ask for an edge, this code decides whether
//! the row still allows it at the moment of the write.

use super::actions::OrderAction;
use super::error::OrderError;
use super::transitions;
use crate::framework::ActorEntity;
use crate::model::{Order, OrderCreate, OrderId, OrderStatus, UserId};
use crate::pricing::compute_order_total;
use async_trait::async_trait;
use chrono::Utc;

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Action = OrderAction;
    type ActionResult = Order;
    type Context = ();
    type Error = OrderError;

    /// Builds a Pending order; the total is derived from the priced lines.
    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, OrderError> {
        if params.items.is_empty() {
            return Err(OrderError::ValidationFailure(
                "An order needs at least one item.".to_string(),
            ));
        }
        Ok(Order {
            id,
            customer_id: params.customer_id,
            restaurant_id: params.restaurant_id,
            restaurant_owner_id: params.restaurant_owner_id,
            driver_id: None,
            status: OrderStatus::Pending,
            total: compute_order_total(&params.items),
            items: params.items,
            created_at: Utc::now(),
        })
    }

    async fn handle_action(&mut self, action: OrderAction, _ctx: &()) -> Result<Order, OrderError> {
        match action {
            OrderAction::Transition { expected, next } => {
                if transitions::find_edge(expected, next).is_none() {
                    return Err(OrderError::invalid_transition(expected, next));
                }
                if self.status != expected {
                    return Err(OrderError::Conflict(format!(
                        "{} is {}, not {}",
                        self.id, self.status, expected
                    )));
                }
                self.status = next;
            }
            OrderAction::AssignDriver { driver } => {
                if self.status.is_terminal() {
                    return Err(OrderError::InvalidTransition(format!(
                        "{} is {} and can no longer be taken.",
                        self.id, self.status
                    )));
                }
                if self.driver_id.is_some() {
                    return Err(already_taken());
                }
                self.driver_id = Some(driver);
            }
            OrderAction::ClaimAndPickUp { driver } => {
                if self.status != OrderStatus::Cooked {
                    return Err(OrderError::Conflict(format!(
                        "{} is {}, not {}",
                        self.id,
                        self.status,
                        OrderStatus::Cooked
                    )));
                }
                self.ensure_unclaimed_by_other(driver)?;
                self.driver_id = Some(driver);
                self.status = OrderStatus::PickedUp;
            }
        }
        Ok(self.clone())
    }
}

impl Order {
    fn ensure_unclaimed_by_other(&self, driver: UserId) -> Result<(), OrderError> {
        match self.driver_id {
            Some(current) if current != driver => Err(already_taken()),
            _ => Ok(()),
        }
    }
}

fn already_taken() -> OrderError {
    OrderError::Conflict("This order already has a driver.".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DishId, OrderLine, RestaurantId};
    use rust_decimal::Decimal;

    fn create() -> OrderCreate {
        let line = |cents| OrderLine {
            dish_id: DishId(1),
            selected_options: Vec::new(),
            line_total: Decimal::new(cents, 2),
        };
        OrderCreate {
            customer_id: UserId(1),
            restaurant_id: RestaurantId(1),
            restaurant_owner_id: UserId(2),
            items: vec![line(1200), line(850)],
        }
    }

    #[test]
    fn test_new_order_is_pending_with_summed_total() {
        let order = Order::from_create_params(OrderId(1), create()).unwrap();
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.total, Decimal::new(2050, 2));
        assert!(order.driver_id.is_none());
    }

    #[test]
    fn test_empty_order_is_rejected() {
        let mut params = create();
        params.items.clear();
        let err = Order::from_create_params(OrderId(1), params).unwrap_err();
        assert!(matches!(err, OrderError::ValidationFailure(_)));
    }

    #[tokio::test]
    async fn test_transition_guard_detects_stale_status() {
        let mut order = Order::from_create_params(OrderId(1), create()).unwrap();
        order
            .handle_action(
                OrderAction::Transition {
                    expected: OrderStatus::Pending,
                    next: OrderStatus::Cooking,
                },
                &(),
            )
            .await
            .unwrap();

        let err = order
            .handle_action(
                OrderAction::Transition {
                    expected: OrderStatus::Pending,
                    next: OrderStatus::Cancelled,
                },
                &(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, OrderError::Conflict(_)));
        assert_eq!(order.status, OrderStatus::Cooking);
    }

    #[tokio::test]
    async fn test_assign_driver_only_once() {
        let mut order = Order::from_create_params(OrderId(1), create()).unwrap();
        let assigned = order
            .handle_action(OrderAction::AssignDriver { driver: UserId(7) }, &())
            .await
            .unwrap();
        assert_eq!(assigned.driver_id, Some(UserId(7)));

        let err = order
            .handle_action(OrderAction::AssignDriver { driver: UserId(8) }, &())
            .await
            .unwrap_err();
        assert_eq!(err, already_taken());
    }

    #[tokio::test]
    async fn test_finished_order_with_driver_cannot_be_taken() {
        let mut order = Order::from_create_params(OrderId(1), create()).unwrap();
        order.status = OrderStatus::Delivered;
        order.driver_id = Some(UserId(7));

        let err = order
            .handle_action(OrderAction::AssignDriver { driver: UserId(8) }, &())
            .await
            .unwrap_err();
        assert!(matches!(err, OrderError::InvalidTransition(_)));
        assert_eq!(order.driver_id, Some(UserId(7)));
    }

    #[tokio::test]
    async fn test_claim_and_pick_up_rejects_other_driver() {
        let mut order = Order::from_create_params(OrderId(1), create()).unwrap();
        order.status = OrderStatus::Cooked;
        order.driver_id = Some(UserId(7));

        let err = order
            .handle_action(OrderAction::ClaimAndPickUp { driver: UserId(8) }, &())
            .await
            .unwrap_err();
        assert!(matches!(err, OrderError::Conflict(_)));

        let picked = order
            .handle_action(OrderAction::ClaimAndPickUp { driver: UserId(7) }, &())
            .await
            .unwrap();
        assert_eq!(picked.status, OrderStatus::PickedUp);
    }
}
