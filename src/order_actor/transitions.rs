//! The order state machine as data.
//!
//! Every permitted status change is one row of [`EDGES`]. A row names the
//! statuses it connects and the [`Authority`] that may drive it; anything not
//! in the table is an invalid transition.

use crate::model::{AuthenticatedUser, Order, OrderStatus, UserRole};
use crate::order_actor::OrderError;

/// Who may drive an edge of the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Authority {
    /// The owner of the order's restaurant.
    RestaurantOwner,
    /// The customer who placed the order.
    Customer,
    /// Any driver, as long as the order is unclaimed or already theirs.
    ClaimingDriver,
    /// The driver assigned to the order.
    AssignedDriver,
}

impl Authority {
    pub fn permits(self, user: &AuthenticatedUser, order: &Order) -> bool {
        match (self, user.role) {
            (Authority::RestaurantOwner, UserRole::Owner) => order.restaurant_owner_id == user.id,
            (Authority::Customer, UserRole::Client) => order.customer_id == user.id,
            (Authority::ClaimingDriver, UserRole::Delivery) => {
                order.driver_id.is_none() || order.driver_id == Some(user.id)
            }
            (Authority::AssignedDriver, UserRole::Delivery) => order.driver_id == Some(user.id),
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub from: OrderStatus,
    pub to: OrderStatus,
    pub authority: Authority,
}

pub const EDGES: [Edge; 5] = [
    Edge {
        from: OrderStatus::Pending,
        to: OrderStatus::Cooking,
        authority: Authority::RestaurantOwner,
    },
    Edge {
        from: OrderStatus::Cooking,
        to: OrderStatus::Cooked,
        authority: Authority::RestaurantOwner,
    },
    Edge {
        from: OrderStatus::Cooked,
        to: OrderStatus::PickedUp,
        authority: Authority::ClaimingDriver,
    },
    Edge {
        from: OrderStatus::PickedUp,
        to: OrderStatus::Delivered,
        authority: Authority::AssignedDriver,
    },
    Edge {
        from: OrderStatus::Pending,
        to: OrderStatus::Cancelled,
        authority: Authority::Customer,
    },
];

pub fn find_edge(from: OrderStatus, to: OrderStatus) -> Option<&'static Edge> {
    EDGES.iter().find(|edge| edge.from == from && edge.to == to)
}

/// Statuses `user` may move `order` to from where it is now.
pub fn allowed_targets(user: &AuthenticatedUser, order: &Order) -> Vec<OrderStatus> {
    EDGES
        .iter()
        .filter(|edge| edge.from == order.status && edge.authority.permits(user, order))
        .map(|edge| edge.to)
        .collect()
}

/// Checks that `user` may move `order` to `next`.
///
/// Fails with [`OrderError::InvalidTransition`] both for edges missing from
/// the table and for edges the user has no authority over.
pub fn authorize(
    user: &AuthenticatedUser,
    order: &Order,
    next: OrderStatus,
) -> Result<&'static Edge, OrderError> {
    let edge = find_edge(order.status, next)
        .ok_or_else(|| OrderError::invalid_transition(order.status, next))?;
    if !edge.authority.permits(user, order) {
        return Err(OrderError::InvalidTransition(format!(
            "{} may not move {} from {} to {}",
            user.role, order.id, order.status, next
        )));
    }
    Ok(edge)
}
