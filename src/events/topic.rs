//! Topics and the payloads published on them.

use crate::model::{Order, OrderId, UserId};
use serde::Serialize;
use std::fmt::Display;

/// A named fan-out channel.
///
/// The two pool topics live as long as the bus; a per-order topic exists only
/// while someone is subscribed to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    /// New orders, for restaurant owners.
    PendingOrders,
    /// Orders ready for pickup, for drivers.
    CookedOrders,
    /// Every change to one order.
    OrderUpdates(OrderId),
}

impl Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Topic::PendingOrders => f.write_str("pendingOrders"),
            Topic::CookedOrders => f.write_str("cookedOrders"),
            Topic::OrderUpdates(id) => write!(f, "orderUpdates:{}", id.0),
        }
    }
}

/// What subscribers receive: always the full current order, never a diff.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum OrderEvent {
    /// A new order, addressed to the owner of its restaurant.
    Pending { owner_id: UserId, order: Order },
    /// An order that just became ready for pickup.
    Cooked { order: Order },
    /// Any change to an order.
    Updated { order: Order },
}

impl OrderEvent {
    pub fn order(&self) -> &Order {
        match self {
            OrderEvent::Pending { order, .. }
            | OrderEvent::Cooked { order }
            | OrderEvent::Updated { order } => order,
        }
    }

    /// The topic this event belongs on.
    pub fn topic(&self) -> Topic {
        match self {
            OrderEvent::Pending { .. } => Topic::PendingOrders,
            OrderEvent::Cooked { .. } => Topic::CookedOrders,
            OrderEvent::Updated { order } => Topic::OrderUpdates(order.id),
        }
    }
}
