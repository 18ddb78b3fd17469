/// Represents a customer order, the aggregate root of the core.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](crate::framework::ActorEntity) trait
/// in [`order_actor`](crate::order_actor), which makes the order actor the
/// single source of truth for order rows.
///
/// See [`OrderCreate`] for the creation payload and
/// [`OrderAction`](crate::order_actor::OrderAction) for the guarded updates.
use crate::model::{DishId, RestaurantId, UserId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OrderId(pub u32);

impl From<u32> for OrderId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "order_{}", self.0)
    }
}

/// Where an order is in its lifecycle.
///
/// `Pending -> Cooking -> Cooked -> PickedUp -> Delivered`, plus
/// `Pending -> Cancelled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    Pending,
    Cooking,
    Cooked,
    PickedUp,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 6] = [
        OrderStatus::Pending,
        OrderStatus::Cooking,
        OrderStatus::Cooked,
        OrderStatus::PickedUp,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    /// No transition leaves a terminal status.
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Cooking => "Cooking",
            OrderStatus::Cooked => "Cooked",
            OrderStatus::PickedUp => "PickedUp",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        };
        f.write_str(name)
    }
}

/// One customization picked by the customer: an option name and, for
/// options with choices, the chosen value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedOption {
    pub name: String,
    pub choice: Option<String>,
}

impl SelectedOption {
    pub fn flat(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            choice: None,
        }
    }

    pub fn choice(name: impl Into<String>, choice: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            choice: Some(choice.into()),
        }
    }
}

/// What the customer asks for: a dish and its selected options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItemInput {
    pub dish_id: DishId,
    #[serde(default)]
    pub options: Vec<SelectedOption>,
}

impl OrderItemInput {
    pub fn new(dish_id: DishId, options: Vec<SelectedOption>) -> Self {
        Self { dish_id, options }
    }
}

/// One priced dish within an order.
///
/// `line_total` is fixed when the order is placed and never recomputed,
/// even if the menu changes later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub dish_id: DishId,
    pub selected_options: Vec<SelectedOption>,
    pub line_total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub customer_id: UserId,
    pub restaurant_id: RestaurantId,
    /// Owner of the restaurant at the time the order was placed.
    pub restaurant_owner_id: UserId,
    pub driver_id: Option<UserId>,
    pub status: OrderStatus,
    pub total: Decimal,
    pub items: Vec<OrderLine>,
    pub created_at: DateTime<Utc>,
}

/// Payload for inserting a new order together with its lines.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub customer_id: UserId,
    pub restaurant_id: RestaurantId,
    pub restaurant_owner_id: UserId,
    pub items: Vec<OrderLine>,
}
