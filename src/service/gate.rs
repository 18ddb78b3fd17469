//! Which roles may call which operation, checked before any lookup.

use crate::model::{AuthenticatedUser, UserRole};
use crate::order_actor::OrderError;
use std::fmt::Display;

const ANY_ROLE: &[UserRole] = &[UserRole::Client, UserRole::Owner, UserRole::Delivery];

/// A public entry point of the order core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    CreateOrder,
    GetOrder,
    GetOrders,
    EditOrder,
    TakeOrder,
    CancelOrder,
    SubscribePendingOrders,
    SubscribeCookedOrders,
    SubscribeOrderUpdates,
}

impl Operation {
    pub fn permitted_roles(self) -> &'static [UserRole] {
        match self {
            Operation::CreateOrder | Operation::CancelOrder => &[UserRole::Client],
            Operation::TakeOrder | Operation::SubscribeCookedOrders => &[UserRole::Delivery],
            Operation::SubscribePendingOrders => &[UserRole::Owner],
            Operation::GetOrder
            | Operation::GetOrders
            | Operation::EditOrder
            | Operation::SubscribeOrderUpdates => ANY_ROLE,
        }
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}

pub fn require_role(user: &AuthenticatedUser, operation: Operation) -> Result<(), OrderError> {
    if operation.permitted_roles().contains(&user.role) {
        Ok(())
    } else {
        Err(OrderError::Forbidden(format!(
            "{} is not available to {} users.",
            operation, user.role
        )))
    }
}
