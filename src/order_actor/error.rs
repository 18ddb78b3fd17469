//! Error types for the Order actor and everything layered on it.

use crate::dish_actor::DishError;
use crate::model::{DishId, OrderId, OrderStatus, RestaurantId};
use crate::restaurant_actor::RestaurantError;
use serde::Serialize;
use thiserror::Error;

/// Coarse classification of an [`OrderError`], stable enough to hand to a
/// transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    NotFound,
    Forbidden,
    InvalidTransition,
    Conflict,
    ValidationFailure,
    Infrastructure,
}

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The requested order does not exist.
    #[error("Order not found: {0}")]
    OrderNotFound(OrderId),

    /// A dish referenced by the order does not exist.
    #[error("Dish not found: {0}")]
    DishNotFound(DishId),

    /// The restaurant referenced by the order does not exist.
    #[error("Restaurant not found: {0}")]
    RestaurantNotFound(RestaurantId),

    /// The caller is authenticated but not allowed to see or do this.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// The status change is not in the state machine, or not the caller's to make.
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    /// The row changed underneath the caller (lost race).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The request itself is malformed.
    #[error("Order validation error: {0}")]
    ValidationFailure(String),

    /// The backing store could not be reached.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),
}

impl OrderError {
    pub fn invalid_transition(from: OrderStatus, to: OrderStatus) -> Self {
        OrderError::InvalidTransition(format!("{from} -> {to} is not a permitted edge"))
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            OrderError::OrderNotFound(_)
            | OrderError::DishNotFound(_)
            | OrderError::RestaurantNotFound(_) => ErrorKind::NotFound,
            OrderError::Forbidden(_) => ErrorKind::Forbidden,
            OrderError::InvalidTransition(_) => ErrorKind::InvalidTransition,
            OrderError::Conflict(_) => ErrorKind::Conflict,
            OrderError::ValidationFailure(_) => ErrorKind::ValidationFailure,
            OrderError::StoreUnavailable(_) => ErrorKind::Infrastructure,
        }
    }
}

impl From<DishError> for OrderError {
    fn from(e: DishError) -> Self {
        match e {
            DishError::NotFound(id) => OrderError::DishNotFound(id),
            DishError::ValidationError(msg) => OrderError::ValidationFailure(msg),
            DishError::ActorCommunicationError(msg) => OrderError::StoreUnavailable(msg),
        }
    }
}

impl From<RestaurantError> for OrderError {
    fn from(e: RestaurantError) -> Self {
        match e {
            RestaurantError::NotFound(id) => OrderError::RestaurantNotFound(id),
            RestaurantError::ValidationError(msg) => OrderError::ValidationFailure(msg),
            RestaurantError::ActorCommunicationError(msg) => OrderError::StoreUnavailable(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_and_forbidden_are_distinct_kinds() {
        assert_eq!(OrderError::OrderNotFound(OrderId(1)).kind(), ErrorKind::NotFound);
        assert_eq!(OrderError::Forbidden("nope".into()).kind(), ErrorKind::Forbidden);
    }

    #[test]
    fn test_collaborator_errors_keep_their_meaning() {
        assert_eq!(
            OrderError::from(DishError::NotFound(DishId(4))),
            OrderError::DishNotFound(DishId(4))
        );
        assert_eq!(
            OrderError::from(RestaurantError::ActorCommunicationError("closed".into())).kind(),
            ErrorKind::Infrastructure
        );
    }
}
