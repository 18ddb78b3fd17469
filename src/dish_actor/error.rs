//! Error types for the Dish actor.

use crate::model::DishId;
use thiserror::Error;

/// Errors that can occur during menu operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DishError {
    /// The requested dish was not found.
    #[error("Dish not found: {0}")]
    NotFound(DishId),

    /// The dish data provided is invalid.
    #[error("Dish validation error: {0}")]
    ValidationError(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
