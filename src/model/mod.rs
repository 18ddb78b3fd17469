//! Pure data structures shared by the actors, the pricing engine and the service.
//!
//! [`Restaurant`], [`Dish`] and [`Order`] implement
//! [`ActorEntity`](crate::framework::ActorEntity) in their actor modules.

pub mod dish;
pub mod order;
pub mod restaurant;
pub mod user;

pub use dish::*;
pub use order::*;
pub use restaurant::*;
pub use user::*;
