//! Type-safe wrappers around [`ResourceClient`](crate::framework::ResourceClient).
//!
//! Each client implements one of the collaborator traits in [`traits`], which
//! is all the order service ever sees.

pub mod actor_client;
pub mod dish_client;
pub mod order_client;
pub mod restaurant_client;
pub mod traits;

pub use actor_client::ActorClient;
pub use dish_client::*;
pub use order_client::*;
pub use restaurant_client::*;
pub use traits::*;
