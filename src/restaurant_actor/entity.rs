//! [`ActorEntity`] implementation for [`Restaurant`].

use super::error::RestaurantError;
use crate::framework::ActorEntity;
use crate::model::{Restaurant, RestaurantCreate, RestaurantId};
use async_trait::async_trait;

#[async_trait]
impl ActorEntity for Restaurant {
    type Id = RestaurantId;
    type Create = RestaurantCreate;
    type Action = ();
    type ActionResult = ();
    type Context = ();
    type Error = RestaurantError;

    fn from_create_params(id: RestaurantId, params: RestaurantCreate) -> Result<Self, RestaurantError> {
        if params.name.trim().is_empty() {
            return Err(RestaurantError::ValidationError(
                "Restaurant name is required.".to_string(),
            ));
        }
        Ok(Restaurant {
            id,
            name: params.name,
            owner_id: params.owner_id,
        })
    }

    async fn handle_action(&mut self, _action: (), _ctx: &()) -> Result<(), RestaurantError> {
        Ok(())
    }
}
