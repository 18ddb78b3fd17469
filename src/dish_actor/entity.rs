//! [`ActorEntity`] implementation for [`Dish`].
//!
//! Creation enforces the authoring rules pricing relies on: prices and
//! extras are never negative, and an option does not carry a flat extra and
//! priced choices at the same time.

use super::actions::DishAction;
use super::error::DishError;
use crate::framework::ActorEntity;
use crate::model::{Dish, DishCreate, DishId, DishOption};
use async_trait::async_trait;
use rust_decimal::Decimal;

#[async_trait]
impl ActorEntity for Dish {
    type Id = DishId;
    type Create = DishCreate;
    type Action = DishAction;
    type ActionResult = Dish;
    type Context = ();
    type Error = DishError;

    fn from_create_params(id: DishId, params: DishCreate) -> Result<Self, DishError> {
        if params.name.trim().is_empty() {
            return Err(DishError::ValidationError("Dish name is required.".to_string()));
        }
        ensure_non_negative(params.price, &params.name)?;
        for option in &params.options {
            validate_option(option)?;
        }
        Ok(Dish {
            id,
            restaurant_id: params.restaurant_id,
            name: params.name,
            price: params.price,
            options: params.options,
        })
    }

    async fn handle_action(&mut self, action: DishAction, _ctx: &()) -> Result<Dish, DishError> {
        match action {
            DishAction::UpdatePrice(price) => {
                ensure_non_negative(price, &self.name)?;
                self.price = price;
            }
        }
        Ok(self.clone())
    }
}

fn validate_option(option: &DishOption) -> Result<(), DishError> {
    if option.name.trim().is_empty() {
        return Err(DishError::ValidationError("Option name is required.".to_string()));
    }
    let flat = option.extra.filter(|extra| !extra.is_zero());
    if flat.is_some() && !option.choices.is_empty() {
        return Err(DishError::ValidationError(format!(
            "Option '{}' has both a flat extra and choices.",
            option.name
        )));
    }
    if let Some(extra) = option.extra {
        ensure_non_negative(extra, &option.name)?;
    }
    for choice in &option.choices {
        if let Some(extra) = choice.extra {
            ensure_non_negative(extra, &choice.name)?;
        }
    }
    Ok(())
}

fn ensure_non_negative(amount: Decimal, what: &str) -> Result<(), DishError> {
    if amount < Decimal::ZERO {
        return Err(DishError::ValidationError(format!(
            "'{what}' has a negative price {amount}."
        )));
    }
    Ok(())
}
