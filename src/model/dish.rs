//! Menu entries and their customization tree.

use crate::model::RestaurantId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Dishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DishId(pub u32);

impl From<u32> for DishId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for DishId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "dish_{}", self.0)
    }
}

/// A priced value of a [`DishOption`], e.g. "Large (+2.00)".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DishChoice {
    pub name: String,
    pub extra: Option<Decimal>,
}

impl DishChoice {
    pub fn new(name: impl Into<String>, extra: Option<Decimal>) -> Self {
        Self {
            name: name.into(),
            extra,
        }
    }
}

/// A customization axis of a dish, e.g. "Size".
///
/// An option either carries a flat `extra` or a list of priced `choices`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DishOption {
    pub name: String,
    pub extra: Option<Decimal>,
    #[serde(default)]
    pub choices: Vec<DishChoice>,
}

impl DishOption {
    /// An option with a flat surcharge.
    pub fn flat(name: impl Into<String>, extra: Decimal) -> Self {
        Self {
            name: name.into(),
            extra: Some(extra),
            choices: Vec::new(),
        }
    }

    /// An option whose surcharge depends on the chosen value.
    pub fn with_choices(name: impl Into<String>, choices: Vec<DishChoice>) -> Self {
        Self {
            name: name.into(),
            extra: None,
            choices,
        }
    }

    pub fn choice(&self, name: &str) -> Option<&DishChoice> {
        self.choices.iter().find(|choice| choice.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dish {
    pub id: DishId,
    pub restaurant_id: RestaurantId,
    pub name: String,
    pub price: Decimal,
    pub options: Vec<DishOption>,
}

impl Dish {
    pub fn option(&self, name: &str) -> Option<&DishOption> {
        self.options.iter().find(|option| option.name == name)
    }
}

/// Payload for adding a dish to a restaurant's menu.
#[derive(Debug, Clone)]
pub struct DishCreate {
    pub restaurant_id: RestaurantId,
    pub name: String,
    pub price: Decimal,
    pub options: Vec<DishOption>,
}
