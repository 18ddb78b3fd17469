use rust_decimal::Decimal;

/// Custom actions for the Dish entity.
#[derive(Debug, Clone, PartialEq)]
pub enum DishAction {
    /// Changes the base price. Orders already placed keep their line totals.
    UpdatePrice(Decimal),
}
