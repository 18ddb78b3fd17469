//! # Pricing
//!
//! Pure functions that price an order line from a dish and the customer's
//! selection. No I/O, no failure modes.
//!
//! A line starts at the dish price and adds, for each selected option:
//! - nothing, when the dish has no option of that name;
//! - the option's flat `extra`, when it has one;
//! - otherwise the `extra` of the matching choice, or nothing when the
//!   choice is unknown or unpriced.
//!
//! Unmatched options and choices are ignored rather than rejected.

use crate::model::{Dish, DishOption, OrderLine, SelectedOption};
use rust_decimal::Decimal;

/// Collapses options that share a name, keeping the last selection for each
/// name at the position the name first appeared.
pub fn normalize_selection(selected: &[SelectedOption]) -> Vec<SelectedOption> {
    let mut normalized: Vec<SelectedOption> = Vec::with_capacity(selected.len());
    for option in selected {
        match normalized.iter_mut().find(|kept| kept.name == option.name) {
            Some(kept) => *kept = option.clone(),
            None => normalized.push(option.clone()),
        }
    }
    normalized
}

/// Price of one dish with the given selection.
pub fn compute_line_total(dish: &Dish, selected: &[SelectedOption]) -> Decimal {
    normalize_selection(selected)
        .iter()
        .fold(dish.price, |total, option| total + option_extra(dish, option))
}

/// Sum of all line totals.
pub fn compute_order_total(lines: &[OrderLine]) -> Decimal {
    lines.iter().map(|line| line.line_total).sum()
}

/// Prices a line and stores the normalized selection alongside it, so the
/// persisted options are exactly the ones that were charged for.
pub fn price_line(dish: &Dish, selected: &[SelectedOption]) -> OrderLine {
    let selected_options = normalize_selection(selected);
    let line_total = compute_line_total(dish, &selected_options);
    OrderLine {
        dish_id: dish.id,
        selected_options,
        line_total,
    }
}

fn option_extra(dish: &Dish, selected: &SelectedOption) -> Decimal {
    let Some(option) = dish.option(&selected.name) else {
        return Decimal::ZERO;
    };
    match option.extra {
        // A zero flat extra falls through to the choices.
        Some(extra) if !extra.is_zero() => extra,
        _ => choice_extra(option, selected.choice.as_deref()),
    }
}

fn choice_extra(option: &DishOption, choice: Option<&str>) -> Decimal {
    choice
        .and_then(|name| option.choice(name))
        .and_then(|choice| choice.extra)
        .unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DishChoice, DishId, RestaurantId};

    fn pizza() -> Dish {
        Dish {
            id: DishId(1),
            restaurant_id: RestaurantId(1),
            name: "Pizza".to_string(),
            price: Decimal::new(1000, 2),
            options: vec![
                DishOption::with_choices(
                    "Size",
                    vec![
                        DishChoice::new("Large", Some(Decimal::new(200, 2))),
                        DishChoice::new("Small", None),
                    ],
                ),
                DishOption::flat("Extra cheese", Decimal::new(150, 2)),
            ],
        }
    }

    #[test]
    fn test_choice_extra_is_added() {
        let total = compute_line_total(&pizza(), &[SelectedOption::choice("Size", "Large")]);
        assert_eq!(total, Decimal::new(1200, 2));
    }

    #[test]
    fn test_flat_extra_is_added() {
        let total = compute_line_total(
            &pizza(),
            &[
                SelectedOption::flat("Extra cheese"),
                SelectedOption::choice("Size", "Large"),
            ],
        );
        assert_eq!(total, Decimal::new(1350, 2));
    }

    #[test]
    fn test_empty_selection_is_dish_price() {
        assert_eq!(compute_line_total(&pizza(), &[]), Decimal::new(1000, 2));
    }

    #[test]
    fn test_unmatched_option_and_choice_are_ignored() {
        let total = compute_line_total(
            &pizza(),
            &[
                SelectedOption::flat("Pineapple"),
                SelectedOption::choice("Size", "Gigantic"),
                SelectedOption::choice("Size", "Small"),
            ],
        );
        assert_eq!(total, Decimal::new(1000, 2));
    }

    #[test]
    fn test_zero_flat_extra_falls_through_to_choices() {
        let mut dish = pizza();
        dish.options[0].extra = Some(Decimal::ZERO);
        let total = compute_line_total(&dish, &[SelectedOption::choice("Size", "Large")]);
        assert_eq!(total, Decimal::new(1200, 2));
    }

    #[test]
    fn test_duplicate_option_names_last_wins() {
        let selection = [
            SelectedOption::choice("Size", "Large"),
            SelectedOption::flat("Extra cheese"),
            SelectedOption::choice("Size", "Small"),
        ];
        let normalized = normalize_selection(&selection);
        assert_eq!(
            normalized,
            vec![
                SelectedOption::choice("Size", "Small"),
                SelectedOption::flat("Extra cheese"),
            ]
        );
        assert_eq!(compute_line_total(&pizza(), &selection), Decimal::new(1150, 2));
    }

    #[test]
    fn test_price_line_stores_normalized_selection() {
        let line = price_line(
            &pizza(),
            &[SelectedOption::flat("Extra cheese"), SelectedOption::flat("Extra cheese")],
        );
        assert_eq!(line.dish_id, DishId(1));
        assert_eq!(line.selected_options.len(), 1);
        assert_eq!(line.line_total, Decimal::new(1150, 2));
    }

    #[test]
    fn test_order_total_sums_lines() {
        let line = |cents| OrderLine {
            dish_id: DishId(1),
            selected_options: Vec::new(),
            line_total: Decimal::new(cents, 2),
        };
        assert_eq!(compute_order_total(&[line(1200), line(850)]), Decimal::new(2050, 2));
        assert_eq!(compute_order_total(&[]), Decimal::ZERO);
    }
}
