use chrono::Utc;
use order_dispatch::framework::ActorEntity;
use order_dispatch::model::{
    AuthenticatedUser, Dish, DishChoice, DishId, DishOption, Order, OrderCreate, OrderId,
    OrderStatus, RestaurantId, SelectedOption, UserId, UserRole,
};
use order_dispatch::order_actor::transitions;
use order_dispatch::policy::VisibilityPolicy;
use order_dispatch::pricing::{
    compute_line_total, compute_order_total, normalize_selection, price_line,
};
use proptest::prelude::*;
use rust_decimal::Decimal;

fn money() -> impl Strategy<Value = Decimal> {
    (0i64..100_000).prop_map(|cents| Decimal::new(cents, 2))
}

fn dish_option() -> impl Strategy<Value = DishOption> {
    let flat = ("[A-D]", money()).prop_map(|(name, extra)| DishOption::flat(name, extra));
    let choices = (
        "[A-D]",
        prop::collection::vec(("[x-z]", prop::option::of(money())), 0..4),
    )
        .prop_map(|(name, choices)| {
            DishOption::with_choices(
                name,
                choices
                    .into_iter()
                    .map(|(choice, extra)| DishChoice::new(choice, extra))
                    .collect(),
            )
        });
    prop_oneof![flat, choices]
}

fn any_dish() -> impl Strategy<Value = Dish> {
    (money(), prop::collection::vec(dish_option(), 0..5)).prop_map(|(price, options)| Dish {
        id: DishId(1),
        restaurant_id: RestaurantId(1),
        name: "Dish".to_string(),
        price,
        options,
    })
}

/// Selections may name unknown options ("E") and unknown choices ("w").
fn selection() -> impl Strategy<Value = Vec<SelectedOption>> {
    prop::collection::vec(
        ("[A-E]", prop::option::of("[w-z]")).prop_map(|(name, choice)| SelectedOption {
            name,
            choice,
        }),
        0..6,
    )
}

fn any_status() -> impl Strategy<Value = OrderStatus> {
    prop::sample::select(OrderStatus::ALL.to_vec())
}

fn any_user() -> impl Strategy<Value = AuthenticatedUser> {
    (
        1u32..6,
        prop::sample::select(vec![UserRole::Client, UserRole::Owner, UserRole::Delivery]),
    )
        .prop_map(|(id, role)| AuthenticatedUser::new(id, role))
}

fn order(customer: u32, owner: u32, driver: Option<u32>, status: OrderStatus) -> Order {
    Order {
        id: OrderId(1),
        customer_id: UserId(customer),
        restaurant_id: RestaurantId(1),
        restaurant_owner_id: UserId(owner),
        driver_id: driver.map(UserId),
        status,
        total: Decimal::ZERO,
        items: Vec::new(),
        created_at: Utc::now(),
    }
}

proptest! {
    #[test]
    fn line_total_never_below_price(dish in any_dish(), selected in selection()) {
        prop_assert!(compute_line_total(&dish, &selected) >= dish.price);
    }

    #[test]
    fn empty_selection_costs_the_price(dish in any_dish()) {
        prop_assert_eq!(compute_line_total(&dish, &[]), dish.price);
    }

    #[test]
    fn normalizing_does_not_change_the_price(dish in any_dish(), selected in selection()) {
        let normalized = normalize_selection(&selected);
        prop_assert_eq!(
            compute_line_total(&dish, &normalized),
            compute_line_total(&dish, &selected)
        );

        let mut names: Vec<&str> = normalized.iter().map(|option| option.name.as_str()).collect();
        let before = names.len();
        names.sort_unstable();
        names.dedup();
        prop_assert_eq!(names.len(), before);
    }

    #[test]
    fn order_total_is_sum_of_lines(
        lines in prop::collection::vec((any_dish(), selection()), 1..5)
    ) {
        let items: Vec<_> = lines
            .iter()
            .map(|(dish, selected)| price_line(dish, selected))
            .collect();
        let expected: Decimal = lines
            .iter()
            .map(|(dish, selected)| compute_line_total(dish, selected))
            .sum();
        prop_assert_eq!(compute_order_total(&items), expected);

        let order = Order::from_create_params(
            OrderId(1),
            OrderCreate {
                customer_id: UserId(1),
                restaurant_id: RestaurantId(1),
                restaurant_owner_id: UserId(2),
                items,
            },
        )
        .unwrap();
        prop_assert_eq!(order.total, expected);
        prop_assert_eq!(order.status, OrderStatus::Pending);
        prop_assert_eq!(order.driver_id, None);
    }

    #[test]
    fn customers_never_see_each_others_orders(
        first in 1u32..100,
        second in 1u32..100,
        status in any_status(),
    ) {
        prop_assume!(first != second);
        let policy = VisibilityPolicy::new();
        let order = order(first, 200, None, status);
        prop_assert!(policy.can_view(&AuthenticatedUser::client(first), &order));
        prop_assert!(!policy.can_view(&AuthenticatedUser::client(second), &order));
    }

    #[test]
    fn only_table_edges_are_authorized(
        user in any_user(),
        from in any_status(),
        to in any_status(),
        driver in prop::option::of(1u32..6),
    ) {
        let order = order(1, 2, driver, from);
        if transitions::authorize(&user, &order, to).is_ok() {
            prop_assert!(transitions::find_edge(from, to).is_some());
            prop_assert!(!from.is_terminal());
            prop_assert!(transitions::allowed_targets(&user, &order).contains(&to));
        }
    }

    #[test]
    fn terminal_orders_have_no_way_out(
        user in any_user(),
        to in any_status(),
        driver in prop::option::of(1u32..6),
    ) {
        for from in [OrderStatus::Delivered, OrderStatus::Cancelled] {
            let order = order(1, 2, driver, from);
            prop_assert!(transitions::authorize(&user, &order, to).is_err());
            prop_assert!(transitions::allowed_targets(&user, &order).is_empty());
        }
    }
}
