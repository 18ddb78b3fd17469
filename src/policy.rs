//! # Visibility Policy
//!
//! Who may see an order, and who may move it along the state machine.
//!
//! Visibility is a table from [`UserRole`] to a predicate over the order, so
//! adding a role means adding a row rather than another branch in every
//! operation. Mutation rights come from the transition table in
//! [`order_actor::transitions`](crate::order_actor::transitions).

use crate::model::{AuthenticatedUser, Order, UserRole};
use crate::order_actor::transitions;

type Visibility = fn(&AuthenticatedUser, &Order) -> bool;

/// Role-keyed visibility rules.
#[derive(Clone)]
pub struct VisibilityPolicy {
    rules: Vec<(UserRole, Visibility)>,
}

impl Default for VisibilityPolicy {
    fn default() -> Self {
        Self {
            rules: vec![
                (UserRole::Client, placed_by as Visibility),
                (UserRole::Delivery, assigned_to as Visibility),
                (UserRole::Owner, owned_by as Visibility),
            ],
        }
    }
}

fn placed_by(user: &AuthenticatedUser, order: &Order) -> bool {
    order.customer_id == user.id
}

fn assigned_to(user: &AuthenticatedUser, order: &Order) -> bool {
    order.driver_id == Some(user.id)
}

fn owned_by(user: &AuthenticatedUser, order: &Order) -> bool {
    order.restaurant_owner_id == user.id
}

impl VisibilityPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// True iff the rule for the user's role accepts the order. A role with
    /// no rule sees nothing.
    pub fn can_view(&self, user: &AuthenticatedUser, order: &Order) -> bool {
        self.rules
            .iter()
            .find(|(role, _)| *role == user.role)
            .is_some_and(|(_, visible)| visible(user, order))
    }

    /// True iff some edge out of the order's current status is the user's to drive.
    pub fn can_mutate_status(&self, user: &AuthenticatedUser, order: &Order) -> bool {
        !transitions::allowed_targets(user, order).is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{OrderId, OrderStatus, RestaurantId, UserId};
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn order() -> Order {
        Order {
            id: OrderId(1),
            customer_id: UserId(1),
            restaurant_id: RestaurantId(1),
            restaurant_owner_id: UserId(2),
            driver_id: Some(UserId(3)),
            status: OrderStatus::PickedUp,
            total: Decimal::ZERO,
            items: Vec::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_each_role_sees_its_own_orders() {
        let policy = VisibilityPolicy::new();
        let order = order();
        assert!(policy.can_view(&AuthenticatedUser::client(1), &order));
        assert!(policy.can_view(&AuthenticatedUser::owner(2), &order));
        assert!(policy.can_view(&AuthenticatedUser::driver(3), &order));
    }

    #[test]
    fn test_matching_id_with_wrong_role_is_not_enough() {
        let policy = VisibilityPolicy::new();
        let order = order();
        // User 1 is the customer, but not as a driver or owner.
        assert!(!policy.can_view(&AuthenticatedUser::driver(1), &order));
        assert!(!policy.can_view(&AuthenticatedUser::owner(1), &order));
        assert!(!policy.can_view(&AuthenticatedUser::client(2), &order));
    }

    #[test]
    fn test_unassigned_order_is_invisible_to_drivers() {
        let policy = VisibilityPolicy::new();
        let mut order = order();
        order.driver_id = None;
        assert!(!policy.can_view(&AuthenticatedUser::driver(3), &order));
    }

    #[test]
    fn test_can_mutate_follows_transition_table() {
        let policy = VisibilityPolicy::new();
        let order = order();
        assert!(policy.can_mutate_status(&AuthenticatedUser::driver(3), &order));
        assert!(!policy.can_mutate_status(&AuthenticatedUser::owner(2), &order));
        assert!(!policy.can_mutate_status(&AuthenticatedUser::client(1), &order));
    }
}
