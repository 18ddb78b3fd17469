use crate::model::{OrderStatus, UserId};

/// Guarded updates on a stored order.
///
/// Each action re-checks its precondition against the stored row inside the
/// actor, so it behaves like `UPDATE orders SET ... WHERE id = ? AND <guard>`.
/// A failed guard leaves the row as it was and reports a conflict.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderAction {
    /// Moves the status from `expected` to `next`.
    Transition {
        expected: OrderStatus,
        next: OrderStatus,
    },
    /// Sets the driver, only while no driver is set.
    AssignDriver { driver: UserId },
    /// Cooked -> PickedUp for a driver that either already holds the order or
    /// claims it in the same write.
    ClaimAndPickUp { driver: UserId },
}
