//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter driven
//! by `RUST_LOG`. Module paths are hidden (`with_target(false)`); the actor
//! loop tags its lines with `entity_type` instead.
//!
//! ## What Gets Traced
//!
//! - **Actor Lifecycle**: startup and shutdown of the restaurant, dish and order stores
//! - **Store Operations**: Create, Get, List and guarded Actions, with the row id
//! - **Service Calls**: one span per public operation with `user_id` and `role`
//! - **Events**: topic and number of `receivers` for every publish
//! - **Failures**: rejected actions at `warn`, infrastructure failures at `error`
//!
//! ## Usage Examples
//!
//! ```bash
//! # Lifecycle, status changes, order creation
//! RUST_LOG=info cargo run
//!
//! # Payloads, publishes and subscriptions too
//! RUST_LOG=debug cargo run
//!
//! # Only the event bus
//! RUST_LOG=order_dispatch::events=debug cargo run
//! ```
//!
//! ## Workflow Trace Example
//!
//! **With `RUST_LOG=info`**:
//!
//! ```text
//! INFO Actor started entity_type="Order"
//! INFO create_order{customer_id=user_1 items=1}: Created entity_type="Order" id=order_1 size=1
//! INFO create_order{customer_id=user_1 items=1}: Order created order_id=order_1 total=12.00
//! INFO edit_order{user_id=user_2 role=Owner}: Order status changed order_id=order_1 from=Pending status=Cooking
//! ```
//!
//! **With `RUST_LOG=debug`** the same request also shows the store traffic
//! and the fan-out:
//!
//! ```text
//! DEBUG create_order{...}: Get entity_type="Restaurant" id=restaurant_1 found=true
//! DEBUG create_order{...}: Get entity_type="Dish" id=dish_1 found=true
//! DEBUG create_order{...}: Create entity_type="Order" params=OrderCreate { .. }
//! DEBUG create_order{...}: Event published topic=pendingOrders receivers=1
//! ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // entity_type identifies the actor
        .compact()
        .init();
}
