//! # Order Dispatch demo
//!
//! Seeds one restaurant and one dish, then walks a single order from
//! `Pending` to `Delivered` while a driver listens on the cooked-orders
//! topic and the customer follows the order's own updates.
//!
//! ```bash
//! RUST_LOG=info cargo run
//! ```

use order_dispatch::lifecycle::{setup_tracing, OrderSystem, SystemConfig};
use order_dispatch::model::{
    AuthenticatedUser, DishChoice, DishCreate, DishOption, OrderItemInput, OrderStatus,
    RestaurantCreate, SelectedOption,
};
use order_dispatch::service::CoreOutput;
use rust_decimal::Decimal;
use tokio_stream::StreamExt;
use tracing::{info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let system = OrderSystem::with_config(SystemConfig::from_env());

    let customer = AuthenticatedUser::client(1);
    let owner = AuthenticatedUser::owner(2);
    let driver = AuthenticatedUser::driver(3);

    let span = tracing::info_span!("seeding");
    let (restaurant, dish) = async {
        info!("Creating restaurant and menu");
        let restaurant = system
            .restaurant_client
            .create_restaurant(RestaurantCreate {
                name: "Noodle Bar".to_string(),
                owner_id: owner.id,
            })
            .await
            .map_err(|e| e.to_string())?;
        let dish = system
            .dish_client
            .create_dish(DishCreate {
                restaurant_id: restaurant.id,
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
            })
            .await
            .map_err(|e| e.to_string())?;
        Ok::<_, String>((restaurant, dish))
    }
    .instrument(span)
    .await?;

    // The driver watches the pickup pool from the start.
    let mut cooked = system
        .service
        .subscribe_cooked_orders(&driver)
        .map_err(|e| e.to_string())?;
    let driver_task = tokio::spawn(
        async move {
            while let Some(event) = cooked.next().await {
                info!(order_id = %event.order().id, total = %event.order().total, "Order ready for pickup");
            }
            info!("Pickup feed closed");
        }
        .instrument(tracing::info_span!("driver_feed")),
    );

    let order_id = system
        .service
        .create_order(
            &customer,
            restaurant.id,
            vec![OrderItemInput::new(
                dish.id,
                vec![SelectedOption::choice("Size", "Large")],
            )],
        )
        .await
        .map_err(|e| e.to_string())?;

    let mut updates = system
        .service
        .subscribe_order_updates(&customer, order_id)
        .await
        .map_err(|e| e.to_string())?;
    let customer_task = tokio::spawn(
        async move {
            while let Some(event) = updates.next().await {
                info!(status = %event.order().status, "Customer sees update");
            }
        }
        .instrument(tracing::info_span!("customer_feed")),
    );

    let steps = [
        (owner, OrderStatus::Cooking),
        (owner, OrderStatus::Cooked),
    ];
    for (user, next) in steps {
        system
            .service
            .edit_order(&user, order_id, next)
            .await
            .map_err(|e| e.to_string())?;
    }

    system
        .service
        .take_order(&driver, order_id)
        .await
        .map_err(|e| e.to_string())?;

    for next in [OrderStatus::PickedUp, OrderStatus::Delivered] {
        system
            .service
            .edit_order(&driver, order_id, next)
            .await
            .map_err(|e| e.to_string())?;
    }

    // What a transport would send back for a late cancellation attempt.
    let output: CoreOutput<_> = system.service.cancel_order(&customer, order_id).await.into();
    info!(ok = output.ok, error = ?output.error, "Cancel after delivery");

    let delivered = system
        .service
        .get_order(&customer, order_id)
        .await
        .map_err(|e| e.to_string())?;
    info!(order_id = %delivered.id, status = %delivered.status, total = %delivered.total, "Final state");

    system.shutdown().await?;
    let _ = driver_task.await;
    let _ = customer_task.await;

    info!("Application completed successfully");
    Ok(())
}
