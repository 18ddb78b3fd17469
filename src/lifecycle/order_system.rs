use crate::clients::{DishClient, OrderClient, RestaurantClient};
use crate::events::EventBus;
use crate::lifecycle::SystemConfig;
use crate::service::OrderService;
use tracing::{error, info};

/// The runtime that owns every actor and the event bus.
///
/// `OrderSystem` is responsible for:
/// - **Lifecycle Management**: starting and stopping the store actors
/// - **Dependency Wiring**: handing the service its repository, collaborators and bus
/// - **Event Bus Ownership**: the bus lives exactly as long as the system
///
/// # Architecture
///
/// - **Restaurant Actor**: restaurants and their owners
/// - **Dish Actor**: menus
/// - **Order Actor**: orders; every status change is a guarded action on it
/// - **EventBus**: fan-out of order events to live subscribers
///
/// # Example
///
/// ```ignore
/// let system = OrderSystem::new();
///
/// let restaurant = system.restaurant_client.create_restaurant(params).await?;
/// let order_id = system.service.create_order(&customer, restaurant.id, items).await?;
///
/// system.shutdown().await?;
/// ```
pub struct OrderSystem {
    /// Public order operations.
    pub service: OrderService,

    /// Direct access to the order store.
    pub order_client: OrderClient,

    /// Menu management (seeding, price changes).
    pub dish_client: DishClient,

    /// Restaurant management (seeding).
    pub restaurant_client: RestaurantClient,

    /// The bus the service publishes on.
    pub events: EventBus,

    /// Task handles for all running actors (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl Default for OrderSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderSystem {
    /// Starts the system with [`SystemConfig::default`].
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new() -> Self {
        Self::with_config(SystemConfig::default())
    }

    /// Spawns one task per actor, creates the bus, and wires the service.
    pub fn with_config(config: SystemConfig) -> Self {
        info!(?config, "Starting order system");

        let (restaurant_actor, restaurant_client) = crate::restaurant_actor::new(config.actor_buffer);
        let (dish_actor, dish_client) = crate::dish_actor::new(config.actor_buffer);
        let (order_actor, order_client) = crate::order_actor::new(config.actor_buffer);

        // None of the stores depend on each other (Context = ()).
        let restaurant_handle = tokio::spawn(restaurant_actor.run(()));
        let dish_handle = tokio::spawn(dish_actor.run(()));
        let order_handle = tokio::spawn(order_actor.run(()));

        let events = EventBus::new(config.event_capacity);
        let service = OrderService::new(
            order_client.clone(),
            dish_client.clone(),
            restaurant_client.clone(),
            events.clone(),
        );

        Self {
            service,
            order_client,
            dish_client,
            restaurant_client,
            events,
            handles: vec![restaurant_handle, dish_handle, order_handle],
        }
    }

    /// Gracefully shuts down the entire system.
    ///
    /// Closes the event bus first so open subscriptions end, then drops every
    /// client (closing the actors' channels) and waits for the actor tasks.
    /// Clones of the service or clients held elsewhere keep their actors
    /// alive until they are dropped too.
    ///
    /// # Returns
    ///
    /// - `Ok(())` if all actors shut down cleanly
    /// - `Err(String)` if any actor task failed or panicked
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        self.events.close();

        // Dropping the senders makes each actor's receiver return None.
        drop(self.service);
        drop(self.order_client);
        drop(self.dish_client);
        drop(self.restaurant_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
