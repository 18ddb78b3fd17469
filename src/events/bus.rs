//! # Event Bus
//!
//! One `tokio::sync::broadcast` channel per [`Topic`], held in a registry
//! owned by the bus instance. There is no process-wide bus: whoever builds
//! the system creates one and hands clones to the publisher and to the
//! subscription handlers.
//!
//! ```text
//!   OrderService ──publish(event)──▶ EventBus ──┬─▶ pendingOrders   ─▶ owners (filtered by owner id)
//!                                               ├─▶ cookedOrders    ─▶ drivers
//!                                               └─▶ orderUpdates:N  ─▶ viewers of order N
//! ```
//!
//! Publishing never waits for subscribers and never fails the publisher. A
//! subscriber that falls more than `capacity` events behind skips the
//! overflow and carries on.

use super::subscription::Subscription;
use super::topic::{OrderEvent, Topic};
use crate::model::UserId;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;
use tracing::{debug, info};

/// Topic registry shared by the bus and its subscriptions.
pub(crate) struct Registry {
    capacity: usize,
    state: Mutex<RegistryState>,
}

struct RegistryState {
    topics: HashMap<Topic, broadcast::Sender<OrderEvent>>,
    closed: bool,
}

impl Registry {
    fn lock(&self) -> MutexGuard<'_, RegistryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Drops a departing subscriber's receiver and, for a per-order topic
    /// left without receivers, the topic itself.
    ///
    /// The receiver is dropped while the lock is held, so two subscriptions
    /// leaving at once cannot both see the other one still listening.
    pub(crate) fn release(&self, topic: Topic, stream: Option<BroadcastStream<OrderEvent>>) {
        let mut state = self.lock();
        drop(stream);
        if !matches!(topic, Topic::OrderUpdates(_)) {
            return;
        }
        let idle = state
            .topics
            .get(&topic)
            .is_some_and(|sender| sender.receiver_count() == 0);
        if idle {
            state.topics.remove(&topic);
            debug!(%topic, "Topic removed");
        }
    }
}

/// Topic-based fan-out of [`OrderEvent`]s. Cheap to clone.
#[derive(Clone)]
pub struct EventBus {
    registry: Arc<Registry>,
}

impl EventBus {
    /// Creates a bus whose topics buffer up to `capacity` events per
    /// subscriber. The pool topics are registered up front.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let topics = [Topic::PendingOrders, Topic::CookedOrders]
            .into_iter()
            .map(|topic| (topic, broadcast::channel(capacity).0))
            .collect();
        Self {
            registry: Arc::new(Registry {
                capacity,
                state: Mutex::new(RegistryState {
                    topics,
                    closed: false,
                }),
            }),
        }
    }

    /// Publishes `event` on its topic.
    ///
    /// Returns how many subscribers it reached; with nobody listening the
    /// event is simply dropped.
    pub fn publish(&self, event: OrderEvent) -> usize {
        let topic = event.topic();
        let sender = self.registry.lock().topics.get(&topic).cloned();
        let Some(sender) = sender else {
            debug!(%topic, "Event dropped (no receivers)");
            return 0;
        };
        match sender.send(event) {
            Ok(receivers) => {
                debug!(%topic, receivers, "Event published");
                receivers
            }
            Err(_) => {
                debug!(%topic, "Event dropped (no receivers)");
                0
            }
        }
    }

    /// Opens a live subscription. Events published before this call are not
    /// replayed.
    pub fn subscribe(&self, topic: Topic) -> Subscription {
        self.open(topic, None)
    }

    /// Subscribes to new orders, keeping only those addressed to `owner`.
    pub fn subscribe_pending(&self, owner: UserId) -> Subscription {
        self.open(Topic::PendingOrders, Some(owner))
    }

    fn open(&self, topic: Topic, owner: Option<UserId>) -> Subscription {
        let mut state = self.registry.lock();
        if state.closed {
            debug!(%topic, "Subscribe on closed bus");
            return Subscription::closed(topic);
        }
        let capacity = self.registry.capacity;
        let receiver = state
            .topics
            .entry(topic)
            .or_insert_with(|| broadcast::channel(capacity).0)
            .subscribe();
        debug!(%topic, "Subscribed");
        Subscription::new(topic, receiver, owner, Arc::downgrade(&self.registry))
    }

    /// Live subscribers on `topic`.
    pub fn subscriber_count(&self, topic: Topic) -> usize {
        self.registry
            .lock()
            .topics
            .get(&topic)
            .map_or(0, |sender| sender.receiver_count())
    }

    /// Whether `topic` currently has a channel.
    pub fn has_topic(&self, topic: Topic) -> bool {
        self.registry.lock().topics.contains_key(&topic)
    }

    /// Drops every channel. Open subscriptions end, later ones end at once,
    /// and later publishes reach nobody.
    pub fn close(&self) {
        let mut state = self.registry.lock();
        state.closed = true;
        let topics = state.topics.len();
        state.topics.clear();
        info!(topics, "Event bus closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Order, OrderId, OrderStatus, RestaurantId};
    use chrono::Utc;
    use rust_decimal::Decimal;
    use std::time::Duration;
    use tokio::time::timeout;

    fn order(id: u32, owner: u32) -> Order {
        Order {
            id: OrderId(id),
            customer_id: UserId(1),
            restaurant_id: RestaurantId(1),
            restaurant_owner_id: UserId(owner),
            driver_id: None,
            status: OrderStatus::Pending,
            total: Decimal::ZERO,
            items: Vec::new(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_publish_without_subscribers_is_dropped() {
        let bus = EventBus::new(8);
        assert_eq!(bus.publish(OrderEvent::Cooked { order: order(1, 2) }), 0);
        assert_eq!(bus.publish(OrderEvent::Updated { order: order(1, 2) }), 0);
        assert!(!bus.has_topic(Topic::OrderUpdates(OrderId(1))));
    }

    #[tokio::test]
    async fn test_fan_out_to_every_subscriber() {
        let bus = EventBus::new(8);
        let mut first = bus.subscribe(Topic::CookedOrders);
        let mut second = bus.subscribe(Topic::CookedOrders);

        assert_eq!(bus.publish(OrderEvent::Cooked { order: order(1, 2) }), 2);

        for sub in [&mut first, &mut second] {
            let event = timeout(Duration::from_millis(100), sub.recv())
                .await
                .expect("timeout")
                .expect("event");
            assert_eq!(event.order().id, OrderId(1));
        }
    }

    #[tokio::test]
    async fn test_pending_orders_are_filtered_by_owner() {
        let bus = EventBus::new(8);
        let mut mine = bus.subscribe_pending(UserId(2));

        bus.publish(OrderEvent::Pending {
            owner_id: UserId(3),
            order: order(1, 3),
        });
        bus.publish(OrderEvent::Pending {
            owner_id: UserId(2),
            order: order(2, 2),
        });

        let event = timeout(Duration::from_millis(100), mine.recv())
            .await
            .expect("timeout")
            .expect("event");
        assert_eq!(event.order().id, OrderId(2));
    }

    #[tokio::test]
    async fn test_per_order_topic_removed_after_last_subscriber() {
        let bus = EventBus::new(8);
        let topic = Topic::OrderUpdates(OrderId(7));

        let first = bus.subscribe(topic);
        let second = bus.subscribe(topic);
        assert_eq!(bus.subscriber_count(topic), 2);

        drop(first);
        assert!(bus.has_topic(topic));
        drop(second);
        assert!(!bus.has_topic(topic));

        // Pool topics stay registered.
        drop(bus.subscribe(Topic::CookedOrders));
        assert!(bus.has_topic(Topic::CookedOrders));
    }

    #[tokio::test]
    async fn test_lagging_subscriber_skips_and_continues() {
        let bus = EventBus::new(2);
        let mut slow = bus.subscribe(Topic::CookedOrders);

        for id in 1..=5 {
            bus.publish(OrderEvent::Cooked { order: order(id, 2) });
        }

        let event = timeout(Duration::from_millis(100), slow.recv())
            .await
            .expect("timeout")
            .expect("event");
        assert_eq!(event.order().id, OrderId(4));
    }

    #[tokio::test]
    async fn test_close_ends_open_and_new_subscriptions() {
        let bus = EventBus::new(8);
        let mut open = bus.subscribe(Topic::CookedOrders);

        bus.close();

        let ended = timeout(Duration::from_millis(100), open.recv())
            .await
            .expect("timeout");
        assert!(ended.is_none());

        let mut late = bus.subscribe(Topic::PendingOrders);
        assert!(timeout(Duration::from_millis(100), late.recv())
            .await
            .expect("timeout")
            .is_none());
        assert_eq!(bus.publish(OrderEvent::Cooked { order: order(1, 2) }), 0);
    }

    #[test]
    fn test_simultaneous_drops_remove_the_topic() {
        let bus = EventBus::new(8);
        for id in 0..500 {
            let topic = Topic::OrderUpdates(OrderId(id));
            let barrier = Arc::new(std::sync::Barrier::new(2));
            let handles: Vec<_> = [bus.subscribe(topic), bus.subscribe(topic)]
                .into_iter()
                .map(|subscription| {
                    let barrier = barrier.clone();
                    std::thread::spawn(move || {
                        barrier.wait();
                        drop(subscription);
                    })
                })
                .collect();
            for handle in handles {
                handle.join().unwrap();
            }
            assert!(!bus.has_topic(topic), "{} left behind", topic);
        }
    }
}
