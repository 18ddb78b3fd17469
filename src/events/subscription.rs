use super::bus::Registry;
use super::topic::{OrderEvent, Topic};
use crate::model::UserId;
use std::pin::Pin;
use std::sync::Weak;
use std::task::{ready, Context, Poll};
use tokio::sync::broadcast;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::{Stream, StreamExt};
use tracing::{debug, warn};

/// One live subscription to a topic.
///
/// Yields events until the bus is closed. Dropping it unsubscribes; for a
/// per-order topic the last drop also removes the topic from the bus.
pub struct Subscription {
    topic: Topic,
    /// Taken on drop so the receiver goes away under the registry lock.
    stream: Option<BroadcastStream<OrderEvent>>,
    owner: Option<UserId>,
    registry: Weak<Registry>,
}

impl Subscription {
    pub(crate) fn new(
        topic: Topic,
        receiver: broadcast::Receiver<OrderEvent>,
        owner: Option<UserId>,
        registry: Weak<Registry>,
    ) -> Self {
        Self {
            topic,
            stream: Some(BroadcastStream::new(receiver)),
            owner,
            registry,
        }
    }

    /// A subscription that is already over.
    pub(crate) fn closed(topic: Topic) -> Self {
        let (_, receiver) = broadcast::channel(1);
        Self::new(topic, receiver, None, Weak::new())
    }

    pub fn topic(&self) -> Topic {
        self.topic
    }

    /// Next event, or `None` once the bus is closed.
    pub async fn recv(&mut self) -> Option<OrderEvent> {
        self.next().await
    }

    fn accepts(&self, event: &OrderEvent) -> bool {
        match (self.owner, event) {
            (Some(owner), OrderEvent::Pending { owner_id, .. }) => *owner_id == owner,
            _ => true,
        }
    }
}

impl Stream for Subscription {
    type Item = OrderEvent;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        loop {
            let Some(stream) = this.stream.as_mut() else {
                return Poll::Ready(None);
            };
            match ready!(Pin::new(stream).poll_next(cx)) {
                Some(Ok(event)) => {
                    if this.accepts(&event) {
                        return Poll::Ready(Some(event));
                    }
                }
                Some(Err(BroadcastStreamRecvError::Lagged(skipped))) => {
                    warn!(topic = %this.topic, skipped, "Subscriber lagged, events skipped");
                }
                None => return Poll::Ready(None),
            }
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        debug!(topic = %self.topic, "Subscription dropped");
        let stream = self.stream.take();
        if let Some(registry) = self.registry.upgrade() {
            registry.release(self.topic, stream);
        }
    }
}
