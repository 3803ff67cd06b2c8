// ── Event streams ──
//
// Listener-backed streams of one client's events, for consumers that
// would rather await outcomes than register callbacks.

use std::pin::Pin;
use std::sync::{Arc, Weak};
use std::task::{Context, Poll};

use futures_core::Stream;
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

use crate::endpoint::Operation;
use crate::event::{DataEvent, DataListener, ListenerHandle, ListenerRegistry};
use crate::model::Entity;

/// Events fired by one client after the stream was created.
///
/// The stream owns a listener registration that is removed when it is
/// dropped. It ends once the client and all of its clones are gone.
pub struct EventStream<T: Entity> {
    events: UnboundedReceiverStream<DataEvent<T>>,
    only: Option<Vec<Operation>>,
    registry: Weak<ListenerRegistry<T>>,
    listener: Weak<dyn DataListener<T>>,
}

impl<T: Entity> EventStream<T> {
    pub(crate) fn attach(registry: &Arc<ListenerRegistry<T>>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let listener: ListenerHandle<T> = Arc::new(move |event: &DataEvent<T>| {
            // Receiver gone: the stream is being dropped.
            tx.send(event.clone()).ok();
        });
        registry.add(Arc::clone(&listener));

        Self {
            events: UnboundedReceiverStream::new(rx),
            only: None,
            registry: Arc::downgrade(registry),
            listener: Arc::downgrade(&listener),
        }
    }

    /// Keep only events of the given operations. List-class calls all
    /// report [`Operation::List`].
    pub fn only(mut self, operations: impl IntoIterator<Item = Operation>) -> Self {
        self.only = Some(operations.into_iter().collect());
        self
    }

    /// Wait for the next matching event.
    pub async fn next_event(&mut self) -> Option<DataEvent<T>> {
        std::future::poll_fn(|cx| Pin::new(&mut *self).poll_next(cx)).await
    }

    fn wants(&self, event: &DataEvent<T>) -> bool {
        self.only
            .as_ref()
            .is_none_or(|ops| ops.contains(&event.operation()))
    }
}

impl<T: Entity> Stream for EventStream<T> {
    type Item = DataEvent<T>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        loop {
            match Pin::new(&mut this.events).poll_next(cx) {
                Poll::Ready(Some(event)) if !this.wants(&event) => {}
                other => return other,
            }
        }
    }
}

impl<T: Entity> Drop for EventStream<T> {
    fn drop(&mut self) {
        if let (Some(registry), Some(listener)) = (self.registry.upgrade(), self.listener.upgrade())
        {
            registry.remove(&listener);
        }
    }
}
