// ── Change events and listener registry ──
//
// Every data-client operation ends in exactly one event, delivered
// synchronously to all registered listeners in registration order.

use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind, resume_unwind};
use std::sync::{Arc, RwLock};

use strum::IntoStaticStr;
use tetres_api::HttpResult;
use tracing::error;

use crate::endpoint::Operation;
use crate::model::EntityId;
use crate::store::Snapshot;

/// Key used to fetch a single record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GetKey {
    Id(EntityId),
    Name(String),
}

impl From<EntityId> for GetKey {
    fn from(id: EntityId) -> Self {
        Self::Id(id)
    }
}

/// Outcome of one data-client operation.
///
/// Failures carry the raw [`HttpResult`] plus whatever input the caller
/// would need to retry (the entity that failed to insert, the ids that
/// failed to delete, ...). Transport and server-side failures are not
/// distinguished here.
#[derive(Debug, Clone, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum DataEvent<T> {
    YearsSucceeded(Vec<i32>),
    YearsFailed(HttpResult),

    ListSucceeded(Snapshot<T>),
    ListFailed(HttpResult),

    GetSucceeded(T),
    GetFailed { result: HttpResult, key: GetKey },

    InsertSucceeded(EntityId),
    InsertFailed { result: HttpResult, entity: T },

    InsertAllSucceeded,
    InsertAllFailed { result: HttpResult, entities: Vec<T> },

    UpdateSucceeded(EntityId),
    UpdateFailed { result: HttpResult, entity: T },

    DeleteSucceeded(Vec<EntityId>),
    DeleteFailed { result: HttpResult, ids: Vec<EntityId> },
}

impl<T> DataEvent<T> {
    /// Stable snake_case name, for logs.
    pub fn name(&self) -> &'static str {
        self.into()
    }

    /// The failed exchange, for failure events.
    pub fn failure(&self) -> Option<&HttpResult> {
        match self {
            Self::YearsFailed(result) | Self::ListFailed(result) => Some(result),
            Self::GetFailed { result, .. }
            | Self::InsertFailed { result, .. }
            | Self::InsertAllFailed { result, .. }
            | Self::UpdateFailed { result, .. }
            | Self::DeleteFailed { result, .. } => Some(result),
            _ => None,
        }
    }

    pub fn is_failure(&self) -> bool {
        self.failure().is_some()
    }

    /// Operation that produced the event. `list_by_year` and filtered
    /// lists report [`Operation::List`].
    pub fn operation(&self) -> Operation {
        match self {
            Self::YearsSucceeded(_) | Self::YearsFailed(_) => Operation::Years,
            Self::ListSucceeded(_) | Self::ListFailed(_) => Operation::List,
            Self::GetSucceeded(_) | Self::GetFailed { .. } => Operation::Get,
            Self::InsertSucceeded(_) | Self::InsertFailed { .. } => Operation::Insert,
            Self::InsertAllSucceeded | Self::InsertAllFailed { .. } => Operation::InsertAll,
            Self::UpdateSucceeded(_) | Self::UpdateFailed { .. } => Operation::Update,
            Self::DeleteSucceeded(_) | Self::DeleteFailed { .. } => Operation::Delete,
        }
    }
}

/// Receives every event of the client it is registered with.
///
/// Implemented for any `Fn(&DataEvent<T>) + Send + Sync` closure.
pub trait DataListener<T>: Send + Sync {
    fn on_event(&self, event: &DataEvent<T>);
}

impl<T, F> DataListener<T> for F
where
    F: Fn(&DataEvent<T>) + Send + Sync,
{
    fn on_event(&self, event: &DataEvent<T>) {
        self(event);
    }
}

/// Handle returned by registration; pass it back to unregister.
pub type ListenerHandle<T> = Arc<dyn DataListener<T>>;

/// Multicast registry. Registering the same handle twice delivers twice.
pub(crate) struct ListenerRegistry<T> {
    listeners: RwLock<Vec<ListenerHandle<T>>>,
}

impl<T> ListenerRegistry<T> {
    pub(crate) fn new() -> Self {
        Self {
            listeners: RwLock::new(Vec::new()),
        }
    }

    pub(crate) fn add(&self, listener: ListenerHandle<T>) {
        self.listeners
            .write()
            .expect("listener lock poisoned")
            .push(listener);
    }

    /// Remove the first registration of `listener`. Returns `false` if it
    /// was not registered.
    pub(crate) fn remove(&self, listener: &ListenerHandle<T>) -> bool {
        let mut listeners = self.listeners.write().expect("listener lock poisoned");
        match listeners.iter().position(|l| Arc::ptr_eq(l, listener)) {
            Some(index) => {
                listeners.remove(index);
                true
            }
            None => false,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.listeners.read().expect("listener lock poisoned").len()
    }

    /// Deliver `event` to every listener registered at the time of the call.
    ///
    /// The lock is not held during delivery, so listeners may register,
    /// unregister or start new requests. A panicking listener does not stop
    /// delivery to the rest; the first panic is resumed once all have run.
    pub(crate) fn fire(&self, event: &DataEvent<T>) {
        let snapshot = self.listeners.read().expect("listener lock poisoned").clone();

        let mut first_panic: Option<Box<dyn Any + Send>> = None;
        for listener in snapshot {
            if let Err(payload) = catch_unwind(AssertUnwindSafe(|| listener.on_event(event))) {
                error!(event = event.name(), "listener panicked while handling event");
                first_panic.get_or_insert(payload);
            }
        }

        if let Some(payload) = first_panic {
            resume_unwind(payload);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn recorder(log: &Arc<Mutex<Vec<String>>>, tag: &'static str) -> ListenerHandle<String> {
        let log = Arc::clone(log);
        Arc::new(move |event: &DataEvent<String>| {
            log.lock().unwrap().push(format!("{tag}:{}", event.name()));
        })
    }

    #[test]
    fn delivers_in_registration_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let registry = ListenerRegistry::new();
        registry.add(recorder(&log, "a"));
        registry.add(recorder(&log, "b"));

        registry.fire(&DataEvent::InsertAllSucceeded);

        assert_eq!(
            *log.lock().unwrap(),
            vec!["a:insert_all_succeeded", "b:insert_all_succeeded"]
        );
    }

    #[test]
    fn duplicate_registration_delivers_twice() {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&count);
        let listener: ListenerHandle<String> = Arc::new(move |_: &DataEvent<String>| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let registry = ListenerRegistry::new();
        registry.add(Arc::clone(&listener));
        registry.add(Arc::clone(&listener));
        registry.fire(&DataEvent::YearsSucceeded(vec![2020]));
        assert_eq!(count.load(Ordering::SeqCst), 2);

        assert!(registry.remove(&listener));
        registry.fire(&DataEvent::YearsSucceeded(vec![2020]));
        assert_eq!(count.load(Ordering::SeqCst), 3);

        assert!(registry.remove(&listener));
        assert!(!registry.remove(&listener));
        assert_eq!(registry.len(), 0);
    }

    fn explode(_: &DataEvent<String>) {
        panic!("consumer bug");
    }

    #[test]
    fn panicking_listener_does_not_starve_later_ones() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let registry = ListenerRegistry::<String>::new();
        registry.add(Arc::new(explode));
        registry.add(recorder(&log, "after"));

        let result = catch_unwind(AssertUnwindSafe(|| {
            registry.fire(&DataEvent::DeleteSucceeded(vec![EntityId::new(1)]));
        }));

        assert!(result.is_err());
        assert_eq!(*log.lock().unwrap(), vec!["after:delete_succeeded"]);
    }

    #[test]
    fn listener_may_register_during_delivery() {
        let registry = Arc::new(ListenerRegistry::<String>::new());
        let inner = Arc::clone(&registry);
        registry.add(Arc::new(move |_: &DataEvent<String>| {
            inner.add(Arc::new(|_: &DataEvent<String>| {}));
        }));

        registry.fire(&DataEvent::InsertAllSucceeded);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn failure_events_expose_result() {
        let result = HttpResult::transport_failure(
            url::Url::parse("http://localhost/x").unwrap(),
            "connection refused",
        );
        let event: DataEvent<String> = DataEvent::DeleteFailed {
            result: result.clone(),
            ids: vec![EntityId::new(1)],
        };
        assert!(event.is_failure());
        assert_eq!(event.failure(), Some(&result));
        assert!(!DataEvent::<String>::InsertAllSucceeded.is_failure());
        assert_eq!(event.operation(), Operation::Delete);
    }
}
