// ── Generic data-access client ──
//
// One `DataClient<T>` per entity kind: CRUD requests against a fixed
// endpoint table, an ordered local cache of the last list, and a
// multicast listener registry. Every operation that reaches the network
// ends in exactly one event.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;
use tetres_api::{
    FormData, HttpResult, Rejection, Transport, decode_ack, decode_id, decode_ids, decode_list,
    decode_object, decode_payload,
};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use url::Url;

use crate::config::ClientConfig;
use crate::endpoint::{Endpoints, Operation};
use crate::error::CoreError;
use crate::event::{DataEvent, GetKey, ListenerHandle, ListenerRegistry};
use crate::exec::Executor;
use crate::model::{Entity, EntityId, to_wire};
use crate::store::{EntityCache, Snapshot, SortOrder};
use crate::stream::EventStream;

// ── Outcome ──────────────────────────────────────────────────────────

/// What one request returned to its caller.
///
/// The same information is broadcast to listeners as a [`DataEvent`].
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<V> {
    Success(V),
    Failed(HttpResult),
}

impl<V> Outcome<V> {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn success(self) -> Option<V> {
        match self {
            Self::Success(v) => Some(v),
            Self::Failed(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&HttpResult> {
        match self {
            Self::Success(_) => None,
            Self::Failed(result) => Some(result),
        }
    }

    pub fn into_result(self) -> Result<V, HttpResult> {
        match self {
            Self::Success(v) => Ok(v),
            Self::Failed(result) => Err(result),
        }
    }
}

// ── ClientSpec ───────────────────────────────────────────────────────

/// Static description of one concrete client.
pub struct ClientSpec<T> {
    /// Key used for endpoint overrides in the configuration.
    pub key: &'static str,
    /// Default server paths, by operation.
    pub paths: &'static [(Operation, &'static str)],
    /// Cache order after a list refresh.
    pub order: SortOrder<T>,
}

// ── List guard ───────────────────────────────────────────────────────

/// Holds the list-loading flag; clears it when dropped.
struct ListGuard<'a>(&'a AtomicBool);

impl<'a> ListGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for ListGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

// ── DataClient ───────────────────────────────────────────────────────

/// CRUD client for one entity kind.
///
/// Cheaply cloneable via `Arc<ClientInner>`; clones share the cache, the
/// listeners and the list guard.
///
/// Operations return `Err` only for problems the caller must fix (an
/// unsupported operation, an entity that cannot be encoded). Request
/// failures come back as [`Outcome::Failed`] and as the matching
/// `*Failed` event.
///
/// Insert and update do not touch the cache: the server owns derived
/// fields and order, so a confirmed write marks the cache stale
/// ([`DataClient::is_stale`]) and the caller re-lists when it needs the
/// fresh view. Delete removes the confirmed ids locally.
pub struct DataClient<T: Entity> {
    inner: Arc<ClientInner<T>>,
}

struct ClientInner<T: Entity> {
    endpoints: Endpoints,
    transport: Arc<dyn Transport>,
    order: SortOrder<T>,
    cache: EntityCache<T>,
    listeners: Arc<ListenerRegistry<T>>,
    list_loading: AtomicBool,
    stale: AtomicBool,
}

impl<T: Entity> Clone for DataClient<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Entity> DataClient<T> {
    pub fn new(endpoints: Endpoints, order: SortOrder<T>, transport: Arc<dyn Transport>) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                endpoints,
                transport,
                order,
                cache: EntityCache::new(),
                listeners: Arc::new(ListenerRegistry::new()),
                list_loading: AtomicBool::new(false),
                stale: AtomicBool::new(false),
            }),
        }
    }

    /// Build a client from its static description plus configuration.
    pub fn from_spec(
        spec: &ClientSpec<T>,
        config: &ClientConfig,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, CoreError> {
        let endpoints = config.endpoints(spec.key, spec.paths)?;
        debug!(
            kind = T::KIND,
            operations = ?endpoints.operations().collect::<Vec<_>>(),
            "data client configured"
        );
        Ok(Self::new(endpoints, spec.order, transport))
    }

    // ── Read-only state ──────────────────────────────────────────────

    pub fn endpoints(&self) -> &Endpoints {
        &self.inner.endpoints
    }

    pub fn supports(&self, op: Operation) -> bool {
        self.inner.endpoints.supports(op)
    }

    pub fn cache(&self) -> &EntityCache<T> {
        &self.inner.cache
    }

    /// The cached list, in comparator order.
    pub fn snapshot(&self) -> Snapshot<T> {
        self.inner.cache.snapshot()
    }

    /// Watch the cached list; the receiver sees every replacement and
    /// removal.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot<T>> {
        self.inner.cache.subscribe()
    }

    /// Stream of the events this client fires from now on.
    pub fn events(&self) -> EventStream<T> {
        EventStream::attach(&self.inner.listeners)
    }

    /// `true` after a confirmed insert or update that no list refresh has
    /// picked up yet.
    pub fn is_stale(&self) -> bool {
        self.inner.stale.load(Ordering::Acquire)
    }

    /// `true` while a list-class request is in flight.
    pub fn is_loading_list(&self) -> bool {
        self.inner.list_loading.load(Ordering::Acquire)
    }

    // ── Listeners ────────────────────────────────────────────────────

    pub fn add_listener(&self, listener: ListenerHandle<T>) {
        self.inner.listeners.add(listener);
    }

    /// Register a closure and return its handle for later removal.
    pub fn on_event<F>(&self, f: F) -> ListenerHandle<T>
    where
        F: Fn(&DataEvent<T>) + Send + Sync + 'static,
    {
        let handle: ListenerHandle<T> = Arc::new(f);
        self.add_listener(Arc::clone(&handle));
        handle
    }

    /// Remove one registration of `listener`.
    pub fn remove_listener(&self, listener: &ListenerHandle<T>) -> bool {
        self.inner.listeners.remove(listener)
    }

    pub fn listener_count(&self) -> usize {
        self.inner.listeners.len()
    }

    // ── Operations ───────────────────────────────────────────────────

    /// Years that have at least one record.
    pub async fn years(&self) -> Result<Outcome<Vec<i32>>, CoreError> {
        let url = self.endpoint(Operation::Years)?;
        let res = self.send(&url, None).await;

        let outcome = match decode_payload::<Vec<i32>>(&res) {
            Ok(years) => {
                self.fire(&DataEvent::YearsSucceeded(years.clone()));
                Outcome::Success(years)
            }
            Err(rejection) => {
                Self::rejected(Operation::Years, &rejection);
                self.fire(&DataEvent::YearsFailed(res.clone()));
                Outcome::Failed(res)
            }
        };
        Ok(outcome)
    }

    /// Spawn [`DataClient::years`] without waiting; the result arrives as
    /// an event.
    pub fn years_detached(&self, exec: &Executor) -> Result<JoinHandle<()>, CoreError> {
        self.endpoint(Operation::Years)?;
        let client = self.clone();
        Ok(exec.spawn(async move { client.years().await }, |result| {
            if let Err(e) = result {
                warn!(kind = T::KIND, error = %e, "detached years request failed");
            }
        }))
    }

    /// Fetch every record and replace the cache.
    ///
    /// Returns `Ok(None)` without any request or event when another
    /// list-class call is already in flight.
    pub async fn list(&self) -> Result<Option<Outcome<Snapshot<T>>>, CoreError> {
        let url = self.endpoint(Operation::List)?;
        self.refresh(Operation::List, url, None).await
    }

    /// Fetch the records of one year (`None` = all years) and replace the
    /// cache.
    pub async fn list_by_year(
        &self,
        year: Option<i32>,
    ) -> Result<Option<Outcome<Snapshot<T>>>, CoreError> {
        let url = self.endpoint(Operation::ListByYear)?;
        let form = match year {
            Some(year) => FormData::new().json("year", &year)?,
            None => FormData::new(),
        };
        self.refresh(Operation::ListByYear, url, Some(form)).await
    }

    /// POST `{key: value}` to the list endpoint and replace the cache with
    /// the filtered result.
    pub async fn list_filtered(
        &self,
        key: &str,
        value: &impl Serialize,
    ) -> Result<Option<Outcome<Snapshot<T>>>, CoreError> {
        let url = self.endpoint(Operation::List)?;
        let form = FormData::new().json(key, value)?;
        self.refresh(Operation::List, url, Some(form)).await
    }

    /// Fetch one record by id or name. The cache is not touched.
    pub async fn get(&self, key: impl Into<GetKey>) -> Result<Outcome<T>, CoreError> {
        let url = self.endpoint(Operation::Get)?;
        let key = key.into();
        let form = match &key {
            GetKey::Id(id) => FormData::new().json("id", id)?,
            GetKey::Name(name) => FormData::new().text("name", name.as_str()),
        };
        let res = self.send(&url, Some(&form)).await;

        let outcome = match decode_object::<T>(&res) {
            Ok(entity) => {
                self.fire(&DataEvent::GetSucceeded(entity.clone()));
                Outcome::Success(entity)
            }
            Err(rejection) => {
                Self::rejected(Operation::Get, &rejection);
                self.fire(&DataEvent::GetFailed {
                    result: res.clone(),
                    key,
                });
                Outcome::Failed(res)
            }
        };
        Ok(outcome)
    }

    /// Create a record; the server answers with its new id.
    pub async fn insert(&self, entity: &T) -> Result<Outcome<EntityId>, CoreError> {
        self.insert_with(entity, FormData::new()).await
    }

    /// Like [`DataClient::insert`], with extra form fields sent alongside
    /// `data`.
    pub async fn insert_with(
        &self,
        entity: &T,
        extra: FormData,
    ) -> Result<Outcome<EntityId>, CoreError> {
        let url = self.endpoint(Operation::Insert)?;
        let form = extra.merge(FormData::new().json("data", &to_wire(entity)?)?);
        let res = self.send(&url, Some(&form)).await;

        let outcome = match decode_id(&res) {
            Ok(id) => {
                let id = EntityId::new(id);
                self.mark_stale();
                self.fire(&DataEvent::InsertSucceeded(id));
                Outcome::Success(id)
            }
            Err(rejection) => {
                Self::rejected(Operation::Insert, &rejection);
                self.fire(&DataEvent::InsertFailed {
                    result: res.clone(),
                    entity: entity.clone(),
                });
                Outcome::Failed(res)
            }
        };
        Ok(outcome)
    }

    /// Create many records in one request.
    pub async fn insert_all(&self, entities: &[T]) -> Result<Outcome<()>, CoreError> {
        let url = self.endpoint(Operation::InsertAll)?;
        // The server expects a JSON list whose items are JSON documents.
        let encoded = entities
            .iter()
            .map(|e| to_wire(e).map(|v| v.to_string()))
            .collect::<Result<Vec<_>, _>>()?;
        let form = FormData::new().json("data", &encoded)?;
        let res = self.send(&url, Some(&form)).await;

        let outcome = match decode_ack(&res) {
            Ok(()) => {
                self.mark_stale();
                self.fire(&DataEvent::InsertAllSucceeded);
                Outcome::Success(())
            }
            Err(rejection) => {
                Self::rejected(Operation::InsertAll, &rejection);
                self.fire(&DataEvent::InsertAllFailed {
                    result: res.clone(),
                    entities: entities.to_vec(),
                });
                Outcome::Failed(res)
            }
        };
        Ok(outcome)
    }

    /// Replace the record identified by `old` with `new`.
    pub async fn update(&self, old: &T, new: &T) -> Result<Outcome<EntityId>, CoreError> {
        let url = self.endpoint(Operation::Update)?;
        let id = old.id().ok_or(CoreError::MissingId {
            kind: T::KIND,
            operation: Operation::Update,
        })?;
        let form = FormData::new()
            .json("id", &id)?
            .json("data", &to_wire(new)?)?;
        let res = self.send(&url, Some(&form)).await;

        let outcome = match decode_id(&res) {
            Ok(id) => {
                let id = EntityId::new(id);
                self.mark_stale();
                self.fire(&DataEvent::UpdateSucceeded(id));
                Outcome::Success(id)
            }
            Err(rejection) => {
                Self::rejected(Operation::Update, &rejection);
                self.fire(&DataEvent::UpdateFailed {
                    result: res.clone(),
                    entity: new.clone(),
                });
                Outcome::Failed(res)
            }
        };
        Ok(outcome)
    }

    /// Delete records.
    ///
    /// On success the ids the server confirmed are returned and removed
    /// from the cache; `DeleteSucceeded` reports only those that were
    /// actually cached.
    pub async fn delete(&self, ids: &[EntityId]) -> Result<Outcome<Vec<EntityId>>, CoreError> {
        let url = self.endpoint(Operation::Delete)?;
        let form = FormData::new().json("ids", &ids)?;
        let res = self.send(&url, Some(&form)).await;

        let outcome = match decode_ids(&res) {
            Ok(confirmed) => {
                let confirmed: Vec<EntityId> = confirmed.into_iter().map(EntityId::new).collect();
                let removed = self.inner.cache.remove(&confirmed);
                debug!(kind = T::KIND, removed = removed.len(), "records deleted");
                self.fire(&DataEvent::DeleteSucceeded(removed));
                Outcome::Success(confirmed)
            }
            Err(rejection) => {
                Self::rejected(Operation::Delete, &rejection);
                self.fire(&DataEvent::DeleteFailed {
                    result: res.clone(),
                    ids: ids.to_vec(),
                });
                Outcome::Failed(res)
            }
        };
        Ok(outcome)
    }

    // ── Private helpers ──────────────────────────────────────────────

    fn endpoint(&self, op: Operation) -> Result<Url, CoreError> {
        self.inner
            .endpoints
            .get(op)
            .cloned()
            .ok_or(CoreError::Unsupported {
                kind: T::KIND,
                operation: op,
            })
    }

    /// Shared body of every list-class operation.
    async fn refresh(
        &self,
        op: Operation,
        url: Url,
        form: Option<FormData>,
    ) -> Result<Option<Outcome<Snapshot<T>>>, CoreError> {
        let Some(guard) = ListGuard::acquire(&self.inner.list_loading) else {
            debug!(kind = T::KIND, operation = %op, "list already in flight, skipping");
            return Ok(None);
        };

        let res = self.send(&url, form.as_ref()).await;
        let outcome = match decode_list::<T>(&res) {
            Ok(items) => {
                let snap = self.inner.cache.replace(items, self.inner.order);
                self.inner.stale.store(false, Ordering::Release);
                info!(kind = T::KIND, count = snap.len(), "cache replaced");
                Outcome::Success(snap)
            }
            Err(rejection) => {
                Self::rejected(op, &rejection);
                Outcome::Failed(res)
            }
        };

        // Listeners may start the next list from inside the event.
        drop(guard);

        match &outcome {
            Outcome::Success(snap) => self.fire(&DataEvent::ListSucceeded(Arc::clone(snap))),
            Outcome::Failed(res) => self.fire(&DataEvent::ListFailed(res.clone())),
        }
        Ok(Some(outcome))
    }

    async fn send(&self, url: &Url, form: Option<&FormData>) -> HttpResult {
        let result = match form {
            Some(form) => self.inner.transport.post_form(url, form).await,
            None => self.inner.transport.get(url).await,
        };
        result.unwrap_or_else(|e| HttpResult::transport_failure(url.clone(), e.to_string()))
    }

    fn mark_stale(&self) {
        self.inner.stale.store(true, Ordering::Release);
    }

    fn rejected(op: Operation, rejection: &Rejection) {
        warn!(kind = T::KIND, operation = %op, %rejection, "request failed");
    }

    fn fire(&self, event: &DataEvent<T>) {
        debug!(kind = T::KIND, event = event.name(), "firing event");
        self.inner.listeners.fire(event);
    }
}

impl<T: Entity> std::fmt::Debug for DataClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataClient")
            .field("kind", &T::KIND)
            .field("endpoints", &self.inner.endpoints)
            .field("cached", &self.inner.cache.len())
            .finish_non_exhaustive()
    }
}
