#![allow(clippy::unwrap_used)]
// Integration tests for `DataClient` against a wiremock server.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures_util::StreamExt;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tetres_api::FormData;
use url::Url;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use tetres_core::{
    ClientConfig, CoreError, DataClient, DataEvent, Entity, EntityId, Executor, GetKey, Operation,
    Outcome, SnowRoute, SpecialEvent, SpecialEventClient,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, SpecialEventClient) {
    let server = MockServer::start().await;
    let config = ClientConfig::new(Url::parse(&server.uri()).unwrap());
    let client = DataClient::special_events(&config, config.http_transport().unwrap()).unwrap();
    (server, client)
}

fn ok(obj: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "code": 1, "message": "", "obj": obj }))
}

fn event(id: i64, name: &str) -> Value {
    json!({
        "__class__": "SpecialEventInfo",
        "id": id,
        "name": name,
        "start_time": "2024-05-01 18:00:00",
        "end_time": "2024-05-01 22:00:00",
        "attendance": 40000,
    })
}

fn record<T: Entity>(client: &DataClient<T>) -> Arc<Mutex<Vec<String>>> {
    let log = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&log);
    client.on_event(move |e: &DataEvent<T>| sink.lock().unwrap().push(e.name().to_owned()));
    log
}

fn names(client: &SpecialEventClient) -> Vec<String> {
    client.snapshot().iter().map(|e| e.name.clone()).collect()
}

async fn mount_list(server: &MockServer, items: Vec<Value>) {
    Mock::given(method("GET"))
        .and(path("/tetres/adm/sevent/list"))
        .respond_with(ok(json!({ "list": items })))
        .mount(server)
        .await;
}

// ── List ────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_replaces_cache_in_comparator_order() {
    let (server, client) = setup().await;
    mount_list(
        &server,
        vec![event(3, "State Fair"), event(1, "Concert"), event(2, "Marathon")],
    )
    .await;
    let log = record(&client);

    let snap = client.list().await.unwrap().unwrap().success().unwrap();

    assert_eq!(snap.len(), 3);
    assert_eq!(names(&client), vec!["Concert", "Marathon", "State Fair"]);
    assert_eq!(client.cache().get(EntityId::new(2)).unwrap().attendance, Some(40000));
    assert_eq!(*log.lock().unwrap(), vec!["list_succeeded"]);
    assert!(!client.is_loading_list());
}

#[tokio::test]
async fn test_concurrent_list_is_dropped_while_one_is_in_flight() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/tetres/adm/sevent/list"))
        .respond_with(
            ok(json!({ "list": [event(1, "Concert")] })).set_delay(Duration::from_millis(200)),
        )
        .expect(2)
        .mount(&server)
        .await;
    let log = record(&client);

    let (first, second) = tokio::join!(client.list(), client.list());
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
    let (first, second) = (first.unwrap(), second.unwrap());

    assert_eq!(
        [first.is_some(), second.is_some()].iter().filter(|s| **s).count(),
        1
    );
    assert_eq!(*log.lock().unwrap(), vec!["list_succeeded"]);

    // The guard is released once the first call has finished.
    assert!(client.list().await.unwrap().is_some());
    assert_eq!(log.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn test_listener_can_start_next_list_from_event() {
    let (server, client) = setup().await;
    mount_list(&server, vec![event(1, "Concert")]).await;

    let loading = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::clone(&loading);
    let watcher = client.clone();
    client.on_event(move |_: &DataEvent<SpecialEvent>| {
        seen.lock().unwrap().push(watcher.is_loading_list());
    });

    client.list().await.unwrap().unwrap();
    assert_eq!(*loading.lock().unwrap(), vec![false]);
}

#[tokio::test]
async fn test_envelope_failure_keeps_cache_and_fires_failure() {
    let (server, client) = setup().await;
    mount_list(&server, vec![event(1, "Concert")]).await;
    client.list().await.unwrap().unwrap();

    server.reset().await;
    Mock::given(method("GET"))
        .and(path("/tetres/adm/sevent/list"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "code": -1, "message": "db locked", "obj": null })),
        )
        .mount(&server)
        .await;

    let failures = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&failures);
    client.on_event(move |e: &DataEvent<SpecialEvent>| {
        if let Some(res) = e.failure() {
            sink.lock().unwrap().push(res.status);
        }
    });

    let outcome = client.list().await.unwrap().unwrap();

    assert!(!outcome.is_success());
    assert_eq!(outcome.failure().unwrap().status, 200);
    assert_eq!(*failures.lock().unwrap(), vec![200]);
    assert_eq!(names(&client), vec!["Concert"]);
}

#[tokio::test]
async fn test_http_error_fires_list_failed() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/tetres/adm/sevent/list"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;
    let log = record(&client);

    let outcome = client.list().await.unwrap().unwrap();

    assert_eq!(outcome.failure().unwrap().status, 500);
    assert_eq!(*log.lock().unwrap(), vec!["list_failed"]);
    assert!(client.snapshot().is_empty());
}

#[tokio::test]
async fn test_unreachable_server_reports_status_zero() {
    // Port 9 (discard) on localhost is not listening in test environments.
    let config = ClientConfig::new(Url::parse("http://127.0.0.1:9").unwrap());
    let client = DataClient::special_events(&config, config.http_transport().unwrap()).unwrap();
    let log = record(&client);

    let outcome = client.list().await.unwrap().unwrap();

    let res = outcome.failure().unwrap();
    assert_eq!(res.status, 0);
    assert!(res.is_transport_failure());
    assert_eq!(*log.lock().unwrap(), vec!["list_failed"]);
    assert!(!client.is_loading_list());
}

#[tokio::test]
async fn test_list_by_year_posts_year() {
    let (server, client) = setup().await;
    Mock::given(method("POST"))
        .and(path("/tetres/adm/sevent/list/year"))
        .and(body_string_contains("year=2024"))
        .respond_with(ok(json!({ "list": [event(5, "Parade")] })))
        .expect(1)
        .mount(&server)
        .await;

    let snap = client.list_by_year(Some(2024)).await.unwrap().unwrap();

    assert_eq!(snap.success().unwrap()[0].name, "Parade");
}

#[tokio::test]
async fn test_list_by_year_without_year_sends_empty_form() {
    let (server, client) = setup().await;
    Mock::given(method("POST"))
        .and(path("/tetres/adm/sevent/list/year"))
        .respond_with(ok(json!({ "list": [] })))
        .mount(&server)
        .await;

    client.list_by_year(None).await.unwrap().unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].body.is_empty());
}

// ── Years ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_years_fires_years_succeeded() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/tetres/adm/sevent/years"))
        .respond_with(ok(json!([2022, 2023, 2024])))
        .mount(&server)
        .await;

    let years = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&years);
    client.on_event(move |e: &DataEvent<SpecialEvent>| {
        if let DataEvent::YearsSucceeded(y) = e {
            sink.lock().unwrap().extend(y.iter().copied());
        }
    });

    let outcome = client.years().await.unwrap();

    assert_eq!(outcome, Outcome::Success(vec![2022, 2023, 2024]));
    assert_eq!(*years.lock().unwrap(), vec![2022, 2023, 2024]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_detached_years_delivers_through_listeners() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/tetres/adm/sevent/years"))
        .respond_with(ok(json!([2021])))
        .mount(&server)
        .await;
    let log = record(&client);

    let handle = client.years_detached(&Executor::current()).unwrap();
    handle.await.unwrap();

    assert_eq!(*log.lock().unwrap(), vec!["years_succeeded"]);
}

// ── Get ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_get_by_id_and_by_name() {
    let (server, client) = setup().await;
    Mock::given(method("POST"))
        .and(path("/tetres/adm/sevent/get"))
        .and(body_string_contains("id=7"))
        .respond_with(ok(event(7, "Air Show")))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/tetres/adm/sevent/get"))
        .and(body_string_contains("name=Air+Show"))
        .respond_with(ok(event(7, "Air Show")))
        .mount(&server)
        .await;

    let by_id = client.get(EntityId::new(7)).await.unwrap().success().unwrap();
    let by_name = client
        .get(GetKey::Name("Air Show".into()))
        .await
        .unwrap()
        .success()
        .unwrap();

    assert_eq!(by_id, by_name);
    assert!(client.snapshot().is_empty());
}

#[tokio::test]
async fn test_get_failure_carries_the_key() {
    let (server, client) = setup().await;
    Mock::given(method("POST"))
        .and(path("/tetres/adm/sevent/get"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "code": -1, "obj": null })))
        .mount(&server)
        .await;

    let keys = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&keys);
    client.on_event(move |e: &DataEvent<SpecialEvent>| {
        if let DataEvent::GetFailed { key, .. } = e {
            sink.lock().unwrap().push(key.clone());
        }
    });

    client.get(EntityId::new(99)).await.unwrap();

    assert_eq!(*keys.lock().unwrap(), vec![GetKey::Id(EntityId::new(99))]);
}

// ── Insert / update ─────────────────────────────────────────────────

#[tokio::test]
async fn test_insert_marks_stale_until_next_list() {
    let (server, client) = setup().await;
    mount_list(&server, vec![event(1, "Concert")]).await;
    Mock::given(method("POST"))
        .and(path("/tetres/adm/sevent/add"))
        .and(body_string_contains("SpecialEventInfo"))
        .respond_with(ok(json!(42)))
        .expect(1)
        .mount(&server)
        .await;
    client.list().await.unwrap().unwrap();
    let log = record(&client);

    let new = SpecialEvent {
        name: "Marathon".into(),
        ..SpecialEvent::default()
    };
    let id = client.insert(&new).await.unwrap().success().unwrap();

    assert_eq!(id, EntityId::new(42));
    assert!(client.is_stale());
    assert_eq!(names(&client), vec!["Concert"]);

    client.list().await.unwrap().unwrap();
    assert!(!client.is_stale());
    assert_eq!(*log.lock().unwrap(), vec!["insert_succeeded", "list_succeeded"]);
}

#[tokio::test]
async fn test_insert_failure_returns_the_entity() {
    let (server, client) = setup().await;
    Mock::given(method("POST"))
        .and(path("/tetres/adm/sevent/add"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "code": 0, "message": "duplicated" })))
        .mount(&server)
        .await;

    let failed = Arc::new(Mutex::new(None));
    let sink = Arc::clone(&failed);
    client.on_event(move |e: &DataEvent<SpecialEvent>| {
        if let DataEvent::InsertFailed { entity, .. } = e {
            *sink.lock().unwrap() = Some(entity.name.clone());
        }
    });

    let new = SpecialEvent {
        name: "Concert".into(),
        ..SpecialEvent::default()
    };
    let outcome = client.insert(&new).await.unwrap();

    assert!(!outcome.is_success());
    assert!(!client.is_stale());
    assert_eq!(failed.lock().unwrap().as_deref(), Some("Concert"));
}

#[tokio::test]
async fn test_insert_all_sends_list_of_documents() {
    let (server, client) = setup().await;
    Mock::given(method("POST"))
        .and(path("/tetres/adm/sevent/add_all"))
        .respond_with(ok(json!(null)))
        .mount(&server)
        .await;

    let items = vec![
        SpecialEvent {
            name: "A".into(),
            ..SpecialEvent::default()
        },
        SpecialEvent {
            name: "B".into(),
            ..SpecialEvent::default()
        },
    ];
    let outcome = client.insert_all(&items).await.unwrap();
    assert!(outcome.is_success());

    let requests = server.received_requests().await.unwrap();
    let form: Vec<(String, String)> =
        url::form_urlencoded::parse(&requests[0].body).into_owned().collect();
    assert_eq!(form[0].0, "data");
    let docs: Vec<String> = serde_json::from_str(&form[0].1).unwrap();
    assert_eq!(docs.len(), 2);
    let first: Value = serde_json::from_str(&docs[0]).unwrap();
    assert_eq!(first["name"], "A");
    assert_eq!(first["__class__"], "SpecialEventInfo");
}

#[tokio::test]
async fn test_insert_with_keeps_entity_as_data_field() {
    let (server, client) = setup().await;
    Mock::given(method("POST"))
        .and(path("/tetres/adm/sevent/add"))
        .respond_with(ok(json!(12)))
        .mount(&server)
        .await;

    let extra = FormData::new().text("data", "stale").text("note", "imported");
    let event = SpecialEvent {
        name: "Parade".into(),
        ..SpecialEvent::default()
    };
    let outcome = client.insert_with(&event, extra).await.unwrap();
    assert_eq!(outcome.success(), Some(EntityId::new(12)));

    let requests = server.received_requests().await.unwrap();
    let form: Vec<(String, String)> =
        url::form_urlencoded::parse(&requests[0].body).into_owned().collect();
    let keys: Vec<&str> = form.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(keys, vec!["data", "note"]);
    let data: Value = serde_json::from_str(&form[0].1).unwrap();
    assert_eq!(data["name"], "Parade");
}

#[tokio::test]
async fn test_update_requires_an_id() {
    let (server, client) = setup().await;
    let log = record(&client);

    let orphan = SpecialEvent::default();
    let err = client.update(&orphan, &orphan).await.unwrap_err();

    assert!(matches!(
        err,
        CoreError::MissingId {
            operation: Operation::Update,
            ..
        }
    ));
    assert!(log.lock().unwrap().is_empty());
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_update_sends_old_id_and_new_data() {
    let (server, client) = setup().await;
    Mock::given(method("POST"))
        .and(path("/tetres/adm/sevent/update"))
        .and(body_string_contains("id=3"))
        .and(body_string_contains("Renamed"))
        .respond_with(ok(json!(3)))
        .expect(1)
        .mount(&server)
        .await;

    let old = SpecialEvent {
        id: Some(EntityId::new(3)),
        name: "Original".into(),
        ..SpecialEvent::default()
    };
    let new = SpecialEvent {
        name: "Renamed".into(),
        ..old.clone()
    };

    let outcome = client.update(&old, &new).await.unwrap();
    assert_eq!(outcome, Outcome::Success(EntityId::new(3)));
    assert!(client.is_stale());
}

// ── Delete ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_delete_removes_only_confirmed_cached_ids() {
    let (server, client) = setup().await;
    mount_list(
        &server,
        vec![event(1, "A"), event(2, "B"), event(3, "C")],
    )
    .await;
    Mock::given(method("POST"))
        .and(path("/tetres/adm/sevent/delete"))
        .and(body_string_contains("ids=%5B2%2C9%5D"))
        .respond_with(ok(json!([2, 9])))
        .expect(1)
        .mount(&server)
        .await;
    client.list().await.unwrap().unwrap();

    let deleted = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&deleted);
    client.on_event(move |e: &DataEvent<SpecialEvent>| {
        if let DataEvent::DeleteSucceeded(ids) = e {
            sink.lock().unwrap().extend(ids.iter().copied());
        }
    });

    let confirmed = client
        .delete(&[EntityId::new(2), EntityId::new(9)])
        .await
        .unwrap()
        .success()
        .unwrap();

    assert_eq!(confirmed, vec![EntityId::new(2), EntityId::new(9)]);
    assert_eq!(*deleted.lock().unwrap(), vec![EntityId::new(2)]);
    assert_eq!(names(&client), vec!["A", "C"]);
}

#[tokio::test]
async fn test_delete_failure_keeps_cache() {
    let (server, client) = setup().await;
    mount_list(&server, vec![event(1, "A")]).await;
    Mock::given(method("POST"))
        .and(path("/tetres/adm/sevent/delete"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;
    client.list().await.unwrap().unwrap();
    let log = record(&client);

    let outcome = client.delete(&[EntityId::new(1)]).await.unwrap();

    assert_eq!(outcome.failure().unwrap().status, 403);
    assert_eq!(names(&client), vec!["A"]);
    assert_eq!(*log.lock().unwrap(), vec!["delete_failed"]);
}

// ── Unsupported operations ──────────────────────────────────────────

#[tokio::test]
async fn test_unsupported_operation_fails_without_request_or_event() {
    let server = MockServer::start().await;
    let config = ClientConfig::new(Url::parse(&server.uri()).unwrap());
    let client = DataClient::snow_routes(&config, config.http_transport().unwrap()).unwrap();
    let log = record(&client);

    let err = client.list_by_year(Some(2024)).await.unwrap_err();
    assert!(err.is_unsupported());
    assert!(client.years().await.unwrap_err().is_unsupported());
    assert!(client.insert_all(&[SnowRoute::default()]).await.unwrap_err().is_unsupported());

    assert!(log.lock().unwrap().is_empty());
    assert!(server.received_requests().await.unwrap().is_empty());
    assert!(!client.is_loading_list());
}

#[tokio::test]
async fn test_overridden_endpoint_is_used_and_disabled_one_is_unsupported() {
    let server = MockServer::start().await;
    let config = ClientConfig::new(Url::parse(&server.uri()).unwrap())
        .with_override("special_event", "list", "/v2/events")
        .with_override("special_event", "delete", "");
    let client = DataClient::special_events(&config, config.http_transport().unwrap()).unwrap();
    Mock::given(method("GET"))
        .and(path("/v2/events"))
        .respond_with(ok(json!({ "list": [] })))
        .expect(1)
        .mount(&server)
        .await;

    assert!(client.list().await.unwrap().unwrap().is_success());
    assert!(!client.supports(Operation::Delete));
    assert!(client.delete(&[EntityId::new(1)]).await.unwrap_err().is_unsupported());
}

// ── Listeners ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_removed_listener_receives_nothing() {
    let (server, client) = setup().await;
    mount_list(&server, vec![]).await;

    let log = Arc::new(Mutex::new(0_usize));
    let sink = Arc::clone(&log);
    let handle = client.on_event(move |_: &DataEvent<SpecialEvent>| *sink.lock().unwrap() += 1);

    client.list().await.unwrap();
    assert!(client.remove_listener(&handle));
    client.list().await.unwrap();

    assert_eq!(*log.lock().unwrap(), 1);
}

#[tokio::test]
async fn test_subscribers_see_the_refreshed_snapshot() {
    let (server, client) = setup().await;
    mount_list(&server, vec![event(2, "B"), event(1, "A")]).await;
    let mut rx = client.subscribe();
    assert!(rx.borrow().is_empty());

    client.list().await.unwrap();

    rx.changed().await.unwrap();
    let snap = rx.borrow_and_update().clone();
    let ids: Vec<i64> = snap.iter().map(|e| e.id.unwrap().get()).collect();
    assert_eq!(ids, vec![1, 2]);
}

#[tokio::test]
async fn test_event_stream_delivers_only_requested_operations() {
    let (server, client) = setup().await;
    mount_list(&server, vec![event(1, "A"), event(2, "B")]).await;
    Mock::given(method("POST"))
        .and(path("/tetres/adm/sevent/delete"))
        .respond_with(ok(json!([2])))
        .mount(&server)
        .await;
    let mut deletes = client.events().only([Operation::Delete]);
    assert_eq!(client.listener_count(), 1);

    client.list().await.unwrap();
    client.delete(&[EntityId::new(2)]).await.unwrap();

    let event = deletes.next().await.unwrap();
    assert_eq!(event.operation(), Operation::Delete);
    assert!(matches!(event, DataEvent::DeleteSucceeded(ids) if ids == vec![EntityId::new(2)]));

    drop(deletes);
    assert_eq!(client.listener_count(), 0);
}

#[tokio::test]
async fn test_event_stream_ends_when_client_is_dropped() {
    let (_server, client) = setup().await;
    let mut events = client.events();
    drop(client);
    assert!(events.next().await.is_none());
}

// ── Blocking execution ──────────────────────────────────────────────

#[test]
fn test_run_blocking_from_a_plain_thread() {
    let rt = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .unwrap();
    let server = rt.block_on(MockServer::start());
    rt.block_on(mount_list(&server, vec![event(1, "Concert")]));

    let config = ClientConfig::new(Url::parse(&server.uri()).unwrap());
    let client = DataClient::special_events(&config, config.http_transport().unwrap()).unwrap();
    let exec = Executor::new(rt.handle().clone());

    let task = client.clone();
    let outcome = exec
        .run_blocking("Loading special events", async move { task.list().await })
        .unwrap();

    assert!(outcome.unwrap().is_success());
    assert_eq!(names(&client), vec!["Concert"]);
}
