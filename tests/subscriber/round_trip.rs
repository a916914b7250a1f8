//! Broker, listener and registration loop wired together.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use courier::broker::{self, Broker};
use courier::client::BrokerClient;
use courier::delivery::HttpDelivery;
use courier::subscriber::{self, ListenerState, SubscriptionLoop};
use serde_json::{json, Value};
use tokio::sync::mpsc;

use crate::support::{fast_backoff, start_server};

#[tokio::test]
async fn listener_receives_published_events_after_subscribing() {
    let broker = Arc::new(Broker::new(HttpDelivery::new(Duration::from_secs(5)).unwrap()));
    let broker_url = start_server(broker::router(Arc::clone(&broker))).await;

    let (tx, mut rx) = mpsc::unbounded_channel();
    let state = ListenerState::new("restaurant-service", move |event| {
        let _ = tx.send(event);
    });
    let listener_url = start_server(subscriber::router(state)).await;

    let client = BrokerClient::new(&broker_url, Duration::from_secs(5)).unwrap();
    let report = SubscriptionLoop::new(
        client.clone(),
        "ORDER_CREATED",
        format!("{listener_url}/events"),
    )
    .with_backoff(fast_backoff())
    .spawn()
    .await
    .unwrap();
    assert_eq!(report.attempts, 1);

    let result = client
        .publish("ORDER_CREATED", json!({ "orderId": "o-9", "origin": "OrderService-8001" }))
        .await
        .unwrap();
    assert_eq!(result.recipients, 1);

    let event = tokio::time::timeout(Duration::from_secs(2), rx.recv())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(event, json!({ "orderId": "o-9", "origin": "OrderService-8001" }));
}

#[tokio::test]
async fn listener_serves_before_registration_succeeds() {
    let state = ListenerState::new("restaurant-service", |_event| {});
    let listener_url = start_server(subscriber::router(state)).await;

    let client = BrokerClient::new("http://127.0.0.1:1", Duration::from_secs(1)).unwrap();
    let registration = SubscriptionLoop::new(client, "ORDER_CREATED", format!("{listener_url}/events"))
        .with_backoff(fast_backoff())
        .spawn();

    let health: Value = reqwest::get(format!("{listener_url}/health"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(health, json!({ "status": "ok", "service": "restaurant-service" }));

    let ack: Value = reqwest::Client::new()
        .post(format!("{listener_url}/events"))
        .json(&json!({ "orderId": 1 }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(ack, json!({ "status": "received" }));

    assert!(!registration.is_finished());
    registration.abort();
}

#[tokio::test]
async fn slow_handler_does_not_hold_up_other_requests() {
    let started = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&started);
    let state = ListenerState::new("restaurant-service", move |_event| {
        flag.store(true, Ordering::SeqCst);
        std::thread::sleep(Duration::from_millis(500));
    });
    let listener_url = start_server(subscriber::router(state)).await;

    let events_url = format!("{listener_url}/events");
    let delivery = tokio::spawn(async move {
        reqwest::Client::new()
            .post(events_url)
            .json(&json!({ "orderId": 2 }))
            .send()
            .await
            .unwrap()
            .status()
    });
    while !started.load(Ordering::SeqCst) {
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    let health = tokio::time::timeout(
        Duration::from_millis(250),
        reqwest::get(format!("{listener_url}/health")),
    )
    .await
    .expect("health blocked behind the event handler")
    .unwrap();
    assert_eq!(health.status(), 200);
    assert!(!delivery.is_finished());

    assert_eq!(delivery.await.unwrap(), 200);
}

#[tokio::test]
async fn panicking_handler_answers_500() {
    let state = ListenerState::new("restaurant-service", |_event| panic!("bad event"));
    let listener_url = start_server(subscriber::router(state)).await;

    let resp = reqwest::Client::new()
        .post(format!("{listener_url}/events"))
        .json(&json!({ "orderId": 3 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 500);
}
