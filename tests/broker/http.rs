//! Wire-level behaviour of `/subscribe`, `/publish` and `/health`.

use serde_json::{json, Value};

use crate::support::start_broker;

#[tokio::test]
async fn health_check() {
    let (base, _broker) = start_broker().await;
    let resp = reqwest::get(format!("{base}/health")).await.unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "status": "ok", "service": "message-broker" }));
}

#[tokio::test]
async fn subscribe_echoes_request() {
    let (base, broker) = start_broker().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/subscribe"))
        .json(&json!({ "topic": "ORDER_CREATED", "url": "http://restaurant:8080/events" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(
        body,
        json!({
            "status": "subscribed",
            "topic": "ORDER_CREATED",
            "url": "http://restaurant:8080/events"
        })
    );
    assert_eq!(broker.resolve("ORDER_CREATED"), vec!["http://restaurant:8080/events"]);
}

#[tokio::test]
async fn subscribing_twice_keeps_one_entry() {
    let (base, broker) = start_broker().await;
    let client = reqwest::Client::new();

    for _ in 0..2 {
        let resp = client
            .post(format!("{base}/subscribe"))
            .json(&json!({ "topic": "X", "url": "http://a/events" }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
    }

    assert_eq!(broker.registry().subscriber_count("X"), 1);
}

#[tokio::test]
async fn subscribe_without_url_is_rejected() {
    let (base, broker) = start_broker().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/subscribe"))
        .json(&json!({ "topic": "X" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "error": "invalid argument: missing url" }));
    assert!(broker.registry().topics().is_empty());
}

#[tokio::test]
async fn subscribe_with_empty_topic_is_rejected() {
    let (base, _broker) = start_broker().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/subscribe"))
        .json(&json!({ "topic": "", "url": "http://a/events" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn malformed_body_is_rejected() {
    let (base, _broker) = start_broker().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/publish"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let body: Value = resp.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().starts_with("invalid argument"));
}

#[tokio::test]
async fn publish_without_data_is_rejected() {
    let (base, _broker) = start_broker().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/publish"))
        .json(&json!({ "topic": "X" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "error": "invalid argument: missing data" }));
}

#[tokio::test]
async fn publish_to_empty_topic_reports_zero_recipients() {
    let (base, _broker) = start_broker().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/publish"))
        .json(&json!({ "topic": "NOBODY_LISTENS", "data": { "x": 1 } }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "status": "published", "recipients": 0 }));
}
