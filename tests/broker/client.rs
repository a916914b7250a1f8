//! `BrokerClient` against a live broker.

use std::time::Duration;

use courier::client::{BrokerClient, PublishError};
use courier::subscriber::RegistrationError;
use serde_json::json;

use crate::support::{start_broker, start_sink, within};

#[tokio::test]
async fn subscribe_then_publish() {
    let (base, broker) = start_broker().await;
    let (url, mut rx) = start_sink().await;
    let client = BrokerClient::new(format!("{base}/"), Duration::from_secs(5)).unwrap();

    client.subscribe("ORDER_CREATED", &url).await.unwrap();
    assert_eq!(broker.resolve("ORDER_CREATED"), vec![url.clone()]);

    let result = client
        .publish("ORDER_CREATED", json!({ "orderId": "o-1" }))
        .await
        .unwrap();
    assert_eq!(result.recipients, 1);
    assert_eq!(within(rx.recv()).await.unwrap(), json!({ "orderId": "o-1" }));
}

#[tokio::test]
async fn invalid_subscription_is_rejected() {
    let (base, _broker) = start_broker().await;
    let client = BrokerClient::new(base, Duration::from_secs(5)).unwrap();

    let err = client.subscribe("", "http://a/events").await.unwrap_err();
    assert_eq!(err, RegistrationError::Rejected(400));
}

#[tokio::test]
async fn publish_to_missing_broker_fails() {
    let client = BrokerClient::new("http://127.0.0.1:1", Duration::from_secs(1)).unwrap();
    let err = client.publish("X", json!({})).await.unwrap_err();
    assert!(matches!(err, PublishError::ConnectionFailed(_)));
}
