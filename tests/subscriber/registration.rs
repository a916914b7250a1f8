//! `SubscriptionLoop` driving a real HTTP registrar.

use std::sync::atomic::Ordering;
use std::time::Duration;

use courier::client::BrokerClient;
use courier::subscriber::{RegistrationReport, SubscriptionLoop};

use crate::support::{fast_backoff, start_flaky_broker};

#[tokio::test]
async fn retries_through_rate_limit_and_outage() {
    let (base, calls) = start_flaky_broker().await;
    let client = BrokerClient::new(base, Duration::from_secs(2)).unwrap();

    let report = SubscriptionLoop::new(client, "ORDER_CREATED", "http://me:8080/events")
        .with_backoff(fast_backoff())
        .run()
        .await;

    assert_eq!(
        report,
        RegistrationReport {
            attempts: 3,
            delays: vec![Duration::from_millis(10), Duration::from_millis(20)],
        }
    );
    assert_eq!(calls.load(Ordering::SeqCst), 3);

    // Terminal: nothing else is sent once subscribed.
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn keeps_trying_while_broker_is_down() {
    let client = BrokerClient::new("http://127.0.0.1:1", Duration::from_secs(1)).unwrap();
    let handle = SubscriptionLoop::new(client, "X", "http://me/events")
        .with_backoff(fast_backoff())
        .spawn();

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(!handle.is_finished());
    handle.abort();
}
