mod common;

use common::WebhookSink;
use payments_server::domain::payment::Payment;
use payments_server::domain::ports::WebhookRegistry;
use payments_server::domain::webhook::Webhook;
use payments_server::repo::in_memory::InMemoryWebhookRegistry;
use payments_server::service::retry::RetryPolicy;
use payments_server::service::webhook_dispatcher::{NotificationOutcome, WebhookDispatcher};
use rust_decimal_macros::dec;
use std::sync::Arc;
use std::time::Duration;

fn fast_retry() -> RetryPolicy {
    RetryPolicy {
        max_attempts: 3,
        backoff: vec![Duration::from_millis(10), Duration::from_millis(10)],
        attempt_timeout: Duration::from_secs(2),
    }
}

fn dispatcher(registry: Arc<InMemoryWebhookRegistry>) -> WebhookDispatcher {
    WebhookDispatcher {
        registry,
        client: reqwest::Client::new(),
        retry: fast_retry(),
    }
}

fn processed_payment() -> Payment {
    let mut payment = Payment::new(
        "John".into(),
        "Doe".into(),
        "90210".into(),
        "opaque-card-ref".into(),
        dec!(25.00),
    );
    payment.mark_processing();
    payment.mark_processed();
    payment
}

async fn subscribe(registry: &InMemoryWebhookRegistry, url: &str) -> Webhook {
    let hook = Webhook::new(url.to_string());
    registry.save(&hook).await.unwrap();
    hook
}

#[tokio::test]
async fn fans_out_to_every_active_subscriber() {
    let registry = Arc::new(InMemoryWebhookRegistry::new());
    let first = WebhookSink::start(0).await;
    let second = WebhookSink::start(0).await;
    subscribe(&registry, &first.url).await;
    subscribe(&registry, &second.url).await;

    dispatcher(registry)
        .notify(&processed_payment(), NotificationOutcome::Created)
        .await;

    first.wait_until(|s| !s.payloads().is_empty()).await;
    second.wait_until(|s| !s.payloads().is_empty()).await;
    assert_eq!(first.payloads()[0].event_type, "payment.created");
    assert_eq!(second.payloads()[0].event_type, "payment.created");
}

#[tokio::test]
async fn inactive_subscriptions_are_skipped() {
    let registry = Arc::new(InMemoryWebhookRegistry::new());
    let active = WebhookSink::start(0).await;
    let inactive = WebhookSink::start(0).await;
    subscribe(&registry, &active.url).await;

    let mut hook = subscribe(&registry, &inactive.url).await;
    hook.deactivate();
    registry.save(&hook).await.unwrap();

    dispatcher(registry)
        .notify(&processed_payment(), NotificationOutcome::Created)
        .await;

    active.wait_until(|s| !s.payloads().is_empty()).await;
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(inactive.hits(), 0);
}

#[tokio::test]
async fn a_dead_endpoint_does_not_affect_other_deliveries() {
    let registry = Arc::new(InMemoryWebhookRegistry::new());
    let healthy = WebhookSink::start(0).await;
    // nothing listens on port 1
    subscribe(&registry, "http://127.0.0.1:1/hook").await;
    subscribe(&registry, &healthy.url).await;

    dispatcher(registry)
        .notify(&processed_payment(), NotificationOutcome::Created)
        .await;

    healthy.wait_until(|s| !s.payloads().is_empty()).await;
    assert_eq!(healthy.payloads().len(), 1);
}

#[tokio::test]
async fn retries_until_the_third_attempt_succeeds() {
    let registry = Arc::new(InMemoryWebhookRegistry::new());
    let flaky = WebhookSink::start(2).await;
    subscribe(&registry, &flaky.url).await;

    dispatcher(registry)
        .notify(&processed_payment(), NotificationOutcome::Created)
        .await;

    flaky.wait_until(|s| !s.payloads().is_empty()).await;
    assert_eq!(flaky.hits(), 3);
    assert_eq!(flaky.payloads().len(), 1);
}

#[tokio::test]
async fn gives_up_after_three_attempts_without_escalating() {
    let registry = Arc::new(InMemoryWebhookRegistry::new());
    let broken = WebhookSink::start(usize::MAX).await;
    subscribe(&registry, &broken.url).await;

    // notify itself never reports delivery failure
    dispatcher(registry)
        .notify(&processed_payment(), NotificationOutcome::Created)
        .await;

    broken.wait_until(|s| s.hits() >= 3).await;
    tokio::time::sleep(Duration::from_millis(150)).await;
    assert_eq!(broken.hits(), 3);
    assert!(broken.payloads().is_empty());
}

#[tokio::test]
async fn failure_outcome_carries_the_error_message() {
    let registry = Arc::new(InMemoryWebhookRegistry::new());
    let sink = WebhookSink::start(0).await;
    subscribe(&registry, &sink.url).await;

    let mut payment = Payment::new(
        "John".into(),
        "Doe".into(),
        "11111".into(),
        "opaque-card-ref".into(),
        dec!(25.00),
    );
    payment.mark_processing();
    payment.mark_failed();

    dispatcher(registry)
        .notify(
            &payment,
            NotificationOutcome::Failed(
                "Payment processing failed: Payment gateway error: blocked zip code".into(),
            ),
        )
        .await;

    sink.wait_until(|s| !s.payloads().is_empty()).await;
    let payloads = sink.payloads();
    assert_eq!(payloads[0].event_type, "payment.failed");
    assert!(payloads[0]
        .error_message
        .as_deref()
        .unwrap()
        .contains("blocked zip code"));
}

#[tokio::test]
async fn no_active_subscriptions_is_a_no_op() {
    let registry = Arc::new(InMemoryWebhookRegistry::new());

    // must return without error or panic
    dispatcher(registry)
        .notify(&processed_payment(), NotificationOutcome::Created)
        .await;
}
