use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use payments_server::service::webhook_dispatcher::PaymentEventPayload;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Local webhook receiver. Fails the first `failures_before_success`
/// requests with a 500, then records payloads and answers 200.
#[derive(Clone)]
pub struct WebhookSink {
    pub url: String,
    hits: Arc<AtomicUsize>,
    failures_left: Arc<AtomicUsize>,
    payloads: Arc<Mutex<Vec<PaymentEventPayload>>>,
}

impl WebhookSink {
    pub async fn start(failures_before_success: usize) -> Self {
        let hits = Arc::new(AtomicUsize::new(0));
        let failures_left = Arc::new(AtomicUsize::new(failures_before_success));
        let payloads = Arc::new(Mutex::new(Vec::new()));

        let sink = Self {
            url: String::new(),
            hits: hits.clone(),
            failures_left: failures_left.clone(),
            payloads: payloads.clone(),
        };

        let app = Router::new()
            .route("/hook", post(receive))
            .with_state(sink.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind sink");
        let addr = listener.local_addr().expect("sink addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve sink");
        });

        Self {
            url: format!("http://{addr}/hook"),
            hits,
            failures_left,
            payloads,
        }
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn payloads(&self) -> Vec<PaymentEventPayload> {
        self.payloads.lock().expect("payloads lock").clone()
    }

    /// Polls until `cond` holds, panicking after a few seconds.
    pub async fn wait_until<F: Fn(&Self) -> bool>(&self, cond: F) {
        for _ in 0..200 {
            if cond(self) {
                return;
            }
            tokio::time::sleep(Duration::from_millis(25)).await;
        }
        panic!("webhook sink condition not met in time");
    }
}

async fn receive(
    State(sink): State<WebhookSink>,
    Json(payload): Json<PaymentEventPayload>,
) -> StatusCode {
    sink.hits.fetch_add(1, Ordering::SeqCst);

    let failing = sink
        .failures_left
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| {
            left.checked_sub(1)
        })
        .is_ok();
    if failing {
        return StatusCode::INTERNAL_SERVER_ERROR;
    }

    sink.payloads.lock().expect("payloads lock").push(payload);
    StatusCode::OK
}
