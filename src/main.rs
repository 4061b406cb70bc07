use axum::routing::{get, patch, post};
use axum::Router;
use payments_server::config::AppConfig;
use payments_server::crypto::AesCardEncryption;
use payments_server::gateways::simple::SimpleGateway;
use payments_server::repo::payments_repo::PaymentsRepo;
use payments_server::repo::webhook_repo::WebhookRepo;
use payments_server::service::payment_service::PaymentService;
use payments_server::service::webhook_dispatcher::WebhookDispatcher;
use payments_server::service::webhook_service::WebhookService;
use payments_server::AppState;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cfg = AppConfig::from_env();

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&cfg.database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    let store = Arc::new(PaymentsRepo { pool: pool.clone() });
    let registry = Arc::new(WebhookRepo { pool });
    let dispatcher = WebhookDispatcher::new(registry.clone());

    let payment_service = PaymentService {
        store,
        encryption: Arc::new(AesCardEncryption::new(&cfg.encryption_key)),
        gateway: Arc::new(SimpleGateway),
        dispatcher,
    };
    let webhook_service = WebhookService { registry };

    let state = AppState {
        payment_service,
        webhook_service,
    };

    let app = Router::new()
        .route("/health", get(payments_server::http::handlers::payments::health))
        .route(
            "/api/payments",
            post(payments_server::http::handlers::payments::create_payment)
                .get(payments_server::http::handlers::payments::list_payments),
        )
        .route(
            "/api/payments/:id",
            get(payments_server::http::handlers::payments::get_payment),
        )
        .route(
            "/api/webhooks",
            post(payments_server::http::handlers::webhooks::register_webhook)
                .get(payments_server::http::handlers::webhooks::list_webhooks),
        )
        .route(
            "/api/webhooks/:id",
            get(payments_server::http::handlers::webhooks::get_webhook)
                .delete(payments_server::http::handlers::webhooks::delete_webhook),
        )
        .route(
            "/api/webhooks/:id/activate",
            patch(payments_server::http::handlers::webhooks::activate_webhook),
        )
        .route(
            "/api/webhooks/:id/deactivate",
            patch(payments_server::http::handlers::webhooks::deactivate_webhook),
        )
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&cfg.bind_addr).await?;
    tracing::info!("listening on {}", cfg.bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
