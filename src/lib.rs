pub mod config;
pub mod crypto;
pub mod domain {
    pub mod error;
    pub mod payment;
    pub mod ports;
    pub mod webhook;
}
pub mod gateways;
pub mod http {
    pub mod error;
    pub mod handlers {
        pub mod payments;
        pub mod webhooks;
    }
}
pub mod repo {
    pub mod in_memory;
    pub mod payments_repo;
    pub mod webhook_repo;
}
pub mod service {
    pub mod payment_service;
    pub mod retry;
    pub mod webhook_dispatcher;
    pub mod webhook_service;
}

#[derive(Clone)]
pub struct AppState {
    pub payment_service: service::payment_service::PaymentService,
    pub webhook_service: service::webhook_service::WebhookService,
}
