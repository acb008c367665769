use crate::config::swagger_config::ApiDoc;
use crate::handlers::{
    all_banks::all_banks, create_customer::create_customer,
    create_customer_wallet::create_customer_wallet, create_wallet::create_wallet,
    customer_wallets::customer_wallets, get_balance::get_balance, get_customer::get_customer,
    get_customer::sync_customer, get_transaction::get_transaction, get_wallet::get_wallet,
    health::health_check, resolve_account::resolve_account,
    transaction_history::transaction_history, transfer::transfer, xpress_webhook::xpress_webhook,
};
use axum::routing::{get, post};
use axum::Router;
use payrail_core::app_state::AppState;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::{
    request_id::{MakeRequestUuid, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub fn create_router(state: Arc<AppState>) -> Router {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(2)
            .burst_size(10)
            .finish()
            .expect("Invalid rate limiter configuration"),
    );

    let mut router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/api/health", get(health_check))
        .route("/api/customers", post(create_customer).get(get_customer))
        .route("/api/customers/with-wallet", post(create_customer_wallet))
        .route("/api/customers/{customer_id}/sync", post(sync_customer))
        .route(
            "/api/customers/{customer_id}/wallets",
            get(customer_wallets),
        )
        .route("/api/wallets", post(create_wallet))
        .route("/api/wallets/{wallet_id}", get(get_wallet))
        .route("/api/wallets/{wallet_id}/balance", get(get_balance))
        .route("/api/transfers", post(transfer))
        .route(
            "/api/transactions",
            get(transaction_history),
        )
        .route("/api/transactions/{id_or_reference}", get(get_transaction))
        .route("/api/banks", get(all_banks))
        .route("/api/resolve_account", get(resolve_account))
        .route("/webhooks/xpress", post(xpress_webhook))
        .layer(axum::extract::DefaultBodyLimit::max(2 * 1024 * 1024))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http()),
        );

    // Rate limiting breaks key extraction under the test harness.
    if std::env::var("APP_ENV").unwrap_or_default() != "test" {
        router = router.layer(GovernorLayer::new(governor_conf));
    }

    router.with_state(state)
}
