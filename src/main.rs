use {
    axum::{
        Router,
        extract::DefaultBodyLimit,
        routing::{get, post, put},
    },
    order_recon::{
        AppState,
        adapters::{admin_http, checkout_http, exchange_http, gateway_client::RestGateway, webhook_http},
        infra::postgres::catalog_repo::PgCatalog,
        services::pricing::PricingPolicy,
    },
    sqlx::postgres::PgPoolOptions,
    std::{env, sync::Arc, time::Duration},
    tokio::signal,
    tower_http::timeout::TimeoutLayer,
};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    dotenvy::dotenv().ok();
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let gateway_base_url = env::var("GATEWAY_BASE_URL").expect("GATEWAY_BASE_URL must be set");
    let gateway_key_id = env::var("GATEWAY_KEY_ID").expect("GATEWAY_KEY_ID must be set");
    let gateway_key_secret =
        env::var("GATEWAY_KEY_SECRET").expect("GATEWAY_KEY_SECRET must be set");
    let webhook_secret =
        env::var("GATEWAY_WEBHOOK_SECRET").expect("GATEWAY_WEBHOOK_SECRET must be set");
    let admin_token = env::var("ADMIN_TOKEN").expect("ADMIN_TOKEN must be set");
    let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

    let pool = PgPoolOptions::new()
        .max_connections(20)
        .acquire_timeout(Duration::from_secs(3))
        .connect(&database_url)
        .await
        .expect("failed to connect to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("failed to run migrations");

    let gateway = RestGateway::new(gateway_base_url, gateway_key_id.clone(), gateway_key_secret.clone())
        .expect("failed to build gateway client");

    let state = AppState {
        pool: pool.clone(),
        catalog: Arc::new(PgCatalog::new(pool)),
        gateway: Arc::new(gateway),
        pricing: Arc::new(PricingPolicy::default()),
        gateway_key_id: gateway_key_id.into(),
        checkout_secret: gateway_key_secret.into(),
        webhook_secret: webhook_secret.into(),
        admin_token: admin_token.into(),
    };

    let app = Router::new()
        .route("/", get(|| async { "ok" }))
        .route("/checkout/intent", post(checkout_http::create_intent))
        .route("/checkout/verify", post(checkout_http::verify_checkout))
        .route("/orders/{id}", get(exchange_http::get_order))
        .route(
            "/orders/{id}/exchange",
            post(exchange_http::create_exchange_request),
        )
        .route("/webhooks/gateway", post(webhook_http::gateway_webhook))
        .route(
            "/admin/orders/{id}/status",
            put(admin_http::update_order_status),
        )
        .route(
            "/admin/exchange-requests/{id}",
            put(admin_http::decide_exchange_request),
        )
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(DefaultBodyLimit::max(64 * 1024)) // webhook payloads are small
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await.unwrap();
    tracing::info!("listening on {bind_addr}");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("failed to listen for ctrl+c");
    };

    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to listen for SIGTERM")
            .recv()
            .await;
    };

    tokio::select! {
        _ = ctrl_c => tracing::info!("received ctrl+c, shutting down"),
        _ = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
