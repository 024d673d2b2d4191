pub mod admin_http;
pub mod api_errors;
pub mod checkout_http;
pub mod exchange_http;
pub mod gateway_client;
pub mod webhook_http;
