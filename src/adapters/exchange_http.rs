use {
    crate::{
        AppState,
        adapters::api_errors::ApiError,
        domain::{
            error::ReconError,
            exchange::{CustomerDetails, ExchangeRequest},
            order::Order,
        },
        infra::postgres::order_repo,
        services::exchange,
    },
    axum::{
        Json,
        extract::{Path, State},
        http::StatusCode,
    },
    chrono::Utc,
    serde::Deserialize,
    uuid::Uuid,
};

// GET /orders/{id}
pub async fn get_order(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
) -> Result<Json<Order>, ApiError> {
    let order = order_repo::get_order(&state.pool, order_id)
        .await?
        .ok_or_else(|| ReconError::NotFound(format!("order {order_id}")))?;
    Ok(Json(order))
}

#[derive(Debug, Deserialize)]
pub struct ExchangeRequestBody {
    pub name: String,
    pub email: String,
    pub address: String,
    pub mobile: String,
    pub reason: String,
}

// POST /orders/{id}/exchange
pub async fn create_exchange_request(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
    Json(request): Json<ExchangeRequestBody>,
) -> Result<(StatusCode, Json<ExchangeRequest>), ApiError> {
    let customer = CustomerDetails {
        name: request.name,
        email: request.email,
        address: request.address,
        mobile: request.mobile,
    };

    let created = exchange::create_exchange_request(
        &state.pool,
        order_id,
        customer,
        request.reason,
        Utc::now(),
    )
    .await?;

    Ok((StatusCode::CREATED, Json(created)))
}
