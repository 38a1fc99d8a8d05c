use axum::{extract::{Path, State}, routing::get, Json, Router};
use kereta_order::Order;
use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/my-orders", get(list_orders))
        .route("/api/orders/{order_id}", get(get_order))
}

async fn list_orders(State(state): State<AppState>) -> Result<Json<Vec<Order>>, AppError> {
    Ok(Json(state.bookings.list_orders().await?))
}

async fn get_order(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> Result<Json<Order>, AppError> {
    state.bookings.get_order(&order_id).await?
        .map(Json)
        .ok_or_else(|| AppError::NotFoundError(format!("Order with ID {} not found.", order_id)))
}
