use axum::{extract::State, routing::post, Json, Router};
use kereta_core::{AlternativeBookingRequest, BookTicketRequest};
use kereta_order::Order;
use serde::Serialize;
use serde_json::Value;
use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub status: &'static str,
    pub order_id: String,
    pub order_details: Order,
}

impl From<Order> for BookingResponse {
    fn from(order: Order) -> Self {
        Self {
            status: "success",
            order_id: order.id.clone(),
            order_details: order,
        }
    }
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/book-ticket", post(book_ticket))
        .route("/api/book-alternative-route", post(book_alternative_route))
        .route("/api/submit-order", post(submit_order))
}

async fn book_ticket(
    State(state): State<AppState>,
    Json(req): Json<BookTicketRequest>,
) -> Result<Json<BookingResponse>, AppError> {
    let order = state.bookings.book_train(req).await?;
    Ok(Json(order.into()))
}

async fn book_alternative_route(
    State(state): State<AppState>,
    Json(req): Json<AlternativeBookingRequest>,
) -> Result<Json<BookingResponse>, AppError> {
    let order = state.bookings.book_alternative_route(req).await?;
    Ok(Json(order.into()))
}

/// Superseded by `/api/book-ticket`; kept so older clients get a 200.
async fn submit_order() -> Json<Value> {
    tracing::debug!("Ignoring legacy submit-order request");
    Json(Value::Null)
}
