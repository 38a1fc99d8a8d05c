use std::collections::HashMap;
use std::sync::Arc;
use serde::{de, Deserialize, Deserializer, Serialize};
use tracing::info;
use kereta_catalog::{AlternativeRoute, TrainCatalog};
use kereta_order::{Order, OrderIdGenerator, OrderStatus};
use kereta_shared::PassengerInfo;
use crate::repository::OrderRepository;
use crate::{CoreError, CoreResult};

/// Direct booking of one catalog train.
#[derive(Debug, Clone, Deserialize)]
pub struct BookTicketRequest {
    pub train_id: String,
    pub date: String,
    #[serde(deserialize_with = "whole_number")]
    pub passengers: u32,
    #[serde(default)]
    pub passengers_info: Vec<PassengerInfo>,
}

/// Booking of an itinerary returned by route search.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlternativeBookingRequest {
    pub route: AlternativeRoute,
    #[serde(deserialize_with = "whole_number")]
    pub passengers: u32,
    #[serde(default)]
    pub passengers_info: Vec<PassengerInfo>,
    #[serde(default)]
    pub selected_seats: HashMap<String, Vec<String>>,
    pub total_price: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct OrderStatusSummary {
    pub status: String,
    pub order_id: String,
    pub train_name: String,
    pub destination: String,
    pub booking_status: OrderStatus,
}

pub struct BookingService {
    catalog: Arc<TrainCatalog>,
    orders: Arc<dyn OrderRepository>,
    ids: OrderIdGenerator,
}

impl BookingService {
    pub fn new(catalog: Arc<TrainCatalog>, orders: Arc<dyn OrderRepository>) -> Self {
        Self {
            catalog,
            orders,
            ids: OrderIdGenerator::new(),
        }
    }

    pub async fn book_train(&self, req: BookTicketRequest) -> CoreResult<Order> {
        if req.passengers == 0 {
            return Err(CoreError::ValidationError("At least one passenger is required".to_string()));
        }

        let train = self.catalog.get_train(&req.train_id)
            .ok_or_else(|| CoreError::NotFound(format!("Train with ID {} not found.", req.train_id)))?;

        let order = Order::direct(self.ids.next_id(), train, &req.date, req.passengers, req.passengers_info);
        self.orders.insert(order.clone()).await?;

        info!("Order booked: {} ({} x{}, {})", order.id, order.train_name, order.passengers, order.price);
        Ok(order)
    }

    pub async fn book_alternative_route(&self, req: AlternativeBookingRequest) -> CoreResult<Order> {
        if req.passengers == 0 {
            return Err(CoreError::ValidationError("At least one passenger is required".to_string()));
        }
        if req.route.legs.is_empty() {
            return Err(CoreError::ValidationError("Route has no legs".to_string()));
        }
        let price = req.total_price.round();
        if !price.is_finite() || req.total_price < 0.0 || price >= i64::MAX as f64 {
            return Err(CoreError::ValidationError(format!("Invalid total price: {}", req.total_price)));
        }

        let booking_date = chrono::Local::now().format("%Y-%m-%d").to_string();
        let order = Order::alternative(
            self.ids.next_id(),
            &req.route,
            &booking_date,
            req.passengers,
            req.passengers_info,
            &req.selected_seats,
            price as i64,
        );
        self.orders.insert(order.clone()).await?;

        info!("Alternative order booked: {} ({}, {} legs)", order.id, order.train_name, order.legs.len());
        Ok(order)
    }

    pub async fn list_orders(&self) -> CoreResult<Vec<Order>> {
        self.orders.list().await
    }

    pub async fn get_order(&self, order_id: &str) -> CoreResult<Option<Order>> {
        self.orders.get(order_id).await
    }

    pub async fn order_status(&self, order_id: &str) -> CoreResult<OrderStatusSummary> {
        let order = self.orders.get(order_id).await?
            .ok_or_else(|| CoreError::NotFound(format!("Order with ID {} not found.", order_id)))?;

        Ok(OrderStatusSummary {
            status: "success".to_string(),
            order_id: order.id,
            train_name: order.train_name,
            destination: order.destination,
            booking_status: order.status,
        })
    }

    pub fn catalog(&self) -> &TrainCatalog {
        &self.catalog
    }
}

/// Head counts arrive from the hosted model as JSON numbers that may be
/// floats (`2.0`); accept any non-negative whole number.
fn whole_number<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    if value.fract() != 0.0 || value < 0.0 || value > f64::from(u32::MAX) {
        return Err(de::Error::custom(format!("expected a whole passenger count, got {}", value)));
    }
    Ok(value as u32)
}
