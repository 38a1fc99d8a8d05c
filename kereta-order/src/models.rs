use std::collections::HashMap;
use serde::{Deserialize, Serialize};
use kereta_catalog::{AlternativeRoute, Train};
use kereta_shared::PassengerInfo;

/// Every booking is confirmed on creation and never transitions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Confirmed,
}

/// One ride of an alternative-route booking.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OrderLeg {
    pub train_name: String,
    pub origin: String,
    pub destination: String,
    pub date: String,
    /// `"HH:MM - HH:MM"`
    pub time: String,
    pub seats: Vec<String>,
}

/// A confirmed booking held for the lifetime of the process
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub is_alternative: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub train_id: Option<String>,
    pub train_name: String,
    pub origin: String,
    pub destination: String,
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    pub passengers: u32,
    pub price: i64,
    pub status: OrderStatus,
    pub passengers_info: Vec<PassengerInfo>,
    /// Always `null`; refunds are tracked client-side
    pub refund_status: Option<String>,
    pub legs: Vec<OrderLeg>,
}

impl Order {
    /// Direct booking on a single train; the fare is the unit price times the head count.
    pub fn direct(
        id: String,
        train: &Train,
        date: &str,
        passengers: u32,
        passengers_info: Vec<PassengerInfo>,
    ) -> Self {
        Self {
            id,
            is_alternative: false,
            train_id: Some(train.train_id.clone()),
            train_name: train.train_name.clone(),
            origin: train.departure.city.clone(),
            destination: train.arrival.city.clone(),
            date: date.to_string(),
            time: Some(train.departure.time.clone()),
            passengers,
            price: train.fare_for(passengers),
            status: OrderStatus::Confirmed,
            passengers_info,
            refund_status: None,
            legs: Vec::new(),
        }
    }

    /// Multi-leg booking. `selected_seats` is keyed by the leg index as a string
    /// ("0", "1", ...); legs without an entry get no seats.
    pub fn alternative(
        id: String,
        route: &AlternativeRoute,
        booking_date: &str,
        passengers: u32,
        passengers_info: Vec<PassengerInfo>,
        selected_seats: &HashMap<String, Vec<String>>,
        total_price: i64,
    ) -> Self {
        let legs = route.legs.iter().enumerate().map(|(i, leg)| OrderLeg {
            train_name: leg.train_name.clone(),
            origin: leg.from.clone(),
            destination: leg.to.clone(),
            date: leg.date.clone(),
            time: format!("{} - {}", leg.departure_time, leg.arrival_time),
            seats: selected_seats.get(&i.to_string()).cloned().unwrap_or_default(),
        }).collect();

        Self {
            id,
            is_alternative: true,
            train_id: None,
            train_name: format!("Alternative: {} - {}", route.origin, route.destination),
            origin: route.origin.clone(),
            destination: route.destination.clone(),
            date: booking_date.to_string(),
            time: None,
            passengers,
            price: total_price,
            status: OrderStatus::Confirmed,
            passengers_info,
            refund_status: None,
            legs,
        }
    }
}
