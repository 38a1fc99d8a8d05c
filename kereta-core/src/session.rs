use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use kereta_catalog::Train;
use kereta_order::Order;
use kereta_shared::PassengerInfo;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    AwaitingDetails,
    Searching,
    Booked,
}

/// What the chat assistant has searched for and booked within one conversation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookingSession {
    pub session_id: String,
    pub status: SessionStatus,
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub date: Option<String>,
    pub passengers: Option<u32>,
    pub selected_train: Option<Train>,
    pub passenger_details: Vec<PassengerInfo>,
    pub last_search_results: Vec<Train>,
    pub order_ids: Vec<String>,
    pub updated_at: DateTime<Utc>,
}

impl BookingSession {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            status: SessionStatus::AwaitingDetails,
            origin: None,
            destination: None,
            date: None,
            passengers: None,
            selected_train: None,
            passenger_details: Vec::new(),
            last_search_results: Vec::new(),
            order_ids: Vec::new(),
            updated_at: Utc::now(),
        }
    }

    pub fn record_search(
        &mut self,
        origin: &str,
        destination: &str,
        date: &str,
        passengers: Option<u32>,
        results: &[Train],
    ) {
        self.status = SessionStatus::Searching;
        self.origin = Some(origin.to_string());
        self.destination = Some(destination.to_string());
        self.date = Some(date.to_string());
        if passengers.is_some() {
            self.passengers = passengers;
        }
        self.last_search_results = results.to_vec();
        self.updated_at = Utc::now();
    }

    pub fn record_booking(&mut self, order: &Order, train: Option<Train>) {
        self.status = SessionStatus::Booked;
        self.date = Some(order.date.clone());
        self.passengers = Some(order.passengers);
        self.passenger_details = order.passengers_info.clone();
        if train.is_some() {
            self.selected_train = train;
        }
        self.order_ids.push(order.id.clone());
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kereta_catalog::TrainCatalog;

    #[test]
    fn test_session_progression() {
        let catalog = TrainCatalog::seeded();
        let mut session = BookingSession::new("abc");
        assert_eq!(session.status, SessionStatus::AwaitingDetails);

        let results = catalog.search_trains("jakarta", "malang");
        session.record_search("jakarta", "malang", "2024-08-15", Some(2), &results);
        assert_eq!(session.status, SessionStatus::Searching);
        assert_eq!(session.last_search_results.len(), 2);
        assert_eq!(session.passengers, Some(2));

        session.record_search("jakarta", "solo", "2024-08-16", None, &[]);
        assert_eq!(session.passengers, Some(2));
        assert!(session.last_search_results.is_empty());

        let train = catalog.get_train("KAI002").cloned().unwrap();
        let order = Order::direct(
            "TRX1-1".to_string(),
            &train,
            "2024-08-15",
            1,
            vec![PassengerInfo::new("Ani", "321")],
        );
        session.record_booking(&order, Some(train));
        assert_eq!(session.status, SessionStatus::Booked);
        assert_eq!(session.order_ids, vec!["TRX1-1"]);
        assert_eq!(session.selected_train.as_ref().map(|t| t.train_id.as_str()), Some("KAI002"));
        assert_eq!(session.passenger_details.len(), 1);
    }

    #[test]
    fn test_status_wire_names() {
        let names: Vec<serde_json::Value> = [SessionStatus::AwaitingDetails, SessionStatus::Searching, SessionStatus::Booked]
            .iter()
            .map(|status| serde_json::to_value(status).unwrap())
            .collect();
        assert_eq!(names, vec!["awaiting_details", "searching", "booked"]);
    }
}
