//! Local functions the model may call, and their declarations.

use std::sync::Arc;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn};
use kereta_core::{BookTicketRequest, BookingService, BookingSession, CoreError, RouteSearch};
use crate::gemini::{FunctionCall, FunctionDeclaration};

pub const SEARCH_TRAINS: &str = "search_trains";
pub const FIND_ALTERNATIVE_ROUTES: &str = "find_alternative_routes";
pub const GET_ORDER_STATUS: &str = "get_order_status";
pub const BOOK_TICKET_FROM_CHAT: &str = "book_ticket_from_chat";

/// Function declarations advertised to the model.
pub fn declarations() -> Vec<FunctionDeclaration> {
    vec![
        FunctionDeclaration {
            name: SEARCH_TRAINS.to_string(),
            description: "Search for available train tickets between two cities on a specific date.".to_string(),
            parameters: json!({
                "type": "OBJECT",
                "properties": {
                    "origin": {"type": "STRING", "description": "The departure city, e.g., 'Jakarta'"},
                    "destination": {"type": "STRING", "description": "The arrival city, e.g., 'Bandung'"},
                    "date": {"type": "STRING", "description": "The date of travel in YYYY-MM-DD format."},
                    "passengers": {"type": "INTEGER", "description": "The number of passengers."}
                },
                "required": ["origin", "destination", "date"]
            }),
        },
        FunctionDeclaration {
            name: FIND_ALTERNATIVE_ROUTES.to_string(),
            description: "Find alternative routes if no direct trains are available.".to_string(),
            parameters: json!({
                "type": "OBJECT",
                "properties": {
                    "origin": {"type": "STRING", "description": "The departure city."},
                    "destination": {"type": "STRING", "description": "The arrival city."},
                    "date": {"type": "STRING", "description": "The date of travel in YYYY-MM-DD format."}
                },
                "required": ["origin", "destination", "date"]
            }),
        },
        FunctionDeclaration {
            name: GET_ORDER_STATUS.to_string(),
            description: "Get the current status of a booking order using its Order ID.".to_string(),
            parameters: json!({
                "type": "OBJECT",
                "properties": {
                    "order_id": {"type": "STRING", "description": "The unique ID of the order, e.g., 'TRX1722784264'"}
                },
                "required": ["order_id"]
            }),
        },
        FunctionDeclaration {
            name: BOOK_TICKET_FROM_CHAT.to_string(),
            description: "Books a train ticket after user has selected a train and provided all passenger details.".to_string(),
            parameters: json!({
                "type": "OBJECT",
                "properties": {
                    "train_id": {"type": "STRING", "description": "The ID of the selected train, e.g., 'KAI001'."},
                    "date": {"type": "STRING", "description": "The date of travel in YYYY-MM-DD format."},
                    "passengers": {"type": "INTEGER", "description": "The total number of passengers."},
                    "passengers_info": {
                        "type": "ARRAY",
                        "description": "A list of passenger details.",
                        "items": {
                            "type": "OBJECT",
                            "properties": {
                                "name": {"type": "STRING", "description": "Full name of the passenger."},
                                "idNumber": {"type": "STRING", "description": "ID number of the passenger."}
                            }
                        }
                    }
                },
                "required": ["train_id", "date", "passengers", "passengers_info"]
            }),
        },
    ]
}

#[derive(Debug, Deserialize)]
struct SearchTrainsArgs {
    origin: String,
    destination: String,
    date: String,
    #[serde(default)]
    passengers: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct AlternativeRoutesArgs {
    origin: String,
    destination: String,
    date: String,
}

#[derive(Debug, Deserialize)]
struct OrderStatusArgs {
    order_id: String,
}

/// Dispatches model function calls to the search and booking services.
///
/// Every outcome, failures included, is turned into a JSON payload for the
/// model; a bad call never fails the chat request itself.
#[derive(Clone)]
pub struct ToolRegistry {
    search: Arc<RouteSearch>,
    bookings: Arc<BookingService>,
}

impl ToolRegistry {
    pub fn new(search: Arc<RouteSearch>, bookings: Arc<BookingService>) -> Self {
        Self { search, bookings }
    }

    pub async fn dispatch(&self, call: &FunctionCall, session: &mut BookingSession) -> Value {
        debug!("Dispatching tool {} with args {}", call.name, call.args);

        let result = match call.name.as_str() {
            SEARCH_TRAINS => self.search_trains(&call.args, session),
            FIND_ALTERNATIVE_ROUTES => self.find_alternative_routes(&call.args),
            GET_ORDER_STATUS => self.get_order_status(&call.args).await,
            BOOK_TICKET_FROM_CHAT => self.book_ticket(&call.args, session).await,
            other => {
                warn!("Model called unknown function {}", other);
                return error_payload(format!("Function '{}' is not available.", other));
            }
        };

        result.unwrap_or_else(|message| {
            warn!("Tool {} failed: {}", call.name, message);
            error_payload(message)
        })
    }

    fn search_trains(&self, args: &Value, session: &mut BookingSession) -> Result<Value, String> {
        let args: SearchTrainsArgs = parse_args(args)?;
        let trains = self.search.catalog().search_trains(args.origin.trim(), args.destination.trim());

        let passengers = args.passengers
            .filter(|p| p.fract() == 0.0 && *p >= 1.0)
            .map(|p| p as u32);
        session.record_search(&args.origin, &args.destination, &args.date, passengers, &trains);

        to_payload(&trains)
    }

    fn find_alternative_routes(&self, args: &Value) -> Result<Value, String> {
        let args: AlternativeRoutesArgs = parse_args(args)?;
        let routes = self.search.catalog().find_alternative_routes(&args.origin, &args.destination, &args.date);
        to_payload(&routes)
    }

    async fn get_order_status(&self, args: &Value) -> Result<Value, String> {
        let args: OrderStatusArgs = parse_args(args)?;
        let summary = self.bookings.order_status(&args.order_id).await.map_err(core_message)?;
        to_payload(&summary)
    }

    async fn book_ticket(&self, args: &Value, session: &mut BookingSession) -> Result<Value, String> {
        let req: BookTicketRequest = parse_args(args)?;
        let train = self.bookings.catalog().get_train(&req.train_id).cloned();
        let order = self.bookings.book_train(req).await.map_err(core_message)?;

        session.record_booking(&order, train);

        Ok(json!({
            "status": "success",
            "order_id": order.id,
            "train_name": order.train_name,
            "destination": order.destination,
        }))
    }
}

fn parse_args<T: DeserializeOwned>(args: &Value) -> Result<T, String> {
    serde_json::from_value(args.clone()).map_err(|e| format!("Invalid arguments: {}", e))
}

fn to_payload<T: serde::Serialize>(value: &T) -> Result<Value, String> {
    serde_json::to_value(value).map_err(|e| e.to_string())
}

fn core_message(err: CoreError) -> String {
    match err {
        CoreError::NotFound(msg) | CoreError::ValidationError(msg) => msg,
        other => other.to_string(),
    }
}

fn error_payload(message: impl Into<String>) -> Value {
    json!({ "status": "error", "message": message.into() })
}
