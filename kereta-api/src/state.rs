use std::sync::Arc;
use kereta_assistant::{ChatAgent, ChatModel, ToolRegistry};
use kereta_catalog::TrainCatalog;
use kereta_core::{BookingService, OrderRepository, RouteSearch, SessionRepository};

#[derive(Clone)]
pub struct AppState {
    pub search: Arc<RouteSearch>,
    pub bookings: Arc<BookingService>,
    pub sessions: Arc<dyn SessionRepository>,
    /// `None` when no model API key is configured
    pub chat: Option<Arc<ChatAgent>>,
}

impl AppState {
    pub fn new(
        orders: Arc<dyn OrderRepository>,
        sessions: Arc<dyn SessionRepository>,
        model: Option<Arc<dyn ChatModel>>,
        max_tool_rounds: usize,
    ) -> Self {
        let catalog = Arc::new(TrainCatalog::seeded());
        let search = Arc::new(RouteSearch::new(catalog.clone()));
        let bookings = Arc::new(BookingService::new(catalog, orders));

        let chat = model.map(|model| {
            let tools = ToolRegistry::new(search.clone(), bookings.clone());
            Arc::new(ChatAgent::new(model, tools, sessions.clone(), max_tool_rounds))
        });

        Self {
            search,
            bookings,
            sessions,
            chat,
        }
    }
}
