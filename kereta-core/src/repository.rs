use async_trait::async_trait;
use kereta_order::Order;
use crate::session::BookingSession;
use crate::CoreResult;

/// Append-only order storage
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Store a new order. An order whose id is already present is a `Conflict`.
    async fn insert(&self, order: Order) -> CoreResult<()>;

    async fn get(&self, order_id: &str) -> CoreResult<Option<Order>>;

    /// Every stored order in insertion order.
    async fn list(&self) -> CoreResult<Vec<Order>>;
}

/// Chat booking sessions keyed by the client's session id
#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn get(&self, session_id: &str) -> CoreResult<Option<BookingSession>>;

    async fn save(&self, session: BookingSession) -> CoreResult<()>;
}
