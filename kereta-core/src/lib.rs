pub mod booking;
pub mod repository;
pub mod search;
pub mod session;

pub use booking::{AlternativeBookingRequest, BookTicketRequest, BookingService, OrderStatusSummary};
pub use repository::{OrderRepository, SessionRepository};
pub use search::{DirectRoute, RouteSearch, SearchRoutesRequest, SearchRoutesResult};
pub use session::{BookingSession, SessionStatus};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    ValidationError(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Internal service error: {0}")]
    InternalError(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
