pub mod app_config;
pub mod order_repo;
pub mod session_repo;

pub use order_repo::InMemoryOrderRepository;
pub use session_repo::InMemorySessionRepository;
