pub mod id;
pub mod models;

pub use id::OrderIdGenerator;
pub use models::{Order, OrderLeg, OrderStatus};
