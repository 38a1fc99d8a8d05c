pub mod models;
pub mod pii;

pub use models::passenger::PassengerInfo;
pub use pii::Masked;
