pub mod alternative;
pub mod catalog;
pub mod train;

pub use alternative::{AlternativeRoute, RouteLeg};
pub use catalog::TrainCatalog;
pub use train::{Station, Train, TrainClass};
