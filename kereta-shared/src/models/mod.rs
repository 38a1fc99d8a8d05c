pub mod passenger;
