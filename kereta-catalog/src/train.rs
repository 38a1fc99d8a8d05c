use serde::{Deserialize, Serialize};

/// Service class of a train or of a single leg.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TrainClass {
    Executive,
    Business,
    Economy,
}

/// One end of a train run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Station {
    pub station_code: String,
    pub station_name: String,
    pub city: String,
    /// Local time, `HH:MM`
    pub time: String,
}

impl Station {
    pub fn new(code: &str, name: &str, city: &str, time: &str) -> Self {
        Self {
            station_code: code.to_string(),
            station_name: name.to_string(),
            city: city.to_string(),
            time: time.to_string(),
        }
    }
}

/// A scheduled direct train. Prices are whole rupiah.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Train {
    pub train_id: String,
    pub train_name: String,
    pub train_type: TrainClass,
    pub departure: Station,
    pub arrival: Station,
    pub duration: String,
    pub price: i64,
    pub available_seats: u32,
}

impl Train {
    /// Case-insensitive substring match on the departure and arrival cities.
    pub fn serves(&self, origin: &str, destination: &str) -> bool {
        self.departure.city.to_lowercase().contains(&origin.to_lowercase())
            && self.arrival.city.to_lowercase().contains(&destination.to_lowercase())
    }

    pub fn fare_for(&self, passengers: u32) -> i64 {
        self.price * i64::from(passengers)
    }
}
