use std::collections::HashMap;
use crate::alternative::{AlternativeRoute, Itinerary, LegTemplate};
use crate::train::{Station, Train, TrainClass};

/// Read-only train timetable plus the hand-authored transfer itineraries.
#[derive(Debug, Clone)]
pub struct TrainCatalog {
    trains: Vec<Train>,
    // Keyed by lowercase (origin, destination)
    alternatives: HashMap<(String, String), Vec<Itinerary>>,
}

impl TrainCatalog {
    /// Catalog with the KAI timetable the service ships with.
    pub fn seeded() -> Self {
        let mut alternatives = HashMap::new();
        alternatives.insert(
            ("jakarta".to_string(), "surabaya".to_string()),
            vec![Itinerary {
                route: "Jakarta → Cirebon → Surabaya",
                total_duration: "11h 30m",
                legs: vec![
                    LegTemplate {
                        from: "Jakarta", to: "Cirebon", train_name: "Argo Cheribon",
                        category: TrainClass::Executive, duration: "3h 0m", price: 250000,
                        departure_time: "08:00", arrival_time: "11:00",
                    },
                    LegTemplate {
                        from: "Cirebon", to: "Surabaya", train_name: "Bima",
                        category: TrainClass::Executive, duration: "8h 30m", price: 300000,
                        departure_time: "12:00", arrival_time: "20:30",
                    },
                ],
            }],
        );
        alternatives.insert(
            ("jakarta".to_string(), "yogyakarta".to_string()),
            vec![Itinerary {
                route: "Jakarta → Bandung → Yogyakarta",
                total_duration: "10h 15m",
                legs: vec![
                    LegTemplate {
                        from: "Jakarta", to: "Bandung", train_name: "Argo Parahyangan",
                        category: TrainClass::Executive, duration: "3h 15m", price: 150000,
                        departure_time: "09:00", arrival_time: "12:15",
                    },
                    LegTemplate {
                        from: "Bandung", to: "Yogyakarta", train_name: "Lodaya",
                        category: TrainClass::Business, duration: "7h 0m", price: 270000,
                        departure_time: "13:00", arrival_time: "20:00",
                    },
                ],
            }],
        );

        Self {
            trains: seed_trains(),
            alternatives,
        }
    }

    pub fn trains(&self) -> &[Train] {
        &self.trains
    }

    pub fn get_train(&self, train_id: &str) -> Option<&Train> {
        self.trains.iter().find(|t| t.train_id == train_id)
    }

    /// Direct trains whose departure city contains `origin` and arrival city
    /// contains `destination`, in timetable order.
    pub fn search_trains(&self, origin: &str, destination: &str) -> Vec<Train> {
        let results: Vec<Train> = self.trains.iter()
            .filter(|t| t.serves(origin, destination))
            .cloned()
            .collect();
        tracing::debug!("Direct search {} -> {}: {} trains", origin, destination, results.len());
        results
    }

    /// Transfer itineraries for an exact (trimmed, case-insensitive) city pair.
    pub fn find_alternative_routes(&self, origin: &str, destination: &str, date: &str) -> Vec<AlternativeRoute> {
        let key = (origin.trim().to_lowercase(), destination.trim().to_lowercase());

        self.alternatives.get(&key)
            .map(|itineraries| {
                itineraries.iter()
                    .map(|itinerary| itinerary.bind(origin, destination, date))
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl Default for TrainCatalog {
    fn default() -> Self {
        Self::seeded()
    }
}

fn seed_trains() -> Vec<Train> {
    let train = |id: &str, name: &str, class: TrainClass, departure: Station, arrival: Station, duration: &str, price: i64, seats: u32| Train {
        train_id: id.to_string(),
        train_name: name.to_string(),
        train_type: class,
        departure,
        arrival,
        duration: duration.to_string(),
        price,
        available_seats: seats,
    };

    vec![
        train("KAI001", "Argo Bromo Anggrek", TrainClass::Executive,
            Station::new("GMR", "Gambir", "Jakarta", "08:00"),
            Station::new("SGU", "Surabaya Pasarturi", "Surabaya", "17:00"),
            "9h 0m", 500000, 50),
        train("KAI002", "Gajayana", TrainClass::Executive,
            Station::new("GMR", "Gambir", "Jakarta", "18:40"),
            Station::new("ML", "Malang", "Malang", "09:27"),
            "14h 47m", 650000, 30),
        train("KAI003", "Taksaka", TrainClass::Executive,
            Station::new("GMR", "Gambir", "Jakarta", "20:45"),
            Station::new("YK", "Yogyakarta", "Yogyakarta", "04:15"),
            "7h 30m", 480000, 20),
        train("KAI004", "Argo Lawu", TrainClass::Executive,
            Station::new("GMR", "Gambir", "Jakarta", "08:30"),
            Station::new("SLO", "Solo Balapan", "Solo", "16:45"),
            "8h 15m", 520000, 40),
        train("KAI005", "Jayabaya", TrainClass::Economy,
            Station::new("PSE", "Pasar Senen", "Jakarta", "16:45"),
            Station::new("ML", "Malang", "Malang", "07:20"),
            "14h 35m", 280000, 100),
        train("KAI006", "Progo", TrainClass::Economy,
            Station::new("PSE", "Pasar Senen", "Jakarta", "22:30"),
            Station::new("LPN", "Lempuyangan", "Yogyakarta", "07:10"),
            "8h 40m", 180000, 15),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(trains: &[Train]) -> Vec<&str> {
        trains.iter().map(|t| t.train_id.as_str()).collect()
    }

    #[test]
    fn test_search_returns_all_and_only_matching_trains() {
        let catalog = TrainCatalog::seeded();

        assert_eq!(ids(&catalog.search_trains("jakarta", "malang")), vec!["KAI002", "KAI005"]);
        assert_eq!(ids(&catalog.search_trains("Jakarta", "YOGYA")), vec!["KAI003", "KAI006"]);
        assert_eq!(ids(&catalog.search_trains("jak", "sura")), vec!["KAI001"]);

        for origin in ["jakarta", "ja", "karta"] {
            for destination in ["surabaya", "malang", "solo", "yogyakarta"] {
                let found = catalog.search_trains(origin, destination);
                let expected: Vec<&Train> = catalog.trains().iter()
                    .filter(|t| t.departure.city.to_lowercase().contains(origin)
                        && t.arrival.city.to_lowercase().contains(destination))
                    .collect();
                assert_eq!(found.len(), expected.len(), "{} -> {}", origin, destination);
            }
        }
    }

    #[test]
    fn test_search_unknown_city_is_empty() {
        let catalog = TrainCatalog::seeded();
        assert!(catalog.search_trains("medan", "surabaya").is_empty());
        assert!(catalog.search_trains("jakarta", "bandung").is_empty());
    }

    #[test]
    fn test_alternatives_for_known_pairs() {
        let catalog = TrainCatalog::seeded();

        let routes = catalog.find_alternative_routes("jakarta", "surabaya", "2024-08-15");
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].route, "Jakarta → Cirebon → Surabaya");
        assert_eq!(routes[0].total_price, 550000);
        assert_eq!(routes[0].transfers, 1);
        assert_eq!(routes[0].origin, "Jakarta");
        assert_eq!(routes[0].destination, "Surabaya");
        assert!(routes[0].legs.iter().all(|leg| leg.date == "2024-08-15"));

        let routes = catalog.find_alternative_routes(" Jakarta ", "YOGYAKARTA", "2024-09-01");
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].route, "Jakarta → Bandung → Yogyakarta");
        assert_eq!(routes[0].total_price, 420000);
        assert_eq!(routes[0].legs[1].category, Some(TrainClass::Business));
    }

    #[test]
    fn test_alternatives_for_other_pairs_are_empty() {
        let catalog = TrainCatalog::seeded();
        assert!(catalog.find_alternative_routes("surabaya", "jakarta", "2024-08-15").is_empty());
        assert!(catalog.find_alternative_routes("jakarta", "malang", "2024-08-15").is_empty());
        assert!(catalog.find_alternative_routes("jak", "surabaya", "2024-08-15").is_empty());
    }

    #[test]
    fn test_get_train() {
        let catalog = TrainCatalog::seeded();
        assert_eq!(catalog.get_train("KAI004").map(|t| t.train_name.as_str()), Some("Argo Lawu"));
        assert!(catalog.get_train("KAI999").is_none());
    }
}
