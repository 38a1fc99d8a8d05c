use serde::{Deserialize, Serialize};
use crate::train::TrainClass;

/// One train ride inside a multi-leg itinerary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RouteLeg {
    pub from: String,
    pub to: String,
    pub train_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<TrainClass>,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub price: i64,
    pub departure_time: String,
    pub arrival_time: String,
    pub date: String,
}

/// A hand-authored itinerary with a transfer, offered when no direct train fits.
///
/// `origin` and `destination` echo the search query rather than the first and
/// last leg, so the client can show the itinerary under the cities it asked for.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AlternativeRoute {
    #[serde(default)]
    pub route: String,
    #[serde(default)]
    pub total_duration: String,
    #[serde(default)]
    pub transfers: u32,
    #[serde(default)]
    pub total_price: i64,
    pub legs: Vec<RouteLeg>,
    pub origin: String,
    pub destination: String,
}

/// Static shape of an itinerary before it is bound to a query.
#[derive(Debug, Clone)]
pub(crate) struct Itinerary {
    pub route: &'static str,
    pub total_duration: &'static str,
    pub legs: Vec<LegTemplate>,
}

#[derive(Debug, Clone)]
pub(crate) struct LegTemplate {
    pub from: &'static str,
    pub to: &'static str,
    pub train_name: &'static str,
    pub category: TrainClass,
    pub duration: &'static str,
    pub price: i64,
    pub departure_time: &'static str,
    pub arrival_time: &'static str,
}

impl Itinerary {
    pub(crate) fn bind(&self, origin: &str, destination: &str, date: &str) -> AlternativeRoute {
        let legs: Vec<RouteLeg> = self.legs.iter().map(|leg| RouteLeg {
            from: leg.from.to_string(),
            to: leg.to.to_string(),
            train_name: leg.train_name.to_string(),
            category: Some(leg.category),
            duration: leg.duration.to_string(),
            price: leg.price,
            departure_time: leg.departure_time.to_string(),
            arrival_time: leg.arrival_time.to_string(),
            date: date.to_string(),
        }).collect();

        AlternativeRoute {
            route: self.route.to_string(),
            total_duration: self.total_duration.to_string(),
            transfers: legs.len().saturating_sub(1) as u32,
            total_price: legs.iter().map(|leg| leg.price).sum(),
            legs,
            origin: title_case(origin),
            destination: title_case(destination),
        }
    }
}

/// "new york" -> "New York"
pub(crate) fn title_case(input: &str) -> String {
    input
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
