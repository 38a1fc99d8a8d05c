use std::sync::Arc;
use serde::{Deserialize, Serialize};
use kereta_catalog::{AlternativeRoute, Train, TrainCatalog};

#[derive(Debug, Clone, Deserialize)]
pub struct SearchRoutesRequest {
    pub origin: String,
    pub destination: String,
    pub date: String,
}

/// A direct train stamped with the requested travel date
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DirectRoute {
    #[serde(flatten)]
    pub train: Train,
    pub date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchRoutesResult {
    pub direct_routes: Vec<DirectRoute>,
    pub alternative_routes: Vec<AlternativeRoute>,
}

/// Route search over the static catalog: direct trains plus transfer itineraries.
#[derive(Debug, Clone)]
pub struct RouteSearch {
    catalog: Arc<TrainCatalog>,
}

impl RouteSearch {
    pub fn new(catalog: Arc<TrainCatalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &TrainCatalog {
        &self.catalog
    }

    /// Cities are trimmed and lowercased first. Unknown cities yield empty lists.
    pub fn search_routes(&self, req: &SearchRoutesRequest) -> SearchRoutesResult {
        let origin = req.origin.trim().to_lowercase();
        let destination = req.destination.trim().to_lowercase();

        let direct_routes = self.catalog.search_trains(&origin, &destination)
            .into_iter()
            .map(|train| DirectRoute { train, date: req.date.clone() })
            .collect();

        let alternative_routes = self.catalog.find_alternative_routes(&origin, &destination, &req.date);

        SearchRoutesResult {
            direct_routes,
            alternative_routes,
        }
    }
}
