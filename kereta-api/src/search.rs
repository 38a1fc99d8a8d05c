use axum::{extract::State, routing::{get, post}, Json, Router};
use kereta_catalog::Train;
use kereta_core::{SearchRoutesRequest, SearchRoutesResult};
use tracing::info;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/search-routes", post(search_routes))
        .route("/api/trains", get(list_trains))
}

async fn search_routes(
    State(state): State<AppState>,
    Json(req): Json<SearchRoutesRequest>,
) -> Json<SearchRoutesResult> {
    let result = state.search.search_routes(&req);
    info!(
        "Search {} -> {} on {}: {} direct, {} alternative",
        req.origin,
        req.destination,
        req.date,
        result.direct_routes.len(),
        result.alternative_routes.len()
    );
    Json(result)
}

async fn list_trains(State(state): State<AppState>) -> Json<Vec<Train>> {
    Json(state.search.catalog().trains().to_vec())
}
