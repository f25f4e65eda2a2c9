use axum::{extract::State, routing::get, Json, Router};
use yatra_catalog::Train;

use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/trains", get(list_trains))
}

/// Catalog with live seat counts
async fn list_trains(State(state): State<AppState>) -> Json<Vec<Train>> {
    Json(state.service.trains().await)
}
