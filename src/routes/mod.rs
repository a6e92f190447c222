pub mod fixtures;
pub mod sports;
pub mod teams;

use crate::db::Database;
use crate::error::CatalogError;
use axum::{
    routing::{get, post},
    Json, Router,
};
use tower_http::trace::TraceLayer;

/// State shared by every handler
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Database,
}

pub(crate) fn parse_id(raw: &str, entity: &'static str) -> Result<i64, CatalogError> {
    raw.parse().map_err(|_| CatalogError::InvalidId(entity))
}

async fn health() -> Json<&'static str> {
    Json("OK")
}

/// All HTTP routes of the catalog
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/v1/sport/exists/:id", get(sports::sport_exists))
        .route("/v1/sport/details/:id", get(sports::sport_details))
        .route("/v1/sports", get(sports::all_sports))
        .route("/v1/team/exists/:id", get(teams::team_exists))
        .route("/v1/team/details/:id", get(teams::team_details))
        .route(
            "/v1/fixtures/daterange",
            post(fixtures::fixtures_by_time_range),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
