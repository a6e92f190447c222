use super::AppState;
use crate::error::CatalogError;
use crate::models::Fixture;
use crate::query::{fixtures_in_range, TimeRangeRequest};
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

/// `POST /v1/fixtures/daterange` with `{"start": ..., "end": ...}`
pub async fn fixtures_by_time_range(
    State(state): State<AppState>,
    body: Result<Json<TimeRangeRequest>, JsonRejection>,
) -> Result<Json<Vec<Fixture>>, CatalogError> {
    let Json(request) = body.map_err(|rejection| {
        tracing::debug!("Rejected range body: {}", rejection);
        CatalogError::InvalidBody
    })?;

    let fixtures = fixtures_in_range(&state.db, &request.start, &request.end).await?;
    Ok(Json(fixtures))
}
