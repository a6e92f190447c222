use super::{parse_id, AppState};
use crate::error::CatalogError;
use crate::models::Sport;
use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};

pub async fn sport_exists(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, CatalogError> {
    let id = parse_id(&id, "sport")?;
    let exists = state.db.sport_exists(id).await?;
    Ok(Json(json!({ "exists": exists })))
}

pub async fn sport_details(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Sport>, CatalogError> {
    let id = parse_id(&id, "sport")?;
    Ok(Json(state.db.get_sport(id).await?))
}

/// Active sports only
pub async fn all_sports(State(state): State<AppState>) -> Result<Json<Vec<Sport>>, CatalogError> {
    Ok(Json(state.db.active_sports().await?))
}
