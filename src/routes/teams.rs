use super::{parse_id, AppState};
use crate::error::CatalogError;
use crate::models::Team;
use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};

pub async fn team_exists(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, CatalogError> {
    let id = parse_id(&id, "team")?;
    let exists = state.db.team_exists(id).await?;
    Ok(Json(json!({ "exists": exists })))
}

pub async fn team_details(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Team>, CatalogError> {
    let id = parse_id(&id, "team")?;
    Ok(Json(state.db.get_team(id).await?))
}
