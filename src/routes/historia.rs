use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::{
    error::ApiError,
    models::{auth::AuthenticatedAdmin, historia::UpdateHistoriaRequest},
    services::historia::HistoriaService,
    AppState,
};

pub async fn get_historia(State(state): State<AppState>) -> Json<Value> {
    let historia = HistoriaService::get(&state.store).await;
    Json(serde_json::to_value(historia).unwrap())
}

pub async fn update_historia(
    State(state): State<AppState>,
    _admin: AuthenticatedAdmin,
    Json(body): Json<UpdateHistoriaRequest>,
) -> Result<Json<Value>, ApiError> {
    let historia = HistoriaService::set(&state.store, &body.texto).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Historia actualizada exitosamente",
        "historia": historia
    })))
}
