use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::{
    error::ApiError,
    models::{auth::AuthenticatedAdmin, reservas::UpdateReservaRequest},
    services::reservas::ReservaService,
    AppState,
};

pub async fn get_config(State(state): State<AppState>) -> Json<Value> {
    let config = ReservaService::get(&state.store).await;
    Json(serde_json::to_value(config).unwrap())
}

pub async fn update_config(
    State(state): State<AppState>,
    _admin: AuthenticatedAdmin,
    Json(body): Json<UpdateReservaRequest>,
) -> Result<Json<Value>, ApiError> {
    let config = ReservaService::update(&state.store, body).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Configuración de reservas actualizada correctamente",
        "config": config
    })))
}
