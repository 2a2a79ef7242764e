use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::{
    error::ApiError,
    models::{
        almuerzo::{CreateAlmuerzoRequest, ReorderRequest, UpdateAlmuerzoRequest},
        auth::AuthenticatedAdmin,
    },
    services::almuerzos::AlmuerzoService,
    AppState,
};

/// Public: disponible items only, composer order.
pub async fn list_items(State(state): State<AppState>) -> Json<Value> {
    let items = AlmuerzoService::list_active(&state.store).await;
    Json(serde_json::to_value(items).unwrap())
}

/// Admin: every item, inactive included.
pub async fn list_all_items(
    State(state): State<AppState>,
    _admin: AuthenticatedAdmin,
) -> Json<Value> {
    let items = AlmuerzoService::list_all(&state.store).await;
    Json(serde_json::to_value(items).unwrap())
}

pub async fn create_item(
    State(state): State<AppState>,
    _admin: AuthenticatedAdmin,
    Json(body): Json<CreateAlmuerzoRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let item = AlmuerzoService::create(&state.store, body).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Ítem creado correctamente",
            "item": item
        })),
    ))
}

pub async fn update_item(
    State(state): State<AppState>,
    _admin: AuthenticatedAdmin,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateAlmuerzoRequest>,
) -> Result<Json<Value>, ApiError> {
    let item = AlmuerzoService::update(&state.store, id, body).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Ítem actualizado correctamente",
        "item": item
    })))
}

pub async fn delete_item(
    State(state): State<AppState>,
    _admin: AuthenticatedAdmin,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    AlmuerzoService::delete(&state.store, id).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Ítem eliminado correctamente"
    })))
}

pub async fn reorder_items(
    State(state): State<AppState>,
    _admin: AuthenticatedAdmin,
    Json(body): Json<ReorderRequest>,
) -> Result<Json<Value>, ApiError> {
    AlmuerzoService::reorder(&state.store, body.items).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Ítems reordenados correctamente"
    })))
}
