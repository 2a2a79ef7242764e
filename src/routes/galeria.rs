use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use crate::{
    error::ApiError, models::auth::AuthenticatedAdmin, services::galeria::GaleriaService, AppState,
};

pub async fn list_images(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let images = GaleriaService::list(&state.config.uploads_dir).await?;
    Ok(Json(serde_json::to_value(images).unwrap()))
}

pub async fn upload_image(
    State(state): State<AppState>,
    _admin: AuthenticatedAdmin,
    multipart: Multipart,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let image = GaleriaService::upload(&state.config.uploads_dir, multipart).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Imagen subida correctamente",
            "file": image
        })),
    ))
}

pub async fn delete_image(
    State(state): State<AppState>,
    _admin: AuthenticatedAdmin,
    Path(filename): Path<String>,
) -> Result<Json<Value>, ApiError> {
    GaleriaService::delete(&state.config.uploads_dir, &filename).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Imagen eliminada correctamente"
    })))
}
