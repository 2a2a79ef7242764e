use axum::{
    body::Body,
    extract::{Multipart, State},
    http::header,
    response::Response,
    Json,
};
use serde_json::{json, Value};

use crate::{
    error::ApiError,
    models::{auth::AuthenticatedAdmin, menu::UpdatePricesRequest},
    services::menu::MenuService,
    AppState,
};

pub async fn get_menu(State(state): State<AppState>) -> Json<Value> {
    let menu = MenuService::get(&state.store).await;
    Json(serde_json::to_value(menu).unwrap())
}

/// Stream the current PDF, or 404 when none has been uploaded yet.
pub async fn current_pdf(State(state): State<AppState>) -> Result<Response, ApiError> {
    let path = MenuService::pdf_path(&state.config.uploads_dir);
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|_| ApiError::NotFound("No hay menú disponible".to_string()))?;

    let menu = MenuService::get(&state.store).await;
    let response = Response::builder()
        .header(header::CONTENT_TYPE, mime::APPLICATION_PDF.as_ref())
        .header(
            header::CONTENT_DISPOSITION,
            format!("inline; filename=\"{}\"", menu.pdf_name),
        )
        .body(Body::from(bytes))
        .map_err(|e| ApiError::Storage(e.into()))?;
    Ok(response)
}

pub async fn upload_pdf(
    State(state): State<AppState>,
    _admin: AuthenticatedAdmin,
    multipart: Multipart,
) -> Result<Json<Value>, ApiError> {
    let menu = MenuService::upload_pdf(&state.store, &state.config.uploads_dir, multipart).await?;
    Ok(Json(json!({
        "success": true,
        "message": "PDF actualizado correctamente",
        "menu": menu
    })))
}

pub async fn update_prices(
    State(state): State<AppState>,
    _admin: AuthenticatedAdmin,
    Json(body): Json<UpdatePricesRequest>,
) -> Result<Json<Value>, ApiError> {
    let menu = MenuService::update_prices(&state.store, body).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Precios actualizados correctamente",
        "menu": menu
    })))
}
