use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::{
    error::ApiError,
    models::{
        admin::{ChangePasswordRequest, ChangeUsernameRequest, LoginRequest},
        auth::AuthenticatedAdmin,
    },
    services::auth::AuthService,
    AppState,
};

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<Value>, ApiError> {
    let res = AuthService::login(
        &state.store,
        &body.username,
        &body.password,
        &state.config.jwt_secret,
        state.config.jwt_expiry_hours,
    )
    .await?;
    Ok(Json(serde_json::to_value(res).unwrap()))
}

pub async fn verify(
    State(state): State<AppState>,
    admin: AuthenticatedAdmin,
) -> Result<Json<Value>, ApiError> {
    let profile = AuthService::profile(&state.store, &admin.username).await?;
    Ok(Json(json!({ "valid": true, "admin": profile })))
}

pub async fn change_username(
    State(state): State<AppState>,
    admin: AuthenticatedAdmin,
    Json(body): Json<ChangeUsernameRequest>,
) -> Result<Json<Value>, ApiError> {
    let res = AuthService::change_username(
        &state.store,
        &admin.username,
        &body.current_password,
        &body.new_username,
        &state.config.jwt_secret,
        state.config.jwt_expiry_hours,
    )
    .await?;
    Ok(Json(serde_json::to_value(res).unwrap()))
}

pub async fn change_password(
    State(state): State<AppState>,
    admin: AuthenticatedAdmin,
    Json(body): Json<ChangePasswordRequest>,
) -> Result<Json<Value>, ApiError> {
    AuthService::change_password(
        &state.store,
        &admin.username,
        &body.current_password,
        &body.new_password,
    )
    .await?;
    Ok(Json(json!({
        "success": true,
        "message": "Contraseña actualizada exitosamente"
    })))
}
