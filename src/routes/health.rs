use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::AppState;

/// The store never fails a read (defaults on any problem), so this mostly
/// confirms the process is up and the document is reachable.
pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let doc = state.store.read().await;
    Json(json!({
        "status": "ok",
        "almuerzos": doc.almuerzos.len(),
    }))
}
