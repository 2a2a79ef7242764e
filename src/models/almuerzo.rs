use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Categoria {
    Base,
    Proteina,
    #[default]
    Acompanamiento,
    Extra,
    PlatoFuerte,
}

/// One selectable component of the "arma tu almuerzo" composer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlmuerzoItem {
    pub id: Uuid,
    pub nombre: String,
    #[serde(default)]
    pub descripcion: String,
    pub precio: i64,
    #[serde(default = "default_icono")]
    pub icono: String,
    #[serde(default)]
    pub categoria: Categoria,
    #[serde(default = "default_true")]
    pub disponible: bool,
    #[serde(default)]
    pub orden: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub fn default_icono() -> String {
    "🍽️".to_string()
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAlmuerzoRequest {
    pub nombre: String,
    pub descripcion: Option<String>,
    pub precio: i64,
    pub icono: Option<String>,
    pub categoria: Option<Categoria>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAlmuerzoRequest {
    pub nombre: Option<String>,
    pub descripcion: Option<String>,
    pub precio: Option<i64>,
    pub icono: Option<String>,
    pub categoria: Option<Categoria>,
    pub disponible: Option<bool>,
    pub orden: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct ReorderEntry {
    pub id: Uuid,
    pub orden: i64,
}

#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    pub items: Vec<ReorderEntry>,
}
