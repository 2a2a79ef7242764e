use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuPrecio {
    pub precio: i64,
    pub descripcion: String,
}

/// Pointer to the uploaded menu PDF plus the two fixed-menu price blocks.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MenuDocument {
    pub pdf_url: String,
    pub pdf_name: String,
    pub menu_ejecutivo: MenuPrecio,
    pub menu_especial: MenuPrecio,
    pub last_updated: DateTime<Utc>,
}

impl Default for MenuDocument {
    fn default() -> Self {
        Self {
            pdf_url: "/uploads/pdf/menu-actual.pdf".to_string(),
            pdf_name: "menu-actual.pdf".to_string(),
            menu_ejecutivo: MenuPrecio {
                precio: 15000,
                descripcion: "Cambia todos los días".to_string(),
            },
            menu_especial: MenuPrecio {
                precio: 20000,
                descripcion: "Cambia todos los días".to_string(),
            },
            last_updated: Utc::now(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePricesRequest {
    pub menu_ejecutivo: Option<MenuPrecio>,
    pub menu_especial: Option<MenuPrecio>,
}
