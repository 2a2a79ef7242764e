use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Singleton reservation policy + payment details record.
/// Lazily created with these defaults on first read.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReservaConfig {
    pub politica_cancelacion: String,
    pub politica_modificacion: String,
    pub politica_abono: String,
    pub banco_nombre: String,
    pub cuenta_numero: String,
    pub cuenta_tipo: String,
    pub cuenta_nombre: String,
    pub nequi_numero: String,
    pub last_updated: DateTime<Utc>,
}

impl Default for ReservaConfig {
    fn default() -> Self {
        Self {
            politica_cancelacion:
                "Se puede cancelar sin costo hasta 2 días antes de la fecha de la reserva."
                    .to_string(),
            politica_modificacion: "Se puede modificar la reserva hasta 8 horas antes."
                .to_string(),
            politica_abono:
                "Para eventos o platos especiales, se podría requerir un abono del 10% o 15% \
                 (configurable)."
                    .to_string(),
            banco_nombre: "BANCOLOMBIA".to_string(),
            cuenta_numero: "47675777558".to_string(),
            cuenta_tipo: "Ahorros".to_string(),
            cuenta_nombre: "María Mendoza".to_string(),
            nequi_numero: "@3105539582".to_string(),
            last_updated: Utc::now(),
        }
    }
}

/// Partial update: only the provided fields are merged in.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReservaRequest {
    pub politica_cancelacion: Option<String>,
    pub politica_modificacion: Option<String>,
    pub politica_abono: Option<String>,
    pub banco_nombre: Option<String>,
    pub cuenta_numero: Option<String>,
    pub cuenta_tipo: Option<String>,
    pub cuenta_nombre: Option<String>,
    pub nequi_numero: Option<String>,
}
