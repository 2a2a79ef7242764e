use chrono::Utc;

use crate::error::ApiError;
use crate::models::reservas::{ReservaConfig, UpdateReservaRequest};
use crate::store::JsonStore;

pub struct ReservaService;

impl ReservaService {
    /// Lazily-defaulted singleton.
    pub async fn get(store: &JsonStore) -> ReservaConfig {
        store.read().await.reservas
    }

    /// Merge only the provided fields and stamp lastUpdated.
    pub async fn update(
        store: &JsonStore,
        req: UpdateReservaRequest,
    ) -> Result<ReservaConfig, ApiError> {
        store
            .update(move |doc| {
                let config = &mut doc.reservas;
                if let Some(v) = req.politica_cancelacion {
                    config.politica_cancelacion = v;
                }
                if let Some(v) = req.politica_modificacion {
                    config.politica_modificacion = v;
                }
                if let Some(v) = req.politica_abono {
                    config.politica_abono = v;
                }
                if let Some(v) = req.banco_nombre {
                    config.banco_nombre = v;
                }
                if let Some(v) = req.cuenta_numero {
                    config.cuenta_numero = v;
                }
                if let Some(v) = req.cuenta_tipo {
                    config.cuenta_tipo = v;
                }
                if let Some(v) = req.cuenta_nombre {
                    config.cuenta_nombre = v;
                }
                if let Some(v) = req.nequi_numero {
                    config.nequi_numero = v;
                }
                config.last_updated = Utc::now();
                Ok(config.clone())
            })
            .await
    }
}
