use chrono::Utc;

use crate::error::ApiError;
use crate::models::historia::Historia;
use crate::store::JsonStore;

pub struct HistoriaService;

impl HistoriaService {
    pub async fn get(store: &JsonStore) -> Historia {
        store.read().await.historia
    }

    /// Overwrite the blurb wholesale. Empty text is rejected.
    pub async fn set(store: &JsonStore, texto: &str) -> Result<Historia, ApiError> {
        let texto = texto.trim().to_string();
        if texto.is_empty() {
            return Err(ApiError::Validation(
                "El texto no puede estar vacío".to_string(),
            ));
        }

        store
            .update(move |doc| {
                doc.historia.texto = texto;
                doc.historia.updated_at = Utc::now();
                Ok(doc.historia.clone())
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fresh_store_has_the_default_blurb() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("site.json"));

        let historia = HistoriaService::get(&store).await;
        assert!(historia.texto.contains("Maná Restobar"));
    }

    #[tokio::test]
    async fn set_overwrites_and_rejects_empty_text() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("site.json"));

        let updated = HistoriaService::set(&store, "Fundado en 1998.").await.unwrap();
        assert_eq!(updated.texto, "Fundado en 1998.");
        assert_eq!(HistoriaService::get(&store).await.texto, "Fundado en 1998.");

        let vacio = HistoriaService::set(&store, "   ").await.unwrap_err();
        assert!(matches!(vacio, ApiError::Validation(_)));
        // the stored text is untouched by the failed update
        assert_eq!(HistoriaService::get(&store).await.texto, "Fundado en 1998.");
    }
}
