use std::path::{Path, PathBuf};

use axum::extract::Multipart;
use chrono::Utc;

use crate::error::ApiError;
use crate::models::menu::{MenuDocument, UpdatePricesRequest};
use crate::store::JsonStore;

const MAX_PDF_BYTES: usize = 5 * 1024 * 1024;
const PDF_FILENAME: &str = "menu-actual.pdf";

pub struct MenuService;

impl MenuService {
    pub async fn get(store: &JsonStore) -> MenuDocument {
        store.read().await.menu
    }

    /// On-disk location of the current menu PDF.
    pub fn pdf_path(uploads_dir: &str) -> PathBuf {
        Path::new(uploads_dir).join("pdf").join(PDF_FILENAME)
    }

    /// Pull the "pdf" file field out of the multipart body and store it.
    pub async fn upload_pdf(
        store: &JsonStore,
        uploads_dir: &str,
        mut multipart: Multipart,
    ) -> Result<MenuDocument, ApiError> {
        let mut file: Option<(Vec<u8>, String, String)> = None;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::Validation(format!("Carga multipart inválida: {e}")))?
        {
            let name = field.name().unwrap_or("").to_string();
            if name == "pdf" {
                let filename = field.file_name().unwrap_or(PDF_FILENAME).to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::Validation(format!("Carga multipart inválida: {e}")))?
                    .to_vec();
                file = Some((bytes, filename, content_type));
            }
        }

        let (bytes, filename, content_type) =
            file.ok_or_else(|| ApiError::Validation("No se subió ningún archivo".to_string()))?;

        Self::store_pdf(store, uploads_dir, &bytes, &filename, &content_type).await
    }

    /// Validate and persist the PDF: temp write + atomic rename over the
    /// fixed target, then update the document pointer.
    pub async fn store_pdf(
        store: &JsonStore,
        uploads_dir: &str,
        bytes: &[u8],
        original_name: &str,
        content_type: &str,
    ) -> Result<MenuDocument, ApiError> {
        if content_type != mime::APPLICATION_PDF.as_ref() {
            return Err(ApiError::Validation(
                "Solo se permiten archivos PDF".to_string(),
            ));
        }
        if bytes.len() > MAX_PDF_BYTES {
            return Err(ApiError::Validation(
                "El archivo supera el tamaño máximo de 5MB".to_string(),
            ));
        }

        let pdf_dir = Path::new(uploads_dir).join("pdf");
        tokio::fs::create_dir_all(&pdf_dir).await?;
        let target = pdf_dir.join(PDF_FILENAME);
        let tmp = pdf_dir.join(format!("{PDF_FILENAME}.tmp"));
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, &target).await?;

        let original_name = original_name.to_string();
        store
            .update(move |doc| {
                doc.menu.pdf_url = format!("/uploads/pdf/{PDF_FILENAME}");
                doc.menu.pdf_name = original_name;
                doc.menu.last_updated = Utc::now();
                Ok(doc.menu.clone())
            })
            .await
    }

    /// Merge the fixed-menu price blocks that were provided.
    pub async fn update_prices(
        store: &JsonStore,
        req: UpdatePricesRequest,
    ) -> Result<MenuDocument, ApiError> {
        if let Some(b) = [&req.menu_ejecutivo, &req.menu_especial]
            .into_iter()
            .flatten()
            .find(|b| b.precio < 0)
        {
            return Err(ApiError::Validation(format!(
                "El precio no puede ser negativo: {}",
                b.precio
            )));
        }

        store
            .update(move |doc| {
                if let Some(block) = req.menu_ejecutivo {
                    doc.menu.menu_ejecutivo = block;
                }
                if let Some(block) = req.menu_especial {
                    doc.menu.menu_especial = block;
                }
                doc.menu.last_updated = Utc::now();
                Ok(doc.menu.clone())
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::menu::MenuPrecio;

    #[tokio::test]
    async fn store_pdf_validates_mime_and_size() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("site.json"));
        let uploads = dir.path().join("uploads");
        let uploads = uploads.to_str().unwrap();

        let not_pdf =
            MenuService::store_pdf(&store, uploads, b"%PDF-1.7", "carta.pdf", "image/png")
                .await
                .unwrap_err();
        assert!(matches!(not_pdf, ApiError::Validation(_)));

        let too_big = vec![0u8; MAX_PDF_BYTES + 1];
        let oversized =
            MenuService::store_pdf(&store, uploads, &too_big, "carta.pdf", "application/pdf")
                .await
                .unwrap_err();
        assert!(matches!(oversized, ApiError::Validation(_)));
    }

    #[tokio::test]
    async fn store_pdf_replaces_the_previous_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("site.json"));
        let uploads = dir.path().join("uploads");
        let uploads = uploads.to_str().unwrap();

        MenuService::store_pdf(&store, uploads, b"%PDF-1.7 v1", "carta-v1.pdf", "application/pdf")
            .await
            .unwrap();
        let doc =
            MenuService::store_pdf(&store, uploads, b"%PDF-1.7 v2", "carta-v2.pdf", "application/pdf")
                .await
                .unwrap();

        assert_eq!(doc.pdf_name, "carta-v2.pdf");
        assert_eq!(doc.pdf_url, "/uploads/pdf/menu-actual.pdf");

        let on_disk = std::fs::read(MenuService::pdf_path(uploads)).unwrap();
        assert_eq!(on_disk, b"%PDF-1.7 v2");
    }

    #[tokio::test]
    async fn update_prices_merges_only_the_provided_block() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("site.json"));

        let before = MenuService::get(&store).await;

        let doc = MenuService::update_prices(
            &store,
            UpdatePricesRequest {
                menu_ejecutivo: Some(MenuPrecio {
                    precio: 18000,
                    descripcion: "Incluye jugo".to_string(),
                }),
                menu_especial: None,
            },
        )
        .await
        .unwrap();

        assert_eq!(doc.menu_ejecutivo.precio, 18000);
        assert_eq!(doc.menu_especial.precio, before.menu_especial.precio);

        let negativo = MenuService::update_prices(
            &store,
            UpdatePricesRequest {
                menu_ejecutivo: Some(MenuPrecio {
                    precio: -1,
                    descripcion: String::new(),
                }),
                menu_especial: None,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(negativo, ApiError::Validation(_)));
    }
}
