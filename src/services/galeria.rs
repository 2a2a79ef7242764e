use std::path::{Path, PathBuf};

use axum::extract::Multipart;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::galeria::GaleriaImage;

const MAX_IMAGE_BYTES: usize = 2 * 1024 * 1024;
const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "gif", "webp"];

pub struct GaleriaService;

impl GaleriaService {
    fn images_dir(uploads_dir: &str) -> PathBuf {
        Path::new(uploads_dir).join("images")
    }

    /// Gallery entries, name-sorted. A missing directory is just empty.
    pub async fn list(uploads_dir: &str) -> Result<Vec<GaleriaImage>, ApiError> {
        let dir = Self::images_dir(uploads_dir);
        let mut entries = match tokio::fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(_) => return Ok(Vec::new()),
        };

        let mut images = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name().to_string_lossy().to_string();
            let ext = Path::new(&name)
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| e.to_ascii_lowercase());
            if matches!(ext.as_deref(), Some(e) if IMAGE_EXTENSIONS.contains(&e)) {
                images.push(GaleriaImage {
                    url: format!("/uploads/images/{name}"),
                    name,
                });
            }
        }
        images.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(images)
    }

    /// Pull the "image" file field out of the multipart body and store it
    /// under a unique generated name.
    pub async fn upload(
        uploads_dir: &str,
        mut multipart: Multipart,
    ) -> Result<GaleriaImage, ApiError> {
        let mut file: Option<(Vec<u8>, String, String)> = None;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::Validation(format!("Carga multipart inválida: {e}")))?
        {
            let name = field.name().unwrap_or("").to_string();
            if name == "image" {
                let filename = field.file_name().unwrap_or("imagen.jpg").to_string();
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
            file.ok_or_else(|| ApiError::Validation("No se subió ninguna imagen".to_string()))?;

        Self::store_image(uploads_dir, &bytes, &filename, &content_type).await
    }

    pub async fn store_image(
        uploads_dir: &str,
        bytes: &[u8],
        original_name: &str,
        content_type: &str,
    ) -> Result<GaleriaImage, ApiError> {
        if !content_type.starts_with("image/") {
            return Err(ApiError::Validation(
                "Solo se permiten imágenes".to_string(),
            ));
        }
        if bytes.len() > MAX_IMAGE_BYTES {
            return Err(ApiError::Validation(
                "La imagen supera el tamaño máximo de 2MB".to_string(),
            ));
        }

        let ext = Path::new(original_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .filter(|e| IMAGE_EXTENSIONS.contains(&e.as_str()))
            .unwrap_or_else(|| "jpg".to_string());

        let dir = Self::images_dir(uploads_dir);
        tokio::fs::create_dir_all(&dir).await?;

        let name = format!("galeria-{}.{ext}", Uuid::new_v4());
        let target = dir.join(&name);
        let tmp = dir.join(format!("{name}.tmp"));
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, &target).await?;

        Ok(GaleriaImage {
            url: format!("/uploads/images/{name}"),
            name,
        })
    }

    /// Delete by bare filename; anything that could escape the images
    /// directory is rejected outright.
    pub async fn delete(uploads_dir: &str, filename: &str) -> Result<(), ApiError> {
        if filename.contains('/') || filename.contains('\\') || filename.contains("..") {
            return Err(ApiError::Validation(
                "Nombre de archivo inválido".to_string(),
            ));
        }

        let path = Self::images_dir(uploads_dir).join(filename);
        if tokio::fs::metadata(&path).await.is_err() {
            return Err(ApiError::NotFound("Imagen no encontrada".to_string()));
        }
        tokio::fs::remove_file(&path).await?;
        Ok(())
    }
}
