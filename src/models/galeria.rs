use serde::Serialize;

/// One image in the public gallery, served from the uploads directory.
#[derive(Debug, Clone, Serialize)]
pub struct GaleriaImage {
    pub name: String,
    pub url: String,
}
