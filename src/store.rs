use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::error::ApiError;
use crate::models::{
    admin::AdminCredential, almuerzo::AlmuerzoItem, historia::Historia, menu::MenuDocument,
    reservas::ReservaConfig,
};

/// The whole site content as one JSON document. Every field has a default so
/// a partial or freshly created file still deserializes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteDocument {
    pub historia: Historia,
    pub almuerzos: Vec<AlmuerzoItem>,
    pub reservas: ReservaConfig,
    pub menu: MenuDocument,
    pub admins: Vec<AdminCredential>,
}

/// File-backed document store. All mutations go through [`JsonStore::update`],
/// which serializes read-modify-write cycles behind an in-process mutex and
/// persists via write-to-temp + atomic rename, so concurrent writers cannot
/// lose each other's updates and readers never see a half-written file.
pub struct JsonStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Read the current document. A missing, empty or malformed backing file
    /// yields the defaults instead of an error.
    pub async fn read(&self) -> SiteDocument {
        let _guard = self.lock.lock().await;
        self.load().await
    }

    /// Run a read-modify-write cycle under the store lock. If the closure
    /// errors, nothing is written.
    pub async fn update<T, F>(&self, f: F) -> Result<T, ApiError>
    where
        F: FnOnce(&mut SiteDocument) -> Result<T, ApiError>,
    {
        let _guard = self.lock.lock().await;
        let mut doc = self.load().await;
        let out = f(&mut doc)?;
        self.persist(&doc).await?;
        Ok(out)
    }

    async fn load(&self) -> SiteDocument {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if !bytes.is_empty() => match serde_json::from_slice(&bytes) {
                Ok(doc) => doc,
                Err(e) => {
                    tracing::warn!(
                        "backing file {} is malformed ({e}), regenerating defaults",
                        self.path.display()
                    );
                    SiteDocument::default()
                }
            },
            _ => SiteDocument::default(),
        }
    }

    async fn persist(&self, doc: &SiteDocument) -> Result<(), ApiError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let bytes = serde_json::to_vec_pretty(doc)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}
