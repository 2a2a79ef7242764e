use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Singleton history blurb shown on the public site.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Historia {
    pub texto: String,
    pub updated_at: DateTime<Utc>,
}

impl Default for Historia {
    fn default() -> Self {
        Self {
            texto: "Bienvenidos a Maná Restobar, el corazón gastronómico de Pamplona, \
                    Norte de Santander."
                .to_string(),
            updated_at: Utc::now(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateHistoriaRequest {
    pub texto: String,
}
