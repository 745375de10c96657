use crate::error::Result;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub ai_service: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

/// Body returned by the delete endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeleteReceipt {
    #[serde(default)]
    pub message: Option<String>,
}

/// Anything carrying a base64 encoded PNG.
pub trait ImageData {
    fn image_base64(&self) -> &str;

    fn decode(&self) -> Result<Vec<u8>> {
        Ok(STANDARD.decode(self.image_base64().trim())?)
    }

    /// `data:` URI for embedding the image directly.
    fn data_uri(&self) -> String {
        format!("data:image/png;base64,{}", self.image_base64())
    }
}

/// Replaces characters that are awkward in file names.
pub(crate) fn file_safe(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
