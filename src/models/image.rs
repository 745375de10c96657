use super::common::ImageData;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageStyle {
    #[default]
    Realistic,
    Artistic,
    Cartoon,
    Professional,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageSize {
    #[default]
    #[serde(rename = "512x512")]
    Square,
    #[serde(rename = "768x512")]
    Landscape,
    #[serde(rename = "512x768")]
    Portrait,
}

impl ImageStyle {
    pub const ALL: [ImageStyle; 4] = [
        ImageStyle::Realistic,
        ImageStyle::Artistic,
        ImageStyle::Cartoon,
        ImageStyle::Professional,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ImageStyle::Realistic => "realistic",
            ImageStyle::Artistic => "artistic",
            ImageStyle::Cartoon => "cartoon",
            ImageStyle::Professional => "professional",
        }
    }
}

impl ImageSize {
    pub const ALL: [ImageSize; 3] = [ImageSize::Square, ImageSize::Landscape, ImageSize::Portrait];

    pub fn as_str(&self) -> &'static str {
        match self {
            ImageSize::Square => "512x512",
            ImageSize::Landscape => "768x512",
            ImageSize::Portrait => "512x768",
        }
    }

    /// (width, height) in pixels.
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            ImageSize::Square => (512, 512),
            ImageSize::Landscape => (768, 512),
            ImageSize::Portrait => (512, 768),
        }
    }
}

impl fmt::Display for ImageStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ImageStyle::ALL
            .into_iter()
            .find(|style| style.as_str() == s)
            .ok_or_else(|| format!("unknown image style '{}'", s))
    }
}

impl FromStr for ImageSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ImageSize::ALL
            .into_iter()
            .find(|size| size.as_str() == s)
            .ok_or_else(|| format!("unsupported image size '{}'", s))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedImage {
    pub id: String,
    pub prompt: String,
    pub style: ImageStyle,
    pub size: ImageSize,
    pub image_data: String,
    pub created_at: DateTime<Utc>,
}

impl GeneratedImage {
    /// `generated_{id}.png`
    pub fn download_name(&self) -> String {
        format!("generated_{}.png", self.id)
    }
}

impl ImageData for GeneratedImage {
    fn image_base64(&self) -> &str {
        &self.image_data
    }
}

/// Body of `POST /api/generate-image`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRequest {
    pub prompt: String,
    pub style: ImageStyle,
    pub size: ImageSize,
}

/// Body of `GET /api/images`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageHistory {
    pub images: Vec<GeneratedImage>,
    #[serde(default)]
    pub total: u64,
}
