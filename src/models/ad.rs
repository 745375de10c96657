use super::common::{file_safe, ImageData};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdType {
    #[default]
    Banner,
    Square,
    Story,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdStyle {
    #[default]
    Modern,
    Classic,
    Minimalist,
    Bold,
}

impl AdType {
    pub const ALL: [AdType; 3] = [AdType::Banner, AdType::Square, AdType::Story];

    pub fn as_str(&self) -> &'static str {
        match self {
            AdType::Banner => "banner",
            AdType::Square => "square",
            AdType::Story => "story",
        }
    }
}

impl AdStyle {
    pub const ALL: [AdStyle; 4] = [
        AdStyle::Modern,
        AdStyle::Classic,
        AdStyle::Minimalist,
        AdStyle::Bold,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AdStyle::Modern => "modern",
            AdStyle::Classic => "classic",
            AdStyle::Minimalist => "minimalist",
            AdStyle::Bold => "bold",
        }
    }
}

impl fmt::Display for AdType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for AdStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AdType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown ad type '{}'", s))
    }
}

impl FromStr for AdStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AdStyle::ALL
            .into_iter()
            .find(|style| style.as_str() == s)
            .ok_or_else(|| format!("unknown ad style '{}'", s))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ad {
    pub id: String,
    pub company_id: String,
    pub ad_type: AdType,
    pub style: AdStyle,
    pub image_data: String,
    pub created_at: DateTime<Utc>,
}

impl Ad {
    /// `{companyName}_ad_{id}.png`
    pub fn download_name(&self, company_name: &str) -> String {
        format!("{}_ad_{}.png", file_safe(company_name), self.id)
    }
}

impl ImageData for Ad {
    fn image_base64(&self) -> &str {
        &self.image_data
    }
}

/// Body of `POST /api/generate-ad`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdRequest {
    pub company_id: String,
    pub ad_type: AdType,
    pub style: AdStyle,
    pub custom_prompt: String,
}
