use crate::error::{Result, StudioError};
use crate::models::{AdRequest, AdStyle, AdType, ImageRequest, ImageSize, ImageStyle, NewCompany};
use serde::Serialize;

/// Prompts offered as one-click starting points in the image studio.
pub const EXAMPLE_PROMPTS: [&str; 6] = [
    "A futuristic city skyline at night with neon lights reflecting on wet streets",
    "A cozy coffee shop interior with warm lighting and plants on the shelves",
    "A majestic mountain landscape at sunrise with mist in the valleys",
    "A minimalist product shot of a smartwatch on a marble surface",
    "A playful cartoon fox reading a book under a tree",
    "An underwater coral reef full of colorful tropical fish",
];

/// Client-side form state bound to input fields.
///
/// Updates never mutate in place: every edit returns a new draft, leaving
/// the old one untouched if the edit is rejected.
pub trait Draft: Default + Clone + PartialEq {
    const FIELDS: &'static [&'static str];

    fn with_field(&self, field: &str, value: &str) -> Result<Self>;

    /// Submit-time check of required fields.
    fn validate(&self) -> Result<()>;

    fn is_pristine(&self) -> bool {
        *self == Self::default()
    }
}

fn unknown_field(form: &str, field: &str) -> StudioError {
    StudioError::Validation(format!("{} has no field '{}'", form, field))
}

fn require(value: &str, label: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(StudioError::Validation(format!("{} is required", label)));
    }
    Ok(())
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompanyDraft {
    pub name: String,
    pub industry: String,
    pub product_service: String,
    pub target_audience: String,
    pub brand_description: String,
    pub website: String,
}

impl CompanyDraft {
    pub fn to_new_company(&self) -> NewCompany {
        NewCompany {
            name: self.name.trim().to_string(),
            industry: self.industry.trim().to_string(),
            product_service: self.product_service.trim().to_string(),
            target_audience: self.target_audience.trim().to_string(),
            brand_description: optional(&self.brand_description),
            website: optional(&self.website),
        }
    }
}

impl Draft for CompanyDraft {
    const FIELDS: &'static [&'static str] = &[
        "name",
        "industry",
        "product_service",
        "target_audience",
        "brand_description",
        "website",
    ];

    fn with_field(&self, field: &str, value: &str) -> Result<Self> {
        let mut next = self.clone();
        let slot = match field {
            "name" => &mut next.name,
            "industry" => &mut next.industry,
            "product_service" => &mut next.product_service,
            "target_audience" => &mut next.target_audience,
            "brand_description" => &mut next.brand_description,
            "website" => &mut next.website,
            other => return Err(unknown_field("company form", other)),
        };
        *slot = value.to_string();
        Ok(next)
    }

    fn validate(&self) -> Result<()> {
        require(&self.name, "Company name")?;
        require(&self.industry, "Industry")?;
        require(&self.product_service, "Product or service")?;
        require(&self.target_audience, "Target audience")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AdDraft {
    pub ad_type: AdType,
    pub style: AdStyle,
    pub custom_prompt: String,
}

impl AdDraft {
    pub fn to_request(&self, company_id: &str) -> AdRequest {
        AdRequest {
            company_id: company_id.to_string(),
            ad_type: self.ad_type,
            style: self.style,
            custom_prompt: self.custom_prompt.trim().to_string(),
        }
    }
}

impl Draft for AdDraft {
    const FIELDS: &'static [&'static str] = &["ad_type", "style", "custom_prompt"];

    fn with_field(&self, field: &str, value: &str) -> Result<Self> {
        let mut next = self.clone();
        match field {
            "ad_type" => next.ad_type = value.parse().map_err(StudioError::Validation)?,
            "style" => next.style = value.parse().map_err(StudioError::Validation)?,
            "custom_prompt" => next.custom_prompt = value.to_string(),
            other => return Err(unknown_field("ad form", other)),
        }
        Ok(next)
    }

    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImagePromptDraft {
    pub prompt: String,
    pub style: ImageStyle,
    pub size: ImageSize,
}

impl ImagePromptDraft {
    /// Replaces the whole prompt with one of [`EXAMPLE_PROMPTS`].
    pub fn with_example(&self, index: usize) -> Result<Self> {
        let prompt = EXAMPLE_PROMPTS.get(index).ok_or_else(|| {
            StudioError::Validation(format!("no example prompt at index {}", index))
        })?;
        Ok(Self {
            prompt: prompt.to_string(),
            ..self.clone()
        })
    }

    pub fn to_request(&self) -> ImageRequest {
        ImageRequest {
            prompt: self.prompt.trim().to_string(),
            style: self.style,
            size: self.size,
        }
    }
}

impl Draft for ImagePromptDraft {
    const FIELDS: &'static [&'static str] = &["prompt", "style", "size"];

    fn with_field(&self, field: &str, value: &str) -> Result<Self> {
        let mut next = self.clone();
        match field {
            "prompt" => next.prompt = value.to_string(),
            "style" => next.style = value.parse().map_err(StudioError::Validation)?,
            "size" => next.size = value.parse().map_err(StudioError::Validation)?,
            other => return Err(unknown_field("image form", other)),
        }
        Ok(next)
    }

    fn validate(&self) -> Result<()> {
        if self.prompt.trim().is_empty() {
            return Err(StudioError::Validation("Please enter a prompt".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_company_edits_are_immutable() {
        let empty = CompanyDraft::default();
        let named = empty.with_field("name", "Acme").unwrap();
        assert_eq!(empty.name, "");
        assert_eq!(named.name, "Acme");
        assert!(empty.is_pristine());
        assert!(!named.is_pristine());
    }

    #[test]
    fn test_company_rejects_unknown_field() {
        let err = CompanyDraft::default()
            .with_field("ceo", "Wile E.")
            .unwrap_err();
        assert!(matches!(err, StudioError::Validation(_)));
    }

    #[test]
    fn test_company_validation_and_optional_fields() {
        let draft = CompanyDraft {
            name: "Acme".into(),
            industry: "Retail".into(),
            product_service: "Shoes".into(),
            target_audience: " ".into(),
            ..Default::default()
        };
        assert_eq!(
            draft.validate(),
            Err(StudioError::Validation("Target audience is required".into()))
        );

        let draft = draft
            .with_field("target_audience", "Teens")
            .and_then(|d| d.with_field("website", "  "))
            .unwrap();
        assert!(draft.validate().is_ok());
        let body = draft.to_new_company();
        assert_eq!(body.website, None);
        assert_eq!(body.target_audience, "Teens");
    }

    #[test]
    fn test_ad_draft_defaults_and_enum_fields() {
        let draft = AdDraft::default();
        assert_eq!(draft.ad_type, AdType::Banner);
        assert_eq!(draft.style, AdStyle::Modern);

        let draft = draft.with_field("style", "bold").unwrap();
        assert_eq!(draft.style, AdStyle::Bold);
        assert!(draft.with_field("ad_type", "billboard").is_err());

        let request = draft.to_request("42");
        assert_eq!(request.company_id, "42");
        assert_eq!(request.custom_prompt, "");
    }

    #[test]
    fn test_example_prompt_replaces_whole_prompt() {
        let draft = ImagePromptDraft::default()
            .with_field("prompt", "half typed")
            .and_then(|d| d.with_field("size", "768x512"))
            .unwrap();
        let draft = draft.with_example(2).unwrap();
        assert_eq!(draft.prompt, EXAMPLE_PROMPTS[2]);
        assert_eq!(draft.size, ImageSize::Landscape);
        assert!(draft.with_example(EXAMPLE_PROMPTS.len()).is_err());
    }

    #[test]
    fn test_blank_prompt_is_rejected() {
        let draft = ImagePromptDraft::default()
            .with_field("prompt", "   ")
            .unwrap();
        assert!(draft.validate().is_err());
    }
}
