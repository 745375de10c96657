#![allow(dead_code)]

use adstudio::{
    Ad, AdRequest, Backend, Company, DeleteReceipt, GeneratedImage, HealthStatus, ImageHistory,
    ImageRequest, NewCompany, Result, StudioError,
};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

/// In-memory backend recording every call it receives.
#[derive(Default)]
pub struct MemoryBackend {
    companies: Mutex<Vec<Company>>,
    ads: Mutex<Vec<Ad>>,
    images: Mutex<Vec<GeneratedImage>>,
    calls: Mutex<Vec<String>>,
    failing: Mutex<HashMap<&'static str, StudioError>>,
    delays: Mutex<HashMap<String, Duration>>,
    panicking: Mutex<HashSet<&'static str>>,
    next_id: Mutex<u64>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_company(self, id: &str, name: &str) -> Self {
        self.companies.lock().unwrap().push(company(id, name));
        self
    }

    pub fn with_ad(self, id: &str, company_id: &str) -> Self {
        self.ads.lock().unwrap().push(Ad {
            id: id.to_string(),
            company_id: company_id.to_string(),
            ad_type: Default::default(),
            style: Default::default(),
            image_data: "AAAA".to_string(),
            created_at: Utc::now(),
        });
        self
    }

    pub fn with_image(self, id: &str, prompt: &str) -> Self {
        self.images.lock().unwrap().push(image(id, prompt));
        self
    }

    /// Makes every call to `operation` fail with `error`.
    pub fn failing(self, operation: &'static str, error: StudioError) -> Self {
        self.failing.lock().unwrap().insert(operation, error);
        self
    }

    /// Makes every call to `operation` panic instead of returning.
    pub fn panicking(self, operation: &'static str) -> Self {
        self.panicking.lock().unwrap().insert(operation);
        self
    }

    /// Delays calls whose recorded name equals `call`, e.g. `list_ads:1`.
    pub fn delayed(self, call: &str, delay: Duration) -> Self {
        self.delays.lock().unwrap().insert(call.to_string(), delay);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn image_count(&self) -> usize {
        self.images.lock().unwrap().len()
    }

    async fn enter(&self, operation: &'static str, detail: Option<&str>) -> Result<()> {
        let call = match detail {
            Some(detail) => format!("{}:{}", operation, detail),
            None => operation.to_string(),
        };
        self.calls.lock().unwrap().push(call.clone());

        let delay = self.delays.lock().unwrap().get(&call).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let panics = self.panicking.lock().unwrap().contains(operation);
        if panics {
            panic!("{} blew up", operation);
        }

        match self.failing.lock().unwrap().get(operation) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn next_id(&self, prefix: &str) -> String {
        let mut next = self.next_id.lock().unwrap();
        *next += 1;
        format!("{}-{}", prefix, next)
    }
}

pub fn company(id: &str, name: &str) -> Company {
    Company {
        id: id.to_string(),
        name: name.to_string(),
        industry: "Retail".to_string(),
        product_service: "Shoes".to_string(),
        target_audience: "Teens".to_string(),
        brand_description: None,
        website: None,
    }
}

pub fn image(id: &str, prompt: &str) -> GeneratedImage {
    GeneratedImage {
        id: id.to_string(),
        prompt: prompt.to_string(),
        style: Default::default(),
        size: Default::default(),
        image_data: "iVBORw==".to_string(),
        created_at: Utc::now(),
    }
}

#[async_trait]
impl Backend for MemoryBackend {
    async fn list_companies(&self) -> Result<Vec<Company>> {
        self.enter("list_companies", None).await?;
        Ok(self.companies.lock().unwrap().clone())
    }

    async fn create_company(&self, body: NewCompany) -> Result<Company> {
        self.enter("create_company", Some(&body.name)).await?;
        let created = Company {
            id: self.next_id("company"),
            name: body.name,
            industry: body.industry,
            product_service: body.product_service,
            target_audience: body.target_audience,
            brand_description: body.brand_description,
            website: body.website,
        };
        self.companies.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn list_ads(&self, company_id: &str) -> Result<Vec<Ad>> {
        self.enter("list_ads", Some(company_id)).await?;
        let ads = self.ads.lock().unwrap();
        Ok(ads
            .iter()
            .filter(|ad| ad.company_id == company_id)
            .cloned()
            .collect())
    }

    async fn generate_ad(&self, request: AdRequest) -> Result<Ad> {
        self.enter("generate_ad", Some(&request.company_id)).await?;
        let ad = Ad {
            id: self.next_id("ad"),
            company_id: request.company_id,
            ad_type: request.ad_type,
            style: request.style,
            image_data: "AAAA".to_string(),
            created_at: Utc::now(),
        };
        self.ads.lock().unwrap().insert(0, ad.clone());
        Ok(ad)
    }

    async fn list_images(&self, limit: Option<u32>) -> Result<ImageHistory> {
        self.enter("list_images", None).await?;
        let mut images = self.images.lock().unwrap().clone();
        let total = images.len() as u64;
        if let Some(limit) = limit {
            images.truncate(limit as usize);
        }
        Ok(ImageHistory { images, total })
    }

    async fn get_image(&self, image_id: &str) -> Result<GeneratedImage> {
        self.enter("get_image", Some(image_id)).await?;
        self.images
            .lock()
            .unwrap()
            .iter()
            .find(|img| img.id == image_id)
            .cloned()
            .ok_or(StudioError::Http {
                status: 404,
                body: "Image not found".to_string(),
            })
    }

    async fn generate_image(&self, request: ImageRequest) -> Result<GeneratedImage> {
        self.enter("generate_image", Some(&request.prompt)).await?;
        let mut created = image(&self.next_id("image"), &request.prompt);
        created.style = request.style;
        created.size = request.size;
        self.images.lock().unwrap().insert(0, created.clone());
        Ok(created)
    }

    async fn delete_image(&self, image_id: &str) -> Result<DeleteReceipt> {
        self.enter("delete_image", Some(image_id)).await?;
        self.images.lock().unwrap().retain(|img| img.id != image_id);
        Ok(DeleteReceipt::default())
    }

    async fn clear_images(&self) -> Result<DeleteReceipt> {
        self.enter("clear_images", None).await?;
        let mut images = self.images.lock().unwrap();
        let deleted = images.len();
        images.clear();
        Ok(DeleteReceipt {
            message: Some(format!("Deleted {} images", deleted)),
        })
    }

    async fn health(&self) -> Result<HealthStatus> {
        self.enter("health", None).await?;
        Ok(HealthStatus {
            status: "healthy".to_string(),
            ai_service: Some("mock_mode".to_string()),
            model: None,
        })
    }
}
