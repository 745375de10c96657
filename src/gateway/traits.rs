use crate::{
    error::Result,
    models::{
        Ad, AdRequest, Company, DeleteReceipt, GeneratedImage, HealthStatus, ImageHistory,
        ImageRequest, NewCompany,
    },
};
use async_trait::async_trait;

/// Everything the studios need from the generation backend.
#[async_trait]
pub trait Backend: Send + Sync {
    async fn list_companies(&self) -> Result<Vec<Company>>;
    async fn create_company(&self, company: NewCompany) -> Result<Company>;

    async fn list_ads(&self, company_id: &str) -> Result<Vec<Ad>>;
    async fn generate_ad(&self, request: AdRequest) -> Result<Ad>;

    /// Newest first. `limit` caps the page; `None` leaves the backend default.
    async fn list_images(&self, limit: Option<u32>) -> Result<ImageHistory>;
    async fn get_image(&self, image_id: &str) -> Result<GeneratedImage>;
    async fn generate_image(&self, request: ImageRequest) -> Result<GeneratedImage>;
    async fn delete_image(&self, image_id: &str) -> Result<DeleteReceipt>;
    async fn clear_images(&self) -> Result<DeleteReceipt>;

    async fn health(&self) -> Result<HealthStatus>;
}
