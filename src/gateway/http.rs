use crate::{
    config::StudioConfig,
    error::{Result, StudioError},
    gateway::traits::Backend,
    logger,
    models::{
        Ad, AdRequest, Company, DeleteReceipt, GeneratedImage, HealthStatus, ImageHistory,
        ImageRequest, NewCompany,
    },
};
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use serde::{de::DeserializeOwned, Serialize};
use uuid::Uuid;

/// `Backend` over plain HTTP. One request per call, no retries.
#[derive(Clone)]
pub struct HttpGateway {
    client: Client,
    config: StudioConfig,
}

impl HttpGateway {
    pub fn new(config: StudioConfig) -> Result<Self> {
        config.validate()?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| StudioError::Config(format!("failed to build HTTP client: {}", e)))?;

        log::debug!("HTTP gateway ready for {}", config.base_url);
        Ok(Self { client, config })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(StudioConfig::from_env())
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, self.config.endpoint(path))
            .header(reqwest::header::ACCEPT, "application/json")
    }

    async fn send(&self, method: Method, path: &str, builder: RequestBuilder) -> Result<String> {
        let request_id = Uuid::new_v4();
        let _timer = logger::timer(format!("{} {} [req:{}]", method, path, request_id));
        log::debug!("{} {} [req:{}]", method, path, request_id);

        let response = builder.send().await.map_err(|e| {
            log::error!("{} {} failed to send: {}", method, path, e);
            StudioError::from_transport(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            log::warn!("{} {} returned {}", method, path, status);
            // An unreadable body still reports the status.
            let body = response.text().await.unwrap_or_default();
            return Err(StudioError::Http {
                status: status.as_u16(),
                body,
            });
        }
        response.text().await.map_err(StudioError::from_transport)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let body = self
            .send(Method::GET, path, self.request(Method::GET, path))
            .await?;
        decode(path, &body)
    }

    async fn get_json_with_query<Q, T>(&self, path: &str, query: &Q) -> Result<T>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.request(Method::GET, path).query(query);
        let body = self.send(Method::GET, path, builder).await?;
        decode(path, &body)
    }

    async fn post_json<B, T>(&self, path: &str, payload: &B) -> Result<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let builder = self.request(Method::POST, path).json(payload);
        let body = self.send(Method::POST, path, builder).await?;
        decode(path, &body)
    }

    /// The delete endpoints have no fixed response contract; a 2xx is enough.
    async fn delete(&self, path: &str) -> Result<DeleteReceipt> {
        let body = self
            .send(Method::DELETE, path, self.request(Method::DELETE, path))
            .await?;
        Ok(serde_json::from_str(&body).unwrap_or_default())
    }
}

fn decode<T: DeserializeOwned>(path: &str, body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| {
        log::error!("could not decode response from {}: {}", path, e);
        StudioError::Decode(format!("{}: {}", path, e))
    })
}


#[async_trait]
impl Backend for HttpGateway {
    async fn list_companies(&self) -> Result<Vec<Company>> {
        self.get_json("/api/companies").await
    }

    async fn create_company(&self, company: NewCompany) -> Result<Company> {
        log::info!("Registering company '{}'", company.name);
        self.post_json("/api/companies", &company).await
    }

    async fn list_ads(&self, company_id: &str) -> Result<Vec<Ad>> {
        self.get_json(&format!("/api/ads/{}", urlencoding::encode(company_id)))
            .await
    }

    async fn generate_ad(&self, request: AdRequest) -> Result<Ad> {
        log::info!(
            "Generating {} {} ad for company {}",
            request.style,
            request.ad_type,
            request.company_id
        );
        self.post_json("/api/generate-ad", &request).await
    }

    async fn list_images(&self, limit: Option<u32>) -> Result<ImageHistory> {
        match limit {
            Some(limit) => {
                self.get_json_with_query("/api/images", &[("limit", limit)])
                    .await
            }
            None => self.get_json("/api/images").await,
        }
    }

    async fn get_image(&self, image_id: &str) -> Result<GeneratedImage> {
        self.get_json(&format!("/api/images/{}", urlencoding::encode(image_id)))
            .await
    }

    async fn generate_image(&self, request: ImageRequest) -> Result<GeneratedImage> {
        log::info!(
            "Generating {} image ({}) for prompt: {}",
            request.style,
            request.size,
            request.prompt
        );
        self.post_json("/api/generate-image", &request).await
    }

    async fn delete_image(&self, image_id: &str) -> Result<DeleteReceipt> {
        self.delete(&format!("/api/images/{}", urlencoding::encode(image_id)))
            .await
    }

    async fn clear_images(&self) -> Result<DeleteReceipt> {
        log::warn!("Clearing image history on {}", self.config.base_url);
        self.delete("/api/images").await
    }

    async fn health(&self) -> Result<HealthStatus> {
        self.get_json("/api/health").await
    }
}
