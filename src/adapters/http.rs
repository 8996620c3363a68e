use crate::domain::model::{
    BookmarkEntry, BookmarkRequest, ChatRequest, ChatResponse, HealthStatus, HistoryItem,
    MessageResponse, PriceHistoryResponse, PricePoint, Product, SearchResponse, TrackResponse,
    TrackedProduct, TrackedResponse, UserSync,
};
use crate::domain::ports::Backend;
use crate::utils::error::{PriceWiseError, Result};
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

pub const API_PREFIX: &str = "/api/v1";

/// JSON client for the PriceWise backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| PriceWiseError::InvalidConfigValueError {
            field: "api.base_url".to_string(),
            value: base_url.to_string(),
            reason: format!("Invalid URL format: {}", e),
        })?;

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("pricewise/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Joins path segments onto the base URL, percent-encoding each segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| PriceWiseError::ConfigError {
                    message: format!("API base URL cannot carry a path: {}", self.base_url),
                })?;
            path.pop_if_empty();
            for segment in segments {
                path.push(segment);
            }
        }
        Ok(url)
    }

    fn api(&self, segments: &[&str]) -> Result<Url> {
        let mut all = vec!["api", "v1"];
        all.extend_from_slice(segments);
        self.endpoint(&all)
    }

    async fn send(
        &self,
        method: Method,
        url: Url,
        build: impl FnOnce(RequestBuilder) -> RequestBuilder,
    ) -> Result<Response> {
        let path = url.path().to_string();
        tracing::debug!("{} {}", method, url);

        let response = build(self.client.request(method.clone(), url)).send().await?;
        let status = response.status();
        tracing::debug!("{} {} -> {}", method, path, status);

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(PriceWiseError::ApiStatusError {
            status: status.as_u16(),
            endpoint: path,
            detail: extract_detail(&body),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let response = self.send(Method::GET, url, |req| req).await?;
        Ok(response.json::<T>().await?)
    }

    async fn post_json<B, T>(&self, url: Url, body: &B) -> Result<T>
    where
        B: serde::Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send(Method::POST, url, |req| req.json(body)).await?;
        Ok(response.json::<T>().await?)
    }

    /// Acknowledgement endpoints answer `{"message": ...}`, but the shape is not guaranteed.
    async fn ack(&self, response: Response) -> Result<MessageResponse> {
        let status = response.status();
        let body = response.text().await?;
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("OK").to_string());
        Ok(MessageResponse { message })
    }
}

/// FastAPI puts the failure reason under `detail`.
fn extract_detail(body: &str) -> Option<String> {
    if body.trim().is_empty() {
        return None;
    }
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(value) => match value.get("detail") {
            Some(serde_json::Value::String(s)) => Some(s.clone()),
            Some(other) => Some(other.to_string()),
            None => Some(value.to_string()),
        },
        Err(_) => Some(body.trim().chars().take(200).collect()),
    }
}

#[async_trait]
impl Backend for ApiClient {
    async fn search(&self, query: &str) -> Result<Vec<Product>> {
        let mut url = self.api(&["products", "search"])?;
        url.query_pairs_mut().append_pair("q", query);
        let response: SearchResponse = self.get_json(url).await?;
        Ok(response.results)
    }

    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse> {
        // 後端路由以斜線結尾
        let url = self.api(&["chat", ""])?;
        self.post_json(url, request).await
    }

    async fn track(&self, product: &Product) -> Result<TrackResponse> {
        let url = self.api(&["tracker", "track"])?;
        self.post_json(url, product).await
    }

    async fn tracked(&self) -> Result<Vec<TrackedProduct>> {
        let url = self.api(&["tracker", "tracked"])?;
        let response: TrackedResponse = self.get_json(url).await?;
        Ok(response.products)
    }

    async fn price_history(&self, product_id: &str) -> Result<Vec<PricePoint>> {
        let url = self.api(&["tracker", "history", product_id])?;
        let response: PriceHistoryResponse = self.get_json(url).await?;
        Ok(response.history)
    }

    async fn sync_user(&self, user: &UserSync) -> Result<MessageResponse> {
        let url = self.api(&["user", "sync"])?;
        let response = self.send(Method::POST, url, |req| req.json(user)).await?;
        self.ack(response).await
    }

    async fn add_history(&self, item: &HistoryItem) -> Result<MessageResponse> {
        let url = self.api(&["user", "history"])?;
        let response = self.send(Method::POST, url, |req| req.json(item)).await?;
        self.ack(response).await
    }

    async fn user_history(&self, user_id: &str, limit: u32) -> Result<Vec<HistoryItem>> {
        let mut url = self.api(&["user", user_id, "history"])?;
        url.query_pairs_mut().append_pair("limit", &limit.to_string());
        self.get_json(url).await
    }

    async fn add_bookmark(&self, user_id: &str, product: &Product) -> Result<MessageResponse> {
        let url = self.api(&["user", "bookmarks"])?;
        let body = BookmarkRequest {
            user_id: user_id.to_string(),
            product: product.clone(),
        };
        let response = self.send(Method::POST, url, |req| req.json(&body)).await?;
        self.ack(response).await
    }

    async fn bookmarks(&self, user_id: &str) -> Result<Vec<BookmarkEntry>> {
        let url = self.api(&["user", user_id, "bookmarks"])?;
        self.get_json(url).await
    }

    async fn remove_bookmark(&self, user_id: &str, product_id: &str) -> Result<MessageResponse> {
        let url = self.api(&["user", user_id, "bookmarks", product_id])?;
        let response = self.send(Method::DELETE, url, |req| req).await?;
        self.ack(response).await
    }

    async fn health(&self) -> Result<HealthStatus> {
        let url = self.endpoint(&["health"])?;
        self.get_json(url).await
    }
}
