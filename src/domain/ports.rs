use crate::domain::model::{
    BookmarkEntry, ChatRequest, ChatResponse, HealthStatus, HistoryItem, MessageResponse,
    PricePoint, Product, TrackResponse, TrackedProduct, UserSync,
};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait StateStore: Send + Sync {
    fn read_file(
        &self,
        path: &str,
    ) -> impl std::future::Future<Output = Result<Option<Vec<u8>>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// One method per backend endpoint consumed by the front end.
#[async_trait]
pub trait Backend: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<Product>>;
    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse>;
    async fn track(&self, product: &Product) -> Result<TrackResponse>;
    async fn tracked(&self) -> Result<Vec<TrackedProduct>>;
    async fn price_history(&self, product_id: &str) -> Result<Vec<PricePoint>>;
    async fn sync_user(&self, user: &UserSync) -> Result<MessageResponse>;
    async fn add_history(&self, item: &HistoryItem) -> Result<MessageResponse>;
    async fn user_history(&self, user_id: &str, limit: u32) -> Result<Vec<HistoryItem>>;
    async fn add_bookmark(&self, user_id: &str, product: &Product) -> Result<MessageResponse>;
    async fn bookmarks(&self, user_id: &str) -> Result<Vec<BookmarkEntry>>;
    async fn remove_bookmark(&self, user_id: &str, product_id: &str) -> Result<MessageResponse>;
    async fn health(&self) -> Result<HealthStatus>;
}
