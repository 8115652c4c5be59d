use crate::error::AppError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One image record as reported by the provider, passed through unmodified
/// to the rendering layer.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ImageItem {
    #[serde(rename = "webformatURL")]
    pub webformat_url: String,
    #[serde(rename = "largeImageURL")]
    pub large_image_url: String,
    #[serde(default)]
    pub tags: String,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub comments: u64,
    #[serde(default)]
    pub downloads: u64,
}

/// One page of search results. The provider reports two counts: `total` is
/// every match it knows about, `total_hits` is what the API will actually
/// page through.
#[derive(Debug, Clone)]
pub struct ResultPage {
    pub items: Vec<ImageItem>,
    pub total: u64,
    pub total_hits: u64,
}

#[async_trait]
pub trait ImageSearcher: Send + Sync {
    async fn search_images(&self, query: &str, page: u32) -> Result<ResultPage, AppError>;
    fn per_page(&self) -> u32;
}
