//! Paginated list caching shared by the chat-session, campaign, and
//! knowledge-base list views.

pub mod cache;
pub mod fetchers;

pub use cache::{ListCache, DEFAULT_ITEM_CAP};
pub use fetchers::{CampaignFetcher, KnowledgeFetcher, SessionFetcher};

use async_trait::async_trait;
use promo_core::error::PromoResult;

/// One fetched page in normalized form. The wire conventions stay inside the
/// fetcher implementations.
#[derive(Debug, Clone)]
pub struct PageSlice<T> {
    pub items: Vec<T>,
    /// Server-reported "this was the final page".
    pub last: bool,
}

/// Source of pages for a [`ListCache`]. `page` is zero-based from the
/// cache's point of view; implementations translate to their endpoint's
/// convention.
#[async_trait]
pub trait PageFetcher<T>: Send + Sync {
    async fn fetch_page(&self, page: u32) -> PromoResult<PageSlice<T>>;
}
