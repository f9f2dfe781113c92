//! [`PageFetcher`] implementations over the backend's three list endpoints.
//! Each endpoint keeps its own pagination convention; the fetcher owns the
//! mapping from the cache's zero-based page index to its endpoint's wire
//! convention.

use std::sync::Arc;

use async_trait::async_trait;
use promo_api_client::{CampaignListFilter, KnowledgeListFilter, PromoBackend};
use promo_core::error::PromoResult;
use promo_core::types::{CampaignSummary, ChatSessionSummary, KnowledgeEntry};

use crate::{PageFetcher, PageSlice};

/// Chat-session history. Zero-based pages, server `last` flag.
pub struct SessionFetcher {
    backend: Arc<dyn PromoBackend>,
    size: u32,
}

impl SessionFetcher {
    pub fn new(backend: Arc<dyn PromoBackend>, size: u32) -> Self {
        Self { backend, size }
    }
}

#[async_trait]
impl PageFetcher<ChatSessionSummary> for SessionFetcher {
    async fn fetch_page(&self, page: u32) -> PromoResult<PageSlice<ChatSessionSummary>> {
        let wire = self.backend.list_sessions(page, self.size).await?;
        Ok(PageSlice {
            items: wire.content,
            last: wire.last,
        })
    }
}

/// Campaign list. Zero-based Spring pageable with optional search/status
/// filters; a filter change warrants a fresh cache (or a `refresh`).
pub struct CampaignFetcher {
    backend: Arc<dyn PromoBackend>,
    size: u32,
    filter: CampaignListFilter,
}

impl CampaignFetcher {
    pub fn new(backend: Arc<dyn PromoBackend>, size: u32, filter: CampaignListFilter) -> Self {
        Self {
            backend,
            size,
            filter,
        }
    }
}

#[async_trait]
impl PageFetcher<CampaignSummary> for CampaignFetcher {
    async fn fetch_page(&self, page: u32) -> PromoResult<PageSlice<CampaignSummary>> {
        let wire = self
            .backend
            .list_campaigns(page, self.size, &self.filter)
            .await?;
        Ok(PageSlice {
            items: wire.content,
            last: wire.last,
        })
    }
}

/// Knowledge-base list. The endpoint is one-based and reports `total_pages`
/// instead of a last flag; both conventions are translated here and nowhere
/// else.
pub struct KnowledgeFetcher {
    backend: Arc<dyn PromoBackend>,
    size: u32,
    filter: KnowledgeListFilter,
}

impl KnowledgeFetcher {
    pub fn new(backend: Arc<dyn PromoBackend>, size: u32, filter: KnowledgeListFilter) -> Self {
        Self {
            backend,
            size,
            filter,
        }
    }
}

#[async_trait]
impl PageFetcher<KnowledgeEntry> for KnowledgeFetcher {
    async fn fetch_page(&self, page: u32) -> PromoResult<PageSlice<KnowledgeEntry>> {
        let wire_page = page + 1;
        let wire = self
            .backend
            .list_knowledge(wire_page, self.size, &self.filter)
            .await?;
        let last = wire_page >= wire.total_pages;
        Ok(PageSlice {
            items: wire.entries(),
            last,
        })
    }
}
