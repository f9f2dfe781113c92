//! PromoBackend trait — the sole API boundary between the PromoPilot core
//! components and the campaign backend. The orchestrator, chat engine, and
//! list caches depend on this crate, never on a concrete transport.

pub mod http;
pub mod pages;

pub use http::HttpBackend;
pub use pages::{CampaignPageWire, KnowledgePageWire, SessionPageWire};

use async_trait::async_trait;
use promo_core::error::PromoResult;
use promo_core::types::{
    CampaignDetailWire, CampaignStatus, ChatTurn, ChatTurnWire, MonthlySummary,
    PerformancePayload, RecentActivity, RefinePayload, SelectionPayload,
};

/// Filters accepted by the campaign list endpoint.
#[derive(Debug, Clone, Default)]
pub struct CampaignListFilter {
    pub search: Option<String>,
    pub status: Option<CampaignStatus>,
}

/// Filters accepted by the knowledge-base list endpoint.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeListFilter {
    pub source_type: Option<String>,
    pub search: Option<String>,
}

/// Abstract backend contract. Mutations return success/failure only; new
/// state is always obtained via a subsequent read, never trusted from the
/// mutation response.
#[async_trait]
pub trait PromoBackend: Send + Sync {
    async fn fetch_campaign(&self, campaign_id: &str) -> PromoResult<CampaignDetailWire>;

    /// Replace the full selected-message set for a campaign.
    async fn save_selection(
        &self,
        campaign_id: &str,
        payload: &SelectionPayload,
    ) -> PromoResult<()>;

    async fn submit_refinement(
        &self,
        campaign_id: &str,
        payload: &RefinePayload,
    ) -> PromoResult<()>;

    async fn submit_performance(
        &self,
        campaign_id: &str,
        payload: &PerformancePayload,
    ) -> PromoResult<()>;

    /// Record the campaign outcome into the RAG knowledge base.
    async fn trigger_rag(&self, campaign_id: &str) -> PromoResult<()>;

    async fn delete_campaign(&self, campaign_id: &str) -> PromoResult<()>;

    /// Send one conversational intake turn. `conversation_id` is `None` for
    /// the first turn of a brand-new session; the backend assigns one.
    async fn send_chat_turn(
        &self,
        message: &str,
        conversation_id: Option<&str>,
    ) -> PromoResult<ChatTurnWire>;

    /// Full prior transcript of an existing session, oldest turn first.
    async fn fetch_chat_history(&self, conversation_id: &str) -> PromoResult<Vec<ChatTurn>>;

    /// Chat-session history. Zero-based `page`, Spring-style `content`/`last`.
    async fn list_sessions(&self, page: u32, size: u32) -> PromoResult<SessionPageWire>;

    /// Campaign list. Zero-based `page`, `totalPages` indicator.
    async fn list_campaigns(
        &self,
        page: u32,
        size: u32,
        filter: &CampaignListFilter,
    ) -> PromoResult<CampaignPageWire>;

    /// Knowledge-base list. One-based `page`, snake_case `total_pages`.
    async fn list_knowledge(
        &self,
        page: u32,
        size: u32,
        filter: &KnowledgeListFilter,
    ) -> PromoResult<KnowledgePageWire>;

    async fn dashboard_summary(&self) -> PromoResult<Vec<MonthlySummary>>;

    async fn recent_activity(&self) -> PromoResult<Vec<RecentActivity>>;
}
