//! HTTP implementation of [`PromoBackend`] over the campaign backend's REST
//! API. Read failures map to `PromoError::Fetch`, mutations to
//! `PromoError::Save`; a non-2xx status is always an error.

use async_trait::async_trait;
use promo_core::config::ApiConfig;
use promo_core::error::{PromoError, PromoResult};
use promo_core::types::{
    CampaignDetailWire, ChatTurn, ChatTurnWire, MonthlySummary, PerformancePayload,
    RecentActivity, RefinePayload, SelectionPayload,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

use crate::pages::{CampaignPageWire, KnowledgePageWire, SessionPageWire};
use crate::{CampaignListFilter, KnowledgeListFilter, PromoBackend};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ChatTurnRequest<'a> {
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    conversation_id: Option<&'a str>,
}

/// Reqwest-backed campaign backend client.
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(config: &ApiConfig) -> PromoResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| PromoError::Config(format!("HTTP client init failed: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn read_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> PromoResult<T> {
        debug!(path, "GET");
        let response = self
            .client
            .get(self.url(path))
            .query(query)
            .send()
            .await
            .map_err(|e| PromoError::Fetch(e.to_string()))?
            .error_for_status()
            .map_err(|e| PromoError::Fetch(e.to_string()))?;

        response
            .json::<T>()
            .await
            .map_err(|e| PromoError::Fetch(e.to_string()))
    }

    async fn write(&self, request: reqwest::RequestBuilder) -> PromoResult<()> {
        request
            .send()
            .await
            .map_err(|e| PromoError::Save(e.to_string()))?
            .error_for_status()
            .map_err(|e| PromoError::Save(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl PromoBackend for HttpBackend {
    async fn fetch_campaign(&self, campaign_id: &str) -> PromoResult<CampaignDetailWire> {
        self.read_json(&format!("/api/campaigns/{campaign_id}"), &[])
            .await
    }

    async fn save_selection(
        &self,
        campaign_id: &str,
        payload: &SelectionPayload,
    ) -> PromoResult<()> {
        let url = self.url(&format!("/api/campaigns/{campaign_id}/selection"));
        self.write(self.client.put(url).json(payload)).await
    }

    async fn submit_refinement(
        &self,
        campaign_id: &str,
        payload: &RefinePayload,
    ) -> PromoResult<()> {
        let url = self.url(&format!("/api/campaigns/{campaign_id}/refine"));
        self.write(self.client.post(url).json(payload)).await
    }

    async fn submit_performance(
        &self,
        campaign_id: &str,
        payload: &PerformancePayload,
    ) -> PromoResult<()> {
        let url = self.url(&format!("/api/campaigns/{campaign_id}/performance"));
        self.write(self.client.put(url).json(payload)).await
    }

    async fn trigger_rag(&self, campaign_id: &str) -> PromoResult<()> {
        let url = self.url(&format!("/api/campaigns/{campaign_id}/rag-trigger"));
        self.write(self.client.post(url)).await
    }

    async fn delete_campaign(&self, campaign_id: &str) -> PromoResult<()> {
        let url = self.url(&format!("/api/campaigns/{campaign_id}"));
        self.write(self.client.delete(url)).await
    }

    async fn send_chat_turn(
        &self,
        message: &str,
        conversation_id: Option<&str>,
    ) -> PromoResult<ChatTurnWire> {
        let body = ChatTurnRequest {
            message,
            conversation_id,
        };
        let response = self
            .client
            .post(self.url("/api/chat"))
            .json(&body)
            .send()
            .await
            .map_err(|e| PromoError::Save(e.to_string()))?
            .error_for_status()
            .map_err(|e| PromoError::Save(e.to_string()))?;

        response
            .json::<ChatTurnWire>()
            .await
            .map_err(|e| PromoError::Save(e.to_string()))
    }

    async fn fetch_chat_history(&self, conversation_id: &str) -> PromoResult<Vec<ChatTurn>> {
        self.read_json(&format!("/api/chat/sessions/{conversation_id}/messages"), &[])
            .await
    }

    async fn list_sessions(&self, page: u32, size: u32) -> PromoResult<SessionPageWire> {
        self.read_json(
            "/api/chat/sessions",
            &[("page", page.to_string()), ("size", size.to_string())],
        )
        .await
    }

    async fn list_campaigns(
        &self,
        page: u32,
        size: u32,
        filter: &CampaignListFilter,
    ) -> PromoResult<CampaignPageWire> {
        let mut query = vec![("page", page.to_string()), ("size", size.to_string())];
        if let Some(search) = &filter.search {
            query.push(("search", search.clone()));
        }
        if let Some(status) = filter.status {
            let status = serde_json::to_value(status)?;
            query.push(("status", status.as_str().unwrap_or_default().to_string()));
        }
        self.read_json("/api/campaigns", &query).await
    }

    async fn list_knowledge(
        &self,
        page: u32,
        size: u32,
        filter: &KnowledgeListFilter,
    ) -> PromoResult<KnowledgePageWire> {
        let mut query = vec![("page", page.to_string()), ("size", size.to_string())];
        if let Some(source_type) = &filter.source_type {
            query.push(("source_type", source_type.clone()));
        }
        if let Some(search) = &filter.search {
            query.push(("search", search.clone()));
        }
        self.read_json("/api/knowledge", &query).await
    }

    async fn dashboard_summary(&self) -> PromoResult<Vec<MonthlySummary>> {
        self.read_json("/api/dashboard/summary", &[]).await
    }

    async fn recent_activity(&self) -> PromoResult<Vec<RecentActivity>> {
        self.read_json("/api/dashboard/recent-activity", &[]).await
    }
}
