//! Lifecycle orchestrator — single source of truth for one campaign's
//! view-state and the only component permitted to trigger a refetch.
//!
//! Every successful mutation is followed unconditionally by a full reload;
//! mutation responses are never merged into the live snapshot. That keeps the
//! client-derived target groups and the server's flat source of truth from
//! diverging, at the cost of an extra round trip. The orchestrator does not
//! serialize distinct mutation kinds against each other; callers are expected
//! to disable triggering controls while a call is outstanding.

use std::sync::Arc;

use promo_api_client::PromoBackend;
use promo_core::error::{PromoError, PromoResult};
use promo_core::types::{
    CampaignDetail, PerformancePayload, PerformanceStatus, RefinePayload, SelectionPayload,
};
use tracing::{info, warn};

use crate::differ::has_selection_changed;
use crate::gate::{
    self, delete_confirm_prompt, is_action_allowed, is_selection_allowed, rag_confirm_prompt,
    CampaignAction,
};
use crate::transform::group_campaign;

/// Owns the live campaign snapshot plus an untouched baseline taken at the
/// last successful fetch. Discarded on navigation away from the detail view;
/// nothing survives a route change.
pub struct CampaignOrchestrator {
    backend: Arc<dyn PromoBackend>,
    campaign_id: String,
    live: Option<CampaignDetail>,
    baseline: Option<CampaignDetail>,
}

impl CampaignOrchestrator {
    pub fn new(backend: Arc<dyn PromoBackend>, campaign_id: impl Into<String>) -> Self {
        Self {
            backend,
            campaign_id: campaign_id.into(),
            live: None,
            baseline: None,
        }
    }

    pub fn campaign_id(&self) -> &str {
        &self.campaign_id
    }

    /// The live snapshot, if loaded. Mutated only through this orchestrator.
    pub fn campaign(&self) -> Option<&CampaignDetail> {
        self.live.as_ref()
    }

    fn require_loaded(&self) -> PromoResult<&CampaignDetail> {
        self.live
            .as_ref()
            .ok_or_else(|| PromoError::Validation("campaign not loaded".to_string()))
    }

    /// Fetch the campaign, group the flat message results, and replace both
    /// the live and baseline snapshots wholesale.
    pub async fn load(&mut self) -> PromoResult<()> {
        let wire = self.backend.fetch_campaign(&self.campaign_id).await?;
        let campaign = group_campaign(wire);
        info!(
            campaign_id = %self.campaign_id,
            status = ?campaign.status,
            groups = campaign.target_groups.len(),
            "Campaign loaded"
        );
        self.baseline = Some(campaign.clone());
        self.live = Some(campaign);
        Ok(())
    }

    /// Flip `is_selected` on the draft with the given id. Only the live
    /// snapshot changes; the baseline stays untouched until the next
    /// successful save + refetch. Returns whether a draft matched.
    pub fn toggle_selection(&mut self, result_id: &str) -> PromoResult<bool> {
        let live = self
            .live
            .as_mut()
            .ok_or_else(|| PromoError::Validation("campaign not loaded".to_string()))?;
        if !is_selection_allowed(live.status) {
            return Err(PromoError::Validation(
                "현재 상태에서는 메시지를 선택할 수 없습니다.".to_string(),
            ));
        }

        for group in &mut live.target_groups {
            for draft in &mut group.message_results {
                if draft.result_id == result_id {
                    draft.is_selected = !draft.is_selected;
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }

    /// Whether the live selection differs from the baseline; the sole gate
    /// for offering the "save selection" affordance.
    pub fn selection_changed(&self) -> bool {
        match (&self.live, &self.baseline) {
            (Some(live), Some(baseline)) => has_selection_changed(live, baseline),
            _ => false,
        }
    }

    /// Submit the full currently-selected id set as a replacement, then
    /// reload to resynchronize live and baseline. On failure the live
    /// snapshot is left unchanged so the user can retry.
    pub async fn commit_selection(&mut self) -> PromoResult<()> {
        let live = self.require_loaded()?;
        let result_ids: Vec<String> = live
            .target_groups
            .iter()
            .flat_map(|g| g.message_results.iter())
            .filter(|d| d.is_selected)
            .map(|d| d.result_id.clone())
            .collect();

        let payload = SelectionPayload { result_ids };
        if let Err(e) = self
            .backend
            .save_selection(&self.campaign_id, &payload)
            .await
        {
            warn!(campaign_id = %self.campaign_id, error = %e, "Selection save failed");
            return Err(e);
        }
        self.load().await
    }

    /// Ask the pipeline to rework the drafts with the given feedback.
    pub async fn submit_refinement(&mut self, feedback_text: &str) -> PromoResult<()> {
        if feedback_text.trim().is_empty() {
            return Err(PromoError::Validation(
                "수정 요청 내용을 입력해주세요.".to_string(),
            ));
        }
        let campaign = self.require_loaded()?;
        if !is_action_allowed(
            CampaignAction::Refine,
            campaign.status,
            campaign.performance_status,
        ) {
            return Err(PromoError::Validation(
                gate::refine_tooltip(campaign.status).to_string(),
            ));
        }

        let payload = RefinePayload {
            feedback_text: feedback_text.to_string(),
        };
        self.backend
            .submit_refinement(&self.campaign_id, &payload)
            .await?;
        info!(campaign_id = %self.campaign_id, "Refinement requested");
        self.load().await
    }

    /// Register or update the campaign's performance figures.
    /// `performance_status` is omitted from the request payload entirely when
    /// `None`.
    pub async fn submit_performance(
        &mut self,
        actual_ctr: f64,
        conversion_rate: f64,
        performance_status: Option<PerformanceStatus>,
        performance_notes: &str,
    ) -> PromoResult<()> {
        let campaign = self.require_loaded()?;
        if !is_action_allowed(
            CampaignAction::Performance,
            campaign.status,
            campaign.performance_status,
        ) {
            return Err(PromoError::Validation(
                gate::performance_tooltip(campaign.status).to_string(),
            ));
        }

        let payload = PerformancePayload {
            actual_ctr,
            conversion_rate,
            performance_status,
            performance_notes: performance_notes.to_string(),
        };
        self.backend
            .submit_performance(&self.campaign_id, &payload)
            .await?;
        info!(campaign_id = %self.campaign_id, "Performance registered");
        self.load().await
    }

    /// Archive the campaign outcome into the RAG knowledge base. Callers
    /// confirm with [`rag_prompt`](Self::rag_prompt) first; the call itself
    /// refuses undecided campaigns.
    pub async fn trigger_rag(&mut self) -> PromoResult<()> {
        let campaign = self.require_loaded()?;
        if !is_action_allowed(
            CampaignAction::Rag,
            campaign.status,
            campaign.performance_status,
        ) {
            return Err(PromoError::Validation(
                gate::rag_tooltip(campaign.status, campaign.performance_status).to_string(),
            ));
        }

        self.backend.trigger_rag(&self.campaign_id).await?;
        info!(campaign_id = %self.campaign_id, "Campaign archived to RAG DB");
        self.load().await
    }

    /// Confirmation prompt for the RAG archival action.
    pub fn rag_prompt(&self) -> PromoResult<&'static str> {
        let campaign = self.require_loaded()?;
        Ok(rag_confirm_prompt(campaign.performance_status))
    }

    /// Confirmation prompt for deletion, naming the campaign purpose.
    pub fn delete_prompt(&self) -> PromoResult<String> {
        let campaign = self.require_loaded()?;
        Ok(delete_confirm_prompt(&campaign.purpose))
    }

    /// Irreversibly delete the campaign. Consumes the orchestrator; no
    /// further reads of this campaign are valid once this returns. Callers
    /// confirm with [`delete_prompt`](Self::delete_prompt) beforehand.
    pub async fn delete(self) -> PromoResult<()> {
        self.backend.delete_campaign(&self.campaign_id).await?;
        info!(campaign_id = %self.campaign_id, "Campaign deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use promo_api_client::{
        CampaignListFilter, CampaignPageWire, KnowledgeListFilter, KnowledgePageWire,
        SessionPageWire,
    };
    use promo_core::types::{
        CampaignDetailWire, CampaignStatus, ChatTurn, ChatTurnWire, MessageResultWire,
        MonthlySummary, RecentActivity,
    };

    /// In-memory backend that mimics the server's refetch-visible state
    /// transitions and records mutation payloads.
    struct FakeBackend {
        state: Mutex<CampaignDetailWire>,
        fail_saves: Mutex<bool>,
        saved_selections: Mutex<Vec<Vec<String>>>,
        performance_payloads: Mutex<Vec<PerformancePayload>>,
        refinements: Mutex<Vec<String>>,
    }

    impl FakeBackend {
        fn new(state: CampaignDetailWire) -> Self {
            Self {
                state: Mutex::new(state),
                fail_saves: Mutex::new(false),
                saved_selections: Mutex::new(Vec::new()),
                performance_payloads: Mutex::new(Vec::new()),
                refinements: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl PromoBackend for FakeBackend {
        async fn fetch_campaign(&self, _id: &str) -> PromoResult<CampaignDetailWire> {
            Ok(self.state.lock().clone())
        }

        async fn save_selection(
            &self,
            _id: &str,
            payload: &SelectionPayload,
        ) -> PromoResult<()> {
            if *self.fail_saves.lock() {
                return Err(PromoError::Save("boom".to_string()));
            }
            self.saved_selections.lock().push(payload.result_ids.clone());
            let mut state = self.state.lock();
            for result in &mut state.message_results {
                result.selected = payload.result_ids.contains(&result.result_id);
            }
            state.status = CampaignStatus::MessageSelected;
            Ok(())
        }

        async fn submit_refinement(&self, _id: &str, payload: &RefinePayload) -> PromoResult<()> {
            self.refinements.lock().push(payload.feedback_text.clone());
            self.state.lock().status = CampaignStatus::Refining;
            Ok(())
        }

        async fn submit_performance(
            &self,
            _id: &str,
            payload: &PerformancePayload,
        ) -> PromoResult<()> {
            self.performance_payloads.lock().push(payload.clone());
            let mut state = self.state.lock();
            state.status = CampaignStatus::PerformanceRegistered;
            state.actual_ctr = Some(payload.actual_ctr);
            state.conversion_rate = Some(payload.conversion_rate);
            state.performance_status = payload.performance_status;
            Ok(())
        }

        async fn trigger_rag(&self, _id: &str) -> PromoResult<()> {
            self.state.lock().status = CampaignStatus::RagRegistered;
            Ok(())
        }

        async fn delete_campaign(&self, _id: &str) -> PromoResult<()> {
            Ok(())
        }

        async fn send_chat_turn(
            &self,
            _message: &str,
            _conversation_id: Option<&str>,
        ) -> PromoResult<ChatTurnWire> {
            unimplemented!("not used by orchestrator tests")
        }

        async fn fetch_chat_history(&self, _id: &str) -> PromoResult<Vec<ChatTurn>> {
            unimplemented!("not used by orchestrator tests")
        }

        async fn list_sessions(&self, _page: u32, _size: u32) -> PromoResult<SessionPageWire> {
            unimplemented!("not used by orchestrator tests")
        }

        async fn list_campaigns(
            &self,
            _page: u32,
            _size: u32,
            _filter: &CampaignListFilter,
        ) -> PromoResult<CampaignPageWire> {
            unimplemented!("not used by orchestrator tests")
        }

        async fn list_knowledge(
            &self,
            _page: u32,
            _size: u32,
            _filter: &KnowledgeListFilter,
        ) -> PromoResult<KnowledgePageWire> {
            unimplemented!("not used by orchestrator tests")
        }

        async fn dashboard_summary(&self) -> PromoResult<Vec<MonthlySummary>> {
            unimplemented!("not used by orchestrator tests")
        }

        async fn recent_activity(&self) -> PromoResult<Vec<RecentActivity>> {
            unimplemented!("not used by orchestrator tests")
        }
    }

    fn result(id: &str, group: u32, selected: bool) -> MessageResultWire {
        MessageResultWire {
            result_id: id.to_string(),
            target_group_index: group,
            target_name: format!("그룹 {group}"),
            target_features: Some("20대 여성".to_string()),
            classification_reason: Some("구매 이력 기반".to_string()),
            message_draft_index: 1,
            message_text: "안녕하세요".to_string(),
            validator_report: None,
            selected,
        }
    }

    fn completed_campaign() -> CampaignDetailWire {
        CampaignDetailWire {
            campaign_id: "c-1".to_string(),
            request_date: "2025-06-01".to_string(),
            marketer_id: "m-1".to_string(),
            purpose: "여름 세일".to_string(),
            core_benefit_text: "전 품목 20% 할인".to_string(),
            source_url: None,
            custom_columns: String::new(),
            status: CampaignStatus::Completed,
            actual_ctr: None,
            conversion_rate: None,
            performance_notes: None,
            updated_at: "2025-06-02T09:00:00Z".to_string(),
            performance_status: None,
            message_results: vec![result("r-1", 0, false), result("r-2", 0, false)],
        }
    }

    fn orchestrator(backend: Arc<FakeBackend>) -> CampaignOrchestrator {
        CampaignOrchestrator::new(backend, "c-1")
    }

    #[tokio::test]
    async fn test_toggle_is_an_involution() {
        let backend = Arc::new(FakeBackend::new(completed_campaign()));
        let mut orch = orchestrator(backend);
        orch.load().await.unwrap();

        let before = orch.campaign().unwrap().clone();
        assert!(orch.toggle_selection("r-1").unwrap());
        assert!(orch.selection_changed());
        assert!(orch.toggle_selection("r-1").unwrap());
        assert_eq!(orch.campaign().unwrap(), &before);
        assert!(!orch.selection_changed());
    }

    #[tokio::test]
    async fn test_toggle_affects_exactly_one_draft() {
        let backend = Arc::new(FakeBackend::new(completed_campaign()));
        let mut orch = orchestrator(backend);
        orch.load().await.unwrap();

        orch.toggle_selection("r-1").unwrap();
        let campaign = orch.campaign().unwrap();
        let drafts = &campaign.target_groups[0].message_results;
        assert!(drafts[0].is_selected);
        assert!(!drafts[1].is_selected);
    }

    #[tokio::test]
    async fn test_toggle_unknown_id_is_a_noop() {
        let backend = Arc::new(FakeBackend::new(completed_campaign()));
        let mut orch = orchestrator(backend);
        orch.load().await.unwrap();
        assert!(!orch.toggle_selection("r-999").unwrap());
        assert!(!orch.selection_changed());
    }

    #[tokio::test]
    async fn test_toggle_rejected_while_processing() {
        let mut state = completed_campaign();
        state.status = CampaignStatus::Processing;
        let backend = Arc::new(FakeBackend::new(state));
        let mut orch = orchestrator(backend);
        orch.load().await.unwrap();
        assert!(matches!(
            orch.toggle_selection("r-1"),
            Err(PromoError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_commit_replaces_set_and_resynchronizes() {
        let backend = Arc::new(FakeBackend::new(completed_campaign()));
        let mut orch = orchestrator(backend.clone());
        orch.load().await.unwrap();

        orch.toggle_selection("r-1").unwrap();
        orch.commit_selection().await.unwrap();

        assert_eq!(
            backend.saved_selections.lock().as_slice(),
            &[vec!["r-1".to_string()]]
        );
        let campaign = orch.campaign().unwrap();
        assert_eq!(campaign.status, CampaignStatus::MessageSelected);
        // Baseline was refreshed by the reload; nothing left to save.
        assert!(!orch.selection_changed());
    }

    #[tokio::test]
    async fn test_failed_save_preserves_local_edits() {
        let backend = Arc::new(FakeBackend::new(completed_campaign()));
        let mut orch = orchestrator(backend.clone());
        orch.load().await.unwrap();

        orch.toggle_selection("r-1").unwrap();
        *backend.fail_saves.lock() = true;

        let err = orch.commit_selection().await.unwrap_err();
        assert!(matches!(err, PromoError::Save(_)));
        // Optimistic local state is preserved for retry.
        assert!(orch.campaign().unwrap().target_groups[0].message_results[0].is_selected);
        assert!(orch.selection_changed());
    }

    #[tokio::test]
    async fn test_refinement_gated_and_reloads() {
        let backend = Arc::new(FakeBackend::new(completed_campaign()));
        let mut orch = orchestrator(backend.clone());
        orch.load().await.unwrap();

        orch.submit_refinement("문구를 더 친근하게").await.unwrap();
        assert_eq!(orch.campaign().unwrap().status, CampaignStatus::Refining);

        // Now generating again; a second request must be rejected client-side.
        let err = orch.submit_refinement("한 번 더").await.unwrap_err();
        assert!(matches!(err, PromoError::Validation(_)));
        assert_eq!(backend.refinements.lock().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_refinement_rejected_before_network() {
        let backend = Arc::new(FakeBackend::new(completed_campaign()));
        let mut orch = orchestrator(backend.clone());
        orch.load().await.unwrap();

        let err = orch.submit_refinement("   ").await.unwrap_err();
        assert!(matches!(err, PromoError::Validation(_)));
        assert!(backend.refinements.lock().is_empty());
    }

    #[tokio::test]
    async fn test_performance_blocked_before_message_selection() {
        let backend = Arc::new(FakeBackend::new(completed_campaign()));
        let mut orch = orchestrator(backend.clone());
        orch.load().await.unwrap();

        let err = orch
            .submit_performance(3.0, 1.0, None, "")
            .await
            .unwrap_err();
        assert!(matches!(err, PromoError::Validation(_)));
        assert!(backend.performance_payloads.lock().is_empty());
    }

    #[tokio::test]
    async fn test_performance_then_rag_flow() {
        let mut state = completed_campaign();
        state.status = CampaignStatus::MessageSelected;
        let backend = Arc::new(FakeBackend::new(state));
        let mut orch = orchestrator(backend.clone());
        orch.load().await.unwrap();

        orch.submit_performance(4.2, 1.5, Some(PerformanceStatus::Success), "호응 좋음")
            .await
            .unwrap();
        assert_eq!(
            orch.campaign().unwrap().status,
            CampaignStatus::PerformanceRegistered
        );
        assert_eq!(
            orch.rag_prompt().unwrap(),
            "이 캠페인을 RAG DB에 성공 사례로 반영하시겠습니까?"
        );

        orch.trigger_rag().await.unwrap();
        assert_eq!(
            orch.campaign().unwrap().status,
            CampaignStatus::RagRegistered
        );
    }

    #[tokio::test]
    async fn test_rag_refused_for_undecided_campaign() {
        let mut state = completed_campaign();
        state.status = CampaignStatus::PerformanceRegistered;
        state.performance_status = Some(PerformanceStatus::Undecided);
        let backend = Arc::new(FakeBackend::new(state));
        let mut orch = orchestrator(backend);
        orch.load().await.unwrap();

        match orch.trigger_rag().await.unwrap_err() {
            PromoError::Validation(reason) => {
                assert_eq!(reason, "미정 상태의 캠페인은 RAG DB에 등록할 수 없습니다.");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_performance_payload_passes_none_through() {
        let mut state = completed_campaign();
        state.status = CampaignStatus::MessageSelected;
        let backend = Arc::new(FakeBackend::new(state));
        let mut orch = orchestrator(backend.clone());
        orch.load().await.unwrap();

        orch.submit_performance(2.0, 0.8, None, "").await.unwrap();
        let payloads = backend.performance_payloads.lock();
        assert!(payloads[0].performance_status.is_none());
    }

    #[tokio::test]
    async fn test_delete_prompt_names_the_purpose() {
        let backend = Arc::new(FakeBackend::new(completed_campaign()));
        let mut orch = orchestrator(backend);
        orch.load().await.unwrap();
        assert_eq!(
            orch.delete_prompt().unwrap(),
            "'여름 세일' 캠페인을 정말로 삭제하시겠습니까? 이 작업은 되돌릴 수 없습니다."
        );
        orch.delete().await.unwrap();
    }
}
