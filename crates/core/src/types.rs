//! Domain model and wire DTOs shared across the PromoPilot workspace.
//!
//! The backend serves campaign message results as a flat list tagged with a
//! target-group index; the domain model here is the grouped form the UI
//! layers work with. Wire structs mirror the backend JSON field-for-field.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Lifecycle status
// ---------------------------------------------------------------------------

/// Lifecycle status of a campaign as reported by the backend pipeline.
///
/// Progression is `Processing -> Refining <-> Processing -> Completed ->
/// MessageSelected -> PerformanceRegistered -> SuccessCase/Failed ->
/// RagRegistered`. `Failed` is reachable from `Processing`/`Refining` and is
/// not terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CampaignStatus {
    Processing,
    Refining,
    Completed,
    Failed,
    MessageSelected,
    PerformanceRegistered,
    SuccessCase,
    RagRegistered,
}

impl CampaignStatus {
    /// Korean display name shown in status badges.
    pub fn display_name(&self) -> &'static str {
        match self {
            CampaignStatus::Processing => "처리 중",
            CampaignStatus::Refining => "수정 중",
            CampaignStatus::Completed => "생성 완료",
            CampaignStatus::Failed => "실패",
            CampaignStatus::MessageSelected => "메시지 선택 완료",
            CampaignStatus::PerformanceRegistered => "성과 등록 완료",
            CampaignStatus::SuccessCase => "성공 사례 지정",
            CampaignStatus::RagRegistered => "RAG DB 등록 완료",
        }
    }

    /// True while the AI pipeline is still generating or reworking drafts.
    pub fn is_generating(&self) -> bool {
        matches!(self, CampaignStatus::Processing | CampaignStatus::Refining)
    }
}

/// Registered outcome of a campaign, set alongside performance figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PerformanceStatus {
    Success,
    Failure,
    Undecided,
}

impl PerformanceStatus {
    pub fn display_name(&self) -> &'static str {
        match self {
            PerformanceStatus::Success => "성공",
            PerformanceStatus::Failure => "실패",
            PerformanceStatus::Undecided => "미정",
        }
    }
}

// ---------------------------------------------------------------------------
// Validator report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PolicyCompliance {
    Pass,
    Fail,
}

/// AI compliance/spam assessment attached to a message draft.
///
/// The backend emits this block in snake_case, unlike the camelCase campaign
/// envelope around it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidatorReport {
    pub spam_risk_score: f64,
    pub policy_compliance: PolicyCompliance,
    pub review_summary: String,
    pub recommended_action: String,
}

impl ValidatorReport {
    /// Conservative default used when the backend returns no report. An
    /// absent report is never rendered as an error state.
    pub fn unavailable() -> Self {
        Self {
            spam_risk_score: 0.0,
            policy_compliance: PolicyCompliance::Pass,
            review_summary: "No report available".to_string(),
            recommended_action: "None".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Campaign wire format (flat, backend-owned)
// ---------------------------------------------------------------------------

/// One flat message-result record as served by `GET /api/campaigns/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageResultWire {
    pub result_id: String,
    pub target_group_index: u32,
    pub target_name: String,
    pub target_features: Option<String>,
    pub classification_reason: Option<String>,
    pub message_draft_index: u8,
    pub message_text: String,
    pub validator_report: Option<ValidatorReport>,
    pub selected: bool,
}

/// Full campaign detail envelope as served by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignDetailWire {
    pub campaign_id: String,
    pub request_date: String,
    pub marketer_id: String,
    pub purpose: String,
    pub core_benefit_text: String,
    pub source_url: Option<String>,
    pub custom_columns: String,
    pub status: CampaignStatus,
    pub actual_ctr: Option<f64>,
    pub conversion_rate: Option<f64>,
    pub performance_notes: Option<String>,
    pub updated_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub performance_status: Option<PerformanceStatus>,
    #[serde(default)]
    pub message_results: Vec<MessageResultWire>,
}

// ---------------------------------------------------------------------------
// Campaign domain model (grouped)
// ---------------------------------------------------------------------------

/// One candidate outreach message for a target group.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageDraft {
    pub result_id: String,
    /// 1 or 2 by convention; two drafts per group is expected, not enforced.
    pub message_draft_index: u8,
    pub message_text: String,
    pub validator_report: ValidatorReport,
    pub is_selected: bool,
}

/// A cohort of customers identified for a campaign, with its message drafts.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetGroup {
    pub target_group_index: u32,
    pub target_name: String,
    pub target_features: String,
    pub classification_reason: String,
    pub message_results: Vec<MessageDraft>,
}

/// Grouped campaign view-state owned by the lifecycle orchestrator.
#[derive(Debug, Clone, PartialEq)]
pub struct CampaignDetail {
    pub campaign_id: String,
    pub purpose: String,
    pub actual_ctr: Option<f64>,
    pub conversion_rate: Option<f64>,
    pub performance_notes: Option<String>,
    pub status: CampaignStatus,
    pub performance_status: Option<PerformanceStatus>,
    pub target_groups: Vec<TargetGroup>,
}

// ---------------------------------------------------------------------------
// Mutation payloads
// ---------------------------------------------------------------------------

/// `PUT /api/campaigns/{id}/selection` — full replacement of the selected set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionPayload {
    pub result_ids: Vec<String>,
}

/// `POST /api/campaigns/{id}/refine` — free-form feedback for the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefinePayload {
    pub feedback_text: String,
}

/// `PUT /api/campaigns/{id}/performance`.
///
/// `performance_status` is omitted from the JSON entirely when `None`; the
/// backend distinguishes "not provided" from an explicit `UNDECIDED`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformancePayload {
    pub actual_ctr: f64,
    pub conversion_rate: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub performance_status: Option<PerformanceStatus>,
    pub performance_notes: String,
}

// ---------------------------------------------------------------------------
// Conversational intake
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// One committed turn in a conversational intake transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
}

/// Structured campaign draft the backend returns when an intake conversation
/// reaches its terminal turn. Seeds campaign creation on hand-off.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignSeed {
    pub purpose: String,
    pub core_benefit_text: String,
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(default)]
    pub custom_columns: Option<String>,
}

/// Response to one conversational turn (`POST /api/chat`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatTurnWire {
    pub message: String,
    pub conversation_id: String,
    pub finished: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub campaign_draft: Option<CampaignSeed>,
}

// ---------------------------------------------------------------------------
// List rows and dashboard read models
// ---------------------------------------------------------------------------

/// Row in the chat-session history sidebar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSessionSummary {
    pub conversation_id: String,
    pub title: String,
    pub last_updated_at: DateTime<Utc>,
}

/// Row in the campaign list. The backend mixes camelCase and snake_case on
/// this record; field names are reproduced as observed, not normalized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignSummary {
    #[serde(rename = "campaignId")]
    pub campaign_id: String,
    #[serde(rename = "requestDate")]
    pub request_date: String,
    pub marketer_id: String,
    pub purpose: String,
    pub core_benefit_text: String,
    pub source_url: Option<String>,
    pub status: CampaignStatus,
    pub updated_at: String,
    #[serde(rename = "actualCtr", default)]
    pub actual_ctr: Option<f64>,
    #[serde(rename = "conversionRate", default)]
    pub conversion_rate: Option<f64>,
}

/// Metadata block of a knowledge-base entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeMetadata {
    pub title: String,
    pub source_type: String,
    pub registration_date: String,
}

/// Row in the knowledge-base list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeEntry {
    pub id: String,
    pub metadata: KnowledgeMetadata,
}

/// One month of campaign volume for the dashboard chart.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummary {
    pub month: String,
    pub ongoing_count: u32,
    pub completed_count: u32,
}

/// Recently-updated campaign shown on the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentActivity {
    pub campaign_id: String,
    pub purpose: String,
    pub status: CampaignStatus,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        let json = serde_json::to_string(&CampaignStatus::MessageSelected).unwrap();
        assert_eq!(json, "\"MESSAGE_SELECTED\"");
        let back: CampaignStatus = serde_json::from_str("\"RAG_REGISTERED\"").unwrap();
        assert_eq!(back, CampaignStatus::RagRegistered);
    }

    #[test]
    fn test_performance_payload_omits_status_when_none() {
        let payload = PerformancePayload {
            actual_ctr: 3.2,
            conversion_rate: 1.1,
            performance_status: None,
            performance_notes: "노트".to_string(),
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get("performanceStatus").is_none());

        let payload = PerformancePayload {
            performance_status: Some(PerformanceStatus::Undecided),
            ..payload
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["performanceStatus"], "UNDECIDED");
    }

    #[test]
    fn test_campaign_wire_parses_null_report() {
        let raw = r#"{
            "campaignId": "c-1",
            "requestDate": "2025-06-01",
            "marketerId": "m-1",
            "purpose": "여름 세일",
            "coreBenefitText": "전 품목 20% 할인",
            "sourceUrl": null,
            "customColumns": "",
            "status": "COMPLETED",
            "actualCtr": null,
            "conversionRate": null,
            "performanceNotes": null,
            "updatedAt": "2025-06-02T09:00:00Z",
            "messageResults": [{
                "resultId": "r-1",
                "targetGroupIndex": 0,
                "targetName": "VIP",
                "targetFeatures": null,
                "classificationReason": null,
                "messageDraftIndex": 1,
                "messageText": "안녕하세요",
                "validatorReport": null,
                "selected": false
            }]
        }"#;
        let wire: CampaignDetailWire = serde_json::from_str(raw).unwrap();
        assert_eq!(wire.status, CampaignStatus::Completed);
        assert!(wire.performance_status.is_none());
        assert!(wire.message_results[0].validator_report.is_none());
    }
}
