//! Campaign status gate — maps a campaign's lifecycle status to the set of
//! permitted actions and to the user-facing reason strings shown when an
//! action is blocked. The tooltip wording is a user-facing contract; the
//! strings here are exact.

use promo_core::types::{CampaignStatus, PerformanceStatus};

/// A status-gated action on the campaign detail view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CampaignAction {
    /// Request the pipeline to rework the generated drafts.
    Refine,
    /// Register or update CTR / conversion figures.
    Performance,
    /// Archive the outcome into the RAG knowledge base.
    Rag,
}

/// Whether `action` is currently permitted.
///
/// `RAG_REGISTERED` disables every action regardless of other fields;
/// archival is final from the interface's point of view.
pub fn is_action_allowed(
    action: CampaignAction,
    status: CampaignStatus,
    performance_status: Option<PerformanceStatus>,
) -> bool {
    if status == CampaignStatus::RagRegistered {
        return false;
    }

    match action {
        CampaignAction::Refine => !status.is_generating(),
        CampaignAction::Performance => !matches!(
            status,
            CampaignStatus::Processing
                | CampaignStatus::Refining
                | CampaignStatus::Failed
                | CampaignStatus::Completed
        ),
        CampaignAction::Rag => {
            performance_status != Some(PerformanceStatus::Undecided)
                && matches!(
                    status,
                    CampaignStatus::PerformanceRegistered | CampaignStatus::SuccessCase
                )
        }
    }
}

/// Toggling a message draft's selection is permitted only once generation has
/// completed and before performance registration.
pub fn is_selection_allowed(status: CampaignStatus) -> bool {
    matches!(
        status,
        CampaignStatus::Completed | CampaignStatus::MessageSelected
    )
}

/// Tooltip for the refine action.
pub fn refine_tooltip(status: CampaignStatus) -> &'static str {
    match status {
        CampaignStatus::Processing | CampaignStatus::Refining | CampaignStatus::Failed => {
            "메시지 생성 완료 후 수정 요청이 가능합니다."
        }
        CampaignStatus::RagRegistered => {
            "이미 RAG DB에 등록된 캠페인입니다. 수정 요청은 불가능합니다."
        }
        _ => "메시지 내용, 타겟, 목적 등을 수정 요청합니다.",
    }
}

/// Tooltip for the performance action.
pub fn performance_tooltip(status: CampaignStatus) -> &'static str {
    match status {
        CampaignStatus::Processing | CampaignStatus::Refining | CampaignStatus::Failed => {
            "메시지 생성 완료 후 성과 등록이 가능합니다."
        }
        CampaignStatus::RagRegistered => {
            "이미 RAG DB에 등록된 캠페인입니다. 성과 수정은 가능합니다."
        }
        CampaignStatus::Completed => "메시지 선택 후 성과 등록이 가능합니다.",
        _ => "캠페인 성과(CTR, 전환율)를 등록 또는 수정합니다.",
    }
}

/// Tooltip for the RAG archival action. Distinguishes already-archived,
/// undecided, and not-yet-eligible campaigns.
pub fn rag_tooltip(
    status: CampaignStatus,
    performance_status: Option<PerformanceStatus>,
) -> &'static str {
    if status == CampaignStatus::RagRegistered {
        return "이미 RAG DB에 등록된 캠페인입니다.";
    }
    match performance_status {
        Some(PerformanceStatus::Undecided) => "미정 상태의 캠페인은 RAG DB에 등록할 수 없습니다.",
        Some(PerformanceStatus::Success) => "이 캠페인을 '성공 사례'로 RAG DB에 저장합니다.",
        Some(PerformanceStatus::Failure) => "이 캠페인을 '실패 사례'로 RAG DB에 저장합니다.",
        None => "RAG DB에 반영하려면 성과 등록을 완료해야 합니다.",
    }
}

/// Label for the performance action's own button.
pub fn performance_button_label(status: CampaignStatus) -> &'static str {
    match status {
        CampaignStatus::PerformanceRegistered
        | CampaignStatus::SuccessCase
        | CampaignStatus::RagRegistered => "성과 수정",
        _ => "성과 등록",
    }
}

/// Confirmation prompt shown before the RAG archival call.
pub fn rag_confirm_prompt(performance_status: Option<PerformanceStatus>) -> &'static str {
    if performance_status == Some(PerformanceStatus::Success) {
        "이 캠페인을 RAG DB에 성공 사례로 반영하시겠습니까?"
    } else {
        "이 캠페인은 \"실패\" 사례입니다. RAG DB에 반영하시겠습니까?"
    }
}

/// Confirmation prompt shown before deleting a campaign.
pub fn delete_confirm_prompt(purpose: &str) -> String {
    format!("'{purpose}' 캠페인을 정말로 삭제하시겠습니까? 이 작업은 되돌릴 수 없습니다.")
}
