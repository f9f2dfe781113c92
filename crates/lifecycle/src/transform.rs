//! Grouping transform from the backend's flat message-result list into the
//! target-group model the interface works with.

use promo_core::types::{
    CampaignDetail, CampaignDetailWire, MessageDraft, TargetGroup, ValidatorReport,
};

const MISSING_FEATURES: &str = "특징 정보 없음";
const MISSING_REASON: &str = "분류 근거 정보 없음";

/// Group flat message results by `targetGroupIndex`, preserving first-seen
/// order. Group-level fields come from the first record seen for each index;
/// optional fields are defaulted to explicit "not available" strings rather
/// than left blank.
pub fn group_campaign(wire: CampaignDetailWire) -> CampaignDetail {
    let mut groups: Vec<TargetGroup> = Vec::new();

    for result in wire.message_results {
        let position = groups
            .iter()
            .position(|g| g.target_group_index == result.target_group_index)
            .unwrap_or_else(|| {
                groups.push(TargetGroup {
                    target_group_index: result.target_group_index,
                    target_name: result.target_name.clone(),
                    target_features: result
                        .target_features
                        .clone()
                        .unwrap_or_else(|| MISSING_FEATURES.to_string()),
                    classification_reason: result
                        .classification_reason
                        .clone()
                        .unwrap_or_else(|| MISSING_REASON.to_string()),
                    message_results: Vec::new(),
                });
                groups.len() - 1
            });

        groups[position].message_results.push(MessageDraft {
            result_id: result.result_id,
            message_draft_index: result.message_draft_index,
            message_text: result.message_text,
            validator_report: result
                .validator_report
                .unwrap_or_else(ValidatorReport::unavailable),
            is_selected: result.selected,
        });
    }

    CampaignDetail {
        campaign_id: wire.campaign_id,
        purpose: wire.purpose,
        actual_ctr: wire.actual_ctr,
        conversion_rate: wire.conversion_rate,
        performance_notes: wire.performance_notes,
        status: wire.status,
        performance_status: wire.performance_status,
        target_groups: groups,
    }
}
