//! Selection differ — decides whether the "save selection" affordance should
//! be offered by comparing the selected-message sets of two campaign
//! snapshots. Pure; reads both snapshots, mutates neither.

use promo_core::types::CampaignDetail;

/// Sorted `result_id`s of all selected drafts across all target groups.
fn selected_ids(campaign: &CampaignDetail) -> Vec<&str> {
    let mut ids: Vec<&str> = campaign
        .target_groups
        .iter()
        .flat_map(|group| group.message_results.iter())
        .filter(|draft| draft.is_selected)
        .map(|draft| draft.result_id.as_str())
        .collect();
    ids.sort_unstable();
    ids
}

/// True iff the selected-message sets of the two snapshots differ.
///
/// Order-independent and unaffected by edits to non-selection fields; ids are
/// unique so sorted-sequence equality is set equality.
pub fn has_selection_changed(current: &CampaignDetail, baseline: &CampaignDetail) -> bool {
    selected_ids(current) != selected_ids(baseline)
}
