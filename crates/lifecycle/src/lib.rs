//! Campaign lifecycle core — status gating, selection diffing, and the
//! orchestrator that owns one campaign's view-state.

pub mod differ;
pub mod gate;
pub mod orchestrator;
pub mod tips;
pub mod transform;

pub use differ::has_selection_changed;
pub use gate::CampaignAction;
pub use orchestrator::CampaignOrchestrator;
pub use transform::group_campaign;
