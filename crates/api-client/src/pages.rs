//! Paginated response envelopes. The three list endpoints follow different
//! pagination conventions (zero-based vs one-based pages, `last` flag vs
//! total-page counts); each envelope reproduces its endpoint's shape rather
//! than normalizing them.

use promo_core::types::{CampaignSummary, ChatSessionSummary, KnowledgeEntry};
use serde::{Deserialize, Serialize};

/// `GET /api/chat/sessions?page={n}&size={s}` — zero-based page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionPageWire {
    pub content: Vec<ChatSessionSummary>,
    pub last: bool,
}

/// `GET /api/campaigns?page={n}&size={s}` — zero-based Spring pageable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignPageWire {
    pub content: Vec<CampaignSummary>,
    pub total_pages: u32,
    pub total_elements: u64,
    pub last: bool,
    pub size: u32,
    pub number: u32,
}

/// `GET /api/knowledge?page={n}&size={s}` — one-based page, snake_case body.
///
/// The backend has served the entry list under both `knowledge_base` and
/// `data` at different times; both are accepted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgePageWire {
    #[serde(default)]
    pub knowledge_base: Option<Vec<KnowledgeEntry>>,
    #[serde(default)]
    pub data: Option<Vec<KnowledgeEntry>>,
    pub total_pages: u32,
}

impl KnowledgePageWire {
    /// Entry list regardless of which field the backend used.
    pub fn entries(self) -> Vec<KnowledgeEntry> {
        self.knowledge_base.or(self.data).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_knowledge_page_accepts_either_field() {
        let raw = r#"{"knowledge_base": [], "total_pages": 3}"#;
        let page: KnowledgePageWire = serde_json::from_str(raw).unwrap();
        assert_eq!(page.total_pages, 3);
        assert!(page.entries().is_empty());

        let raw = r#"{"data": [{"id": "k-1", "metadata": {
            "title": "여름 세일 성공 사례",
            "source_type": "성공_사례",
            "registration_date": "2025-05-01"
        }}], "total_pages": 1}"#;
        let page: KnowledgePageWire = serde_json::from_str(raw).unwrap();
        let entries = page.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, "k-1");
    }
}
