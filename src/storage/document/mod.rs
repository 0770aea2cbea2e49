//! Document store backend
//!
//! Referral links stored as camelCase JSON documents in a `referral_links`
//! collection. The store itself is abstracted behind [`DocumentStore`].

mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::errors::{AgentlinkError, Result};
use crate::storage::models::{NewReferralLink, ReferralLink, ReferralLinkPatch};
use crate::storage::traits::ReferralLinkRepository;

pub use memory::MemoryDocumentStore;

pub const REFERRAL_LINKS_COLLECTION: &str = "referral_links";

/// 通用文档存储接口
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn put(&self, collection: &str, id: &str, doc: Value) -> Result<()>;

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>>;

    /// 返回是否真的删除了文档
    async fn delete(&self, collection: &str, id: &str) -> Result<bool>;

    /// 字符串字段等值查询
    async fn find_by_field(&self, collection: &str, field: &str, value: &str) -> Result<Vec<Value>>;
}

/// 基于文档存储的推荐链接仓库
#[derive(Clone)]
pub struct DocumentStorage {
    store: Arc<dyn DocumentStore>,
}

impl DocumentStorage {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryDocumentStore::new()))
    }

    fn decode(doc: Value) -> Option<ReferralLink> {
        match serde_json::from_value::<ReferralLink>(doc) {
            Ok(link) => Some(link),
            Err(e) => {
                warn!("Skipping malformed referral link document: {}", e);
                None
            }
        }
    }

    async fn write(&self, link: &ReferralLink) -> Result<()> {
        let doc = serde_json::to_value(link)?;
        self.store
            .put(REFERRAL_LINKS_COLLECTION, &link.id, doc)
            .await
    }
}

#[async_trait]
impl ReferralLinkRepository for DocumentStorage {
    async fn list_by_agent(&self, agent_id: &str) -> Result<Vec<ReferralLink>> {
        let docs = self
            .store
            .find_by_field(REFERRAL_LINKS_COLLECTION, "agentId", agent_id)
            .await?;

        let mut links: Vec<ReferralLink> = docs.into_iter().filter_map(Self::decode).collect();
        links.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        debug!("Loaded {} referral link documents for agent {}", links.len(), agent_id);
        Ok(links)
    }

    async fn get(&self, id: &str) -> Result<Option<ReferralLink>> {
        Ok(self
            .store
            .get(REFERRAL_LINKS_COLLECTION, id)
            .await?
            .and_then(Self::decode))
    }

    async fn insert(&self, new_link: NewReferralLink) -> Result<ReferralLink> {
        let now = Utc::now();
        let link = ReferralLink {
            id: uuid::Uuid::new_v4().to_string(),
            agent_id: new_link.agent_id,
            name: new_link.name,
            country: new_link.country,
            contact: new_link.contact,
            label: new_link.label,
            message: new_link.message,
            is_active: new_link.is_active,
            created_at: now,
            updated_at: now,
        };

        self.write(&link).await?;
        info!(
            "Referral link document created: {} (agent: {})",
            link.id, link.agent_id
        );
        Ok(link)
    }

    async fn update(&self, id: &str, patch: &ReferralLinkPatch) -> Result<ReferralLink> {
        let mut link = self
            .get(id)
            .await?
            .ok_or_else(|| AgentlinkError::not_found(format!("推荐链接不存在: {}", id)))?;

        patch.apply_to(&mut link, Utc::now());
        self.write(&link).await?;
        info!("Referral link document updated: {}", id);
        Ok(link)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        if self.store.delete(REFERRAL_LINKS_COLLECTION, id).await? {
            info!("Referral link document deleted: {}", id);
        } else {
            debug!("Referral link document {} did not exist", id);
        }
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "document"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn new_link(agent: &str, name: &str) -> NewReferralLink {
        NewReferralLink {
            agent_id: agent.to_string(),
            name: name.to_string(),
            country: None,
            contact: None,
            label: None,
            message: None,
            is_active: true,
        }
    }

    #[tokio::test]
    async fn test_list_newest_first_and_scoped_to_agent() {
        let storage = DocumentStorage::in_memory();
        let first = storage.insert(new_link("agent-1", "first")).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let second = storage.insert(new_link("agent-1", "second")).await.unwrap();
        storage.insert(new_link("agent-2", "other")).await.unwrap();

        let links = storage.list_by_agent("agent-1").await.unwrap();
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].id, second.id);
        assert_eq!(links[1].id, first.id);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let storage = DocumentStorage::in_memory();
        let err = storage
            .update("nope", &ReferralLinkPatch::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AgentlinkError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_malformed_documents_are_skipped() {
        let store = Arc::new(MemoryDocumentStore::new());
        store
            .put(
                REFERRAL_LINKS_COLLECTION,
                "broken",
                json!({"agentId": "agent-1", "name": 42}),
            )
            .await
            .unwrap();
        let storage = DocumentStorage::new(store);
        storage.insert(new_link("agent-1", "ok")).await.unwrap();

        let links = storage.list_by_agent("agent-1").await.unwrap();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].name, "ok");
    }
}
