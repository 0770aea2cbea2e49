//! Referral link management service
//!
//! Business rules on top of a [`ReferralLinkRepository`]: ownership checks,
//! name validation, a per-agent list cache and change notifications.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use moka::future::Cache;
use tracing::{debug, info, warn};

use crate::errors::{AgentlinkError, Result};
use crate::events::{AppEvent, EventBus};
use crate::storage::{NewReferralLink, ReferralLink, ReferralLinkPatch, ReferralLinkRepository};

/// Cached list lifetime; mutations invalidate explicitly before this.
const LIST_CACHE_TTL_SECS: u64 = 60;
const LIST_CACHE_MAX_CAPACITY: u64 = 10_000;

pub struct ReferralLinkService {
    repo: Arc<dyn ReferralLinkRepository>,
    events: EventBus,
    list_cache: Cache<String, Arc<Vec<ReferralLink>>>,
    /// Per-agent mutation counter; a list read only fills the cache when
    /// no mutation happened while it was reading.
    generations: DashMap<String, u64>,
}

impl ReferralLinkService {
    pub fn new(repo: Arc<dyn ReferralLinkRepository>, events: EventBus) -> Self {
        let list_cache = Cache::builder()
            .time_to_live(Duration::from_secs(LIST_CACHE_TTL_SECS))
            .max_capacity(LIST_CACHE_MAX_CAPACITY)
            .build();

        Self {
            repo,
            events,
            list_cache,
            generations: DashMap::new(),
        }
    }

    pub fn backend_name(&self) -> &'static str {
        self.repo.backend_name()
    }

    /// List an agent's links, newest first. Missing agent id yields an empty list.
    pub async fn list(&self, agent_id: Option<&str>) -> Result<Arc<Vec<ReferralLink>>> {
        let Some(agent_id) = agent_id.filter(|a| !a.trim().is_empty()) else {
            return Ok(Arc::new(Vec::new()));
        };

        if let Some(cached) = self.list_cache.get(agent_id).await {
            debug!("Referral link list cache hit for agent {}", agent_id);
            return Ok(cached);
        }

        let generation = self.generation(agent_id);
        let links = Arc::new(self.repo.list_by_agent(agent_id).await?);
        if self.generation(agent_id) == generation {
            self.list_cache
                .insert(agent_id.to_string(), links.clone())
                .await;
            // A mutation may land between the check and the insert
            if self.generation(agent_id) != generation {
                self.list_cache.invalidate(agent_id).await;
            }
        } else {
            debug!("Links for agent {} changed during read, not caching", agent_id);
        }
        Ok(links)
    }

    pub async fn create(&self, link: NewReferralLink) -> Result<ReferralLink> {
        if link.agent_id.trim().is_empty() {
            return Err(AgentlinkError::validation("agentId must not be empty"));
        }
        validate_name(&link.name)?;

        let created = self.repo.insert(link).await?;
        info!(
            "ReferralLinkService: created link '{}' ({}) for agent {}",
            created.name, created.id, created.agent_id
        );

        self.changed(&created.agent_id).await;
        Ok(created)
    }

    pub async fn update(
        &self,
        id: &str,
        agent_id: &str,
        patch: ReferralLinkPatch,
    ) -> Result<ReferralLink> {
        if let Some(name) = &patch.name {
            validate_name(name)?;
        }
        self.owned(id, agent_id).await?;

        let updated = self.repo.update(id, &patch).await?;
        info!("ReferralLinkService: updated link {}", id);

        self.changed(agent_id).await;
        Ok(updated)
    }

    pub async fn set_active(&self, id: &str, agent_id: &str, active: bool) -> Result<ReferralLink> {
        let patch = ReferralLinkPatch {
            is_active: Some(active),
            ..Default::default()
        };
        self.update(id, agent_id, patch).await
    }

    /// Delete a link. An id that no longer exists counts as deleted.
    pub async fn delete(&self, id: &str, agent_id: &str) -> Result<()> {
        match self.repo.get(id).await? {
            None => {
                debug!("Referral link {} already gone", id);
            }
            Some(link) if link.agent_id != agent_id => {
                warn!(
                    "Agent {} attempted to delete link {} owned by {}",
                    agent_id, id, link.agent_id
                );
                return Err(AgentlinkError::not_found(format!(
                    "Referral link '{}' not found",
                    id
                )));
            }
            Some(_) => {
                self.repo.delete(id).await?;
                info!("ReferralLinkService: deleted link {}", id);
            }
        }

        self.changed(agent_id).await;
        Ok(())
    }

    async fn owned(&self, id: &str, agent_id: &str) -> Result<ReferralLink> {
        self.repo
            .get(id)
            .await?
            .filter(|link| link.agent_id == agent_id)
            .ok_or_else(|| AgentlinkError::not_found(format!("Referral link '{}' not found", id)))
    }

    fn generation(&self, agent_id: &str) -> u64 {
        self.generations.get(agent_id).map_or(0, |g| *g)
    }

    async fn changed(&self, agent_id: &str) {
        *self.generations.entry(agent_id.to_string()).or_insert(0) += 1;
        self.list_cache.invalidate(agent_id).await;
        self.events.publish(AppEvent::ReferralLinksChanged {
            agent_id: agent_id.to_string(),
        });
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(AgentlinkError::validation("Link name must not be empty"));
    }
    Ok(())
}
