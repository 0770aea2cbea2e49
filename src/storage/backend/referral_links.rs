//! Referral link operations for SeaOrmStorage

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use tracing::{debug, info};

use super::converters::{link_to_update_model, model_to_referral_link, new_link_to_active_model};
use super::{SeaOrmStorage, retry};
use crate::errors::{AgentlinkError, Result};
use crate::storage::models::{NewReferralLink, ReferralLink, ReferralLinkPatch};
use crate::storage::traits::ReferralLinkRepository;

use migration::entities::referral_link;

#[async_trait]
impl ReferralLinkRepository for SeaOrmStorage {
    async fn list_by_agent(&self, agent_id: &str) -> Result<Vec<ReferralLink>> {
        let db = &self.db;
        let agent_owned = agent_id.to_string();

        let models = retry::with_retry(
            &format!("list_by_agent({})", agent_id),
            self.retry_config,
            || async {
                referral_link::Entity::find()
                    .filter(referral_link::Column::AgentId.eq(agent_owned.as_str()))
                    .order_by_desc(referral_link::Column::CreatedAt)
                    .order_by_desc(referral_link::Column::Id)
                    .all(db)
                    .await
            },
        )
        .await
        .map_err(|e| AgentlinkError::database_operation(format!("查询推荐链接失败: {}", e)))?;

        debug!("Loaded {} referral links for agent {}", models.len(), agent_id);
        Ok(models.into_iter().map(model_to_referral_link).collect())
    }

    async fn get(&self, id: &str) -> Result<Option<ReferralLink>> {
        let db = &self.db;
        let id_owned = id.to_string();

        let model = retry::with_retry(&format!("get({})", id), self.retry_config, || async {
            referral_link::Entity::find_by_id(id_owned.as_str()).one(db).await
        })
        .await
        .map_err(|e| AgentlinkError::database_operation(format!("查询推荐链接失败: {}", e)))?;

        Ok(model.map(model_to_referral_link))
    }

    async fn insert(&self, link: NewReferralLink) -> Result<ReferralLink> {
        let db = &self.db;
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now();
        let active_model = new_link_to_active_model(&link, &id, now);

        let model = retry::with_retry(&format!("insert({})", id), self.retry_config, || {
            let am = active_model.clone();
            async move { am.insert(db).await }
        })
        .await
        .map_err(|e| AgentlinkError::database_operation(format!("创建推荐链接失败: {}", e)))?;

        info!(
            "Referral link created: {} (agent: {})",
            model.id, model.agent_id
        );
        Ok(model_to_referral_link(model))
    }

    async fn update(&self, id: &str, patch: &ReferralLinkPatch) -> Result<ReferralLink> {
        let mut link = self
            .get(id)
            .await?
            .ok_or_else(|| AgentlinkError::not_found(format!("推荐链接不存在: {}", id)))?;

        patch.apply_to(&mut link, Utc::now());

        let db = &self.db;
        let active_model = link_to_update_model(&link);
        let model = retry::with_retry(&format!("update({})", id), self.retry_config, || {
            let am = active_model.clone();
            async move { am.update(db).await }
        })
        .await
        .map_err(|e| AgentlinkError::database_operation(format!("更新推荐链接失败: {}", e)))?;

        info!("Referral link updated: {}", id);
        Ok(model_to_referral_link(model))
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let db = &self.db;
        let id_owned = id.to_string();

        let result = retry::with_retry(&format!("delete({})", id), self.retry_config, || async {
            referral_link::Entity::delete_by_id(id_owned.as_str())
                .exec(db)
                .await
        })
        .await
        .map_err(|e| AgentlinkError::database_operation(format!("删除推荐链接失败: {}", e)))?;

        if result.rows_affected == 0 {
            debug!("Referral link {} did not exist, nothing deleted", id);
        } else {
            info!("Referral link deleted: {}", id);
        }
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "relational"
    }
}
